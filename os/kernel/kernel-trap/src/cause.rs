//! Classification of raw `scause` values.

use kernel_registers::Scause;

/// What the trap path does with an `scause` value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrapCause {
    /// `ecall` from user mode.
    UserEnvCall,
    /// Supervisor external interrupt, routed through the PLIC.
    ExternalInterrupt,
    /// Supervisor software interrupt, raised by the machine-mode timer handler.
    SoftwareInterrupt,
    /// Anything else: faults, breakpoints, interrupts nobody enabled.
    Unrecognized(Scause),
}

impl TrapCause {
    #[must_use]
    pub const fn from_scause(scause: Scause) -> Self {
        let code = scause.code();
        if scause.interrupt() {
            if code & 0xff == Scause::SUPERVISOR_EXTERNAL {
                Self::ExternalInterrupt
            } else if code == Scause::SUPERVISOR_SOFTWARE {
                Self::SoftwareInterrupt
            } else {
                Self::Unrecognized(scause)
            }
        } else if code == Scause::USER_ENV_CALL {
            Self::UserEnvCall
        } else {
            Self::Unrecognized(scause)
        }
    }

    #[must_use]
    pub const fn is_interrupt(self) -> bool {
        matches!(self, Self::ExternalInterrupt | Self::SoftwareInterrupt)
    }
}

/// Human-readable name of a standard trap cause, for diagnostics.
#[must_use]
pub const fn describe_cause(scause: Scause) -> &'static str {
    if scause.interrupt() {
        return match scause.code() {
            Scause::SUPERVISOR_SOFTWARE => "supervisor software interrupt",
            Scause::SUPERVISOR_TIMER => "supervisor timer interrupt",
            Scause::SUPERVISOR_EXTERNAL => "supervisor external interrupt",
            _ => "unknown interrupt",
        };
    }

    match scause.code() {
        Scause::INSTRUCTION_MISALIGNED => "instruction address misaligned",
        Scause::INSTRUCTION_ACCESS_FAULT => "instruction access fault",
        Scause::ILLEGAL_INSTRUCTION => "illegal instruction",
        Scause::BREAKPOINT => "breakpoint",
        Scause::LOAD_MISALIGNED => "load address misaligned",
        Scause::LOAD_ACCESS_FAULT => "load access fault",
        Scause::STORE_MISALIGNED => "store/AMO address misaligned",
        Scause::STORE_ACCESS_FAULT => "store/AMO access fault",
        Scause::USER_ENV_CALL => "environment call from U-mode",
        Scause::SUPERVISOR_ENV_CALL => "environment call from S-mode",
        Scause::INSTRUCTION_PAGE_FAULT => "instruction page fault",
        Scause::LOAD_PAGE_FAULT => "load page fault",
        Scause::STORE_PAGE_FAULT => "store/AMO page fault",
        _ => "unknown exception",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_interrupt_matches_on_low_byte() {
        let scause = Scause::from_bits(0x8000_0000_0000_0009);
        assert_eq!(TrapCause::from_scause(scause), TrapCause::ExternalInterrupt);
        assert_eq!(
            TrapCause::from_scause(Scause::interrupt_code(0x109)),
            TrapCause::ExternalInterrupt
        );
    }

    #[test]
    fn software_interrupt_requires_exact_code() {
        let scause = Scause::from_bits(0x8000_0000_0000_0001);
        assert_eq!(TrapCause::from_scause(scause), TrapCause::SoftwareInterrupt);

        let wide = Scause::interrupt_code(0x101);
        assert_eq!(TrapCause::from_scause(wide), TrapCause::Unrecognized(wide));
    }

    #[test]
    fn only_user_ecall_is_a_syscall() {
        assert_eq!(TrapCause::from_scause(Scause::from_bits(8)), TrapCause::UserEnvCall);

        let s_ecall = Scause::exception_code(Scause::SUPERVISOR_ENV_CALL);
        assert_eq!(TrapCause::from_scause(s_ecall), TrapCause::Unrecognized(s_ecall));

        // Exception code 9 is not an external interrupt without the interrupt bit.
        assert!(!TrapCause::from_scause(s_ecall).is_interrupt());
    }

    #[test]
    fn timer_interrupt_is_not_routed() {
        let timer = Scause::interrupt_code(Scause::SUPERVISOR_TIMER);
        assert_eq!(TrapCause::from_scause(timer), TrapCause::Unrecognized(timer));
        assert_eq!(describe_cause(timer), "supervisor timer interrupt");
    }

    #[test]
    fn descriptions() {
        assert_eq!(
            describe_cause(Scause::exception_code(Scause::LOAD_PAGE_FAULT)),
            "load page fault"
        );
        assert_eq!(describe_cause(Scause::exception_code(42)), "unknown exception");
        assert_eq!(describe_cause(Scause::interrupt_code(3)), "unknown interrupt");
    }
}
