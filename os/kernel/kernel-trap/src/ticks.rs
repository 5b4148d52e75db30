use kernel_sync::SpinLock;

/// Wakes everything sleeping on a channel.
pub trait Wakeup {
    fn wakeup(&self, channel: usize);
}

/// Global count of timer interrupts since boot.
///
/// Only the primary hart advances it. Sleepers wait on [`channel`](Self::channel).
pub struct TickCounter {
    ticks: SpinLock<u64>,
}

impl TickCounter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ticks: SpinLock::new(0),
        }
    }

    /// Advances the counter by one and wakes its sleepers.
    pub fn tick<W: Wakeup + ?Sized>(&self, waker: &W) {
        *self.ticks.lock_irq() += 1;
        waker.wakeup(self.channel());
    }

    pub fn now(&self) -> u64 {
        *self.ticks.lock_irq()
    }

    /// The wait channel for tick sleepers: the counter's own address.
    pub fn channel(&self) -> usize {
        core::ptr::from_ref(self).addr()
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}
