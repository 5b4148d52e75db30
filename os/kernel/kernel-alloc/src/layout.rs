use kernel_memory_addresses::{PAGE_SIZE, PhysicalAddress, PhysicalPage};

/// The physical range the page allocator owns.
///
/// Everything from the first page boundary at or after the end of the kernel
/// image up to (excluding) the top of RAM.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MemoryLayout {
    kernel_end: PhysicalAddress,
    phys_top: PhysicalAddress,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("kernel image end {kernel_end} is not below the top of memory {phys_top}")]
    Inverted {
        kernel_end: PhysicalAddress,
        phys_top: PhysicalAddress,
    },
    #[error("no whole page fits between {kernel_end} and {phys_top}")]
    NoUsablePages {
        kernel_end: PhysicalAddress,
        phys_top: PhysicalAddress,
    },
}

/// Which reclaim precondition an address broke.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReclaimViolation {
    #[error("{0} is not page aligned")]
    Misaligned(PhysicalAddress),
    #[error("{addr} lies inside the kernel image (ends at {kernel_end})")]
    BelowKernelEnd {
        addr: PhysicalAddress,
        kernel_end: PhysicalAddress,
    },
    #[error("{addr} lies at or above the top of memory {phys_top}")]
    AbovePhysTop {
        addr: PhysicalAddress,
        phys_top: PhysicalAddress,
    },
}

impl MemoryLayout {
    /// Validates and creates a layout.
    ///
    /// # Errors
    /// - [`LayoutError::Inverted`] if `kernel_end >= phys_top`.
    /// - [`LayoutError::NoUsablePages`] if not a single whole page fits.
    pub fn new(kernel_end: PhysicalAddress, phys_top: PhysicalAddress) -> Result<Self, LayoutError> {
        if kernel_end >= phys_top {
            return Err(LayoutError::Inverted {
                kernel_end,
                phys_top,
            });
        }
        let end = kernel_end
            .checked_page_round_up()
            .and_then(|first| first.checked_add(PAGE_SIZE));
        match end {
            Some(end) if end <= phys_top => Ok(Self {
                kernel_end,
                phys_top,
            }),
            _ => Err(LayoutError::NoUsablePages {
                kernel_end,
                phys_top,
            }),
        }
    }

    #[must_use]
    pub const fn kernel_end(&self) -> PhysicalAddress {
        self.kernel_end
    }

    #[must_use]
    pub const fn phys_top(&self) -> PhysicalAddress {
        self.phys_top
    }

    /// Every whole page in `[round_up(kernel_end), phys_top)`, lowest first.
    #[allow(clippy::cast_possible_truncation)]
    pub fn usable_pages(&self) -> impl Iterator<Item = PhysicalPage> + use<> {
        let first = self.first_page().as_u64();
        let top = self.phys_top.as_u64();
        (first..top)
            .step_by(PAGE_SIZE as usize)
            .take_while(move |&p| p <= top - PAGE_SIZE)
            .map(|p| PhysicalPage::containing(PhysicalAddress::new(p)))
    }

    /// Number of pages [`usable_pages`](Self::usable_pages) yields.
    #[must_use]
    pub fn page_count(&self) -> usize {
        let first = self.first_page().as_u64();
        usize::try_from((self.phys_top.as_u64() - first) / PAGE_SIZE).unwrap_or(usize::MAX)
    }

    /// First page boundary at or after `kernel_end`; [`new`](Self::new)
    /// guarantees it exists and lies below `phys_top`.
    const fn first_page(&self) -> PhysicalAddress {
        match self.kernel_end.checked_page_round_up() {
            Some(first) => first,
            None => self.phys_top,
        }
    }

    /// Checks the three reclaim preconditions for `addr`.
    ///
    /// # Errors
    /// Returns the first violated precondition, checked in the order
    /// alignment, lower bound, upper bound.
    pub const fn check_frame(&self, addr: PhysicalAddress) -> Result<(), ReclaimViolation> {
        if !addr.is_page_aligned() {
            return Err(ReclaimViolation::Misaligned(addr));
        }
        if addr.as_u64() < self.kernel_end.as_u64() {
            return Err(ReclaimViolation::BelowKernelEnd {
                addr,
                kernel_end: self.kernel_end,
            });
        }
        if addr.as_u64() >= self.phys_top.as_u64() {
            return Err(ReclaimViolation::AbovePhysTop {
                addr,
                phys_top: self.phys_top,
            });
        }
        Ok(())
    }
}
