//! Reentrance guard

use std::cell::Cell;

/// Page-wide "bootloader is running" flag
///
/// A successful cache bust swaps in markup that loads the bootloader again;
/// the second run must see this flag and do nothing.
#[derive(Debug, Default)]
pub struct ReentranceGuard {
    entered: Cell<bool>,
}

impl ReentranceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag; returns false if it was already set
    pub fn enter(&self) -> bool {
        !self.entered.replace(true)
    }

    pub fn is_entered(&self) -> bool {
        self.entered.get()
    }
}
