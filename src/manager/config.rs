//! Scheduler configuration.

/// Configuration for the thread's panel manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Run the consistency check after every pass and log what it finds.
    pub consistency_checks: bool,
    /// Erase the dirty area on the surface before panels repaint it.
    pub erase_dirty: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            consistency_checks: cfg!(debug_assertions),
            erase_dirty: true,
        }
    }
}

impl ManagerConfig {
    /// Builder: enable or disable the consistency check.
    #[must_use]
    pub const fn with_consistency_checks(mut self, enabled: bool) -> Self {
        self.consistency_checks = enabled;
        self
    }

    /// Builder: enable or disable erasing the dirty area.
    #[must_use]
    pub const fn with_erase_dirty(mut self, enabled: bool) -> Self {
        self.erase_dirty = enabled;
        self
    }
}
