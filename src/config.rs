//! # Supervisor configuration.
//!
//! Provides [`Config`], the small typed configuration the core reads.
//! Watch-pattern matching itself happens in the external watcher; the
//! core only echoes the configured paths in its reload logs and honors
//! the fullscreen flag before restarting.

/// Configuration for one [`Daemon`](crate::Daemon) instance.
///
/// ## Field semantics
/// - `paths`: watched paths or glob patterns, echoed on every reload
/// - `fullscreen`: clear the terminal before each reload
/// - `event_capacity`: ring size of the emitted event channel (min 1)
#[derive(Clone, Debug)]
pub struct Config {
    /// Watched paths or glob patterns.
    ///
    /// The external watcher decides what these mean; the supervisor only
    /// reports them when logging a restart.
    pub paths: Vec<String>,

    /// Clear the display before each reload.
    pub fullscreen: bool,

    /// Capacity of the emitted event channel.
    ///
    /// The driver suspends when the consumer falls this far behind, so
    /// events are never dropped. Minimum value is 1 (clamped).
    pub event_capacity: usize,
}

impl Config {
    /// Returns the event channel capacity clamped to a minimum of 1.
    #[inline]
    pub fn event_capacity_clamped(&self) -> usize {
        self.event_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `paths = []` (nothing to echo)
    /// - `fullscreen = false`
    /// - `event_capacity = 32`
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            fullscreen: false,
            event_capacity: 32,
        }
    }
}
