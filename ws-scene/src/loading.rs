//! This module contains the [`LoadingTracker`], which decides when the loading screen can go.

use tracing::{debug, info};
use ws_config::LoadingConfig;

/// Watches the render loop and fires a ready signal exactly once.
///
/// The signal fires `transition_delay` seconds after the first frame on which the render context
/// is ready and at least `min_display` seconds have passed since the tracker started.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadingTracker {
    /// The shortest time the loading screen is shown for.
    min_display: f32,

    /// The pause between being ready and firing the signal.
    transition_delay: f32,

    /// When the signal is due, once the scene is ready.
    fire_at: Option<f32>,

    /// Whether the signal has fired.
    fired: bool,
}

impl LoadingTracker {
    /// Start tracking with the given timings.
    pub fn new(config: &LoadingConfig) -> Self {
        Self {
            min_display: config.min_display_secs,
            transition_delay: config.transition_delay_secs,
            fire_at: None,
            fired: false,
        }
    }

    /// Whether the signal has fired.
    pub fn is_ready(&self) -> bool {
        self.fired
    }

    /// Look at one frame.
    ///
    /// `elapsed` is the time since the tracker started. Returns true on the one frame where the
    /// ready signal fires, and false on every other frame.
    pub fn observe(&mut self, elapsed: f32, context_ready: bool) -> bool {
        if self.fired {
            return false;
        }

        if self.fire_at.is_none() && context_ready && elapsed >= self.min_display {
            debug!(elapsed, "Scene ready, waiting for the transition");
            self.fire_at = Some(elapsed + self.transition_delay);
        }

        match self.fire_at {
            Some(fire_at) if elapsed >= fire_at => {
                info!(elapsed, "Scene loaded");
                self.fired = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> LoadingTracker {
        LoadingTracker::new(&LoadingConfig {
            min_display_secs: 2.,
            transition_delay_secs: 0.5,
        })
    }

    #[test]
    fn fires_once_after_delay_test() {
        let mut tracker = tracker();
        let fired: Vec<_> = (0..=40)
            .map(|i| i as f32 * 0.125)
            .filter(|&elapsed| tracker.observe(elapsed, true))
            .collect();

        assert_eq!(fired, [2.5]);
        assert!(tracker.is_ready());
    }

    #[test]
    fn waits_for_the_context_test() {
        let mut tracker = tracker();
        assert!(!tracker.observe(1., true));
        assert!(!tracker.observe(3., false));
        assert!(!tracker.observe(5., false));

        // Ready for the first time at 6 seconds
        assert!(!tracker.observe(6., true));
        assert!(!tracker.observe(6.25, false));
        assert!(tracker.observe(6.5, false));
        assert!(!tracker.observe(7., true));
    }

    #[test]
    fn no_delay_fires_immediately_test() {
        let mut tracker = LoadingTracker::new(&LoadingConfig {
            min_display_secs: 0.,
            transition_delay_secs: 0.,
        });
        assert!(tracker.observe(0., true));
        assert!(!tracker.observe(0., true));
    }
}
