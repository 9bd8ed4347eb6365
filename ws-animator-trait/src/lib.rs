//! This crate provides the [`Animator`] trait and nothing else.
//!
//! It's structured like this to avoid dependency cycles.

/// A snapshot of the scene clock for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the scene was mounted.
    pub elapsed: f32,

    /// Seconds since the previous frame. Never negative or non-finite.
    pub delta: f32,
}

impl FrameTime {
    /// Build a frame time, treating a negative or non-finite delta as zero.
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self {
            elapsed,
            delta: sanitise_delta(delta),
        }
    }

    /// Advance the clock by `delta` seconds and return the new snapshot.
    #[must_use = ".advanced() returns a new frame time and does not mutate in-place"]
    pub fn advanced(self, delta: f32) -> Self {
        let delta = sanitise_delta(delta);
        Self {
            elapsed: self.elapsed + delta,
            delta,
        }
    }
}

/// Treat a negative or non-finite frame delta as zero.
pub fn sanitise_delta(delta: f32) -> f32 {
    if delta.is_finite() && delta > 0. {
        delta
    } else {
        0.
    }
}

/// The longest single step the scene clock will take, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Sanitise a frame delta and cap it at [`MAX_FRAME_DELTA`], so that a frame hitch can't blow
/// up a simulation.
pub fn clamp_frame_delta(delta: f32) -> f32 {
    sanitise_delta(delta).min(MAX_FRAME_DELTA)
}

/// The trait implemented by everything that changes from frame to frame.
///
/// An animator owns all the state it touches. The scene calls [`tick`](Self::tick) exactly once
/// per frame for every animator that is currently registered, and never calls it for one that
/// has been disabled.
pub trait Animator {
    /// The read-only parameters this animator reads every frame.
    type Config;

    /// Advance the animation by one frame.
    ///
    /// This must not block and must not regenerate any geometry.
    fn tick(&mut self, time: FrameTime, config: &Self::Config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advanced_test() {
        let time = FrameTime::default().advanced(0.5).advanced(0.25);
        assert_eq!(time, FrameTime::new(0.75, 0.25));

        let time = time.advanced(f32::NAN).advanced(-3.);
        assert_eq!(time, FrameTime::new(0.75, 0.));
    }

    #[test]
    fn clamp_frame_delta_test() {
        assert_eq!(clamp_frame_delta(0.016), 0.016);
        assert_eq!(clamp_frame_delta(1e6), MAX_FRAME_DELTA);
        assert_eq!(clamp_frame_delta(f32::INFINITY), 0.);
        assert_eq!(clamp_frame_delta(-1.), 0.);
    }
}
