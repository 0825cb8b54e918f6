//! # Stat Counter Animation
//!
//! The "years of service / clients protected" numbers count up from zero when they scroll
//! into view. The animation is a fixed 2 second ramp at roughly 60 fps, expressed here as an
//! iterator of the values to display, one per frame.

use std::time::Duration;

/// Total ramp time.
pub const COUNTER_DURATION: Duration = Duration::from_millis(2000);

/// One animation frame.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Count-up frames for a target number.
///
/// Each frame adds `target / 125` and shows the floor of the running total; the final frame
/// shows the exact target.
///
/// # Example
/// ```
/// use slide_rotator::counter::CounterAnimation;
///
/// let frames: Vec<u32> = CounterAnimation::new(250).collect();
/// assert_eq!(frames.first(), Some(&2));
/// assert_eq!(frames.last(), Some(&250));
/// ```
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: u32,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: u32) -> Self {
        let frames = COUNTER_DURATION.as_millis() as f64 / FRAME_INTERVAL.as_millis() as f64;
        Self {
            target,
            increment: target as f64 / frames,
            current: 0.0,
            finished: false,
        }
    }

    pub fn target(&self) -> u32 {
        self.target
    }
}

impl Iterator for CounterAnimation {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.finished {
            return None;
        }

        self.current += self.increment;
        if self.current < self.target as f64 {
            Some(self.current.floor() as u32)
        } else {
            self.finished = true;
            Some(self.target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_target_is_single_frame() {
        let frames: Vec<u32> = CounterAnimation::new(0).collect();
        assert_eq!(frames, vec![0]);
    }

    #[test]
    fn test_frames_are_monotonic_and_end_on_target() {
        let frames: Vec<u32> = CounterAnimation::new(500).collect();
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*frames.last().unwrap(), 500);
        // 125 frames of ramp, give or take float rounding on the last step
        assert!((124..=126).contains(&frames.len()), "got {} frames", frames.len());
    }

    #[test]
    fn test_small_targets_hold_at_zero_first() {
        let mut animation = CounterAnimation::new(10);
        assert_eq!(animation.next(), Some(0));
        assert_eq!(animation.target(), 10);
    }
}
