// Pointer and viewport tracking. Publishes `ViewportState`; never animates anything itself.

use crate::types::{Pointer, ViewportSize, ViewportState};

/// Width at or below which the layout is considered mobile.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Mobile classification at the default breakpoint.
pub fn compute_is_mobile(width: f64) -> bool {
    width <= MOBILE_BREAKPOINT
}

/// Tracks the latest pointer position and viewport classification.
pub struct ViewportTracker {
    breakpoint: f64,
    state: ViewportState,
}

impl ViewportTracker {
    pub fn new(breakpoint: f64, size: ViewportSize) -> Self {
        ViewportTracker {
            breakpoint,
            state: ViewportState {
                is_mobile: size.width <= breakpoint,
                pointer: Pointer::default(),
                size,
            },
        }
    }

    pub fn compute_is_mobile(&self, width: f64) -> bool {
        width <= self.breakpoint
    }

    /// Record the pointer unconditionally. Rate limiting is the effect backend's job.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> ViewportState {
        self.state.pointer = Pointer::new(x, y);
        self.state
    }

    pub fn on_resize(&mut self, size: ViewportSize) -> ViewportState {
        self.state.size = size;
        self.state.is_mobile = self.compute_is_mobile(size.width);
        self.state
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Pointer offset from the viewport center, each axis in -0.5..0.5.
    pub fn normalized_pointer(&self) -> (f64, f64) {
        let ViewportState { pointer, size, .. } = self.state;
        if size.width <= 0.0 || size.height <= 0.0 {
            return (0.0, 0.0);
        }
        (pointer.x / size.width - 0.5, pointer.y / size.height - 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn breakpoint_is_inclusive() {
        assert!(compute_is_mobile(768.0));
        assert!(!compute_is_mobile(768.5));
        assert!(compute_is_mobile(0.0));
    }

    #[test]
    fn resize_reclassifies() {
        let mut tracker = ViewportTracker::new(MOBILE_BREAKPOINT, ViewportSize::new(1280.0, 800.0));
        assert!(!tracker.state().is_mobile);

        let state = tracker.on_resize(ViewportSize::new(375.0, 812.0));
        assert!(state.is_mobile);
        assert_eq!(state.size.width, 375.0);
    }

    #[test]
    fn pointer_is_recorded_and_normalized() {
        let mut tracker = ViewportTracker::new(MOBILE_BREAKPOINT, ViewportSize::new(1000.0, 500.0));
        let state = tracker.on_pointer_move(750.0, 125.0);
        assert_eq!(state.pointer, Pointer::new(750.0, 125.0));

        let (x, y) = tracker.normalized_pointer();
        assert!((x - 0.25).abs() < 1e-9);
        assert!((y + 0.25).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn is_mobile_matches_breakpoint(width in 0.0f64..4000.0) {
            prop_assert_eq!(compute_is_mobile(width), width <= 768.0);
        }

        #[test]
        fn tracker_agrees_with_pure_classification(width in 0.0f64..4000.0, height in 1.0f64..3000.0) {
            let mut tracker = ViewportTracker::new(MOBILE_BREAKPOINT, ViewportSize::new(1024.0, 768.0));
            let state = tracker.on_resize(ViewportSize::new(width, height));
            prop_assert_eq!(state.is_mobile, compute_is_mobile(width));
        }
    }
}
