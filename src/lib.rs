//! # Slide Rotator Core Library
//!
//! This library provides the interactive behavior of a single-page security-services site as
//! headless state machines. Nothing here touches a browser: a host layer (a web shell, a
//! terminal demo, a test) feeds events in and renders whatever the state says.
//!
//! ## Design Philosophy
//!
//! ### One Controller, Many Sliders
//! The hero slider and the testimonials slider share a single
//! [`RotatingDisplayController`](carousel::RotatingDisplayController). Their differences
//! (timing, indicator dots, key bindings) are configuration, not code.
//!
//! ### Injected Time
//! The controller never reads a clock. It asks a [`Scheduler`](scheduler::Scheduler) to run a
//! callback once after a delay and keeps the returned handle so it can cancel it:
//! - **Tests**: [`SimulatedClock`](scheduler::SimulatedClock) advances time by hand
//! - **Binary**: [`TokioScheduler`](scheduler::TokioScheduler) runs callbacks on a `LocalSet`
//!
//! ### Timer Discipline
//! At most one autoplay callback is pending per controller. Every armed timer carries a
//! generation number and a callback that arrives with a stale generation is dropped, so a
//! cancelled timer can never advance the slider even if it was already due.
//!
//! ## Core Types
//!
//! - [`SlideChanged`]: what subscribers receive after every navigation
//! - [`SliderCommand`]: the command surface a host dispatches through `apply`

pub mod bindings;
pub mod carousel;
pub mod config;
pub mod contact;
pub mod counter;
pub mod gallery;
pub mod renderer;
pub mod scheduler;
pub mod theme;

/// Notification delivered to `on_slide_changed` subscribers.
///
/// Emitted exactly once per `go_to` (and therefore per `next`, `previous`, and autoplay
/// advance), including the degenerate case where `previous == current` on a one-slide
/// sequence.
///
/// # Example
/// ```
/// use slide_rotator::SlideChanged;
///
/// let change = SlideChanged { previous: 4, current: 0 };
/// assert_ne!(change.previous, change.current);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideChanged {
    /// Index that was active before the transition
    pub previous: usize,
    /// Index that is active now
    pub current: usize,
}

/// Commands a host can dispatch to a controller.
///
/// Keyboard presses, button clicks, and environment signals are all translated into one of
/// these by the [`bindings`] module or by the host itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliderCommand {
    /// Advance one slide
    Next,
    /// Go back one slide
    Previous,
    /// Jump to an indicator position
    GoTo(usize),
    /// Enable autoplay
    Play,
    /// Disable autoplay
    Pause,
    /// Play/pause button
    TogglePlayback,
    /// Transient interruption (hover, hidden tab)
    Suspend,
    /// End of a transient interruption
    Resume,
}
