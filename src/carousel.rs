//! # Rotating Display Controller
//!
//! The state machine behind both sliders on the site. It owns:
//! - the current slide index over a fixed-length sequence
//! - the autoplay flag (logical, survives hover and hidden tabs)
//! - at most one pending autoplay timer
//!
//! ## Timer Lifecycle
//!
//! ```text
//!             play / resume (if none armed)
//!   ┌────────┐ ─────────────────────────────▶ ┌────────┐
//!   │ idle   │                                │ armed  │──┐ fires: next(), re-arm
//!   └────────┘ ◀───────────────────────────── └────────┘◀─┘
//!             pause / suspend (cancel)          go_to: cancel + re-arm
//! ```
//!
//! Each armed timer is tagged with a generation. Cancelling bumps nothing by itself, but the
//! callback only acts when its generation is still the armed one, so a callback that was
//! already due when `pause()` ran is discarded instead of advancing the slider.

use crate::scheduler::Scheduler;
use crate::{SlideChanged, SliderCommand};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

/// Configuration errors raised at construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    /// A rotation needs at least one slide
    #[error("slider needs at least one slide")]
    EmptySequence,

    /// Autoplay delay must be positive
    #[error("autoplay delay must be greater than zero")]
    ZeroDelay,
}

/// Construction parameters, fixed for the controller's lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RotationSettings {
    /// Number of slides (must be at least 1)
    pub slide_count: usize,
    /// Time between automatic advances
    pub autoplay_delay: Duration,
    /// Slide shown first, normalized modulo `slide_count`
    pub initial_index: usize,
    /// Whether autoplay starts enabled
    pub autoplay: bool,
}

impl RotationSettings {
    /// Settings with the defaults: start at slide 0 with autoplay on.
    pub fn new(slide_count: usize, autoplay_delay: Duration) -> Self {
        Self {
            slide_count,
            autoplay_delay,
            initial_index: 0,
            autoplay: true,
        }
    }

    pub fn with_initial_index(mut self, initial_index: usize) -> Self {
        self.initial_index = initial_index;
        self
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Check the settings without building a controller.
    pub fn validate(&self) -> Result<(), CarouselError> {
        if self.slide_count == 0 {
            return Err(CarouselError::EmptySequence);
        }
        if self.autoplay_delay.is_zero() {
            return Err(CarouselError::ZeroDelay);
        }
        Ok(())
    }
}

struct ArmedTimer<H> {
    handle: H,
    generation: u64,
}

struct Rotation<H> {
    slide_count: usize,
    delay: Duration,
    current: usize,
    playing: bool,
    suspended: bool,
    timer: Option<ArmedTimer<H>>,
    generation: u64,
}

type Listener = Box<dyn FnMut(SlideChanged)>;

struct Shared<S: Scheduler> {
    scheduler: S,
    rotation: RefCell<Rotation<S::Handle>>,
    listeners: RefCell<Vec<Listener>>,
}

/// Slider state machine with injected scheduling.
///
/// The controller is a handle: clones share the same slider, which is how a host hands it
/// to several event sources (buttons, keyboard, hover, visibility). It is single-threaded
/// by construction (`Rc` inside) and never blocks.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use slide_rotator::carousel::{RotatingDisplayController, RotationSettings};
/// use slide_rotator::scheduler::SimulatedClock;
///
/// let clock = SimulatedClock::new();
/// let hero = RotatingDisplayController::new(
///     RotationSettings::new(3, Duration::from_millis(5000)),
///     clock.clone(),
/// )
/// .unwrap();
///
/// clock.advance(Duration::from_millis(5000));
/// assert_eq!(hero.current_index(), 1);
///
/// hero.previous();
/// hero.previous();
/// assert_eq!(hero.current_index(), 2);
/// ```
pub struct RotatingDisplayController<S: Scheduler + 'static> {
    shared: Rc<Shared<S>>,
}

impl<S: Scheduler + 'static> Clone for RotatingDisplayController<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<S: Scheduler + 'static> RotatingDisplayController<S> {
    /// Build a controller. Arms the first autoplay timer when `settings.autoplay` is set.
    ///
    /// # Errors
    /// [`CarouselError::EmptySequence`] for zero slides, [`CarouselError::ZeroDelay`] for a
    /// zero autoplay delay. No controller is produced in either case.
    pub fn new(settings: RotationSettings, scheduler: S) -> Result<Self, CarouselError> {
        settings.validate()?;

        let controller = Self {
            shared: Rc::new(Shared {
                scheduler,
                rotation: RefCell::new(Rotation {
                    slide_count: settings.slide_count,
                    delay: settings.autoplay_delay,
                    current: settings.initial_index % settings.slide_count,
                    playing: settings.autoplay,
                    suspended: false,
                    timer: None,
                    generation: 0,
                }),
                listeners: RefCell::new(Vec::new()),
            }),
        };

        if settings.autoplay {
            let mut rotation = controller.shared.rotation.borrow_mut();
            controller.arm(&mut rotation);
        }

        Ok(controller)
    }

    pub fn current_index(&self) -> usize {
        self.shared.rotation.borrow().current
    }

    pub fn slide_count(&self) -> usize {
        self.shared.rotation.borrow().slide_count
    }

    pub fn autoplay_delay(&self) -> Duration {
        self.shared.rotation.borrow().delay
    }

    /// Whether autoplay is logically enabled.
    pub fn is_playing(&self) -> bool {
        self.shared.rotation.borrow().playing
    }

    /// Whether a transient interruption is holding the timer off.
    pub fn is_suspended(&self) -> bool {
        self.shared.rotation.borrow().suspended
    }

    /// Whether an autoplay callback is currently pending.
    pub fn is_timer_armed(&self) -> bool {
        self.shared.rotation.borrow().timer.is_some()
    }

    /// Register a listener for slide changes.
    ///
    /// Listeners run synchronously after the transition, once the controller's own state
    /// is released, so they can read the controller. A listener that navigates the same
    /// controller from inside the callback will not see its own nested notification.
    pub fn on_slide_changed<F>(&self, listener: F)
    where
        F: FnMut(SlideChanged) + 'static,
    {
        self.shared.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Show the slide at `index`, wrapping in both directions.
    ///
    /// Restarts the autoplay countdown when autoplay is running, so a freshly shown slide
    /// always gets a full delay.
    pub fn go_to(&self, index: i64) {
        let change = {
            let mut rotation = self.shared.rotation.borrow_mut();
            let len = rotation.slide_count as i64;
            let previous = rotation.current;
            rotation.current = index.rem_euclid(len) as usize;

            if rotation.playing {
                self.arm(&mut rotation);
            }

            SlideChanged {
                previous,
                current: rotation.current,
            }
        };

        debug!(
            previous = change.previous,
            current = change.current,
            "slide changed"
        );
        self.notify(change);
    }

    pub fn next(&self) {
        let current = self.current_index() as i64;
        self.go_to(current + 1);
    }

    pub fn previous(&self) {
        let current = self.current_index() as i64;
        self.go_to(current - 1);
    }

    /// Enable autoplay. Arms a timer unless one is already armed.
    pub fn play(&self) {
        let mut rotation = self.shared.rotation.borrow_mut();
        rotation.playing = true;
        if rotation.timer.is_none() {
            self.arm(&mut rotation);
        }
    }

    /// Disable autoplay and cancel any pending advance.
    pub fn pause(&self) {
        let mut rotation = self.shared.rotation.borrow_mut();
        rotation.playing = false;
        self.disarm(&mut rotation);
    }

    pub fn toggle(&self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Hold the timer off without touching the autoplay flag.
    pub fn suspend(&self) {
        let mut rotation = self.shared.rotation.borrow_mut();
        rotation.suspended = true;
        self.disarm(&mut rotation);
    }

    /// Undo [`suspend`](Self::suspend). Arms a timer only if autoplay is enabled.
    pub fn resume(&self) {
        let mut rotation = self.shared.rotation.borrow_mut();
        rotation.suspended = false;
        if rotation.playing && rotation.timer.is_none() {
            self.arm(&mut rotation);
        }
    }

    /// Dispatch a host command.
    pub fn apply(&self, command: SliderCommand) {
        match command {
            SliderCommand::Next => self.next(),
            SliderCommand::Previous => self.previous(),
            SliderCommand::GoTo(index) => self.go_to(index as i64),
            SliderCommand::Play => self.play(),
            SliderCommand::Pause => self.pause(),
            SliderCommand::TogglePlayback => self.toggle(),
            SliderCommand::Suspend => self.suspend(),
            SliderCommand::Resume => self.resume(),
        }
    }

    // -- Private Implementation --

    /// Cancel whatever is armed, then schedule a fresh advance.
    fn arm(&self, rotation: &mut Rotation<S::Handle>) {
        self.disarm(rotation);

        rotation.generation += 1;
        let generation = rotation.generation;
        let weak: Weak<Shared<S>> = Rc::downgrade(&self.shared);

        let handle = self.shared.scheduler.schedule(
            rotation.delay,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    RotatingDisplayController { shared }.on_timer(generation);
                }
            }),
        );

        rotation.timer = Some(ArmedTimer { handle, generation });
    }

    fn disarm(&self, rotation: &mut Rotation<S::Handle>) {
        if let Some(timer) = rotation.timer.take() {
            self.shared.scheduler.cancel(timer.handle);
        }
    }

    fn on_timer(&self, generation: u64) {
        {
            let mut rotation = self.shared.rotation.borrow_mut();
            let armed = rotation.timer.as_ref().map(|timer| timer.generation);
            if armed != Some(generation) {
                trace!(generation, "discarding stale autoplay callback");
                return;
            }
            rotation.timer = None;
        }

        self.next();
    }

    fn notify(&self, change: SlideChanged) {
        // Take the listeners out so they can call back into the controller.
        let mut listeners = std::mem::take(&mut *self.shared.listeners.borrow_mut());
        for listener in listeners.iter_mut() {
            listener(change);
        }

        let mut slot = self.shared.listeners.borrow_mut();
        let added = std::mem::replace(&mut *slot, listeners);
        slot.extend(added);
    }
}

impl<S: Scheduler + 'static> std::fmt::Debug for RotatingDisplayController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rotation = self.shared.rotation.borrow();
        f.debug_struct("RotatingDisplayController")
            .field("slide_count", &rotation.slide_count)
            .field("current", &rotation.current)
            .field("playing", &rotation.playing)
            .field("suspended", &rotation.suspended)
            .field("armed", &rotation.timer.is_some())
            .finish()
    }
}
