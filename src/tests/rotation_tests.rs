//! # Rotation Controller Properties
//!
//! End-to-end behavior of [`RotatingDisplayController`] against a simulated clock: index
//! arithmetic, the one-timer invariant, and the pause/suspend distinction. Every test drives
//! time by hand, so nothing here depends on wall-clock speed.

use slide_rotator::carousel::{CarouselError, RotatingDisplayController, RotationSettings};
use slide_rotator::scheduler::SimulatedClock;
use slide_rotator::SlideChanged;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const DELAY: Duration = Duration::from_millis(5000);
const TICK: Duration = Duration::from_millis(1);

fn build(n: usize) -> (RotatingDisplayController<SimulatedClock>, SimulatedClock) {
    let clock = SimulatedClock::new();
    let controller = RotatingDisplayController::new(RotationSettings::new(n, DELAY), clock.clone())
        .expect("valid settings");
    (controller, clock)
}

fn record(
    controller: &RotatingDisplayController<SimulatedClock>,
) -> Rc<RefCell<Vec<SlideChanged>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    controller.on_slide_changed(move |change| sink.borrow_mut().push(change));
    seen
}

/// `go_to(k)` lands on `((k % N) + N) % N` for every size and target tried.
#[test]
fn go_to_normalizes_any_integer() {
    for n in 1..=7usize {
        let (controller, _clock) = build(n);
        for k in -30i64..=30 {
            controller.go_to(k);
            let expected = (((k % n as i64) + n as i64) % n as i64) as usize;
            assert_eq!(
                controller.current_index(),
                expected,
                "go_to({}) with N={} should land on {}",
                k,
                n,
                expected
            );
        }
    }
}

/// `next()` then `previous()` is the identity from every start index.
#[test]
fn next_then_previous_returns_to_start() {
    for n in 1..=6usize {
        let (controller, _clock) = build(n);
        for start in 0..n {
            controller.go_to(start as i64);
            controller.next();
            controller.previous();
            assert_eq!(controller.current_index(), start, "N={} start={}", n, start);
        }
    }
}

/// A paused slider never advances, however long the clock runs.
#[test]
fn pause_stops_all_advances() {
    let (controller, clock) = build(5);
    let seen = record(&controller);

    clock.advance(DELAY - TICK);
    controller.pause();
    clock.advance(DELAY * 10);

    assert_eq!(controller.current_index(), 0);
    assert!(seen.borrow().is_empty());
    assert_eq!(clock.pending(), 0);
}

/// `play()` after `pause()` starts a fresh countdown rather than finishing the old one.
#[test]
fn play_after_pause_waits_a_full_delay() {
    let (controller, clock) = build(5);

    clock.advance(Duration::from_millis(4000));
    controller.pause();
    clock.advance(Duration::from_millis(3000));
    controller.play();

    clock.advance(DELAY - TICK);
    assert_eq!(controller.current_index(), 0, "advanced before a full delay");

    clock.advance(TICK);
    assert_eq!(controller.current_index(), 1);
}

/// Two suspends then one resume leave exactly one armed timer.
#[test]
fn double_suspend_single_resume_arms_one_timer() {
    let (controller, clock) = build(5);

    controller.suspend();
    controller.suspend();
    assert_eq!(clock.pending(), 0);
    assert!(!controller.is_timer_armed());

    controller.resume();
    assert_eq!(clock.pending(), 1);
    assert!(controller.is_timer_armed());

    controller.resume();
    assert_eq!(clock.pending(), 1, "a second resume must not stack a timer");
}

/// The N=5, 5000 ms walkthrough: tick, jump, tick.
#[test]
fn autoplay_then_jump_then_autoplay() {
    let (controller, clock) = build(5);

    clock.advance(DELAY);
    assert_eq!(controller.current_index(), 1);
    assert_eq!(clock.pending(), 1, "a new timer is armed after the advance");
    assert_eq!(clock.next_due(), Some(DELAY * 2));

    controller.go_to(3);
    assert_eq!(controller.current_index(), 3);
    assert_eq!(clock.pending(), 1, "the old timer was replaced, not joined");
    assert_eq!(clock.next_due(), Some(DELAY * 2));

    clock.advance(DELAY - TICK);
    assert_eq!(controller.current_index(), 3);
    clock.advance(TICK);
    assert_eq!(controller.current_index(), 4);
}

/// Manual navigation restarts the countdown instead of letting a stale timer fire early.
#[test]
fn navigation_restarts_countdown() {
    let (controller, clock) = build(4);

    clock.advance(Duration::from_millis(4500));
    controller.next();
    assert_eq!(controller.current_index(), 1);

    clock.advance(Duration::from_millis(1000));
    assert_eq!(controller.current_index(), 1, "stale timer fired");

    clock.advance(Duration::from_millis(4000));
    assert_eq!(controller.current_index(), 2);
}

/// No matter how navigation and playback calls interleave, there is never more than one
/// pending timer, and exactly one advance per elapsed delay.
#[test]
fn at_most_one_timer_under_any_interleaving() {
    let (controller, clock) = build(3);
    let seen = record(&controller);

    let at_most_one = |clock: &SimulatedClock| {
        assert!(clock.pending() <= 1, "more than one timer armed");
    };

    controller.next();
    at_most_one(&clock);
    controller.play();
    at_most_one(&clock);
    controller.resume();
    at_most_one(&clock);
    controller.go_to(7);
    at_most_one(&clock);
    controller.previous();
    at_most_one(&clock);
    controller.toggle();
    at_most_one(&clock);
    controller.toggle();
    at_most_one(&clock);
    controller.play();
    assert_eq!(clock.pending(), 1);

    let manual = seen.borrow().len();
    clock.advance(DELAY * 3);
    assert_eq!(seen.borrow().len(), manual + 3, "expected exactly one advance per delay");
}

/// A slider paused at the very instant its own advance is due does not advance.
#[test]
fn pause_inside_same_instant_drops_due_callback() {
    let clock = SimulatedClock::new();
    let slider = RotatingDisplayController::new(RotationSettings::new(3, DELAY), clock.clone())
        .expect("valid settings");
    let other = RotatingDisplayController::new(RotationSettings::new(2, DELAY), clock.clone())
        .expect("valid settings");

    // Both are due at DELAY; `slider` was armed first, so its listener runs before
    // `other`'s callback.
    let target = other.clone();
    slider.on_slide_changed(move |_| target.pause());

    clock.advance(DELAY);
    assert_eq!(slider.current_index(), 1);
    assert_eq!(other.current_index(), 0);
    assert!(!other.is_playing());
}

/// One slide: every navigation stays on 0 and still notifies.
#[test]
fn single_slide_rotation_is_a_no_op() {
    let (controller, clock) = build(1);
    let seen = record(&controller);

    controller.next();
    controller.previous();
    clock.advance(DELAY);

    assert_eq!(controller.current_index(), 0);
    assert_eq!(
        *seen.borrow(),
        vec![SlideChanged { previous: 0, current: 0 }; 3]
    );
}

/// Zero slides is a configuration error and yields no controller.
#[test]
fn empty_sequence_fails_fast() {
    let result =
        RotatingDisplayController::new(RotationSettings::new(0, DELAY), SimulatedClock::new());
    assert!(matches!(result, Err(CarouselError::EmptySequence)));
}

/// Two controllers on one clock do not disturb each other.
#[test]
fn independent_controllers_share_nothing() {
    let clock = SimulatedClock::new();
    let hero = RotatingDisplayController::new(
        RotationSettings::new(6, Duration::from_millis(5000)),
        clock.clone(),
    )
    .expect("valid settings");
    let testimonials = RotatingDisplayController::new(
        RotationSettings::new(5, Duration::from_millis(6000)),
        clock.clone(),
    )
    .expect("valid settings");

    hero.pause();
    clock.advance(Duration::from_millis(30_000));

    assert_eq!(hero.current_index(), 0);
    assert_eq!(testimonials.current_index(), 0, "30s / 6s = 5 advances wraps 5 slides to 0");
    assert!(testimonials.is_playing());

    clock.advance(Duration::from_millis(6000));
    assert_eq!(testimonials.current_index(), 1);
}
