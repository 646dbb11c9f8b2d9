//! Integration tests for the Seek profile: extremum tracking and the
//! dead-reckoned return leg.

use roach::config::{Behavior, RoachConfig};
use roach::control::maneuver::TurnKind;
use roach::fsm::context::ReturnPhase;
use roach::fsm::{StateId, Transition};

use crate::mock_hw::Rig;

fn seek() -> RoachConfig {
    RoachConfig {
        behavior: Behavior::Seek,
        ..RoachConfig::default()
    }
}

fn launched(light: u16) -> Rig {
    let mut rig = Rig::new(seek());
    rig.hw.light = light;
    let t = rig.tick().map(|t| t.to);
    assert_eq!(t, Some(StateId::Searching));
    rig
}

#[test]
fn search_returns_to_the_brightest_spot() {
    let mut rig = launched(600);
    rig.run_until(590);

    // New extremum resets the distance counter.
    rig.hw.light = 700;
    rig.tick(); // t=600
    assert_eq!(rig.app.context().light.extremum, 700);
    assert_eq!(rig.app.context().distance.value(), 0);

    // Twenty ticks at cruise past the extremum.
    rig.hw.light = 690;
    rig.run_until(800);
    assert_eq!(rig.app.context().light.extremum, 700);
    assert_eq!(rig.app.context().distance.value(), 400);

    rig.hw.bumpers(false, true);
    let t = rig.tick();
    assert_eq!(
        t,
        Some(Transition {
            from: StateId::Searching,
            to: StateId::Returning,
            rule: "collision",
        })
    );
    assert_eq!(rig.hw.wheels, (-10, -10));
    assert_eq!(rig.app.context().distance.value(), 420);

    rig.hw.bumpers(false, false);
    let mut backing_ticks = 0;
    while rig.app.context().return_phase == ReturnPhase::Backing {
        rig.tick();
        backing_ticks += 1;
        assert!(backing_ticks < 100, "never got home");
    }
    // Same number of ticks back as forward (contact tick included).
    assert_eq!(backing_ticks, 21);
    assert_eq!(rig.app.context().distance.value(), 0);
    assert_eq!(rig.state(), StateId::Returning);
    assert_eq!(rig.app.context().drive.targets(), (0, 0));

    let t = rig.tick_until_change(200).map(|t| (t.from, t.to, t.rule));
    assert_eq!(t, Some((StateId::Returning, StateId::Turning, "halted")));
    assert_eq!(rig.app.context().pending_turn.kind, TurnKind::Standard);
}

#[test]
fn contact_at_the_extremum_halts_at_once() {
    let mut rig = launched(600);
    rig.hw.bumpers(true, true);
    rig.tick();
    assert_eq!(rig.state(), StateId::Returning);
    rig.hw.bumpers(false, false);
    rig.tick();
    assert_eq!(rig.app.context().return_phase, ReturnPhase::Halting);
}

#[test]
fn return_leg_is_bounded_by_timeout() {
    let config = RoachConfig {
        return_timeout_ms: 100,
        ..seek()
    };
    let mut rig = Rig::new(config);
    rig.hw.light = 600;
    rig.tick();
    rig.run_until(600);

    rig.hw.bumpers(true, false);
    rig.tick();
    assert_eq!(rig.state(), StateId::Returning);
    let entered = rig.now();
    rig.hw.bumpers(false, false);

    while rig.app.context().return_phase == ReturnPhase::Backing {
        rig.tick();
    }
    assert_eq!(rig.now() - entered, 100);
    assert!(rig.app.context().distance.value() > 0, "timed out before home");
}

#[test]
fn turn_after_return_resumes_search() {
    let mut rig = launched(600);
    rig.hw.bumpers(true, false);
    rig.tick();
    rig.hw.bumpers(false, false);
    let t = rig.tick_until_change(200).map(|t| t.rule);
    assert_eq!(t, Some("halted"));
    let t = rig.tick_until_change(300).map(|t| (t.to, t.rule));
    assert_eq!(t, Some((StateId::Searching, "turn-complete")));
    assert_eq!(rig.app.context().light.extremum, 600);
}

#[test]
fn darkness_ends_the_search() {
    let mut rig = launched(600);
    rig.run_until(500);
    rig.hw.light = 300;
    let t = rig.tick().map(|t| (t.to, t.rule));
    assert_eq!(t, Some((StateId::Resting, "dark")));

    rig.hw.light = 650;
    let t = rig.tick().map(|t| t.to);
    assert_eq!(t, Some(StateId::Searching));
    assert_eq!(rig.app.context().light.reference, 650);
}
