//! Integration tests for the Roam profile: RoachService → FSM → drive.
//!
//! Default calibration throughout: 10 ms tick, 50 ms ramp step, 3 s
//! boredom, 1 s evasive turn, 1.5 s reverse.

use roach::app::events::AppEvent;
use roach::collision::BumperPattern;
use roach::config::{LightGoal, RoachConfig};
use roach::control::Side;
use roach::control::maneuver::{TurnDirection, TurnKind};
use roach::fsm::{StateId, Transition};
use roach::random;

use crate::mock_hw::Rig;

/// Started, then lit at `light` on the first tick (t=10).
fn launched(light: u16) -> Rig {
    let mut rig = Rig::new(RoachConfig::default());
    rig.hw.light = light;
    let t = rig.tick();
    assert_eq!(
        t,
        Some(Transition {
            from: StateId::Resting,
            to: StateId::Running,
            rule: "light",
        })
    );
    rig
}

// ── Resting ──────────────────────────────────────────────────

#[test]
fn dark_start_rests_without_moving() {
    let mut rig = Rig::new(RoachConfig::default());
    rig.hw.light = 300;
    rig.run_until(1000);

    assert_eq!(rig.state(), StateId::Resting);
    // The start pair plus one refresh per ramp tick, all stopped.
    assert_eq!(rig.hw.writes.len(), 2 * 21);
    assert!(rig.hw.writes.iter().all(|&(_, speed)| speed == 0));
    assert!(rig.sink.transitions().is_empty());
    assert_eq!(rig.sink.events[0], AppEvent::Started(StateId::Resting));
}

#[test]
fn reading_between_thresholds_does_not_wake() {
    let mut rig = Rig::new(RoachConfig::default());
    rig.hw.light = 450;
    rig.run_until(1000);
    assert_eq!(rig.state(), StateId::Resting);
}

#[test]
fn reading_between_thresholds_keeps_running() {
    let mut rig = launched(520);
    rig.hw.light = 480;
    rig.run_until(2000);
    assert_eq!(rig.state(), StateId::Running);
}

// ── Launch and ramp ──────────────────────────────────────────

#[test]
fn launch_captures_reference_and_ramps_to_cruise() {
    let mut rig = launched(600);
    assert_eq!(rig.app.context().light.reference, 600);

    rig.run_until(490);
    assert_eq!(rig.hw.wheels, (9, 9));
    rig.tick();
    assert_eq!(rig.hw.wheels, (10, 10));

    let expected: Vec<i8> = (0..=10).collect();
    assert_eq!(rig.hw.wheel_history(Side::Left), expected);
    assert_eq!(rig.hw.wheel_history(Side::Right), expected);
}

#[test]
fn darkness_stops_the_run() {
    let mut rig = launched(600);
    rig.run_until(600);
    rig.hw.light = 350;
    let t = rig.tick().map(|t| t.rule);
    assert_eq!(t, Some("dark"));
    assert_eq!(rig.state(), StateId::Resting);
    assert_eq!(rig.app.context().drive.targets(), (0, 0));

    rig.run_until(1200);
    assert_eq!(rig.hw.wheels, (0, 0));
}

// ── Collisions ───────────────────────────────────────────────

#[test]
fn single_bumper_evades_immediately_then_resumes() {
    let mut rig = launched(600);
    rig.run_until(600);

    rig.hw.bumpers(true, false);
    let t = rig.tick();
    assert_eq!(
        t,
        Some(Transition {
            from: StateId::Running,
            to: StateId::Turning,
            rule: "collision",
        })
    );
    // Full reverse on the right wheel, no ramp.
    assert_eq!(rig.hw.wheels, (5, -10));
    let tail = &rig.sink.events[rig.sink.events.len() - 2..];
    assert_eq!(tail[0], AppEvent::Collision(BumperPattern::Left));
    assert!(matches!(tail[1], AppEvent::StateChanged { .. }));

    rig.hw.bumpers(false, false);
    rig.run_until(1600);
    assert_eq!(rig.state(), StateId::Turning);
    let t = rig.tick().map(|t| t.rule);
    assert_eq!(t, Some("turn-complete"));
    assert_eq!(rig.state(), StateId::Running);
    // Forward cruise restored, reached through the ramp.
    assert_eq!(rig.app.context().drive.targets(), (10, 10));
    rig.run_until(2700);
    assert_eq!(rig.hw.wheels, (10, 10));
}

#[test]
fn frontal_hit_reverses_then_turns_the_last_way() {
    let mut rig = launched(600);
    rig.run_until(600);

    // Left bumper: evade right, so the last turn is right.
    rig.hw.bumpers(true, false);
    rig.tick();
    rig.hw.bumpers(false, false);
    rig.run_until(1610);
    assert_eq!(rig.state(), StateId::Running);

    rig.hw.bumpers(true, true);
    let t = rig.tick().map(|t| (t.to, t.rule));
    assert_eq!(t, Some((StateId::Reversing, "collision")));
    assert_eq!(rig.hw.wheels, (-10, -10));
    assert!(rig.sink.events.contains(&AppEvent::Collision(BumperPattern::Both)));

    rig.hw.bumpers(false, false);
    rig.run_until(3110);
    assert_eq!(rig.state(), StateId::Reversing);
    let t = rig.tick().map(|t| t.rule);
    assert_eq!(t, Some("reverse-complete"));

    let plan = rig.app.context().pending_turn;
    assert_eq!(plan.kind, TurnKind::Recovery);
    assert_eq!(plan.direction, TurnDirection::Right);
    assert_eq!(rig.hw.wheels, (5, -10));
}

#[test]
fn collision_outranks_regression() {
    let mut rig = launched(800);
    rig.hw.light = 700;
    rig.hw.bumpers(false, true);
    let t = rig.tick().map(|t| t.rule);
    assert_eq!(t, Some("collision"));
    assert_eq!(rig.app.context().pending_turn.kind, TurnKind::Evasive);
    assert_eq!(rig.hw.wheels, (-10, 5));
}

#[test]
fn turning_runs_to_completion_in_the_dark() {
    let mut rig = launched(600);
    rig.hw.bumpers(true, false);
    rig.tick(); // t=20
    rig.hw.bumpers(false, false);
    rig.hw.light = 100;
    rig.run_until(1010);
    assert_eq!(rig.state(), StateId::Turning);

    rig.tick();
    rig.tick();
    assert_eq!(
        rig.sink.transitions(),
        vec![
            (StateId::Resting, StateId::Running, "light"),
            (StateId::Running, StateId::Turning, "collision"),
            (StateId::Turning, StateId::Running, "turn-complete"),
            (StateId::Running, StateId::Resting, "dark"),
        ]
    );
}

// ── Progress ─────────────────────────────────────────────────

#[test]
fn stagnation_turn_fires_exactly_at_boredom_expiry() {
    let mut rig = launched(600);
    rig.run_until(3000);
    assert_eq!(rig.state(), StateId::Running);
    assert_eq!(rig.sink.transitions().len(), 1);

    let t = rig.tick().map(|t| t.rule);
    assert_eq!(rig.now(), 3010);
    assert_eq!(t, Some("bored"));

    let plan = rig.app.context().pending_turn;
    assert_eq!(plan.kind, TurnKind::Standard);
    assert_eq!(plan.direction, TurnDirection::Left);
    // Ramped: targets move, wheels do not jump.
    assert_eq!(rig.app.context().drive.targets(), (0, 10));
    assert_eq!(rig.hw.wheels, (10, 10));
}

#[test]
fn regression_turns_emphatically_with_ramp() {
    let mut rig = launched(800);
    rig.hw.light = 700;
    let t = rig.tick().map(|t| t.rule);
    assert_eq!(t, Some("regressing"));
    assert_eq!(rig.app.context().pending_turn.kind, TurnKind::Emphatic);
    assert_eq!(rig.app.context().drive.targets(), (-10, 10));
    assert_eq!(rig.hw.wheels, (0, 0));

    rig.run_until(50);
    assert_eq!(rig.hw.wheels, (-1, 1));
}

#[test]
fn darker_goal_turns_away_from_brightening() {
    let config = RoachConfig {
        light_goal: LightGoal::Darker,
        ..RoachConfig::default()
    };
    let mut rig = Rig::new(config);
    rig.hw.light = 600;
    rig.tick();
    rig.hw.light = 700;
    let t = rig.tick().map(|t| t.rule);
    assert_eq!(t, Some("regressing"));
    assert_eq!(rig.app.context().pending_turn.kind, TurnKind::Emphatic);
}

#[test]
fn darker_goal_counts_dimming_as_progress() {
    let config = RoachConfig {
        light_goal: LightGoal::Darker,
        ..RoachConfig::default()
    };
    let mut rig = Rig::new(config);
    rig.hw.light = 600;
    rig.tick();
    // Dimmer by more than the margin but still above the light threshold.
    rig.hw.light = 500;
    rig.run_until(4000);
    assert_eq!(rig.state(), StateId::Running);
    assert_eq!(rig.sink.transitions().len(), 1);
}

// ── Reporting and determinism ────────────────────────────────

#[test]
fn telemetry_every_report_period() {
    let mut rig = Rig::new(RoachConfig::default());
    rig.hw.light = 300;
    rig.run_until(2000);
    assert_eq!(rig.sink.telemetry_count(), 4);
}

#[test]
fn report_period_does_not_stretch_to_tick_boundaries() {
    let config = RoachConfig {
        report_period_ms: 35,
        ..RoachConfig::default()
    };
    let mut rig = Rig::new(config);
    rig.hw.light = 300;
    rig.run_until(350);
    // Deadlines 35, 70, ..., 350.
    assert_eq!(rig.sink.telemetry_count(), 10);
}

#[test]
fn same_seed_same_run() {
    let run = || {
        let mut rig = Rig::with_random(RoachConfig::default(), random::from_seed(Some(42)));
        rig.hw.light = 600;
        rig.run_until(20_000);
        (rig.sink.transitions(), rig.hw.writes)
    };
    let (a_transitions, a_writes) = run();
    let (b_transitions, b_writes) = run();
    assert!(a_transitions.len() > 4);
    assert_eq!(a_transitions, b_transitions);
    assert_eq!(a_writes, b_writes);
}
