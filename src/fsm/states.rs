//! Concrete state handlers, rule tables and the table builder.
//!
//! Every state owns an ordered, static list of rules.  Guards are plain
//! `fn(&RoachContext) -> bool`, actions are plain `fn` pointers, so the
//! whole behaviour is data that can be read top to bottom.
//!
//! ```text
//!             ┌──────────[dark]───────────┐
//!             ▼                           │
//!  RESTING ──[light]──▶ RUNNING / SEARCHING (cruise, per behaviour)
//!                         │  │  │  │
//!        [single bumper]──┘  │  │  └──[bored]──────▶ TURNING (standard)
//!        TURNING (evasive)   │  └─────[regressing]──▶ TURNING (emphatic)
//!                            └──[both bumpers]──────▶ REVERSING
//!
//!  REVERSING ──[reverse-complete]──▶ TURNING (recovery, recorded dir)
//!  TURNING   ──[turn-complete]─────▶ cruise state
//!  SEARCHING ──[any bumper]────────▶ RETURNING ──[halted]──▶ TURNING
//! ```
//!
//! Turning, Reversing and Returning run to completion and ignore darkness.

use super::context::{ReturnPhase, RoachContext};
use super::{Rule, StateDescriptor, StateId};
use crate::collision::{self, Maneuver};
use crate::control::maneuver::{TurnKind, TurnPlan};
use crate::progress::Progress;
use crate::timers::TimerId;
use log::{debug, info};

/// Rule name used by both cruise states for bumper contact.
pub const COLLISION_RULE: &str = "collision";

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Resting
        StateDescriptor {
            id: StateId::Resting,
            name: "Resting",
            on_enter: Some(resting_enter),
            on_tick: None,
            rules: &RESTING_RULES,
        },
        // Index 1: Running
        StateDescriptor {
            id: StateId::Running,
            name: "Running",
            on_enter: Some(running_enter),
            on_tick: None,
            rules: &RUNNING_RULES,
        },
        // Index 2: Turning
        StateDescriptor {
            id: StateId::Turning,
            name: "Turning",
            on_enter: Some(turning_enter),
            on_tick: None,
            rules: &TURNING_RULES,
        },
        // Index 3: Reversing
        StateDescriptor {
            id: StateId::Reversing,
            name: "Reversing",
            on_enter: Some(reversing_enter),
            on_tick: None,
            rules: &REVERSING_RULES,
        },
        // Index 4: Searching
        StateDescriptor {
            id: StateId::Searching,
            name: "Searching",
            on_enter: Some(searching_enter),
            on_tick: Some(searching_tick),
            rules: &SEARCHING_RULES,
        },
        // Index 5: Returning
        StateDescriptor {
            id: StateId::Returning,
            name: "Returning",
            on_enter: Some(returning_enter),
            on_tick: Some(returning_tick),
            rules: &RETURNING_RULES,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Rule tables
// ═══════════════════════════════════════════════════════════════════════════

static RESTING_RULES: [Rule; 1] = [Rule {
    name: "light",
    guard: is_light,
    action: to_cruise,
}];

static RUNNING_RULES: [Rule; 4] = [
    Rule {
        name: "dark",
        guard: is_dark,
        action: to_resting,
    },
    Rule {
        name: COLLISION_RULE,
        guard: bumper_contact,
        action: react_to_collision,
    },
    Rule {
        name: "regressing",
        guard: is_regressing,
        action: emphatic_turn,
    },
    Rule {
        name: "bored",
        guard: is_stagnant,
        action: standard_turn,
    },
];

static TURNING_RULES: [Rule; 1] = [Rule {
    name: "turn-complete",
    guard: dwell_expired,
    action: to_cruise,
}];

static REVERSING_RULES: [Rule; 1] = [Rule {
    name: "reverse-complete",
    guard: dwell_expired,
    action: recovery_turn,
}];

static SEARCHING_RULES: [Rule; 4] = [
    Rule {
        name: "dark",
        guard: is_dark,
        action: to_resting,
    },
    Rule {
        name: COLLISION_RULE,
        guard: bumper_contact,
        action: to_returning,
    },
    Rule {
        name: "regressing",
        guard: is_regressing,
        action: emphatic_turn,
    },
    Rule {
        name: "bored",
        guard: is_stagnant,
        action: standard_turn,
    },
];

static RETURNING_RULES: [Rule; 2] = [
    Rule {
        name: "back-at-extremum",
        guard: backed_to_extremum,
        action: halt,
    },
    Rule {
        name: "halted",
        guard: halted,
        action: standard_turn,
    },
];

// ═══════════════════════════════════════════════════════════════════════════
//  Guards
// ═══════════════════════════════════════════════════════════════════════════

fn is_dark(ctx: &RoachContext) -> bool {
    ctx.dark
}

fn is_light(ctx: &RoachContext) -> bool {
    !ctx.dark
}

fn bumper_contact(ctx: &RoachContext) -> bool {
    ctx.bumpers().is_contact()
}

fn is_regressing(ctx: &RoachContext) -> bool {
    ctx.progress_verdict() == Progress::Regressing
}

fn is_stagnant(ctx: &RoachContext) -> bool {
    ctx.progress_verdict() == Progress::Stagnant
}

fn dwell_expired(ctx: &RoachContext) -> bool {
    ctx.timer_expired(TimerId::Dwell)
}

fn backed_to_extremum(ctx: &RoachContext) -> bool {
    ctx.return_phase == ReturnPhase::Backing
        && (ctx.distance.is_home() || ctx.timer_expired(TimerId::Dwell))
}

fn halted(ctx: &RoachContext) -> bool {
    ctx.return_phase == ReturnPhase::Halting && ctx.drive.at_target()
}

// ═══════════════════════════════════════════════════════════════════════════
//  Rule actions
// ═══════════════════════════════════════════════════════════════════════════

fn to_cruise(ctx: &mut RoachContext) -> Option<StateId> {
    Some(ctx.cruise_state())
}

fn to_resting(_ctx: &mut RoachContext) -> Option<StateId> {
    Some(StateId::Resting)
}

fn react_to_collision(ctx: &mut RoachContext) -> Option<StateId> {
    match collision::react(ctx.bumpers())? {
        Maneuver::Evade(direction) => {
            ctx.pending_turn = TurnPlan::new(TurnKind::Evasive, direction);
            Some(StateId::Turning)
        }
        Maneuver::Reverse => {
            ctx.recorded_turn = ctx.last_turn;
            Some(StateId::Reversing)
        }
    }
}

fn to_returning(ctx: &mut RoachContext) -> Option<StateId> {
    info!("SEARCHING: contact {:?}, heading back", ctx.bumpers());
    Some(StateId::Returning)
}

fn random_turn(ctx: &mut RoachContext, kind: TurnKind) -> Option<StateId> {
    let direction = ctx.random_direction();
    ctx.pending_turn = TurnPlan::new(kind, direction);
    Some(StateId::Turning)
}

fn emphatic_turn(ctx: &mut RoachContext) -> Option<StateId> {
    random_turn(ctx, TurnKind::Emphatic)
}

fn standard_turn(ctx: &mut RoachContext) -> Option<StateId> {
    random_turn(ctx, TurnKind::Standard)
}

fn recovery_turn(ctx: &mut RoachContext) -> Option<StateId> {
    ctx.pending_turn = TurnPlan::new(TurnKind::Recovery, ctx.recorded_turn);
    Some(StateId::Turning)
}

fn halt(ctx: &mut RoachContext) -> Option<StateId> {
    ctx.drive.set_targets(0, 0);
    ctx.return_phase = ReturnPhase::Halting;
    debug!("RETURNING: at extremum (distance {}), stopping", ctx.distance.value());
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  RESTING: wheels stopped, waiting for light
// ═══════════════════════════════════════════════════════════════════════════

fn resting_enter(ctx: &mut RoachContext) {
    ctx.drive.set_targets(0, 0);
    ctx.timers.disarm(TimerId::Boredom);
    ctx.timers.disarm(TimerId::Dwell);
    info!("RESTING: dark ({}), stopping", ctx.light.current);
}

// ═══════════════════════════════════════════════════════════════════════════
//  RUNNING / SEARCHING: cruising forward
// ═══════════════════════════════════════════════════════════════════════════

fn begin_cruise(ctx: &mut RoachContext) {
    ctx.light.capture_reference();
    let speed = ctx.config.cruise_speed;
    ctx.drive.set_targets(speed, speed);
    ctx.timers.arm(TimerId::Boredom, ctx.now_ms, ctx.config.boredom_ms);
    ctx.timers.disarm(TimerId::Dwell);
}

fn running_enter(ctx: &mut RoachContext) {
    begin_cruise(ctx);
    info!("RUNNING: reference light {}", ctx.light.reference);
}

fn searching_enter(ctx: &mut RoachContext) {
    begin_cruise(ctx);
    ctx.light.extremum = ctx.light.current;
    ctx.distance.reset();
    info!("SEARCHING: reference light {}", ctx.light.reference);
}

fn searching_tick(ctx: &mut RoachContext) {
    let (left, right) = ctx.drive.current();
    ctx.distance.integrate(left, right);
    if ctx
        .progress
        .improves_on(ctx.light.current, ctx.light.extremum, ctx.config.search_margin)
    {
        ctx.light.extremum = ctx.light.current;
        ctx.distance.reset();
        debug!("SEARCHING: new extremum {}", ctx.light.extremum);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  TURNING: executing the staged turn plan
// ═══════════════════════════════════════════════════════════════════════════

fn turning_enter(ctx: &mut RoachContext) {
    let plan = ctx.pending_turn;
    let (left, right) = plan.wheel_speeds(&ctx.config);
    if plan.is_immediate() {
        ctx.drive.set_immediate(left, right);
    } else {
        ctx.drive.set_targets(left, right);
    }
    ctx.timers.arm(TimerId::Dwell, ctx.now_ms, plan.dwell_ms(&ctx.config));
    ctx.timers.disarm(TimerId::Boredom);
    ctx.last_turn = plan.direction;
    info!("TURNING: {:?} {:?}", plan.kind, plan.direction);
}

// ═══════════════════════════════════════════════════════════════════════════
//  REVERSING: backing off a frontal hit
// ═══════════════════════════════════════════════════════════════════════════

fn reversing_enter(ctx: &mut RoachContext) {
    let speed = -ctx.config.reverse_speed;
    ctx.drive.set_immediate(speed, speed);
    ctx.timers.arm(TimerId::Dwell, ctx.now_ms, ctx.config.reverse_ms);
    ctx.timers.disarm(TimerId::Boredom);
    info!("REVERSING: frontal hit, will turn {:?}", ctx.recorded_turn);
}

// ═══════════════════════════════════════════════════════════════════════════
//  RETURNING: backing up to the best light seen while searching
// ═══════════════════════════════════════════════════════════════════════════

fn returning_enter(ctx: &mut RoachContext) {
    let speed = -ctx.config.reverse_speed;
    ctx.drive.set_immediate(speed, speed);
    ctx.timers.arm(TimerId::Dwell, ctx.now_ms, ctx.config.return_timeout_ms);
    ctx.timers.disarm(TimerId::Boredom);
    ctx.return_phase = ReturnPhase::Backing;
    info!(
        "RETURNING: {} ahead of extremum {}",
        ctx.distance.value(),
        ctx.light.extremum
    );
}

fn returning_tick(ctx: &mut RoachContext) {
    let (left, right) = ctx.drive.current();
    ctx.distance.integrate(left, right);
}
