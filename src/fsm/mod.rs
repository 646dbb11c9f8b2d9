//! Rule-table finite state machine engine.
//!
//! Each state is one row of a fixed table, and each row carries an
//! ordered list of guarded rules:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  StateTable                                                       │
//! │  ┌───────────┬──────────┬──────────┬──────────────────────────┐   │
//! │  │ StateId   │ on_enter │ on_tick  │ rules (first match wins) │   │
//! │  ├───────────┼──────────┼──────────┼──────────────────────────┤   │
//! │  │ Resting   │ fn(ctx)  │    -     │ light                    │   │
//! │  │ Running   │ fn(ctx)  │    -     │ dark, collision, ...     │   │
//! │  │ Turning   │ fn(ctx)  │    -     │ turn-complete            │   │
//! │  │ Reversing │ fn(ctx)  │    -     │ reverse-complete         │   │
//! │  │ Searching │ fn(ctx)  │ fn(ctx)  │ dark, collision, ...     │   │
//! │  │ Returning │ fn(ctx)  │ fn(ctx)  │ back-at-extremum, halted │   │
//! │  └───────────┴──────────┴──────────┴──────────────────────────┘   │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every tick the engine runs the current state's `on_tick` bookkeeping,
//! then walks its rules in order.  The first rule whose guard holds has its
//! action run; if the action names a next state the engine transitions and
//! runs that state's `on_enter`.  When no guard holds the tick is a no-op.
//! At most one transition happens per tick.

pub mod context;
pub mod states;

use context::RoachContext;
use log::{debug, info};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all behavioural states.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Resting = 0,
    Running = 1,
    Turning = 2,
    Reversing = 3,
    Searching = 4,
    Returning = 5,
}

impl StateId {
    /// Total number of states; sizes the table array.
    pub const COUNT: usize = 6;

    pub fn name(self) -> &'static str {
        match self {
            Self::Resting => "Resting",
            Self::Running => "Running",
            Self::Turning => "Turning",
            Self::Reversing => "Reversing",
            Self::Searching => "Searching",
            Self::Returning => "Returning",
        }
    }
}

impl core::fmt::Display for StateId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and per-tick bookkeeping.
pub type StateActionFn = fn(&mut RoachContext);

/// Rule guard; must not mutate.
pub type GuardFn = fn(&RoachContext) -> bool;

/// Rule action.  Returns `Some(next)` to transition, `None` to stay.
pub type RuleActionFn = fn(&mut RoachContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// Table rows
// ---------------------------------------------------------------------------

/// One guarded transition rule.
pub struct Rule {
    /// Short name carried in logs and `StateChanged` events.
    pub name: &'static str,
    pub guard: GuardFn,
    pub action: RuleActionFn,
}

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array, no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    /// Runs before rule evaluation every tick spent in this state.
    pub on_tick: Option<StateActionFn>,
    /// Evaluated in order; the first guard that holds wins.
    pub rules: &'static [Rule],
}

/// Record of a transition taken by [`Fsm::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
    pub rule: &'static str,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut RoachContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Run `on_tick` bookkeeping for the current state.
    /// 2. Walk the rules; the first guard that holds has its action run.
    /// 3. If the action named a next state, transition and return it.
    pub fn tick(&mut self, ctx: &mut RoachContext) -> Option<Transition> {
        let row = &self.table[self.current];
        let (name, on_tick, rules) = (row.name, row.on_tick, row.rules);

        if let Some(bookkeeping) = on_tick {
            bookkeeping(ctx);
        }

        let rule = rules.iter().find(|rule| (rule.guard)(ctx))?;
        debug!("{}: rule '{}' fired", name, rule.name);
        let next = (rule.action)(ctx)?;
        Some(self.transition(next, rule.name, ctx))
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        self.table[self.current].id
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, rule: &'static str, ctx: &mut RoachContext) -> Transition {
        let from = self.current_state();
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {} ({})",
            self.table[self.current].name, self.table[next_idx].name, rule
        );

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }

        Transition {
            from,
            to: next_id,
            rule,
        }
    }
}
