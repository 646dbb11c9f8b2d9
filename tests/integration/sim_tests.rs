//! Closed-loop runs against the simulated arena.

use roach::adapters::sim::Simulator;
use roach::app::ports::ClockPort;
use roach::app::service::RoachService;
use roach::config::{Behavior, RoachConfig};
use roach::fsm::StateId;
use roach::random::ClockResidue;

use crate::mock_hw::{ManualClock, RecordingSink};

struct Closed {
    app: RoachService,
    arena: Simulator,
    clock: ManualClock,
    sink: RecordingSink,
}

impl Closed {
    fn new(config: RoachConfig) -> Self {
        let mut app = RoachService::new(config, Box::new(ClockResidue));
        let mut arena = Simulator::centred();
        let clock = ManualClock::default();
        let mut sink = RecordingSink::default();
        arena.advance_to(0);
        app.start(&mut arena, &clock, &mut sink);
        Self {
            app,
            arena,
            clock,
            sink,
        }
    }

    fn run_for(&mut self, ms: u64) {
        let end = self.clock.now_ms() + ms;
        while self.clock.now_ms() < end {
            self.clock.advance(10);
            self.arena.advance_to(self.clock.now_ms());
            self.app.tick(&mut self.arena, &self.clock, &mut self.sink);

            let p = self.arena.pose();
            assert!((0.0..=2000.0).contains(&p.x) && (0.0..=2000.0).contains(&p.y));
        }
    }
}

#[test]
fn roams_the_lit_arena_and_rests_when_the_lamp_goes_out() {
    let mut run = Closed::new(RoachConfig::default());
    run.run_for(60_000);

    let transitions = run.sink.transitions();
    assert_eq!(
        transitions.first().copied(),
        Some((StateId::Resting, StateId::Running, "light"))
    );
    assert!(transitions.len() > 1);

    run.arena.set_lamp(false);
    run.run_for(10_000);
    assert_eq!(run.app.state(), StateId::Resting);
    assert_eq!(run.app.context().drive.current(), (0, 0));
}

#[test]
fn seek_profile_stays_total_in_closed_loop() {
    let config = RoachConfig {
        behavior: Behavior::Seek,
        ..RoachConfig::default()
    };
    let mut run = Closed::new(config);
    run.run_for(60_000);

    let transitions = run.sink.transitions();
    assert_eq!(
        transitions.first().map(|t| t.1),
        Some(StateId::Searching)
    );
    for (_, to, _) in transitions {
        assert_ne!(to, StateId::Running, "Seek never cruises in Running");
        assert_ne!(to, StateId::Reversing, "Seek returns instead of reversing");
    }
}
