use dt_core::{Coord, Rect};
use dt_sim::facade::World;
use dt_sim::WorldConfig;

use crate::command::Command;
use crate::query::{Query, QueryResponse};
use crate::sink::{EventSink, NoopSink};

fn test_world() -> World {
    let mut config = WorldConfig::default();
    config.block_size = 8;
    config.max_blocks = 16;
    World::with_default_terrain(config)
}

#[test]
fn spawn_command_then_agent_query_round_trips() {
    let mut world = test_world();
    Command::MoveViewport { dx: 0, dy: 0, distance: 1 }.apply(&mut world);
    for _ in 0..5 {
        world.tick(0.1);
    }

    let id: dt_core::AgentId = "scout".into();
    Command::SpawnAgent { id: id.clone(), coord: Coord::new(0, 0) }.apply(&mut world);
    for _ in 0..3 {
        world.tick(0.1);
    }

    let response = Query::Agent { id: id.clone() }.run(&world).expect("agent should exist");
    match response {
        QueryResponse::MaybeAgent(Some(agent)) => assert_eq!(agent.id, id),
        other => panic!("expected MaybeAgent(Some(..)), got {other:?}"),
    }
}

#[test]
fn query_for_unknown_agent_is_an_error() {
    let world = test_world();
    let result = Query::Agent { id: "ghost".into() }.run(&world);
    assert!(result.is_err());
}

#[test]
fn block_count_query_matches_facade() {
    let mut world = test_world();
    Command::MoveViewport { dx: 0, dy: 0, distance: 1 }.apply(&mut world);
    world.tick(0.1);

    let expected = world.block_count();
    let response = Query::BlockCount.run(&world).unwrap();
    match response {
        QueryResponse::Count(n) => assert_eq!(n, expected),
        other => panic!("expected Count(..), got {other:?}"),
    }
}

#[test]
fn blocks_for_rect_query_matches_facade() {
    let world = test_world();
    let rect = Rect::new(0, 0, 16, 16);
    let expected = world.blocks_for_rect(rect);
    let response = Query::BlocksForRect { rect }.run(&world).unwrap();
    match response {
        QueryResponse::Blocks(keys) => assert_eq!(keys, expected),
        other => panic!("expected Blocks(..), got {other:?}"),
    }
}

struct CountingSink {
    count: usize,
}

impl EventSink for CountingSink {
    fn on_event(&mut self, _event: &dt_sim::WorldEvent) {
        self.count += 1;
    }
}

#[test]
fn event_sink_observes_every_drained_event() {
    let mut world = test_world();
    let mut sink = CountingSink { count: 0 };

    Command::MoveViewport { dx: 0, dy: 0, distance: 1 }.apply(&mut world);
    world.tick(0.1);
    sink.on_events(&world.drain_events());

    assert!(sink.count > 0, "moving the viewport and ticking should raise at least one event");
}

#[test]
fn noop_sink_never_panics() {
    let mut sink = NoopSink;
    sink.on_events(&[dt_sim::WorldEvent::TickElapsedMs(16.0)]);
}
