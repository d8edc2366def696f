//! Unit tests for the route-finder and animator worker-pool engines.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use dt_agent::AnimatorState;
use dt_core::{AgentId, Coord};
use dt_mobility::TickOutcome;
use dt_spatial::{AlgorithmTag, DStarLite, FinderConfig, Map, NeighbourMode};

use crate::animator_engine::AnimatorEngine;
use crate::finder_engine::{FinderEngine, FinderJob};
use crate::EngineError;

fn agent_id(s: &str) -> AgentId {
    AgentId::from(s)
}

/// Worker results land on a channel; poll briefly rather than sleep a fixed
/// duration, since the pool is real OS threads.
fn wait_until<F: FnMut() -> bool>(mut f: F) {
    for _ in 0..200 {
        if f() {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("condition never became true within the timeout");
}

#[test]
fn static_finder_task_completes_and_drains() {
    let engine = FinderEngine::new(2);
    let map = Arc::new(Map::new(10, 10, NeighbourMode::Eight));
    let config = FinderConfig { algorithm: AlgorithmTag::AStar, ..FinderConfig::default() };

    engine
        .submit(
            agent_id("a1"),
            FinderJob::Static { map, start: Coord::new(0, 0), goal: Coord::new(9, 9), config },
        )
        .expect("submit should succeed");

    let mut results = Vec::new();
    wait_until(|| {
        results.extend(engine.drain());
        !results.is_empty()
    });

    assert_eq!(results.len(), 1);
    let (id, route) = &results[0];
    assert_eq!(*id, agent_id("a1"));
    assert!(route.found);
    engine.shutdown();
}

#[test]
fn unknown_function_is_rejected_before_dispatch() {
    let engine = FinderEngine::new(1);
    let map = Arc::new(Map::new(5, 5, NeighbourMode::Four));
    let config = FinderConfig { cost_fn: "no-such-cost-fn".to_string(), ..FinderConfig::default() };

    let err = engine
        .submit(
            agent_id("a1"),
            FinderJob::Static { map, start: Coord::new(0, 0), goal: Coord::new(4, 4), config },
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::Finder(_)));

    // Nothing was queued, so nothing ever arrives.
    std::thread::sleep(Duration::from_millis(20));
    assert!(engine.drain().is_empty());
    engine.shutdown();
}

#[test]
fn incremental_job_uses_shared_planner() {
    let engine = FinderEngine::new(1);
    let map = Arc::new(Map::new(6, 6, NeighbourMode::Four));
    let planner = Arc::new(Mutex::new(
        DStarLite::new(Coord::new(0, 0), Coord::new(5, 5), "default", "manhattan").unwrap(),
    ));

    engine
        .submit(agent_id("a1"), FinderJob::Incremental { planner: Arc::clone(&planner), map: Arc::clone(&map) })
        .unwrap();

    let mut results = Vec::new();
    wait_until(|| {
        results.extend(engine.drain());
        !results.is_empty()
    });
    assert!(results[0].1.found);
    engine.shutdown();
}

#[test]
fn animator_task_round_trips_state() {
    let engine = AnimatorEngine::new(2);
    let mut state = AnimatorState::default();
    state.is_running = true;
    state.direction = (1.0, 0.0);
    state.speed_kmh = 18.0;
    state.grid_unit_m = 1.0;

    engine.submit(agent_id("a1"), state, 0.1);

    let mut results = Vec::new();
    wait_until(|| {
        results.extend(engine.drain());
        !results.is_empty()
    });

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].agent_id, agent_id("a1"));
    assert_eq!(results[0].outcome, TickOutcome::Running);
    assert!(results[0].state.disp_dx > 0.0);
    engine.shutdown();
}

#[test]
fn worker_count_matches_request() {
    let engine = FinderEngine::new(3);
    assert_eq!(engine.worker_count(), 3);
    engine.shutdown();
}

#[test]
fn zero_workers_is_clamped_to_one() {
    let engine = FinderEngine::new(0);
    assert_eq!(engine.worker_count(), 1);
    engine.shutdown();
}
