//! Integration tests for `dt-sim`'s world facade.

use dt_core::Coord;

use crate::facade::World;
use crate::WorldConfig;

fn test_world() -> World {
    let mut config = WorldConfig::default();
    config.block_size = 8;
    config.max_blocks = 16;
    config.max_parallel_loaders = 2;
    config.rng_seed = 7;
    World::with_default_terrain(config)
}

/// Spin the world forward a fixed number of ticks at a fixed `dt`, letting
/// block loads and planning tasks settle between steps.
fn run_ticks(world: &mut World, n: usize, dt: f64) {
    for _ in 0..n {
        world.tick(dt);
    }
}

#[test]
fn spawn_attaches_immediately_once_block_is_resident() {
    let mut world = test_world();
    world.move_viewport(0, 0, 1); // halo-load around the origin
    run_ticks(&mut world, 5, 0.1);

    let id: dt_core::AgentId = "scout".into();
    world.spawn_agent(id.clone(), Coord::new(0, 0));
    run_ticks(&mut world, 3, 0.1);

    assert!(world.agent(&id).is_some(), "agent should attach once its block is loaded");
    assert_eq!(world.agent_count(), 1);
}

#[test]
fn spawn_before_block_load_defers_until_resident() {
    let mut world = test_world();
    let id: dt_core::AgentId = "scout".into();
    // Spawn at a coordinate whose block hasn't been requested yet.
    world.spawn_agent(id.clone(), Coord::new(100, 100));
    assert!(world.agent(&id).is_none(), "attach must wait for the block to load");

    run_ticks(&mut world, 10, 0.1);
    assert!(world.agent(&id).is_some(), "agent should attach once the deferred block loads");
}

#[test]
fn agent_reaches_a_reachable_goal() {
    let mut world = test_world();
    world.move_viewport(0, 0, 1);
    run_ticks(&mut world, 5, 0.1);

    let id: dt_core::AgentId = "scout".into();
    world.spawn_agent(id.clone(), Coord::new(0, 0));
    run_ticks(&mut world, 2, 0.1);
    world.set_goal(&id, Coord::new(3, 0));

    let mut reached = false;
    for _ in 0..500 {
        world.tick(0.05);
        if let Some(agent) = world.agent(&id) {
            if agent.start == Coord::new(3, 0) {
                reached = true;
                break;
            }
        }
    }
    assert!(reached, "agent never reached a goal on open terrain");
}

#[test]
fn despawn_removes_agent_and_cell_membership() {
    let mut world = test_world();
    world.move_viewport(0, 0, 1);
    run_ticks(&mut world, 5, 0.1);

    let id: dt_core::AgentId = "scout".into();
    world.spawn_agent(id.clone(), Coord::new(0, 0));
    run_ticks(&mut world, 2, 0.1);
    assert!(world.agent(&id).is_some());

    world.despawn_agent(id.clone());
    run_ticks(&mut world, 1, 0.1);

    assert!(world.agent(&id).is_none());
    let cells = world.cells_in_rect(dt_core::Rect::new(0, 0, 1, 1));
    assert!(cells[0].1.agent_ids.is_empty());
}

#[test]
fn obstacle_toggle_round_trips_to_native_terrain() {
    let mut world = test_world();
    world.move_viewport(0, 0, 1);
    run_ticks(&mut world, 5, 0.1);

    let id: dt_core::AgentId = "scout".into();
    world.spawn_agent(id.clone(), Coord::new(0, 0));
    run_ticks(&mut world, 2, 0.1);

    let native = world.agent(&id).unwrap().native_terrain;
    world.toggle_obstacle(Coord::new(1, 0), &id);
    let blocked_terrain = world.cells_in_rect(dt_core::Rect::new(1, 0, 1, 1))[0].1.terrain;
    assert_ne!(blocked_terrain, native, "toggling on should leave a blocking terrain");

    world.toggle_obstacle(Coord::new(1, 0), &id);
    let restored_terrain = world.cells_in_rect(dt_core::Rect::new(1, 0, 1, 1))[0].1.terrain;
    assert_eq!(restored_terrain, native, "toggling again should restore native terrain");
}

#[test]
fn blocks_for_rect_covers_every_intersecting_block() {
    let world = test_world();
    let rect = dt_core::Rect::new(-3, -3, 20, 20);
    let keys = world.blocks_for_rect(rect);
    assert!(!keys.is_empty());
    assert!(keys.iter().all(|k| k.x % 8 == 0 && k.y % 8 == 0));
}

#[test]
#[cfg(feature = "serde")]
fn block_round_trip_serializes_cell_by_cell() {
    use crate::block::{origin_of, Block};
    use crate::facade::default_make_cell;

    let make_cell = default_make_cell(42);
    let origin = origin_of(Coord::new(0, 0), 8);
    let block = Block::load(origin, 8, &make_cell);

    let json = serde_json::to_string(&block).expect("block should serialize");
    let restored: Block = serde_json::from_str(&json).expect("block should deserialize");

    for cell in block.cells() {
        let other = restored.get(cell.coord).expect("restored block missing a cell");
        assert_eq!(cell.coord, other.coord);
        assert_eq!(cell.terrain, other.terrain);
    }
}

#[test]
fn evicting_and_reloading_a_block_conserves_its_agent_ids() {
    let mut world = test_world();
    world.move_viewport(0, 0, 1);
    run_ticks(&mut world, 5, 0.1);

    let id: dt_core::AgentId = "resident".into();
    world.spawn_agent(id.clone(), Coord::new(0, 0));
    run_ticks(&mut world, 2, 0.1);
    assert!(world.agent(&id).is_some());

    // Push the viewport far enough away, long enough, that the origin block
    // is evicted under this world's small `max_blocks` budget.
    for _ in 0..40 {
        world.move_viewport(1, 0, 64);
        run_ticks(&mut world, 3, 0.1);
    }
    assert!(world.block_count() <= world.config().max_blocks);

    // Bring the viewport back; the block reloads and the agent should
    // reappear with the same id.
    world.set_viewport_center(0, 0);
    run_ticks(&mut world, 10, 0.1);

    assert!(world.agent(&id).is_some(), "agent id should be conserved across an evict/reload cycle");
}
