use dt_core::Coord;

use crate::containers::{CoordHash, CoordList};
use crate::cost_pq::FloatPriorityQueue;
use crate::dstar::{DStarKey, DStarLite, DStarPq};
use crate::map::{Map, NeighbourMode};
use crate::registry;
use crate::route::{find_route, AlgorithmTag, FinderConfig};

fn open_map(w: u32, h: u32) -> Map {
    Map::new(w, h, NeighbourMode::Eight)
}

// ── containers ──────────────────────────────────────────────────────────────

#[test]
fn coord_hash_set_overwrites_insert_fails_on_duplicate() {
    let mut h = CoordHash::new();
    assert!(h.insert(Coord::new(1, 1), "a").is_ok());
    assert!(h.insert(Coord::new(1, 1), "b").is_err());
    h.set(Coord::new(1, 1), "b");
    assert_eq!(h.get(Coord::new(1, 1)), Some(&"b"));
}

#[test]
fn coord_hash_replace_fails_on_absent_key() {
    let mut h: CoordHash<i32> = CoordHash::new();
    assert!(h.replace(Coord::new(0, 0), 5).is_err());
    h.set(Coord::new(0, 0), 1);
    assert!(h.replace(Coord::new(0, 0), 5).is_ok());
    assert_eq!(h.get(Coord::new(0, 0)), Some(&5));
}

#[test]
fn coord_list_append_nodup_skips_existing() {
    let mut l = CoordList::from(vec![Coord::new(0, 0), Coord::new(1, 0)]);
    l.append_nodup(vec![Coord::new(1, 0), Coord::new(2, 0)]);
    assert_eq!(l.as_vec(), vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]);
}

// ── cost_pq ─────────────────────────────────────────────────────────────────

#[test]
fn float_priority_queue_pops_in_ascending_cost_order() {
    let mut pq = FloatPriorityQueue::new();
    pq.update_cost(Coord::new(0, 0), 5.0);
    pq.update_cost(Coord::new(1, 0), 1.0);
    pq.update_cost(Coord::new(2, 0), 3.0);
    assert_eq!(pq.pop().map(|(c, _)| c), Some(Coord::new(1, 0)));
    assert_eq!(pq.pop().map(|(c, _)| c), Some(Coord::new(2, 0)));
    assert_eq!(pq.pop().map(|(c, _)| c), Some(Coord::new(0, 0)));
}

#[test]
fn float_priority_queue_update_cost_reprioritises() {
    let mut pq = FloatPriorityQueue::new();
    pq.update_cost(Coord::new(0, 0), 5.0);
    pq.update_cost(Coord::new(1, 0), 1.0);
    pq.update_cost(Coord::new(0, 0), 0.0);
    assert_eq!(pq.pop().map(|(c, _)| c), Some(Coord::new(0, 0)));
}

// ── map ─────────────────────────────────────────────────────────────────────

#[test]
fn map_bounds_zero_dimension_is_unbounded() {
    let m = Map::unbounded();
    assert!(m.is_inside(Coord::new(-500, 500)));
}

#[test]
fn map_set_blocked_is_idempotent_and_reversible() {
    let mut m = open_map(10, 10);
    let c = Coord::new(3, 3);
    assert!(!m.is_blocked(c));
    m.set_blocked(c, true);
    m.set_blocked(c, true);
    assert!(m.is_blocked(c));
    m.set_blocked(c, false);
    assert!(!m.is_blocked(c));
}

#[test]
fn map_neighbours_excludes_blocked_and_out_of_bounds() {
    let mut m = open_map(3, 3);
    m.set_blocked(Coord::new(1, 0), true);
    let ns = m.neighbours(Coord::new(0, 0));
    assert!(!ns.contains(&Coord::new(1, 0)));
    assert!(!ns.iter().any(|c| c.x < 0 || c.y < 0));
}

#[test]
fn map_four_connectivity_has_no_diagonals() {
    let m = Map::new(5, 5, NeighbourMode::Four);
    let ns = m.neighbours(Coord::new(2, 2));
    assert_eq!(ns.len(), 4);
    assert!(ns.iter().all(|n| n.x == 2 || n.y == 2));
}

// ── registry ────────────────────────────────────────────────────────────────

#[test]
fn registry_resolves_builtin_names() {
    assert!(registry::cost_fn("default").is_some());
    assert!(registry::cost_fn("missing-cost-xyz").is_none());
    assert!(registry::heuristic_fn("octile").is_some());
}

#[test]
fn registry_register_custom_cost_is_visible_afterwards() {
    registry::register_cost("tests::flat", std::sync::Arc::new(|_a, _b| 2.0));
    let f = registry::cost_fn("tests::flat").expect("just registered");
    assert_eq!(f(Coord::new(0, 0), Coord::new(1, 0)), 2.0);
}

// ── static finders / route ──────────────────────────────────────────────────

#[test]
fn find_route_trivial_start_equals_goal() {
    let m = open_map(10, 10);
    let route = find_route(&m, &FinderConfig::default(), Coord::new(1, 1), Coord::new(1, 1)).unwrap();
    assert!(route.found);
    assert!(route.is_trivial());
}

#[test]
fn find_route_fails_when_goal_is_blocked() {
    let mut m = open_map(10, 10);
    m.set_blocked(Coord::new(5, 5), true);
    let route = find_route(&m, &FinderConfig::default(), Coord::new(0, 0), Coord::new(5, 5)).unwrap();
    assert!(!route.found);
}

#[test]
fn find_route_open_map_path_endpoints_match() {
    let m = open_map(20, 20);
    let start = Coord::new(0, 0);
    let goal = Coord::new(10, 7);
    let route = find_route(&m, &FinderConfig::default(), start, goal).unwrap();
    assert!(route.found);
    assert_eq!(route.path.first().copied(), Some(start));
    assert_eq!(route.path.last().copied(), Some(goal));
}

#[test]
fn find_route_unknown_function_errors_before_search() {
    let m = open_map(5, 5);
    let mut cfg = FinderConfig::default();
    cfg.cost_fn = "no-such-cost".to_string();
    let err = find_route(&m, &cfg, Coord::new(0, 0), Coord::new(1, 1));
    assert!(err.is_err());
}

#[test]
fn bfs_and_astar_agree_on_step_count_in_open_map() {
    let m = open_map(15, 15);
    let start = Coord::new(0, 0);
    let goal = Coord::new(8, 2);

    let mut bfs_cfg = FinderConfig::default();
    bfs_cfg.algorithm = AlgorithmTag::Bfs;
    let bfs_route = find_route(&m, &bfs_cfg, start, goal).unwrap();

    let astar_route = find_route(&m, &FinderConfig::default(), start, goal).unwrap();

    assert!(bfs_route.found && astar_route.found);
    assert_eq!(bfs_route.path.len(), astar_route.path.len());
}

#[test]
fn all_algorithm_tags_find_the_same_open_map_route_exists() {
    let m = open_map(12, 12);
    let start = Coord::new(0, 0);
    let goal = Coord::new(6, 6);
    for algorithm in [
        AlgorithmTag::AStar,
        AlgorithmTag::WeightedAStar,
        AlgorithmTag::Dijkstra,
        AlgorithmTag::Bfs,
        AlgorithmTag::Dfs,
        AlgorithmTag::IdaStar,
        AlgorithmTag::SmaStar,
        AlgorithmTag::Fringe,
        AlgorithmTag::FastMarching,
    ] {
        let mut cfg = FinderConfig::default();
        cfg.algorithm = algorithm;
        let route = find_route(&m, &cfg, start, goal).unwrap();
        assert!(route.found, "{algorithm:?} failed to find an open-map route");
    }
}

// ── D* Lite ─────────────────────────────────────────────────────────────────

#[test]
fn dstar_key_equality_is_epsilon_tolerant() {
    let a = DStarKey(1.000_000_1, 2.0);
    let b = DStarKey(1.000_000_2, 2.0);
    assert_eq!(a, b);
    assert!(DStarKey(1.0, 2.0) < DStarKey(2.0, 0.0));
}

#[test]
fn dstar_pq_keeps_at_most_one_entry_per_coord() {
    let mut pq = DStarPq::new();
    let c = Coord::new(0, 0);
    pq.push(DStarKey(5.0, 5.0), c);
    pq.push(DStarKey(1.0, 1.0), c);
    assert_eq!(pq.len(), 1);
    assert_eq!(pq.pop(), Some((DStarKey(1.0, 1.0), c)));
    assert!(pq.is_empty());
}

#[test]
fn dstar_pq_pop_skips_removed_entries() {
    let mut pq = DStarPq::new();
    pq.push(DStarKey(1.0, 1.0), Coord::new(0, 0));
    pq.push(DStarKey(2.0, 2.0), Coord::new(1, 0));
    pq.remove(Coord::new(0, 0));
    assert_eq!(pq.pop().map(|(_, c)| c), Some(Coord::new(1, 0)));
}

#[test]
fn dstar_lite_finds_a_route_on_an_open_map() {
    let m = open_map(20, 20);
    let start = Coord::new(0, 0);
    let goal = Coord::new(5, 5);
    let mut planner = DStarLite::new(start, goal, "default", "euclidean").unwrap();
    let route = planner.find(&m);
    assert!(route.found);
    assert_eq!(route.path.first().copied(), Some(start));
    assert_eq!(route.path.last().copied(), Some(goal));
}

#[test]
fn dstar_lite_replans_around_a_newly_blocked_vertex() {
    let mut m = open_map(20, 20);
    let start = Coord::new(0, 0);
    let goal = Coord::new(10, 0);
    let mut planner = DStarLite::new(start, goal, "default", "euclidean").unwrap();
    let first = planner.find(&m);
    assert!(first.found);

    let blocked_cell = Coord::new(5, 0);
    m.set_blocked(blocked_cell, true);
    planner.update_vertex_auto_range(&m, blocked_cell);
    let recomputed = planner.compute_shortest_path(&m);
    assert!(recomputed);

    let second = planner.reconstruct_route(&m).unwrap();
    assert!(second.found);
    assert!(!second.path.contains(&blocked_cell));
}

#[test]
fn dstar_lite_update_vertex_is_idempotent_once_consistent() {
    let m = open_map(10, 10);
    let mut planner = DStarLite::new(Coord::new(0, 0), Coord::new(4, 4), "default", "euclidean").unwrap();
    planner.init();
    planner.compute_shortest_path(&m);
    let key_before = planner.key(Coord::new(2, 2));
    planner.update_vertex(&m, Coord::new(2, 2));
    let key_after = planner.key(Coord::new(2, 2));
    assert_eq!(key_before, key_after);
}

#[test]
fn dstar_lite_reports_no_route_when_goal_is_unreachable() {
    let mut m = open_map(10, 10);
    let goal = Coord::new(9, 9);
    for x in 0..10 {
        m.set_blocked(Coord::new(x, 8), true);
    }
    let mut planner = DStarLite::new(Coord::new(0, 0), goal, "default", "euclidean").unwrap();
    let route = planner.find(&m);
    assert!(!route.found);
}
