//! Unit tests for dt-core primitives.

#[cfg(test)]
mod coord {
    use crate::Coord;

    #[test]
    fn manhattan_and_chebyshev() {
        let a = Coord::new(0, 0);
        let b = Coord::new(3, 4);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(a.chebyshev(b), 4);
    }

    #[test]
    fn euclidean() {
        let a = Coord::new(0, 0);
        let b = Coord::new(3, 4);
        assert!((a.euclidean(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Coord::new(0, 5) < Coord::new(1, 0));
        assert!(Coord::new(1, 0) < Coord::new(1, 1));
    }

    #[test]
    fn add_sub_roundtrip() {
        let a = Coord::new(2, -3);
        let d = Coord::new(5, 5);
        assert_eq!((a + d) - d, a);
    }

    #[test]
    fn angle_to_cardinal_directions() {
        let origin = Coord::new(0, 0);
        assert_eq!(origin.angle_to(Coord::new(1, 0)), 0.0);
        assert_eq!(origin.angle_to(Coord::new(0, 1)), 90.0);
        assert_eq!(origin.angle_to(Coord::new(-1, 0)), 180.0);
        assert_eq!(origin.angle_to(Coord::new(0, 0)), 0.0);
    }

    #[test]
    fn pack_distinguishes_coords() {
        assert_ne!(Coord::new(1, 2).pack(), Coord::new(2, 1).pack());
        assert_eq!(Coord::new(-1, -1).pack(), Coord::new(-1, -1).pack());
    }
}

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn equality_is_by_value() {
        let a = AgentId::from("npc-1");
        let b = AgentId::from("npc-1".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_ids_differ() {
        assert_ne!(AgentId::from("npc-1"), AgentId::from("npc-2"));
    }

    #[test]
    fn display_is_the_raw_string() {
        assert_eq!(AgentId::from("npc-7").to_string(), "npc-7");
    }

    #[test]
    fn clone_is_cheap_and_equal() {
        let a = AgentId::from("npc-9");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "npc-9");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(t.next(), Tick(11));
    }

    #[test]
    fn clock_accumulates_variable_dt() {
        let mut clock = SimClock::new();
        assert_eq!(clock.elapsed_secs, 0.0);
        clock.advance(0.5);
        clock.advance(1.5);
        assert_eq!(clock.current_tick, Tick(2));
        assert!((clock.elapsed_secs - 2.0).abs() < 1e-9);
    }

    #[test]
    fn clock_dhm() {
        let mut clock = SimClock::new();
        clock.advance(90_060.0); // 1 day, 1 hour, 1 minute
        let (d, h, m) = clock.elapsed_dhm();
        assert_eq!(d, 1);
        assert_eq!(h, 1);
        assert_eq!(m, 1);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng};

    #[test]
    fn deterministic_same_seed() {
        let id = AgentId::from("npc-0");
        let mut r1 = AgentRng::new(12345, &id);
        let mut r2 = AgentRng::new(12345, &id);
        for _ in 0..100 {
            let a: f32 = r1.random();
            let b: f32 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, &AgentId::from("npc-0"));
        let mut r1 = AgentRng::new(1, &AgentId::from("npc-1"));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for distinct agent ids should diverge");
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = AgentRng::new(0, &AgentId::from("npc-0"));
        for _ in 0..1000 {
            let v = rng.gen_range(0.0f32..1.0);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = AgentRng::new(0, &AgentId::from("npc-0"));
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

#[cfg(test)]
mod terrain {
    use crate::{Terrain, TerrainSet};

    #[test]
    fn native_set_allows_only_normal() {
        let set = TerrainSet::native();
        assert!(set.allows(Terrain::Normal));
        assert!(!set.allows(Terrain::Water));
    }

    #[test]
    fn forbidden_is_never_allowed() {
        let set = TerrainSet::all_passable();
        assert!(!set.allows(Terrain::Forbidden));
    }

    #[test]
    fn union_widens_what_is_allowed() {
        let set = TerrainSet::NORMAL | TerrainSet::WATER;
        assert!(set.allows(Terrain::Normal));
        assert!(set.allows(Terrain::Water));
        assert!(!set.allows(Terrain::Mountain));
    }
}

#[cfg(test)]
mod rect {
    use crate::{Coord, Rect};

    #[test]
    fn centered_is_odd_sided_and_symmetric() {
        let r = Rect::centered(Coord::new(5, 5), 2);
        assert_eq!((r.w, r.h), (5, 5));
        assert_eq!((r.x, r.y), (3, 3));
        assert!(r.contains(Coord::new(5, 5)));
        assert!(r.contains(Coord::new(3, 3)));
        assert!(!r.contains(Coord::new(8, 5)));
    }

    #[test]
    fn expanded_grows_on_all_sides() {
        let r = Rect::new(0, 0, 4, 4).expanded(1);
        assert_eq!(r, Rect::new(-1, -1, 6, 6));
    }

    #[test]
    fn coords_iterates_row_major_in_bounds() {
        let r = Rect::new(0, 0, 2, 2);
        let coords: Vec<Coord> = r.coords().collect();
        assert_eq!(
            coords,
            vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 1), Coord::new(1, 1)]
        );
    }
}
