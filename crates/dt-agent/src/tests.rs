use dt_core::{AgentId, Coord, Terrain};

use crate::{Agent, AgentRegistry};

fn agent(id: &str, at: (i32, i32)) -> Agent {
    Agent::new(AgentId::from(id), Coord::new(at.0, at.1))
}

#[cfg(test)]
mod agent_goals {
    use super::*;

    #[test]
    fn set_goal_replaces_queue_and_clears_proto_route() {
        let mut a = agent("npc-1", (0, 0));
        a.set_goal(Coord::new(5, 5));
        a.append_goal(Coord::new(9, 9));
        assert_eq!(a.goal_queue.len(), 2);
        assert!(!a.proto_route.found);
    }

    #[test]
    fn advance_goal_queue_pops_and_activates() {
        let mut a = agent("npc-1", (0, 0));
        a.set_goal(Coord::new(3, 3));
        assert!(a.goal.is_none());
        let next = a.advance_goal_queue();
        assert_eq!(next, Some(Coord::new(3, 3)));
        assert_eq!(a.goal, Some(Coord::new(3, 3)));
        assert!(a.goal_queue.is_empty());
    }

    #[test]
    fn has_pending_goal_reflects_queue_and_active_goal() {
        let mut a = agent("npc-1", (0, 0));
        assert!(!a.has_pending_goal());
        a.append_goal(Coord::new(1, 1));
        assert!(a.has_pending_goal());
    }
}

#[cfg(test)]
mod agent_route_walking {
    use super::*;
    use dt_spatial::Route;

    #[test]
    fn commit_step_advances_index_and_position() {
        let mut a = agent("npc-1", (0, 0));
        a.proto_route = Route {
            path: vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)],
            cost: 2.0,
            found: true,
        };
        assert_eq!(a.next_step(), Some(Coord::new(1, 0)));
        assert_eq!(a.commit_step(), Some(Coord::new(1, 0)));
        assert_eq!(a.start, Coord::new(1, 0));
        assert!(!a.reached_goal());
        a.commit_step();
        assert!(a.reached_goal());
        assert_eq!(a.next_step(), None);
    }

    #[test]
    fn real_route_log_only_grows_when_enabled() {
        let mut a = agent("npc-1", (0, 0));
        a.proto_route = Route {
            path: vec![Coord::new(0, 0), Coord::new(1, 0)],
            cost: 1.0,
            found: true,
        };
        a.commit_step();
        assert!(a.real_route.is_none());

        let mut b = agent("npc-2", (0, 0));
        b.enable_real_route_log();
        b.proto_route = Route {
            path: vec![Coord::new(0, 0), Coord::new(1, 0)],
            cost: 1.0,
            found: true,
        };
        b.commit_step();
        assert_eq!(b.real_route, Some(vec![Coord::new(1, 0)]));
    }
}

#[cfg(test)]
mod animator_state {
    use crate::AnimatorState;
    use dt_core::Coord;

    #[test]
    fn interval_msec_is_infinite_at_zero_speed() {
        let mut anim = AnimatorState { speed_kmh: 0.0, ..Default::default() };
        assert_eq!(anim.interval_msec(), u64::MAX);
        anim.speed_kmh = 18.0; // 5 m/s at grid_unit_m = 1.0
        assert_eq!(anim.interval_msec(), 200);
    }

    #[test]
    fn start_resets_displacement_and_marks_running() {
        let mut anim = AnimatorState::default();
        anim.disp_dx = 0.4;
        anim.is_running = false;
        anim.start(Coord::new(1, 0), (1.0, 0.0));
        assert_eq!(anim.disp_dx, 0.0);
        assert!(anim.is_running);
        assert_eq!(anim.goal_cell, Some(Coord::new(1, 0)));
    }
}

#[cfg(test)]
mod registry {
    use super::*;

    #[test]
    fn attach_then_get_roundtrips() {
        let mut reg = AgentRegistry::new();
        let a = reg.create(AgentId::from("npc-1"), Coord::new(0, 0));
        reg.attach(a).unwrap();
        assert!(reg.contains(&AgentId::from("npc-1")));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn attach_duplicate_id_errors() {
        let mut reg = AgentRegistry::new();
        reg.attach(reg.create(AgentId::from("npc-1"), Coord::new(0, 0))).unwrap();
        let dup = reg.create(AgentId::from("npc-1"), Coord::new(1, 1));
        assert!(reg.attach(dup).is_err());
    }

    #[test]
    fn detach_preserves_the_agent_but_removes_it_from_lookup() {
        let mut reg = AgentRegistry::new();
        reg.attach(reg.create(AgentId::from("npc-1"), Coord::new(2, 2))).unwrap();
        let detached = reg.detach(&AgentId::from("npc-1")).expect("was attached");
        assert_eq!(detached.start, Coord::new(2, 2));
        assert!(!reg.contains(&AgentId::from("npc-1")));
    }

    #[test]
    fn ids_in_block_groups_by_block_origin() {
        let mut reg = AgentRegistry::new();
        reg.attach(reg.create(AgentId::from("a"), Coord::new(1, 1))).unwrap();
        reg.attach(reg.create(AgentId::from("b"), Coord::new(11, 1))).unwrap();
        let in_first_block = reg.ids_in_block(Coord::new(0, 0), 10);
        assert_eq!(in_first_block, vec![AgentId::from("a")]);
    }

    #[test]
    fn native_terrain_defaults_to_normal() {
        let a = agent("npc-1", (0, 0));
        assert_eq!(a.native_terrain, Terrain::Normal);
    }
}
