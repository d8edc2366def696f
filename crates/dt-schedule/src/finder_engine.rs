//! The route-finder engine: a worker pool that turns `(Arc<Map>, start,
//! goal, FinderConfig)` — or a standing `DStarLite` planner — into a
//! `Route`, off the foreground thread.
//!
//! Workers never touch `Agent` directly. A task carries only what it needs
//! to compute a route; the result is handed back through an MPSC channel
//! that the foreground drains once per tick via [`FinderEngine::drain`].

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use dt_core::{AgentId, Coord};
use dt_spatial::{find_route, registry, DStarLite, FinderConfig, Map, Route, SpatialError};

use crate::error::{EngineError, EngineResult};
use crate::pool::WorkerPool;

/// What a single route-finder task computes.
pub enum FinderJob {
    /// One-shot classical search (A*, BFS, Dijkstra, ...).
    Static { map: Arc<Map>, start: Coord, goal: Coord, config: FinderConfig },
    /// A step of a standing D* Lite planner. The owner (`dt-sim::facade`) is
    /// responsible for calling `advance_start`/`update_vertex*` on the
    /// shared planner before resubmitting; the worker only calls `replan`,
    /// never `find` — that is what keeps this incremental instead of a
    /// from-scratch solve every tick.
    Incremental { planner: Arc<Mutex<DStarLite>>, map: Arc<Map> },
}

pub struct FinderTask {
    pub agent_id: AgentId,
    pub job: FinderJob,
}

/// `(agent_id, route)` as handed back by a worker on completion.
pub type FinderOutcome = (AgentId, Route);

/// The route-finder worker pool.
pub struct FinderEngine {
    pool: WorkerPool<FinderTask>,
    results_rx: Receiver<FinderOutcome>,
}

impl FinderEngine {
    pub fn new(workers: usize) -> Self {
        let (tx, results_rx) = mpsc::channel::<FinderOutcome>();
        let pool = WorkerPool::new(workers, move |task: FinderTask| {
            run_task(task, &tx);
        });
        Self { pool, results_rx }
    }

    /// Validate and enqueue a task. Unknown cost/heuristic function names
    /// are rejected synchronously here, before a worker ever sees the
    /// task — every other failure mode is recovered into a failed `Route`
    /// instead of propagated as an error.
    pub fn submit(&self, agent_id: AgentId, job: FinderJob) -> EngineResult<()> {
        if let FinderJob::Static { config, .. } = &job {
            validate_config(config)?;
        }
        self.pool.submit(FinderTask { agent_id, job });
        Ok(())
    }

    /// Drain every result produced since the last call. Non-blocking.
    pub fn drain(&self) -> Vec<FinderOutcome> {
        self.results_rx.try_iter().collect()
    }

    pub fn worker_count(&self) -> usize {
        self.pool.worker_count()
    }

    pub fn shutdown(self) {
        self.pool.shutdown();
    }
}

fn validate_config(config: &FinderConfig) -> EngineResult<()> {
    registry::cost_fn(&config.cost_fn)
        .ok_or_else(|| SpatialError::UnknownFunction(config.cost_fn.clone()))?;
    registry::heuristic_fn(&config.heuristic_fn)
        .ok_or_else(|| SpatialError::UnknownFunction(config.heuristic_fn.clone()))?;
    Ok(())
}

fn run_task(task: FinderTask, results_tx: &Sender<FinderOutcome>) {
    let route = match task.job {
        FinderJob::Static { map, start, goal, config } => {
            find_route(&map, &config, start, goal).unwrap_or_else(|err| {
                tracing::warn!(agent = %task.agent_id, error = %err, "route finder task failed");
                Route::failed()
            })
        }
        FinderJob::Incremental { planner, map } => {
            let mut planner = planner.lock().expect("D* Lite planner mutex poisoned");
            planner.replan(&map)
        }
    };
    let _ = results_tx.send((task.agent_id, route));
}
