//! The animator engine: a worker pool that advances one agent's
//! [`AnimatorState`] by `dt` seconds.
//!
//! Each task moves an owned `AnimatorState` onto a worker and gets it back
//! (with its tick outcome) through the result channel — no locking needed,
//! since ownership of the state is exclusive to whichever side holds it at
//! the time.

use std::sync::mpsc::{self, Receiver, Sender};

use dt_agent::AnimatorState;
use dt_core::AgentId;
use dt_mobility::{tick, TickOutcome};

use crate::pool::WorkerPool;

pub struct AnimatorTask {
    pub agent_id: AgentId,
    pub state: AnimatorState,
    pub dt: f64,
}

pub struct AnimatorOutcome {
    pub agent_id: AgentId,
    pub state: AnimatorState,
    pub outcome: TickOutcome,
}

pub struct AnimatorEngine {
    pool: WorkerPool<AnimatorTask>,
    results_rx: Receiver<AnimatorOutcome>,
}

impl AnimatorEngine {
    pub fn new(workers: usize) -> Self {
        let (tx, results_rx) = mpsc::channel::<AnimatorOutcome>();
        let pool = WorkerPool::new(workers, move |task: AnimatorTask| run_task(task, &tx));
        Self { pool, results_rx }
    }

    pub fn submit(&self, agent_id: AgentId, state: AnimatorState, dt: f64) {
        self.pool.submit(AnimatorTask { agent_id, state, dt });
    }

    /// Drain every result produced since the last call. Non-blocking.
    pub fn drain(&self) -> Vec<AnimatorOutcome> {
        self.results_rx.try_iter().collect()
    }

    pub fn worker_count(&self) -> usize {
        self.pool.worker_count()
    }

    pub fn shutdown(self) {
        self.pool.shutdown();
    }
}

fn run_task(mut task: AnimatorTask, results_tx: &Sender<AnimatorOutcome>) {
    let outcome = tick(&mut task.state, task.dt);
    let _ = results_tx.send(AnimatorOutcome { agent_id: task.agent_id, state: task.state, outcome });
}
