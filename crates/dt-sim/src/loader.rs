//! The async block loader: a dedup'd FIFO of pending origin keys drained
//! by a bounded pool of workers, each invoking a block factory and
//! reporting success or failure back to the foreground.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashSet;

use dt_core::Coord;
use dt_schedule::WorkerPool;

use crate::block::Block;

/// Builds the block at `origin`. Fallible so a real I/O-backed world can
/// report `block-load-failed` without special-casing the loader.
pub type BlockFactory = Arc<dyn Fn(Coord, u32) -> Result<Block, String> + Send + Sync>;

struct LoadTask {
    key: Coord,
    block_size: u32,
    factory: BlockFactory,
}

pub enum LoadResult {
    Loaded(Coord, Block),
    Failed(Coord, String),
}

/// The loader's worker pool plus the dedup set that keeps a key from being
/// queued twice while its load is outstanding.
pub struct Loader {
    pool: WorkerPool<LoadTask>,
    results_rx: Receiver<LoadResult>,
    loading: Mutex<FxHashSet<Coord>>,
}

impl Loader {
    pub fn new(max_parallel: usize) -> Self {
        let (tx, results_rx) = mpsc::channel::<LoadResult>();
        let pool = WorkerPool::new(max_parallel, move |task: LoadTask| run_task(task, &tx));
        Self { pool, results_rx, loading: Mutex::new(FxHashSet::default()) }
    }

    /// Queue `key` for loading unless it is already in flight. Returns
    /// `true` if a new load was queued.
    pub fn queue(&self, key: Coord, block_size: u32, factory: BlockFactory) -> bool {
        let mut loading = self.loading.lock().expect("loader dedup set poisoned");
        if !loading.insert(key) {
            return false;
        }
        drop(loading);
        self.pool.submit(LoadTask { key, block_size, factory });
        true
    }

    pub fn is_loading(&self, key: Coord) -> bool {
        self.loading.lock().expect("loader dedup set poisoned").contains(&key)
    }

    /// Drain every completed load since the last call. Each key is removed
    /// from the in-flight set here, not when the worker finishes, so
    /// `is_loading` stays accurate until the foreground has actually seen
    /// the result.
    pub fn drain(&self) -> Vec<LoadResult> {
        let results: Vec<LoadResult> = self.results_rx.try_iter().collect();
        let mut loading = self.loading.lock().expect("loader dedup set poisoned");
        for result in &results {
            let key = match result {
                LoadResult::Loaded(k, _) => *k,
                LoadResult::Failed(k, _) => *k,
            };
            loading.remove(&key);
        }
        results
    }

    pub fn shutdown(self) {
        self.pool.shutdown();
    }
}

fn run_task(task: LoadTask, results_tx: &Sender<LoadResult>) {
    let outcome = match (task.factory)(task.key, task.block_size) {
        Ok(block) => LoadResult::Loaded(task.key, block),
        Err(reason) => {
            tracing::warn!(x = task.key.x, y = task.key.y, %reason, "block load failed");
            LoadResult::Failed(task.key, reason)
        }
    };
    let _ = results_tx.send(outcome);
}
