//! A fixed-size `std::thread` worker pool fed by an unbounded MPSC queue.
//! Both engines in this crate are thin wrappers around one of these:
//! submit pushes a task onto the channel, the dispatcher side is just
//! "whichever idle worker calls `recv()` next", and shutdown closes the
//! queue with one sentinel per worker before joining them.

use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

enum Message<T> {
    Task(T),
    Shutdown,
}

/// A pool of `workers` OS threads, each running `handler` on tasks pulled
/// off a shared queue. Workers only ever read shared, already-stable inputs
/// (an `Arc<Map>` snapshot, a moved-in owned state) — never a live `&mut
/// Agent` — per the foreground-authoritative concurrency model.
pub struct WorkerPool<T> {
    sender: Sender<Message<T>>,
    handles: Vec<JoinHandle<()>>,
}

impl<T: Send + 'static> WorkerPool<T> {
    pub fn new<F>(workers: usize, handler: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        let workers = workers.max(1);
        let (tx, rx) = mpsc::channel::<Message<T>>();
        let rx = Arc::new(Mutex::new(rx));
        let handler = Arc::new(handler);

        let handles = (0..workers)
            .map(|worker_index| {
                let rx = Arc::clone(&rx);
                let handler = Arc::clone(&handler);
                thread::Builder::new()
                    .name(format!("dt-schedule-worker-{worker_index}"))
                    .spawn(move || loop {
                        let msg = {
                            let rx = rx.lock().expect("worker queue mutex poisoned");
                            rx.recv()
                        };
                        match msg {
                            Ok(Message::Task(task)) => handler(task),
                            Ok(Message::Shutdown) | Err(_) => break,
                        }
                    })
                    .expect("failed to spawn worker thread")
            })
            .collect();

        Self { sender: tx, handles }
    }

    /// Queue `task` for the next idle worker. Never blocks the caller — the
    /// channel is unbounded.
    pub fn submit(&self, task: T) {
        // A send can only fail if every worker has already exited, which
        // only happens after `shutdown` — submitting after shutdown is a
        // caller bug, not a recoverable condition worth propagating here.
        let _ = self.sender.send(Message::Task(task));
    }

    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// Send one shutdown sentinel per worker, then join them all. Tasks
    /// already queued ahead of the sentinels are still drained first.
    pub fn shutdown(self) {
        for _ in 0..self.handles.len() {
            let _ = self.sender.send(Message::Shutdown);
        }
        for handle in self.handles {
            let _ = handle.join();
        }
    }
}
