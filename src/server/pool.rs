//! Fixed-size worker pool.

use std::sync::Arc;

use log::{debug, error, info};
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinSet;

use crate::server::error::Error;
use crate::server::handler::HandlerFn;

type Queue<C> = Arc<Mutex<mpsc::UnboundedReceiver<C>>>;

/// A fixed set of workers sharing one FIFO queue of pending connections.
///
/// Any idle worker may claim the next queued connection. A worker runs the
/// handler on it to completion before claiming another, so no more than
/// [`size`](WorkerPool::size) connections are processed at once; the rest
/// wait in the queue.
pub struct WorkerPool<C> {
    queue: mpsc::UnboundedSender<C>,
    stop: watch::Sender<bool>,
    workers: JoinSet<()>,
    size: usize,
}

impl<C: Send + 'static> WorkerPool<C> {
    /// Start `size` workers that run `handler` on queued connections.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize, handler: HandlerFn<C>) -> Self {
        assert!(size > 0, "worker pool needs at least one worker");

        let (queue, receiver) = mpsc::unbounded_channel();
        let receiver: Queue<C> = Arc::new(Mutex::new(receiver));
        let (stop, _) = watch::channel(false);

        let mut workers = JoinSet::new();
        for id in 0..size {
            workers.spawn(run_worker(
                id,
                Arc::clone(&receiver),
                stop.subscribe(),
                Arc::clone(&handler),
            ));
        }
        info!("Started {size} workers");

        Self {
            queue,
            stop,
            workers,
            size,
        }
    }

    /// The number of workers.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Queue a connection for the next idle worker. Never waits.
    ///
    /// Fails with [`Error::PoolClosed`] once the pool has shut down; the
    /// connection is dropped.
    pub fn enqueue(&self, conn: C) -> Result<(), Error> {
        self.queue.send(conn).map_err(|_| Error::PoolClosed)
    }

    /// Stop the workers and wait for them to exit.
    ///
    /// Each worker finishes the connection it is handling, if any, and exits
    /// without claiming another. Connections still queued are dropped.
    pub async fn shutdown(&mut self) {
        self.stop.send_replace(true);
        info!("Waiting for {len} workers to finish...", len = self.workers.len());

        while let Some(res) = self.workers.join_next().await {
            if let Err(e) = res {
                error!("Worker failed during shutdown: {e}");
            }
        }
        info!("Worker pool stopped");
    }
}

async fn run_worker<C>(id: usize, queue: Queue<C>, mut stop: watch::Receiver<bool>, handler: HandlerFn<C>) {
    debug!("Worker {id} started");

    loop {
        let claimed = tokio::select! {
            biased;
            () = stopped(&mut stop) => None,
            conn = claim(&queue) => conn,
        };

        let Some(conn) = claimed else {
            break;
        };

        // A panicking handler ends its own task, not this worker.
        if let Err(e) = tokio::spawn(handler(conn)).await {
            error!("Worker {id} lost a connection: {e}");
        }
    }

    debug!("Worker {id} stopped");
}

async fn claim<C>(queue: &Mutex<mpsc::UnboundedReceiver<C>>) -> Option<C> {
    queue.lock().await.recv().await
}

/// Resolves once the stop signal is raised or its sender is gone.
async fn stopped(stop: &mut watch::Receiver<bool>) {
    loop {
        let raised = *stop.borrow_and_update();
        if raised || stop.changed().await.is_err() {
            return;
        }
    }
}
