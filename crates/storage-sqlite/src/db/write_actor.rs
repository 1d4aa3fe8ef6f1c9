//! Single-writer actor for the ledger database.
//!
//! All writes funnel through one dedicated connection, and every job runs
//! inside `immediate_transaction`. That transaction is the atomic unit behind
//! the multi-row postings (movement plus capital adjustment, expense plus
//! linked debt): a job either commits every row it touched or none of them.

use std::any::Any;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;
use fintrack_core::Result;

// A job gets the writer's connection, already inside a transaction.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

// Return values cross the channel type-erased; exec() downcasts them back.
type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for submitting jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Runs `job` on the writer's connection inside an immediate transaction
    /// and returns its result. A job error rolls the transaction back.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("writer actor channel closed; the actor has stopped");

        ret_rx
            .await
            .expect("writer actor dropped the reply sender without responding")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer actor returned an unexpected type"))
            })
    }
}

/// Spawns the writer actor on the Tokio runtime.
///
/// The actor holds one connection from the pool for its whole lifetime and
/// processes jobs strictly in submission order. It terminates when every
/// `WriteHandle` has been dropped.
pub fn spawn_writer(pool: &DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    let mut conn = pool
        .get()
        .expect("failed to check out the writer actor's connection");

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            // StorageError::Core keeps the job's error intact across the
            // transaction wrapper, so a Reference or Conflict surfaced inside
            // a job reaches the caller unchanged.
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    job(c).map_err(StorageError::from)
                })
                .map_err(|e: StorageError| e.into());

            // The caller may have gone away; that only drops the result.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
