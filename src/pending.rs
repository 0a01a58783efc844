//! Pending results.
//!
//! A [`Pending<T>`] is a handle to a value that is either being computed on
//! the worker pool or derived from other pending values. Nothing blocks until
//! [`Pending::wait`] is called, which makes `wait` (and [`merge_futures`],
//! which waits on a list) the only suspension points of a pipeline.
//!
//! There is no cancellation. Dropping a handle detaches it: the task still
//! runs to completion and its result is discarded.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::mpsc;

use rayon::ThreadPool;

use crate::error::{Error, Result};

type Waiter<T> = Box<dyn FnOnce() -> Result<T> + Send>;

/// Handle to a value that will be available later.
pub struct Pending<T> {
    waiter: Waiter<T>,
}

impl<T: Send + 'static> Pending<T> {
    /// Runs `task` on `pool` and returns a handle to its result.
    ///
    /// `context` names the task in the error reported if the task dies
    /// (panics) without producing a result.
    pub fn spawn<F>(pool: &ThreadPool, context: impl Into<String>, task: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        pool.spawn(move || {
            // The receiver may already be gone; the result is then unobserved.
            let _ = tx.send(task());
        });

        let context = context.into();
        Self {
            waiter: Box::new(move || {
                rx.recv()
                    .map_err(|_| Error::WorkerLost { context })?
            }),
        }
    }

    /// A handle that is already resolved.
    pub fn ready(value: T) -> Self {
        Self {
            waiter: Box::new(move || Ok(value)),
        }
    }

    /// A handle that is already failed.
    pub fn failed(error: Error) -> Self {
        Self {
            waiter: Box::new(move || Err(error)),
        }
    }

    /// A handle whose value is computed on the waiting thread, when waited on.
    pub fn deferred<F>(compute: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        Self {
            waiter: Box::new(compute),
        }
    }

    /// Blocks until the value is available.
    pub fn wait(self) -> Result<T> {
        (self.waiter)()
    }

    /// Chains a transformation that runs once this value is available.
    pub fn map<U, F>(self, f: F) -> Pending<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Result<U> + Send + 'static,
    {
        Pending::deferred(move || f(self.wait()?))
    }
}

impl<U> Pending<HashSet<U>>
where
    U: Eq + Hash + Send + 'static,
{
    /// A handle resolving to the union of `handles` once all of them resolve.
    pub fn merged(handles: Vec<Pending<HashSet<U>>>) -> Self {
        Pending::deferred(move || merge_futures(handles))
    }
}

/// Waits on every handle and returns the union of their sets.
///
/// Handles are awaited in list order. The first failure is returned as is;
/// later handles are dropped without being observed.
pub fn merge_futures<U>(handles: Vec<Pending<HashSet<U>>>) -> Result<HashSet<U>>
where
    U: Eq + Hash + Send + 'static,
{
    let mut merged = HashSet::new();
    for handle in handles {
        // `extend` keeps the member already present when items compare equal.
        merged.extend(handle.wait()?);
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn pool() -> ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .panic_handler(|_| {})
            .build()
            .unwrap()
    }

    fn set(values: &[u32]) -> HashSet<u32> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_flatten_list_of_sets() {
        let merged = merge_futures(vec![
            Pending::ready(set(&[1, 2, 3])),
            Pending::ready(set(&[2, 3, 4])),
        ])
        .unwrap();
        assert_eq!(merged, set(&[1, 2, 3, 4]));
    }

    #[test]
    fn test_merge_empty_list() {
        let merged: HashSet<u32> = merge_futures(Vec::new()).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_spawned_tasks_resolve() {
        let pool = pool();
        let handles = (0..8)
            .map(|i| Pending::spawn(&pool, format!("task {}", i), move || Ok(set(&[i, i + 1]))))
            .collect();
        let merged = merge_futures(handles).unwrap();
        assert_eq!(merged, (0..9).collect());
    }

    #[test]
    fn test_first_error_wins() {
        let handles = vec![
            Pending::ready(set(&[1])),
            Pending::failed(Error::CatalogQuery {
                repo_id: "first".to_string(),
                message: "boom".to_string(),
            }),
            Pending::failed(Error::CatalogQuery {
                repo_id: "second".to_string(),
                message: "boom".to_string(),
            }),
        ];
        let err = merge_futures(handles).unwrap_err();
        assert!(matches!(err, Error::CatalogQuery { ref repo_id, .. } if repo_id == "first"));
    }

    #[test]
    fn test_sibling_failure_does_not_cancel() {
        let pool = pool();
        let completed = Arc::new(AtomicUsize::new(0));
        let (release_tx, release_rx) = mpsc::channel::<()>();

        let counter = completed.clone();
        let slow = Pending::spawn(&pool, "slow", move || {
            release_rx.recv().ok();
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(set(&[1]))
        });
        let failing: Pending<HashSet<u32>> = Pending::spawn(&pool, "failing", || {
            Err(Error::CatalogQuery {
                repo_id: "repo".to_string(),
                message: "down".to_string(),
            })
        });

        assert!(merge_futures(vec![failing, slow]).is_err());

        release_tx.send(()).unwrap();
        while completed.load(Ordering::SeqCst) == 0 {
            std::thread::yield_now();
        }
        assert_eq!(completed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_task_reports_worker_lost() {
        let pool = pool();
        let handle: Pending<u32> = Pending::spawn(&pool, "exploding search", || panic!("boom"));
        let err = handle.wait().unwrap_err();
        assert!(matches!(err, Error::WorkerLost { ref context } if context == "exploding search"));
    }

    #[test]
    fn test_map_and_merged_are_lazy() {
        let pool = pool();
        let first = Pending::spawn(&pool, "first", || Ok(set(&[1, 2])));
        let second = Pending::ready(set(&[3]));
        let sizes = Pending::merged(vec![first, second]).map(|merged| Ok(merged.len()));
        assert_eq!(sizes.wait().unwrap(), 3);
    }
}
