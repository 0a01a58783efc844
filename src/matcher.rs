//! # Matching Capability
//!
//! This module provides the building blocks every matcher shares:
//!
//! - **`Matcher`**: the trait a concrete pipeline implements. `run()` has no
//!   default body, so a type cannot be used as a matcher without supplying
//!   its own pipeline.
//! - **`UnitSearcher`**: the asynchronous search layer. It owns the worker
//!   pool and turns blocking [`Repository::search`] calls into [`Pending`]
//!   unit sets tagged with provenance.
//!
//! ## Fan-out and fan-in
//!
//! `search_many_repos` dispatches one task per repository immediately and
//! returns a single handle that, when waited on, unions the per-repository
//! sets. The union is commutative and keeps the first-inserted member of
//! equal units, so results do not depend on which repository answered first
//! beyond which provenance survives a collision.

use std::sync::Arc;

use log::{debug, error};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::criteria::Criteria;
use crate::error::Result;
use crate::pending::Pending;
use crate::repository::RepoHandle;
use crate::unit::{TaggedUnit, UnitKind, UnitSet};

/// A pipeline that resolves content from a repository set.
pub trait Matcher {
    /// Runs the pipeline to completion and publishes its results.
    fn run(&mut self) -> Result<()>;
}

/// Concurrent, provenance-tagging search over repositories.
#[derive(Clone)]
pub struct UnitSearcher {
    pool: Arc<ThreadPool>,
}

impl UnitSearcher {
    /// Creates a searcher backed by a pool of `workers` threads.
    pub fn new(workers: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|idx| format!("modmatch-search-{}", idx))
            .panic_handler(|_| error!("A search task panicked; its result is lost"))
            .build()?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// The pool searches and derived tasks run on.
    pub fn pool(&self) -> &ThreadPool {
        &self.pool
    }

    /// Runs `task` on the worker pool.
    pub fn spawn<T, F>(&self, context: impl Into<String>, task: F) -> Pending<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        Pending::spawn(&self.pool, context, task)
    }

    /// Searches one repository without blocking.
    ///
    /// The ORed `criteria` list is evaluated by the repository; every unit
    /// found is tagged with the repository's identifier.
    pub fn search_one_repo(
        &self,
        repo: &RepoHandle,
        criteria: &[Criteria],
        kind: UnitKind,
    ) -> Pending<UnitSet> {
        let repo = Arc::clone(repo);
        let criteria = Criteria::or(criteria.to_vec());
        let context = format!("{} search in {}", kind, repo.id());

        self.spawn(context, move || {
            let found = repo.search(&criteria, kind)?;
            let repo_id: Arc<str> = Arc::from(repo.id());
            debug!("Found {} {} units in {}", found.len(), kind, repo_id);
            Ok(found
                .into_iter()
                .map(|entity| TaggedUnit::from_shared(Arc::new(entity), Arc::clone(&repo_id)))
                .collect())
        })
    }

    /// Searches every repository in `repos` concurrently and resolves to the
    /// union of their results.
    pub fn search_many_repos(
        &self,
        criteria: &[Criteria],
        repos: &[RepoHandle],
        kind: UnitKind,
    ) -> Pending<UnitSet> {
        let handles = repos
            .iter()
            .map(|repo| self.search_one_repo(repo, criteria, kind))
            .collect();
        Pending::merged(handles)
    }

    /// Binary (and debug) packages matching `criteria`.
    pub fn search_rpms(&self, criteria: &[Criteria], repos: &[RepoHandle]) -> Pending<UnitSet> {
        self.search_many_repos(criteria, repos, UnitKind::Rpm)
    }

    /// Source packages matching `criteria`.
    pub fn search_srpms(&self, criteria: &[Criteria], repos: &[RepoHandle]) -> Pending<UnitSet> {
        self.search_many_repos(criteria, repos, UnitKind::Srpm)
    }

    /// Module metadata matching `criteria`.
    pub fn search_modulemds(
        &self,
        criteria: &[Criteria],
        repos: &[RepoHandle],
    ) -> Pending<UnitSet> {
        self.search_many_repos(criteria, repos, UnitKind::Modulemd)
    }
}
