//! # Repository Handles
//!
//! This module defines the seam between the matching engine and the content
//! catalog it queries.
//!
//! ## Design
//!
//! The engine never talks to a catalog directly. It works against the
//! **`Repository`** trait, which exposes an identifier and a blocking,
//! criteria-filtered search. The engine decides where and when searches run
//! (see [`UnitSearcher`](crate::matcher::UnitSearcher)), so implementations
//! stay simple and can be swapped out:
//!
//! - A remote catalog client implements `Repository` in the application that
//!   embeds this crate, handling its own retries, paging and timeouts.
//! - **`InMemoryRepository`** holds its units in memory. It backs the catalog
//!   snapshot loader and the tests.
//!
//! Repositories are grouped by role into a **`RepoSet`**.

use std::fmt;
use std::sync::Arc;

use crate::criteria::Criteria;
use crate::error::Result;
use crate::unit::{Entity, UnitKind};

/// A searchable content repository.
pub trait Repository: Send + Sync {
    /// The repository identifier recorded as provenance on every unit found
    /// in it.
    fn id(&self) -> &str;

    /// Returns every entity of `kind` matching `criteria`.
    ///
    /// Failures are reported as-is to whoever awaits the search; the engine
    /// does not retry them.
    fn search(&self, criteria: &Criteria, kind: UnitKind) -> Result<Vec<Entity>>;
}

/// A shared repository handle.
pub type RepoHandle = Arc<dyn Repository>;

/// Repositories grouped by the role they play as a content source.
#[derive(Clone, Default)]
pub struct RepoSet {
    /// Binary package repositories. Module metadata lives here too.
    pub rpm: Vec<RepoHandle>,
    /// Debug package repositories.
    pub debug: Vec<RepoHandle>,
    /// Source package repositories.
    pub source: Vec<RepoHandle>,
}

impl RepoSet {
    pub fn new(rpm: Vec<RepoHandle>, debug: Vec<RepoHandle>, source: Vec<RepoHandle>) -> Self {
        Self { rpm, debug, source }
    }

    pub fn is_empty(&self) -> bool {
        self.rpm.is_empty() && self.debug.is_empty() && self.source.is_empty()
    }
}

impl fmt::Debug for RepoSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn ids(repos: &[RepoHandle]) -> Vec<&str> {
            repos.iter().map(|r| r.id()).collect()
        }
        f.debug_struct("RepoSet")
            .field("rpm", &ids(&self.rpm))
            .field("debug", &ids(&self.debug))
            .field("source", &ids(&self.source))
            .finish()
    }
}

/// A repository whose units are held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    id: String,
    units: Vec<Entity>,
}

impl InMemoryRepository {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            units: Vec::new(),
        }
    }

    pub fn with_units<I, E>(id: impl Into<String>, units: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Entity>,
    {
        let mut repo = Self::new(id);
        repo.insert_units(units);
        repo
    }

    pub fn insert_units<I, E>(&mut self, units: I)
    where
        I: IntoIterator<Item = E>,
        E: Into<Entity>,
    {
        self.units.extend(units.into_iter().map(Into::into));
    }

    pub fn units(&self) -> &[Entity] {
        &self.units
    }

    /// Wraps this repository into a shared handle.
    pub fn into_handle(self) -> RepoHandle {
        Arc::new(self)
    }
}

impl Repository for InMemoryRepository {
    fn id(&self) -> &str {
        &self.id
    }

    fn search(&self, criteria: &Criteria, kind: UnitKind) -> Result<Vec<Entity>> {
        Ok(self
            .units
            .iter()
            .filter(|unit| kind.admits(unit) && criteria.matches(unit))
            .cloned()
            .collect())
    }
}
