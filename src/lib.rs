//! # Modular Content Matching Library
//!
//! This library decides which content from a set of source repositories
//! belongs in a derived repository. It is driven by module selectors (module
//! name, stream and optional profiles) and answers with four sets: the
//! modules to publish and the binary, debug and source packages they ship,
//! each unit tagged with the repository it was found in.
//!
//! ## Quick Example
//!
//! ```
//! use modmatch::config::ModuleSelector;
//! use modmatch::matcher::Matcher;
//! use modmatch::phases::ModularMatcher;
//! use modmatch::repository::{InMemoryRepository, RepoSet};
//! use modmatch::unit::{Entity, Module, Package};
//!
//! let module = Module::new("perl", "5.30", 100, "abcd", "x86_64")
//!     .with_artifacts(["perl-4:5.30.1-452.el8.x86_64"]);
//! let package = Package::new("perl", "5.30.1", "452.el8", "x86_64")
//!     .with_filename("perl-5.30.1-452.el8.x86_64.rpm");
//!
//! let mut binary = InMemoryRepository::new("binary_repo");
//! binary.insert_units([Entity::from(module), Entity::from(package)]);
//! let repos = RepoSet::new(vec![binary.into_handle()], vec![], vec![]);
//!
//! let selectors = vec![ModuleSelector::new("perl", "5.30")];
//! let mut matcher = ModularMatcher::with_workers(2, repos, selectors)?;
//! matcher.run()?;
//!
//! let output = matcher.output().unwrap();
//! assert_eq!(output.modules.len(), 1);
//! assert_eq!(output.binary_rpms.len(), 1);
//! # Ok::<(), modmatch::error::Error>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Units (`unit`)**: packages and module metadata, plus `TaggedUnit`, which
//!   records the repository a unit came from.
//! - **Criteria (`criteria`)**: OR-of-AND field matches handed to repositories.
//! - **Repositories (`repository`, `catalog`)**: the `Repository` trait a
//!   catalog client implements, and an in-memory implementation loadable from
//!   a snapshot file.
//! - **Searching (`matcher`, `pending`)**: concurrent per-repository searches on
//!   a worker pool, joined into unions.
//! - **Phases (`phases`)**: the staged pipeline behind `ModularMatcher`.
//!
//! ## Execution Flow
//!
//! 1.  **Resolve** modules named by the selectors.
//! 2.  **Deduplicate** to the newest build per (name, stream, context).
//! 3.  **Extract** package filenames from module artifacts, honouring profiles.
//! 4.  **Build** filename criteria.
//! 5.  **Search** binary and debug repositories concurrently.
//! 6.  **Search** source repositories for the sources those packages reference.
//! 7.  **Reduce** modules to one per (name, stream) for publication.

pub mod catalog;
pub mod config;
pub mod criteria;
pub mod defaults;
pub mod error;
pub mod matcher;
pub mod nevra;
pub mod output;
pub mod pending;
pub mod phases;
pub mod repository;
pub mod unit;

#[cfg(test)]
mod criteria_proptest;
