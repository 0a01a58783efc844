//! Catalog snapshots.
//!
//! A snapshot is a YAML (or JSON) document listing repositories, their role
//! and the units they hold. Loading one yields a [`RepoSet`] of
//! [`InMemoryRepository`] handles, which lets the matcher run without a live
//! catalog.
//!
//! ```yaml
//! repositories:
//!   - id: binary_repo
//!     role: binary
//!     units:
//!       - type: module
//!         name: perl
//!         stream: "5.30"
//!         version: 100
//!         context: abcd
//!         arch: x86_64
//!         artifacts: ["perl-4:5.30.1-452.module+el8.x86_64"]
//!       - type: package
//!         name: perl
//!         version: "5.30.1"
//!         release: 452.module+el8
//!         arch: x86_64
//!         filename: perl-5.30.1-452.module+el8.x86_64.rpm
//!         sourcerpm: perl-5.30.1-452.module+el8.src.rpm
//! ```

use std::collections::HashSet;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::repository::{InMemoryRepository, RepoSet};
use crate::unit::Entity;

/// Role a repository plays as a content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoRole {
    Binary,
    Debug,
    Source,
}

/// One repository entry of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRepo {
    pub id: String,
    pub role: RepoRole,
    #[serde(default)]
    pub units: Vec<Entity>,
}

/// A full catalog snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub repositories: Vec<CatalogRepo>,
}

impl Catalog {
    /// Builds the repository set, keeping document order within each role.
    pub fn into_repo_set(self) -> RepoSet {
        let mut set = RepoSet::default();
        for repo in self.repositories {
            debug!(
                "Loaded {} repository {} with {} units",
                match repo.role {
                    RepoRole::Binary => "binary",
                    RepoRole::Debug => "debug",
                    RepoRole::Source => "source",
                },
                repo.id,
                repo.units.len()
            );
            let handle = InMemoryRepository::with_units(repo.id, repo.units).into_handle();
            match repo.role {
                RepoRole::Binary => set.rpm.push(handle),
                RepoRole::Debug => set.debug.push(handle),
                RepoRole::Source => set.source.push(handle),
            }
        }
        set
    }
}

/// Parses a snapshot document.
///
/// Repository identifiers must be unique, since they are what provenance
/// records.
pub fn parse(content: &str) -> Result<Catalog> {
    let catalog: Catalog = serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
        message: format!("invalid catalog snapshot: {}", e),
        hint: Some(
            "each repository needs an id, a role (binary, debug or source) and a units list"
                .to_string(),
        ),
    })?;

    let mut seen = HashSet::new();
    for repo in &catalog.repositories {
        if !seen.insert(repo.id.as_str()) {
            return Err(Error::ConfigParse {
                message: format!("duplicate repository id '{}'", repo.id),
                hint: None,
            });
        }
    }

    Ok(catalog)
}

/// Reads and parses a snapshot file.
pub fn from_file(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}
