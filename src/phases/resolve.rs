//! Stage 1: Module Resolution
//!
//! Builds one `(name, stream)` criterion per distinct selector and searches
//! the binary repositories for module metadata. Nothing upstream is needed,
//! so the searches are dispatched immediately.

use std::collections::HashSet;

use log::debug;

use crate::config::ModuleSelector;
use crate::criteria::{build_or_criteria, Criteria};
use crate::error::Result;
use crate::matcher::UnitSearcher;
use crate::pending::Pending;
use crate::repository::RepoSet;
use crate::unit::UnitSet;

/// Criteria selecting every module named by `selectors`.
///
/// Selectors repeating a `(name, stream)` pair contribute one criterion.
pub fn modulemds_criteria(selectors: &[ModuleSelector]) -> Result<Vec<Criteria>> {
    let mut seen = HashSet::new();
    let pairs: Vec<[&str; 2]> = selectors
        .iter()
        .map(|s| [s.name.as_str(), s.stream.as_str()])
        .filter(|pair| seen.insert(*pair))
        .collect();
    build_or_criteria(&["name", "stream"], &pairs)
}

/// Dispatches the module searches.
pub fn execute(
    searcher: &UnitSearcher,
    repos: &RepoSet,
    selectors: &[ModuleSelector],
) -> Result<Pending<UnitSet>> {
    let criteria = modulemds_criteria(selectors)?;
    debug!(
        "Searching {} binary repositories with {} module criteria",
        repos.rpm.len(),
        criteria.len()
    );
    Ok(searcher.search_modulemds(&criteria, &repos.rpm))
}
