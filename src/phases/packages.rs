//! Stages 5 and 6: Package Resolution
//!
//! Binary and debug packages are searched concurrently with the same
//! filename criteria. Source packages can only be looked up once both of
//! those searches have finished, because their criteria come from the
//! `sourcerpm` field of what was found.

use std::collections::BTreeSet;

use log::debug;

use crate::criteria::{build_or_criteria, Criteria};
use crate::error::Result;
use crate::matcher::UnitSearcher;
use crate::pending::Pending;
use crate::repository::RepoSet;
use crate::unit::UnitSet;

/// Stage 5: dispatches the binary and debug package searches.
///
/// Returns `(binary, debug)` handles. Neither search waits on the other.
pub fn resolve_binary_and_debug(
    searcher: &UnitSearcher,
    repos: &RepoSet,
    criteria: &[Criteria],
) -> (Pending<UnitSet>, Pending<UnitSet>) {
    debug!(
        "Searching {} binary and {} debug repositories with {} package criteria",
        repos.rpm.len(),
        repos.debug.len(),
        criteria.len()
    );
    (
        searcher.search_rpms(criteria, &repos.rpm),
        searcher.search_rpms(criteria, &repos.debug),
    )
}

/// Distinct source package filenames referenced by `packages`, in order.
/// Packages without a `sourcerpm` are skipped.
pub fn source_rpm_filenames<'a>(
    packages: impl IntoIterator<Item = &'a UnitSet>,
) -> BTreeSet<String> {
    packages
        .into_iter()
        .flatten()
        .filter_map(|unit| unit.as_package())
        .filter_map(|package| package.sourcerpm.as_deref())
        .filter(|sourcerpm| !sourcerpm.is_empty())
        .map(str::to_string)
        .collect()
}

/// Criteria matching the source packages of the binary and debug results.
pub fn srpms_criteria(binary: &UnitSet, debug: &UnitSet) -> Result<Vec<Criteria>> {
    let filenames = source_rpm_filenames([binary, debug]);
    let values: Vec<[&str; 1]> = filenames.iter().map(|f| [f.as_str()]).collect();
    build_or_criteria(&["filename"], &values)
}

/// Stage 6: searches the source repositories for the packages the binary
/// and debug results were built from.
pub fn resolve_sources(
    searcher: &UnitSearcher,
    repos: &RepoSet,
    binary: &UnitSet,
    debug: &UnitSet,
) -> Result<Pending<UnitSet>> {
    let criteria = srpms_criteria(binary, debug)?;
    debug!(
        "Searching {} source repositories with {} source criteria",
        repos.source.len(),
        criteria.len()
    );
    Ok(searcher.search_srpms(&criteria, &repos.source))
}
