//! Stages 3 and 4: Artifact Extraction
//!
//! Turns deduplicated modules into the package filenames to look up:
//!
//! 1. Source artifacts (`arch == "src"`) are always dropped.
//! 2. If the selectors for a module request profiles, only artifacts whose
//!    package name appears in one of those profiles are kept. A module that
//!    defines none of the requested profiles keeps every non-source artifact
//!    instead of none.
//! 3. Each surviving artifact becomes `name-version-release.arch.rpm`.
//!
//! The filenames are then folded into one `filename` criterion each.

use std::collections::{BTreeSet, HashSet};

use log::{debug, warn};

use crate::config::ModuleSelector;
use crate::criteria::{build_or_criteria, Criteria};
use crate::error::Result;
use crate::unit::{Module, UnitSet};

/// Profiles requested for `module` by the selectors naming its
/// `(name, stream)`.
///
/// Returns `None` when nothing narrows the module: no selector names it, or
/// one of those that do asks for every package.
pub fn requested_profiles<'a>(
    module: &Module,
    selectors: &'a [ModuleSelector],
) -> Option<BTreeSet<&'a str>> {
    let mut requested = BTreeSet::new();
    let mut matched = false;
    for selector in selectors
        .iter()
        .filter(|s| s.selects(&module.name, &module.stream))
    {
        matched = true;
        match selector.requested_profiles() {
            Some(profiles) => requested.extend(profiles.iter().map(String::as_str)),
            None => return None,
        }
    }
    (matched && !requested.is_empty()).then_some(requested)
}

/// Package names a module's requested profiles cover, or `None` when every
/// non-source artifact should be kept.
fn allowed_packages<'m>(
    module: &'m Module,
    selectors: &[ModuleSelector],
) -> Option<HashSet<&'m str>> {
    let profiles = requested_profiles(module, selectors)?;
    let allowed: HashSet<&str> = profiles
        .iter()
        .filter_map(|profile| module.profiles.get(*profile))
        .flatten()
        .map(String::as_str)
        .collect();

    if allowed.is_empty() {
        debug!(
            "Module {} defines none of the profiles [{}], keeping all artifacts",
            module.nsvca(),
            profiles.into_iter().collect::<Vec<_>>().join(", ")
        );
        return None;
    }
    Some(allowed)
}

/// Package filenames of one module's non-source artifacts, narrowed by the
/// requested profiles.
///
/// Artifacts that do not parse as NEVRA strings are logged and skipped.
pub fn module_rpm_filenames(module: &Module, selectors: &[ModuleSelector]) -> BTreeSet<String> {
    let allowed = allowed_packages(module, selectors);
    let mut filenames = BTreeSet::new();

    for (artifact, parsed) in module.parsed_artifacts() {
        let nevra = match parsed {
            Ok(nevra) => nevra,
            Err(e) => {
                warn!("Skipping artifact of module {}: {}", module.nsvca(), e);
                continue;
            }
        };
        if nevra.is_source() {
            continue;
        }
        if let Some(allowed) = &allowed {
            if !allowed.contains(nevra.name.as_str()) {
                debug!("Artifact {} is outside the requested profiles", artifact);
                continue;
            }
        }
        filenames.insert(nevra.rpm_filename());
    }
    filenames
}

/// Stage 3: package filenames across every module in `modules`.
pub fn modular_rpm_filenames(modules: &UnitSet, selectors: &[ModuleSelector]) -> BTreeSet<String> {
    modules
        .iter()
        .filter_map(|unit| unit.as_module())
        .flat_map(|module| module_rpm_filenames(module, selectors))
        .collect()
}

/// Stage 4: one `filename` criterion per package filename.
pub fn rpms_criteria(filenames: &BTreeSet<String>) -> Result<Vec<Criteria>> {
    let values: Vec<[&str; 1]> = filenames.iter().map(|f| [f.as_str()]).collect();
    build_or_criteria(&["filename"], &values)
}

/// Stages 3 and 4 together.
pub fn execute(modules: &UnitSet, selectors: &[ModuleSelector]) -> Result<Vec<Criteria>> {
    let filenames = modular_rpm_filenames(modules, selectors);
    debug!(
        "Extracted {} package filenames from {} modules",
        filenames.len(),
        modules.len()
    );
    rpms_criteria(&filenames)
}
