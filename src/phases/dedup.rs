//! Stages 2 and 7: Module Deduplication
//!
//! Two reductions over the same module set, with different keys:
//!
//! - [`keep_latest_per_context`] groups by `(name, stream, context)`. A
//!   context is one build lineage, so only its newest version matters, but
//!   every context survives. Artifact extraction runs on this set.
//! - [`output_set`] groups by `(name, stream)` only and keeps one module per
//!   group. This is the set that gets published.
//!
//! Both are pure: they consume their input and return a new set. Units that
//! are not modules are dropped.

use std::collections::HashMap;

use log::debug;

use crate::unit::{TaggedUnit, UnitSet};

fn skip_non_module(unit: &TaggedUnit) {
    debug!("Ignoring non-module unit {} during deduplication", unit);
}

/// Keeps, per `(name, stream, context)`, the modules with the highest
/// version. Modules sharing that version (other architectures of the same
/// build) are all kept.
pub fn keep_latest_per_context(units: impl IntoIterator<Item = TaggedUnit>) -> UnitSet {
    let mut groups: HashMap<(String, String, String), Vec<(u64, TaggedUnit)>> = HashMap::new();
    for unit in units {
        let Some(m) = unit.as_module() else {
            skip_non_module(&unit);
            continue;
        };
        let key = (m.name.clone(), m.stream.clone(), m.context.clone());
        let version = m.version;
        groups.entry(key).or_default().push((version, unit));
    }

    groups
        .into_values()
        .flat_map(|group| {
            let latest = group.iter().map(|(version, _)| *version).max();
            group
                .into_iter()
                .filter(move |(version, _)| Some(*version) == latest)
                .map(|(_, unit)| unit)
        })
        .collect()
}

/// Keeps a single module per `(name, stream)`: the one with the highest
/// version across all contexts.
///
/// When several contexts share the highest version, the one whose metadata
/// orders last wins, so the choice does not depend on set iteration order.
pub fn output_set(units: impl IntoIterator<Item = TaggedUnit>) -> UnitSet {
    let mut latest: HashMap<(String, String), TaggedUnit> = HashMap::new();
    for unit in units {
        let Some(m) = unit.as_module() else {
            skip_non_module(&unit);
            continue;
        };
        let key = (m.name.clone(), m.stream.clone());
        let newer = match latest.get(&key).and_then(TaggedUnit::as_module) {
            Some(current) => (m.version, m) > (current.version, current),
            None => true,
        };
        if newer {
            latest.insert(key, unit);
        }
    }
    latest.into_values().collect()
}
