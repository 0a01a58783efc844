//! Property-based tests for criteria building, NEVRA handling, unions and
//! deduplication.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use std::collections::{HashMap, HashSet};

    use crate::criteria::build_or_criteria;
    use crate::error::Error;
    use crate::nevra::Nevra;
    use crate::pending::{merge_futures, Pending};
    use crate::phases::dedup::{keep_latest_per_context, output_set};
    use crate::unit::{Module, TaggedUnit};
    use proptest::prelude::*;

    // ============================================================================
    // build_or_criteria property tests
    // ============================================================================

    proptest! {
        /// Property: one criterion per value tuple when arities agree
        #[test]
        fn one_criterion_per_tuple(
            width in 1usize..4,
            rows in prop::collection::vec(prop::collection::vec("[a-z0-9]{1,6}", 3), 0..20),
        ) {
            let fields: Vec<String> = (0..width).map(|i| format!("field{}", i)).collect();
            let field_refs: Vec<&str> = fields.iter().map(String::as_str).collect();
            let tuples: Vec<Vec<String>> = rows
                .into_iter()
                .map(|mut r| {
                    r.truncate(width);
                    r
                })
                .collect();

            let criteria = build_or_criteria(&field_refs, &tuples).unwrap();
            prop_assert_eq!(criteria.len(), tuples.len());
        }

        /// Property: any tuple with the wrong arity fails the whole build
        #[test]
        fn arity_mismatch_is_rejected(
            good in 0usize..5,
            bad_len in prop::sample::select(vec![0usize, 1, 3]),
        ) {
            let mut tuples: Vec<Vec<&str>> = vec![vec!["a", "b"]; good];
            tuples.push(vec!["x"; bad_len]);

            let result = build_or_criteria(&["name", "stream"], &tuples);
            let rejected = matches!(result, Err(Error::Configuration { .. }));
            prop_assert!(rejected, "arity mismatch was accepted");
        }
    }

    // ============================================================================
    // NEVRA property tests
    // ============================================================================

    proptest! {
        /// Property: parsing recovers every component, and the filename drops the epoch
        #[test]
        fn nevra_components_survive_parsing(
            name in "[a-z][a-z0-9+_]{0,8}(-[a-z0-9+_]{1,6}){0,2}",
            epoch in prop::option::of("[0-9]{1,2}"),
            version in "[0-9][0-9a-z.+~]{0,6}",
            release in "[0-9a-z][0-9a-z.+_]{0,10}",
            arch in "[a-z0-9_]{1,8}",
        ) {
            let text = match &epoch {
                Some(e) => format!("{}-{}:{}-{}.{}", name, e, version, release, arch),
                None => format!("{}-{}-{}.{}", name, version, release, arch),
            };
            let nevra = Nevra::parse(&text).unwrap();

            prop_assert_eq!(&nevra.name, &name);
            prop_assert_eq!(&nevra.epoch, &epoch);
            prop_assert_eq!(&nevra.version, &version);
            prop_assert_eq!(&nevra.release, &release);
            prop_assert_eq!(&nevra.arch, &arch);
            prop_assert_eq!(nevra.to_string(), text);
            prop_assert_eq!(
                nevra.rpm_filename(),
                format!("{}-{}-{}.{}.rpm", name, version, release, arch)
            );
        }
    }

    // ============================================================================
    // merge_futures property tests
    // ============================================================================

    proptest! {
        /// Property: the union does not depend on handle order and absorbs duplicates
        #[test]
        fn merge_is_commutative_and_idempotent(
            a in prop::collection::hash_set(0u32..50, 0..20),
            b in prop::collection::hash_set(0u32..50, 0..20),
        ) {
            let forward =
                merge_futures(vec![Pending::ready(a.clone()), Pending::ready(b.clone())]).unwrap();
            let backward =
                merge_futures(vec![Pending::ready(b.clone()), Pending::ready(a.clone())]).unwrap();
            let doubled = merge_futures(vec![
                Pending::ready(a.clone()),
                Pending::ready(b.clone()),
                Pending::ready(a.clone()),
            ])
            .unwrap();
            let expected: HashSet<u32> = a.union(&b).copied().collect();

            prop_assert_eq!(&forward, &expected);
            prop_assert_eq!(&backward, &expected);
            prop_assert_eq!(&doubled, &expected);
        }
    }

    // ============================================================================
    // Deduplication property tests
    // ============================================================================

    fn modules_strategy() -> impl Strategy<Value = Vec<TaggedUnit>> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["perl", "nodejs"]),
                prop::sample::select(vec!["10", "20"]),
                90u64..110,
                prop::sample::select(vec!["ctxA", "ctxB", "ctxC"]),
            ),
            0..30,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .map(|(name, stream, version, context)| {
                    TaggedUnit::new(Module::new(name, stream, version, context, "x86_64"), "repo")
                })
                .collect()
        })
    }

    proptest! {
        /// Property: per-context dedup keeps exactly the max version of every
        /// (name, stream, context)
        #[test]
        fn per_context_dedup_keeps_group_maxima(units in modules_strategy()) {
            let mut expected: HashMap<(String, String, String), u64> = HashMap::new();
            for unit in &units {
                let m = unit.as_module().unwrap();
                let entry = expected
                    .entry((m.name.clone(), m.stream.clone(), m.context.clone()))
                    .or_insert(m.version);
                *entry = (*entry).max(m.version);
            }

            let kept = keep_latest_per_context(units);
            prop_assert_eq!(kept.len(), expected.len());
            for unit in &kept {
                let m = unit.as_module().unwrap();
                let key = (m.name.clone(), m.stream.clone(), m.context.clone());
                prop_assert_eq!(Some(&m.version), expected.get(&key));
            }
        }

        /// Property: the output set has one module per (name, stream), at the global max version
        #[test]
        fn output_set_keeps_one_per_name_stream(units in modules_strategy()) {
            let mut expected: HashMap<(String, String), u64> = HashMap::new();
            for unit in &units {
                let m = unit.as_module().unwrap();
                let entry = expected.entry((m.name.clone(), m.stream.clone())).or_insert(m.version);
                *entry = (*entry).max(m.version);
            }

            let reduced = output_set(keep_latest_per_context(units));
            prop_assert_eq!(reduced.len(), expected.len());
            for unit in &reduced {
                let m = unit.as_module().unwrap();
                prop_assert_eq!(
                    Some(&m.version),
                    expected.get(&(m.name.clone(), m.stream.clone()))
                );
            }
        }
    }
}
