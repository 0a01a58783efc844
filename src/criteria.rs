//! Search criteria.
//!
//! A [`Criteria`] is a small expression tree over entity fields. The matcher
//! builds lists of AND-criteria, one per value tuple, and a search ORs the
//! list together.

use std::fmt;

use crate::error::{Error, Result};
use crate::unit::Entity;

/// A match expression over entity fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criteria {
    /// Matches every entity.
    True,
    /// Field equals value.
    Field { name: String, value: String },
    /// Every child matches. An empty `And` matches everything.
    And(Vec<Criteria>),
    /// At least one child matches. An empty `Or` matches nothing.
    Or(Vec<Criteria>),
}

impl Criteria {
    pub fn with_field(name: &str, value: &str) -> Self {
        Criteria::Field {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn and(criteria: Vec<Criteria>) -> Self {
        Criteria::And(criteria)
    }

    pub fn or(criteria: Vec<Criteria>) -> Self {
        Criteria::Or(criteria)
    }

    /// Evaluates this expression against an entity.
    ///
    /// Fields the entity does not define, or defines but leaves unset, never
    /// match.
    pub fn matches(&self, entity: &Entity) -> bool {
        match self {
            Criteria::True => true,
            Criteria::Field { name, value } => entity
                .field(name)
                .flatten()
                .is_some_and(|actual| actual.matches(value)),
            Criteria::And(children) => children.iter().all(|c| c.matches(entity)),
            Criteria::Or(children) => children.iter().any(|c| c.matches(entity)),
        }
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, children: &[Criteria], op: &str) -> fmt::Result {
            f.write_str("(")?;
            for (idx, child) in children.iter().enumerate() {
                if idx > 0 {
                    write!(f, " {} ", op)?;
                }
                write!(f, "{}", child)?;
            }
            f.write_str(")")
        }

        match self {
            Criteria::True => f.write_str("true"),
            Criteria::Field { name, value } => write!(f, "{}={:?}", name, value),
            Criteria::And(children) => join(f, children, "AND"),
            Criteria::Or(children) => join(f, children, "OR"),
        }
    }
}

/// Builds one AND-criterion per value tuple, each matching every field in
/// `fields` against the tuple's value at the same position.
///
/// The returned list is meant to be ORed at search time. Fails with
/// `Error::Configuration` when any tuple's length differs from
/// `fields.len()`; no partial list is returned in that case.
///
/// ```
/// use modmatch::criteria::build_or_criteria;
///
/// let criteria = build_or_criteria(
///     &["name", "stream"],
///     &[["perl", "5.30"], ["nodejs", "12"]],
/// ).unwrap();
/// assert_eq!(criteria.len(), 2);
/// ```
pub fn build_or_criteria<T, S>(fields: &[&str], value_tuples: &[T]) -> Result<Vec<Criteria>>
where
    T: AsRef<[S]>,
    S: AsRef<str>,
{
    value_tuples
        .iter()
        .enumerate()
        .map(|(idx, tuple)| {
            let values = tuple.as_ref();
            if values.len() != fields.len() {
                return Err(Error::Configuration {
                    message: format!(
                        "value tuple {} has {} values, expected {} for fields [{}]",
                        idx,
                        values.len(),
                        fields.len(),
                        fields.join(", ")
                    ),
                });
            }
            Ok(Criteria::and(
                fields
                    .iter()
                    .zip(values)
                    .map(|(field, value)| Criteria::with_field(field, value.as_ref()))
                    .collect(),
            ))
        })
        .collect()
}
