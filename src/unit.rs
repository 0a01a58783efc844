//! # Content Units
//!
//! This module defines the catalog entities the matcher works with and the
//! provenance wrapper that records where each one was found.
//!
//! ## Key Components
//!
//! - **`Package`** and **`Module`**: the two entity variants, carried by the
//!   tagged enum **`Entity`**. Equality and hashing are derived over every
//!   field, which is the catalog's notion of "the same unit".
//! - **`UnitKind`**: the kind of entity a search asks for.
//! - **`TaggedUnit`**: an entity plus the identifier of the repository it was
//!   retrieved from. Set membership is decided by the entity alone, so the
//!   same package found in two repositories collapses to one member and keeps
//!   whichever provenance was inserted first.
//!
//! Field access is bounded: `field()` answers only for the names listed in
//! [`Package::FIELDS`], [`Module::FIELDS`] and [`TaggedUnit::SOURCE_REPO_ID`].

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::nevra::Nevra;

/// Content kind of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    #[default]
    Binary,
    Debug,
    Source,
}

impl PackageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageKind::Binary => "binary",
            PackageKind::Debug => "debug",
            PackageKind::Source => "source",
        }
    }
}

/// A single package as stored in a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub release: String,
    pub arch: String,
    #[serde(default)]
    pub filename: Option<String>,
    /// Filename of the source package this package was built from.
    #[serde(default)]
    pub sourcerpm: Option<String>,
    #[serde(default)]
    pub kind: PackageKind,
}

impl Package {
    /// Fields reachable through [`Entity::field`].
    pub const FIELDS: &'static [&'static str] = &[
        "name", "version", "release", "arch", "filename", "sourcerpm", "kind",
    ];

    pub fn new(name: &str, version: &str, release: &str, arch: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            release: release.to_string(),
            arch: arch.to_string(),
            filename: None,
            sourcerpm: None,
            kind: PackageKind::Binary,
        }
    }

    pub fn with_filename(mut self, filename: &str) -> Self {
        self.filename = Some(filename.to_string());
        self
    }

    pub fn with_sourcerpm(mut self, sourcerpm: &str) -> Self {
        self.sourcerpm = Some(sourcerpm.to_string());
        self
    }

    pub fn with_kind(mut self, kind: PackageKind) -> Self {
        self.kind = kind;
        self
    }

    /// `name-version-release.arch`
    pub fn nvra(&self) -> String {
        format!("{}-{}-{}.{}", self.name, self.version, self.release, self.arch)
    }
}

/// Module metadata: a named, streamed, versioned build of a set of packages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub stream: String,
    pub version: u64,
    pub context: String,
    pub arch: String,
    /// NEVRA strings of every package built for this module.
    #[serde(default)]
    pub artifacts: Vec<String>,
    /// Profile name to package base names.
    #[serde(default)]
    pub profiles: BTreeMap<String, Vec<String>>,
}

impl Module {
    /// Fields reachable through [`Entity::field`].
    pub const FIELDS: &'static [&'static str] = &[
        "name", "stream", "version", "context", "arch", "artifacts", "nsvca",
    ];

    pub fn new(name: &str, stream: &str, version: u64, context: &str, arch: &str) -> Self {
        Self {
            name: name.to_string(),
            stream: stream.to_string(),
            version,
            context: context.to_string(),
            arch: arch.to_string(),
            artifacts: Vec::new(),
            profiles: BTreeMap::new(),
        }
    }

    pub fn with_artifacts<I, S>(mut self, artifacts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artifacts = artifacts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_profile<I, S>(mut self, profile: &str, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles.insert(
            profile.to_string(),
            packages.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// `name:stream:version:context:arch`
    pub fn nsvca(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.name, self.stream, self.version, self.context, self.arch
        )
    }

    /// Parsed artifacts. Entries that are not valid NEVRA strings are
    /// returned as errors in place so the caller decides how to treat them.
    pub fn parsed_artifacts(&self) -> impl Iterator<Item = (&str, Result<Nevra>)> {
        self.artifacts
            .iter()
            .map(|artifact| (artifact.as_str(), Nevra::parse(artifact)))
    }
}

/// A catalog entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity {
    Package(Package),
    Module(Module),
}

/// The value of a single entity field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(u64),
    List(&'a [String]),
    Owned(String),
}

impl FieldValue<'_> {
    /// Whether this value equals `expected` when rendered as text.
    ///
    /// Lists never equal a scalar.
    pub fn matches(&self, expected: &str) -> bool {
        match self {
            FieldValue::Text(value) => *value == expected,
            FieldValue::Owned(value) => value == expected,
            FieldValue::Number(value) => expected.parse::<u64>().is_ok_and(|e| e == *value),
            FieldValue::List(_) => false,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Owned(value) => f.write_str(value),
            FieldValue::Number(value) => write!(f, "{}", value),
            FieldValue::List(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Entity::Package(package) => &package.name,
            Entity::Module(module) => &module.name,
        }
    }

    pub fn arch(&self) -> &str {
        match self {
            Entity::Package(package) => &package.arch,
            Entity::Module(module) => &module.arch,
        }
    }

    pub fn as_package(&self) -> Option<&Package> {
        match self {
            Entity::Package(package) => Some(package),
            Entity::Module(_) => None,
        }
    }

    pub fn as_module(&self) -> Option<&Module> {
        match self {
            Entity::Module(module) => Some(module),
            Entity::Package(_) => None,
        }
    }

    /// Reads a field by name.
    ///
    /// Returns `None` when the variant does not define the field, and
    /// `Some(None)` when it defines the field but it is unset.
    pub fn field(&self, name: &str) -> Option<Option<FieldValue<'_>>> {
        match self {
            Entity::Package(package) => match name {
                "name" => Some(Some(FieldValue::Text(&package.name))),
                "version" => Some(Some(FieldValue::Text(&package.version))),
                "release" => Some(Some(FieldValue::Text(&package.release))),
                "arch" => Some(Some(FieldValue::Text(&package.arch))),
                "filename" => Some(package.filename.as_deref().map(FieldValue::Text)),
                "sourcerpm" => Some(package.sourcerpm.as_deref().map(FieldValue::Text)),
                "kind" => Some(Some(FieldValue::Text(package.kind.as_str()))),
                _ => None,
            },
            Entity::Module(module) => match name {
                "name" => Some(Some(FieldValue::Text(&module.name))),
                "stream" => Some(Some(FieldValue::Text(&module.stream))),
                "version" => Some(Some(FieldValue::Number(module.version))),
                "context" => Some(Some(FieldValue::Text(&module.context))),
                "arch" => Some(Some(FieldValue::Text(&module.arch))),
                "artifacts" => Some(Some(FieldValue::List(&module.artifacts))),
                "nsvca" => Some(Some(FieldValue::Owned(module.nsvca()))),
                _ => None,
            },
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Package(package) => match &package.filename {
                Some(filename) => f.write_str(filename),
                None => f.write_str(&package.nvra()),
            },
            Entity::Module(module) => f.write_str(&module.nsvca()),
        }
    }
}

impl From<Package> for Entity {
    fn from(package: Package) -> Self {
        Entity::Package(package)
    }
}

impl From<Module> for Entity {
    fn from(module: Module) -> Self {
        Entity::Module(module)
    }
}

/// The kind of entity a search is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Binary and debug packages.
    Rpm,
    /// Source packages.
    Srpm,
    /// Module metadata.
    Modulemd,
}

impl UnitKind {
    /// Whether an entity is of this kind.
    pub fn admits(&self, entity: &Entity) -> bool {
        match (self, entity) {
            (UnitKind::Rpm, Entity::Package(package)) => package.kind != PackageKind::Source,
            (UnitKind::Srpm, Entity::Package(package)) => package.kind == PackageKind::Source,
            (UnitKind::Modulemd, Entity::Module(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UnitKind::Rpm => "rpm",
            UnitKind::Srpm => "srpm",
            UnitKind::Modulemd => "modulemd",
        };
        f.write_str(label)
    }
}

/// An entity tagged with the repository it was found in.
///
/// Cloning is cheap: the entity is shared. Equality and hashing ignore the
/// provenance.
#[derive(Debug, Clone)]
pub struct TaggedUnit {
    unit: Arc<Entity>,
    source_repo_id: Arc<str>,
}

impl TaggedUnit {
    /// Name of the provenance field readable through [`TaggedUnit::field`].
    pub const SOURCE_REPO_ID: &'static str = "source_repo_id";

    pub fn new(unit: impl Into<Entity>, source_repo_id: &str) -> Self {
        Self {
            unit: Arc::new(unit.into()),
            source_repo_id: Arc::from(source_repo_id),
        }
    }

    pub(crate) fn from_shared(unit: Arc<Entity>, source_repo_id: Arc<str>) -> Self {
        Self {
            unit,
            source_repo_id,
        }
    }

    /// The wrapped entity.
    pub fn entity(&self) -> &Entity {
        &self.unit
    }

    /// Identifier of the repository this unit was retrieved from.
    pub fn source_repo_id(&self) -> &str {
        &self.source_repo_id
    }

    pub fn as_package(&self) -> Option<&Package> {
        self.unit.as_package()
    }

    pub fn as_module(&self) -> Option<&Module> {
        self.unit.as_module()
    }

    pub fn name(&self) -> &str {
        self.unit.name()
    }

    /// Reads a field of the wrapper or, failing that, of the wrapped entity.
    ///
    /// Returns `Ok(None)` for fields that exist but are unset (a package
    /// without `sourcerpm`), and `Error::AttributeLookup` for names neither
    /// defines.
    pub fn field(&self, name: &str) -> Result<Option<FieldValue<'_>>> {
        if name == Self::SOURCE_REPO_ID {
            return Ok(Some(FieldValue::Text(&self.source_repo_id)));
        }
        self.unit.field(name).ok_or_else(|| Error::AttributeLookup {
            field: name.to_string(),
            unit: self.unit.to_string(),
        })
    }
}

impl PartialEq for TaggedUnit {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit
    }
}

impl Eq for TaggedUnit {}

impl Hash for TaggedUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unit.hash(state);
    }
}

impl fmt::Display for TaggedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.unit, self.source_repo_id)
    }
}

/// A set of tagged units, deduplicated by entity.
pub type UnitSet = HashSet<TaggedUnit>;
