//! # Selector Configuration
//!
//! This module reads the module selectors that drive the matcher. A selector
//! document looks like this:
//!
//! ```yaml
//! modules:
//!   include:
//!     - name: perl
//!       stream: "5.30"
//!       profiles: [common, minimal]
//!     - name: nodejs
//!       stream: 12
//! ```
//!
//! Only what deserialization needs is checked. Unknown top-level sections
//! (`packages`, `content_sets`, ...) belong to other consumers of the same
//! file and are ignored. Streams written as YAML integers are read as text.
//! Decimal streams must be quoted: `5.30` would otherwise reach us as the
//! float `5.3`, so unquoted decimals are rejected.

use std::fmt;
use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Selects module builds by name and stream, optionally narrowed to profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSelector {
    pub name: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub stream: String,
    /// Profiles whose packages should be taken. `None` or empty takes every
    /// non-source artifact.
    #[serde(default)]
    pub profiles: Option<Vec<String>>,
}

impl ModuleSelector {
    pub fn new(name: &str, stream: &str) -> Self {
        Self {
            name: name.to_string(),
            stream: stream.to_string(),
            profiles: None,
        }
    }

    pub fn with_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles = Some(profiles.into_iter().map(Into::into).collect());
        self
    }

    /// The requested profiles, or `None` when this selector takes everything.
    pub fn requested_profiles(&self) -> Option<&[String]> {
        self.profiles.as_deref().filter(|p| !p.is_empty())
    }

    pub fn selects(&self, name: &str, stream: &str) -> bool {
        self.name == name && self.stream == stream
    }
}

impl fmt::Display for ModuleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.stream)?;
        if let Some(profiles) = self.requested_profiles() {
            write!(f, "/{}", profiles.join(","))?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct SelectorDocument {
    #[serde(default)]
    modules: ModulesSection,
}

#[derive(Debug, Default, Deserialize)]
struct ModulesSection {
    #[serde(default)]
    include: Vec<ModuleSelector>,
}

fn scalar_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(value) => value,
        Scalar::Integer(value) => value.to_string(),
        Scalar::Float(value) => {
            return Err(D::Error::custom(format!(
                "stream {} is a decimal number, quote the stream to keep its exact text",
                value
            )))
        }
    })
}

/// Parses a selector document into its module selectors, in document order.
pub fn parse(content: &str) -> Result<Vec<ModuleSelector>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    // A document holding only comments parses as null.
    let document: Option<SelectorDocument> =
        serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: Some(
                concat!(
                    "module selectors live under modules.include and need a name and a stream; ",
                    "quote the stream when it looks like a decimal number, e.g. \"5.30\""
                )
                .to_string(),
            ),
        })?;
    Ok(document.unwrap_or_default().modules.include)
}

/// Reads and parses a selector file.
pub fn from_file(path: &Path) -> Result<Vec<ModuleSelector>> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}
