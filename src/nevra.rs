//! NEVRA parsing.
//!
//! Module artifacts are listed as `name-[epoch:]version-release.arch`. The
//! matcher needs two things from them: the architecture (to drop source
//! artifacts) and the package filename the artifact was built into, which
//! never carries the epoch.

use std::fmt;

use crate::error::{Error, Result};

/// Architecture tag of source artifacts.
pub const SOURCE_ARCH: &str = "src";

/// A parsed `name-[epoch:]version-release.arch` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nevra {
    pub name: String,
    pub epoch: Option<String>,
    pub version: String,
    pub release: String,
    pub arch: String,
}

impl Nevra {
    /// Parses a NEVRA string.
    ///
    /// The string is split from the right, so names containing dashes
    /// (`perl-version`, `bash-devel`) survive intact. An epoch may precede
    /// either the version (`name-7:1.0-1.x86_64`) or the whole string
    /// (`7:name-1.0-1.x86_64`).
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidNevra {
            value: value.to_string(),
        };

        let (rest, arch) = value.rsplit_once('.').ok_or_else(invalid)?;
        let (rest, release) = rest.rsplit_once('-').ok_or_else(invalid)?;
        let (name, epoch_version) = rest.rsplit_once('-').ok_or_else(invalid)?;

        let (mut epoch, version) = match epoch_version.split_once(':') {
            Some((epoch, version)) => (Some(epoch), version),
            None => (None, epoch_version),
        };
        let name = match name.split_once(':') {
            Some((leading_epoch, name)) if epoch.is_none() => {
                epoch = Some(leading_epoch);
                name
            }
            _ => name,
        };

        if [name, version, release, arch].iter().any(|part| part.is_empty()) {
            return Err(invalid());
        }
        if epoch.is_some_and(|e| e.is_empty() || !e.chars().all(|c| c.is_ascii_digit())) {
            return Err(invalid());
        }

        Ok(Self {
            name: name.to_string(),
            epoch: epoch.map(str::to_string),
            version: version.to_string(),
            release: release.to_string(),
            arch: arch.to_string(),
        })
    }

    /// True for source artifacts (`arch == "src"`).
    pub fn is_source(&self) -> bool {
        self.arch == SOURCE_ARCH
    }

    /// The package filename this artifact corresponds to:
    /// `name-version-release.arch.rpm`, epoch dropped.
    pub fn rpm_filename(&self) -> String {
        format!(
            "{}-{}-{}.{}.rpm",
            self.name, self.version, self.release, self.arch
        )
    }
}

impl fmt::Display for Nevra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.epoch {
            Some(epoch) => write!(
                f,
                "{}-{}:{}-{}.{}",
                self.name, epoch, self.version, self.release, self.arch
            ),
            None => write!(
                f,
                "{}-{}-{}.{}",
                self.name, self.version, self.release, self.arch
            ),
        }
    }
}
