//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures, helper functions, and macros
//! to reduce duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_config(configs::PERL).with_catalog(catalogs::PERL);
//!     fixture.command().arg("match").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::catalogs;
    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Module selector documents for testing.
#[allow(dead_code)]
pub mod configs {
    /// Selects perl 5.30 with every package.
    pub const PERL: &str = r#"
modules:
  include:
    - name: perl
      stream: "5.30"
"#;

    /// Selects perl 5.30 narrowed to its minimal profile.
    pub const PERL_MINIMAL: &str = r#"
modules:
  include:
    - name: perl
      stream: "5.30"
      profiles: [minimal]
"#;

    /// Selects nothing.
    pub const EMPTY: &str = "# no modules selected\n";

    /// Selects nodejs 12 with every package.
    pub const NODEJS: &str = r#"
modules:
  include:
    - name: nodejs
      stream: 12
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "modules: [include: {";
}

/// Catalog snapshots for testing.
#[allow(dead_code)]
pub mod catalogs {
    /// Two perl builds of the same context (versions 100 and 99), their
    /// packages, a debug package and the source packages.
    pub const PERL: &str = r#"
repositories:
  - id: binary_repo
    role: binary
    units:
      - type: module
        name: perl
        stream: "5.30"
        version: 100
        context: abcd
        arch: x86_64
        artifacts:
          - perl-4:5.30.1-452.el8.x86_64
          - perl-libs-4:5.30.1-452.el8.x86_64
          - perl-debuginfo-4:5.30.1-452.el8.x86_64
          - perl-4:5.30.1-452.el8.src
        profiles:
          minimal: [perl-libs]
      - type: module
        name: perl
        stream: "5.30"
        version: 99
        context: abcd
        arch: x86_64
        artifacts:
          - perl-4:5.30.1-451.el8.x86_64
      - type: package
        name: perl
        version: "5.30.1"
        release: 452.el8
        arch: x86_64
        filename: perl-5.30.1-452.el8.x86_64.rpm
        sourcerpm: perl-5.30.1-452.el8.src.rpm
      - type: package
        name: perl-libs
        version: "5.30.1"
        release: 452.el8
        arch: x86_64
        filename: perl-libs-5.30.1-452.el8.x86_64.rpm
        sourcerpm: perl-5.30.1-452.el8.src.rpm
      - type: package
        name: perl
        version: "5.30.1"
        release: 451.el8
        arch: x86_64
        filename: perl-5.30.1-451.el8.x86_64.rpm
        sourcerpm: perl-5.30.1-451.el8.src.rpm
  - id: debug_repo
    role: debug
    units:
      - type: package
        name: perl-debuginfo
        version: "5.30.1"
        release: 452.el8
        arch: x86_64
        kind: debug
        filename: perl-debuginfo-5.30.1-452.el8.x86_64.rpm
        sourcerpm: perl-5.30.1-452.el8.src.rpm
  - id: source_repo
    role: source
    units:
      - type: package
        name: perl
        version: "5.30.1"
        release: 452.el8
        arch: src
        kind: source
        filename: perl-5.30.1-452.el8.src.rpm
      - type: package
        name: perl
        version: "5.30.1"
        release: 451.el8
        arch: src
        kind: source
        filename: perl-5.30.1-451.el8.src.rpm
"#;

    /// Two nodejs 12 builds in different contexts. Only the newer one is
    /// published, but the packages of both must be found.
    pub const NODEJS_CONTEXTS: &str = r#"
repositories:
  - id: appstream
    role: binary
    units:
      - type: module
        name: nodejs
        stream: "12"
        version: 101
        context: ctxA
        arch: x86_64
        artifacts: ["nodejs-1:12.18.4-2.el8.x86_64"]
      - type: module
        name: nodejs
        stream: "12"
        version: 100
        context: ctxB
        arch: x86_64
        artifacts: ["npm-1:6.14.6-1.el8.x86_64"]
      - type: package
        name: nodejs
        version: "12.18.4"
        release: 2.el8
        arch: x86_64
        filename: nodejs-12.18.4-2.el8.x86_64.rpm
        sourcerpm: nodejs-12.18.4-2.el8.src.rpm
      - type: package
        name: npm
        version: "6.14.6"
        release: 1.el8
        arch: x86_64
        filename: npm-6.14.6-1.el8.x86_64.rpm
        sourcerpm: nodejs-12.18.4-1.el8.src.rpm
  - id: appstream-source
    role: source
    units:
      - type: package
        name: nodejs
        version: "12.18.4"
        release: 2.el8
        arch: src
        kind: source
        filename: nodejs-12.18.4-2.el8.src.rpm
      - type: package
        name: nodejs
        version: "12.18.4"
        release: 1.el8
        arch: src
        kind: source
        filename: nodejs-12.18.4-1.el8.src.rpm
"#;

    /// Two repositories sharing an identifier.
    pub const DUPLICATE_IDS: &str = r#"
repositories:
  - id: repo
    role: binary
  - id: repo
    role: debug
"#;
}

/// A test fixture that provides a temporary directory holding a selector
/// file and a catalog snapshot.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_config(configs::PERL)
///     .with_catalog(catalogs::PERL);
///
/// fixture.command().arg("match").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `modules.yaml` selector file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file("modules.yaml", content)
    }

    /// Add a `catalog.yaml` snapshot with the given content.
    pub fn with_catalog(self, content: &str) -> Self {
        self.with_file("catalog.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the selector file.
    #[allow(dead_code)]
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("modules.yaml")
    }

    /// Get the path to the catalog snapshot.
    #[allow(dead_code)]
    pub fn catalog_path(&self) -> PathBuf {
        self.temp_dir.path().join("catalog.yaml")
    }

    /// Create a command configured to run in this fixture's directory.
    ///
    /// `MODMATCH_*` variables from the surrounding environment are cleared so
    /// they cannot leak into the run.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("modmatch");
        cmd.current_dir(self.path())
            .env_remove("MODMATCH_CONFIG")
            .env_remove("MODMATCH_CATALOG")
            .env_remove("MODMATCH_WORKERS")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_config_and_catalog() {
        let fixture = TestFixture::new()
            .with_config(configs::PERL)
            .with_catalog(catalogs::PERL);
        assert!(fixture.config_path().exists());
        assert!(fixture.catalog_path().exists());
    }

    #[test]
    fn test_fixtures_are_valid_yaml() {
        let documents = [
            configs::PERL,
            configs::PERL_MINIMAL,
            configs::NODEJS,
            catalogs::PERL,
            catalogs::NODEJS_CONTEXTS,
            catalogs::DUPLICATE_IDS,
        ];
        for document in documents {
            serde_yaml::from_str::<serde_yaml::Value>(document)
                .expect("Fixture should be valid YAML");
        }
    }

    #[test]
    fn test_invalid_yaml_is_actually_invalid() {
        let result = serde_yaml::from_str::<serde_yaml::Value>(configs::INVALID_YAML);
        assert!(result.is_err(), "INVALID_YAML should not parse");
    }
}
