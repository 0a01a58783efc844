//! Default values for modmatch configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// Width of the worker pool searches run on.
///
/// Overridden by the `--workers` CLI flag or the `MODMATCH_WORKERS`
/// environment variable.
pub const DEFAULT_WORKERS: usize = 4;

/// Selector document read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "modules.yaml";

/// Catalog snapshot read when `--catalog` is not given.
pub const DEFAULT_CATALOG_FILE: &str = "catalog.yaml";
