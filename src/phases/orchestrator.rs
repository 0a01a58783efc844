//! Orchestrator for the modular matching pipeline
//!
//! This module wires the stages into [`ModularMatcher`], the concrete
//! [`Matcher`] that resolves module selectors into the four published sets.

use std::time::Instant;

use log::{debug, info};
use serde::Serialize;

use super::{artifacts, dedup, packages, resolve};
use crate::config::ModuleSelector;
use crate::error::Result;
use crate::matcher::{Matcher, UnitSearcher};
use crate::repository::RepoSet;
use crate::unit::UnitSet;

/// The sets a completed run publishes.
#[derive(Debug, Clone, Default)]
pub struct MatchOutput {
    /// One module per `(name, stream)`, the newest across contexts.
    pub modules: UnitSet,
    /// Binary packages, tagged with the binary repository they came from.
    pub binary_rpms: UnitSet,
    /// Debug packages, tagged with the debug repository they came from.
    pub debug_rpms: UnitSet,
    /// Source packages of the binary and debug packages.
    pub source_rpms: UnitSet,
}

/// Per-set counts of a [`MatchOutput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub modules: usize,
    pub binary_rpms: usize,
    pub debug_rpms: usize,
    pub source_rpms: usize,
}

impl MatchOutput {
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            modules: self.modules.len(),
            binary_rpms: self.binary_rpms.len(),
            debug_rpms: self.debug_rpms.len(),
            source_rpms: self.source_rpms.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
            && self.binary_rpms.is_empty()
            && self.debug_rpms.is_empty()
            && self.source_rpms.is_empty()
    }
}

/// Resolves module selectors into modules and the packages they ship.
///
/// Each [`run`](Matcher::run) re-queries the repositories. Results are
/// published only when every stage has finished; a failed run leaves the
/// previous output in place. Runs take `&mut self`, so one instance cannot
/// run twice at once.
pub struct ModularMatcher {
    searcher: UnitSearcher,
    repos: RepoSet,
    selectors: Vec<ModuleSelector>,
    output: Option<MatchOutput>,
}

impl ModularMatcher {
    pub fn new(searcher: UnitSearcher, repos: RepoSet, selectors: Vec<ModuleSelector>) -> Self {
        Self {
            searcher,
            repos,
            selectors,
            output: None,
        }
    }

    /// Convenience constructor that builds its own searcher.
    pub fn with_workers(
        workers: usize,
        repos: RepoSet,
        selectors: Vec<ModuleSelector>,
    ) -> Result<Self> {
        Ok(Self::new(UnitSearcher::new(workers)?, repos, selectors))
    }

    pub fn selectors(&self) -> &[ModuleSelector] {
        &self.selectors
    }

    /// Output of the last successful run.
    pub fn output(&self) -> Option<&MatchOutput> {
        self.output.as_ref()
    }

    /// Takes the output of the last successful run.
    pub fn take_output(&mut self) -> Option<MatchOutput> {
        self.output.take()
    }

    fn resolve(&self) -> Result<MatchOutput> {
        // Stage 1
        let raw_modules = resolve::execute(&self.searcher, &self.repos, &self.selectors)?.wait()?;
        debug!("Resolved {} modules", raw_modules.len());

        // Stage 2
        let latest = dedup::keep_latest_per_context(raw_modules);
        debug!("{} modules left after per-context deduplication", latest.len());

        // Stage 7 runs alongside stages 3-6.
        let output_modules = {
            let latest = latest.clone();
            self.searcher
                .spawn("module output set", move || Ok(dedup::output_set(latest)))
        };

        // Stages 3-4
        let rpm_criteria = artifacts::execute(&latest, &self.selectors)?;

        // Stage 5
        let (binary, debug) =
            packages::resolve_binary_and_debug(&self.searcher, &self.repos, &rpm_criteria);
        let binary_rpms = binary.wait()?;
        let debug_rpms = debug.wait()?;

        // Stage 6
        let source_rpms =
            packages::resolve_sources(&self.searcher, &self.repos, &binary_rpms, &debug_rpms)?
                .wait()?;

        Ok(MatchOutput {
            modules: output_modules.wait()?,
            binary_rpms,
            debug_rpms,
            source_rpms,
        })
    }
}

impl Matcher for ModularMatcher {
    fn run(&mut self) -> Result<()> {
        let start = Instant::now();
        let output = self.resolve()?;
        let summary = output.summary();
        info!(
            "Matched {} modules, {} binary, {} debug and {} source packages in {:.2?}",
            summary.modules,
            summary.binary_rpms,
            summary.debug_rpms,
            summary.source_rpms,
            start.elapsed()
        );
        self.output = Some(output);
        Ok(())
    }
}
