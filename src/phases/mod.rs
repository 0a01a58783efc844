//! Implementation of the stages of the modular matching pipeline.
//!
//! ## Overview
//!
//! A run goes through the following stages:
//! 1. Module Resolution - Search binary repositories for the selected modules
//! 2. Per-context Deduplication - Keep the newest build of each (name, stream, context)
//! 3. Artifact Extraction - Turn module artifacts into package filenames, narrowed by profiles
//! 4. Package Criteria - One filename criterion per package
//! 5. Binary and Debug Resolution - Search binary and debug repositories concurrently
//! 6. Source Resolution - Search source repositories for the packages' sources
//! 7. Output Reduction - Keep one module per (name, stream) for publication
//!
//! Stage 7 only needs stage 2 and runs alongside stages 3-6. Stage 6 waits for
//! both stage 5 searches. Every stage is a function of its inputs; the
//! [`orchestrator`] is the only place that holds intermediate results.

pub mod artifacts;
pub mod dedup;
pub mod orchestrator;
pub mod packages;
pub mod resolve;

pub use orchestrator::{MatchOutput, MatchSummary, ModularMatcher};
