//! # Output Rendering
//!
//! Turns a [`MatchOutput`] into what `modmatch match` prints: a sorted text
//! listing for people or a JSON document for scripts. Styling of the text
//! listing (headers in color, emoji status markers) is decided once per run
//! and carried in an [`OutputConfig`].
//!
//! With `--color=auto` the decision follows the environment, checked in this
//! order:
//! - `NO_COLOR` present with any value turns styling off
//! - `CLICOLOR=0` turns styling off
//! - `CLICOLOR_FORCE` set to anything but `0` or empty turns styling on
//! - `TERM=dumb` turns styling off
//! - otherwise styling follows whether stdout is a color terminal
//!
//! ```rust,ignore
//! use modmatch::output::{render_text, OutputConfig};
//!
//! let config = OutputConfig::from_env_and_flag("auto");
//! print!("{}", render_text(&config, &output));
//! ```

use std::env;
use std::fmt::Write as _;

use console::style;
use serde::Serialize;

use crate::error::Result;
use crate::phases::{MatchOutput, MatchSummary};
use crate::unit::{Entity, UnitSet};

/// Styling decision for one run of the CLI.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Colored headers and emoji markers when set, plain ASCII otherwise.
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolves the `--color` value. `always` and `never` are final; any
    /// other value, `auto` included, defers to the process environment and
    /// the stdout terminal.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => color_from_env(process_env)
                .unwrap_or_else(|| console::Term::stdout().features().colors_supported()),
        };

        Self { use_color }
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

fn process_env(name: &str) -> Option<String> {
    env::var_os(name).map(|value| value.to_string_lossy().into_owned())
}

/// Styling forced by environment variables, or `None` when the terminal
/// should decide. `lookup` returns a variable's value when it is present.
fn color_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<bool> {
    if lookup("NO_COLOR").is_some() {
        return Some(false);
    }
    if lookup("CLICOLOR").as_deref() == Some("0") {
        return Some(false);
    }
    if lookup("CLICOLOR_FORCE").is_some_and(|v| v != "0" && !v.is_empty()) {
        return Some(true);
    }
    if lookup("TERM").as_deref() == Some("dumb") {
        return Some(false);
    }
    None
}

/// Picks the status marker for a log line: `styled` under color, `plain`
/// for pipes and dumb terminals.
pub fn emoji<'a>(config: &OutputConfig, styled: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        styled
    } else {
        plain
    }
}

/// Units of a set as `(display, repo)` pairs, sorted.
fn sorted_lines(units: &UnitSet) -> Vec<(String, &str)> {
    let mut lines: Vec<(String, &str)> = units
        .iter()
        .map(|unit| (unit.entity().to_string(), unit.source_repo_id()))
        .collect();
    lines.sort();
    lines
}

fn sections(output: &MatchOutput) -> [(&'static str, &UnitSet); 4] {
    [
        ("Modules", &output.modules),
        ("Binary packages", &output.binary_rpms),
        ("Debug packages", &output.debug_rpms),
        ("Source packages", &output.source_rpms),
    ]
}

/// Renders the result sets as a human-readable listing, sorted within each
/// set so repeated runs diff cleanly.
pub fn render_text(config: &OutputConfig, output: &MatchOutput) -> String {
    let mut text = String::new();
    for (title, units) in sections(output) {
        let header = format!("{} ({})", title, units.len());
        if config.use_color {
            let _ = writeln!(text, "{}", style(header).bold().cyan().force_styling(true));
        } else {
            let _ = writeln!(text, "{}", header);
        }
        for (unit, repo) in sorted_lines(units) {
            let _ = writeln!(text, "  {}  [{}]", unit, repo);
        }
    }
    text
}

#[derive(Serialize)]
struct UnitRecord<'a> {
    repo: &'a str,
    unit: &'a Entity,
}

#[derive(Serialize)]
struct OutputDocument<'a> {
    summary: MatchSummary,
    modules: Vec<UnitRecord<'a>>,
    binary_rpms: Vec<UnitRecord<'a>>,
    debug_rpms: Vec<UnitRecord<'a>>,
    source_rpms: Vec<UnitRecord<'a>>,
}

fn records(units: &UnitSet) -> Vec<UnitRecord<'_>> {
    let mut records: Vec<UnitRecord<'_>> = units
        .iter()
        .map(|unit| UnitRecord {
            repo: unit.source_repo_id(),
            unit: unit.entity(),
        })
        .collect();
    records.sort_by(|a, b| (a.unit, a.repo).cmp(&(b.unit, b.repo)));
    records
}

/// Renders the result sets as pretty-printed JSON.
pub fn render_json(output: &MatchOutput) -> Result<String> {
    let document = OutputDocument {
        summary: output.summary(),
        modules: records(&output.modules),
        binary_rpms: records(&output.binary_rpms),
        debug_rpms: records(&output.debug_rpms),
        source_rpms: records(&output.source_rpms),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
