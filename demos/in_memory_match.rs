//! Example: resolve a module selector against an in-memory catalog
//!
//! Run with: cargo run --example in_memory_match
//!
//! Set `RUST_LOG=debug` to watch the stages run.

use modmatch::config::ModuleSelector;
use modmatch::matcher::Matcher;
use modmatch::phases::ModularMatcher;
use modmatch::repository::{InMemoryRepository, RepoSet};
use modmatch::unit::{Entity, Module, Package, PackageKind};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Two builds of the same stream; only the newer one is published.
    let newer = Module::new("nodejs", "12", 8030020200924, "229f0a1c", "x86_64")
        .with_artifacts([
            "nodejs-1:12.18.4-2.module+el8.3.0.x86_64",
            "npm-1:6.14.6-1.12.18.4.2.module+el8.3.0.x86_64",
            "nodejs-debuginfo-1:12.18.4-2.module+el8.3.0.x86_64",
            "nodejs-1:12.18.4-2.module+el8.3.0.src",
        ])
        .with_profile("minimal", ["nodejs"]);
    let older = Module::new("nodejs", "12", 8020020200707, "229f0a1c", "x86_64")
        .with_artifacts(["nodejs-1:12.18.2-1.module+el8.2.0.x86_64"]);

    let srpm = "nodejs-12.18.4-2.module+el8.3.0.src.rpm";
    let binary = InMemoryRepository::with_units(
        "appstream",
        [
            Entity::from(newer),
            Entity::from(older),
            Entity::from(
                Package::new("nodejs", "12.18.4", "2.module+el8.3.0", "x86_64")
                    .with_filename("nodejs-12.18.4-2.module+el8.3.0.x86_64.rpm")
                    .with_sourcerpm(srpm),
            ),
            Entity::from(
                Package::new("npm", "6.14.6", "1.12.18.4.2.module+el8.3.0", "x86_64")
                    .with_filename("npm-6.14.6-1.12.18.4.2.module+el8.3.0.x86_64.rpm")
                    .with_sourcerpm(srpm),
            ),
        ],
    );
    let debug = InMemoryRepository::with_units(
        "appstream-debug",
        [Package::new("nodejs-debuginfo", "12.18.4", "2.module+el8.3.0", "x86_64")
            .with_filename("nodejs-debuginfo-12.18.4-2.module+el8.3.0.x86_64.rpm")
            .with_sourcerpm(srpm)
            .with_kind(PackageKind::Debug)],
    );
    let source = InMemoryRepository::with_units(
        "appstream-source",
        [Package::new("nodejs", "12.18.4", "2.module+el8.3.0", "src")
            .with_filename(srpm)
            .with_kind(PackageKind::Source)],
    );

    let repos = RepoSet::new(
        vec![binary.into_handle()],
        vec![debug.into_handle()],
        vec![source.into_handle()],
    );

    for selector in [
        ModuleSelector::new("nodejs", "12"),
        ModuleSelector::new("nodejs", "12").with_profiles(["minimal"]),
    ] {
        println!("Selector {}", selector);
        let mut matcher = ModularMatcher::with_workers(2, repos.clone(), vec![selector])?;
        matcher.run()?;

        if let Some(output) = matcher.output() {
            for (title, units) in [
                ("modules", &output.modules),
                ("binary", &output.binary_rpms),
                ("debug", &output.debug_rpms),
                ("source", &output.source_rpms),
            ] {
                for unit in units {
                    println!("  {:<8} {}", title, unit);
                }
            }
        }
        println!();
    }

    Ok(())
}
