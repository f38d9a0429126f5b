// src/lib.rs

pub mod cli;
pub mod config;
pub mod dsl;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::PathBuf;

use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{discover, load_sources, parse_str, Watchfile};
use crate::dsl::{CompiledSpec, ScopeSpec};
use crate::fs::RealFileSystem;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - Watchfile discovery (project, home fallback, user additions)
/// - validation
/// - compilation, starting from the command-line scope
/// - a printed summary of the result
pub fn run(args: CliArgs) -> Result<()> {
    let fs = RealFileSystem;
    let home = dirs::home_dir();
    let sources = discover(
        &fs,
        &PathBuf::from(&args.config),
        home.as_deref(),
        !args.no_user_config,
    )?;
    info!(project = ?sources.project, user = ?sources.user, "loading Watchfile");

    let watchfile = load_sources(&fs, &sources)?;
    let scope = ScopeSpec::new(args.plugins.clone(), args.groups.clone());
    let spec = dsl::compile(watchfile, scope);

    print_summary(&spec);

    if args.strict && spec.has_errors() {
        bail!(
            "Watchfile compiled with {} error(s)",
            spec.diagnostics.errors().count()
        );
    }
    Ok(())
}

/// Parse, validate and compile Watchfile source text with an empty scope.
pub fn compile_str(contents: &str) -> errors::Result<CompiledSpec> {
    let watchfile = Watchfile::try_from(parse_str(contents)?)?;
    Ok(dsl::compile(watchfile, ScopeSpec::default()))
}

/// Human-readable dump of a compiled spec.
fn print_summary(spec: &CompiledSpec) {
    println!("watchfile summary");
    println!();

    println!("groups ({}):", spec.groups.len());
    for group in spec.groups.iter() {
        println!("  - {}", group.name);
        if !group.options.is_empty() {
            println!("      options: {:?}", group.options);
        }
        for plugin in spec.plugins_in_group(&group.name) {
            println!("      plugin {}", plugin.name);
            if !plugin.options.is_empty() {
                println!("        options: {:?}", plugin.options);
            }
            for watcher in &plugin.watchers {
                match watcher.action() {
                    Some(action) => println!("        watch {:?} -> {:?}", watcher.pattern(), action),
                    None => println!("        watch {:?}", watcher.pattern()),
                }
            }
            for entry in plugin.callbacks.entries() {
                let events: Vec<&str> = entry.events().iter().map(|e| e.as_str()).collect();
                println!("        callback {} on {:?}", entry.listener(), events);
            }
        }
    }

    if !spec.notifications.is_empty() {
        println!("notifications:");
        for n in &spec.notifications {
            println!("  - {} (silent: {})", n.library, n.silent);
        }
    }

    let logger = &spec.logger;
    if let Some(level) = logger.level {
        println!("logger.level = {level}");
    }
    if let Some(template) = &logger.template {
        println!("logger.template = {template:?}");
    }
    if let Some(time_format) = &logger.time_format {
        println!("logger.time_format = {time_format:?}");
    }
    if let Some(only) = &logger.only {
        println!("logger.only = /{}/i", only.as_str());
    }
    if let Some(except) = &logger.except {
        println!("logger.except = /{}/i", except.as_str());
    }

    if !spec.scope.plugins.is_empty() {
        println!("scope.plugins = {:?}", spec.scope.plugins);
    }
    if !spec.scope.groups.is_empty() {
        println!("scope.groups = {:?}", spec.scope.groups);
    }
    if !spec.interactor.enabled {
        println!("interactor: off");
    }

    let ignore: Vec<&str> = spec.path_filter.ignore_patterns().collect();
    if !ignore.is_empty() {
        println!("ignore: {ignore:?}");
    }
    let filter: Vec<&str> = spec.path_filter.filter_patterns().collect();
    if !filter.is_empty() {
        println!("filter: {filter:?}");
    }

    for d in spec.diagnostics.iter() {
        println!("{d}");
    }

    debug!("summary printed");
}
