//! # srclint
//!
//! A CLI for the srclintlib structural scanner: finds overlong functions,
//! duplicate declarations, alias bindings, destructuring declarations and
//! comment-heavy files in JavaScript codebases.
//!
//! ## Usage
//!
//! ```bash
//! # Check the current directory with every check at default thresholds
//! srclint .
//!
//! # Only the length check, with a tighter limit
//! srclint . --check length --max-lines 20
//!
//! # Narrow the file set with glob patterns
//! srclint . --include "lib/**/*.js" --exclude "**/vendor/**"
//!
//! # Machine-readable output
//! srclint . --output json
//!
//! # Inspect what the scanner sees
//! srclint . --list-functions
//! ```
//!
//! Exits 0 when no violations are found, 1 when any check fires, and 2 on
//! operational errors (unreadable paths, bad glob patterns).

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use rayon::prelude::*;
use srclintlib::{
    check_file, compute_own_lines, discover_files, extract_functions, Check, CheckConfig,
    FileReport, FilterConfig, NameIndex, ScopeMetric, Violation,
};

mod render;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("srclint")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Heuristic structural linter for JavaScript sources")
        .arg(
            Arg::new("path")
                .help("Path to analyze (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Include files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern"),
        )
        .arg(
            Arg::new("check")
                .short('c')
                .long("check")
                .action(ArgAction::Append)
                .value_parser(["length", "duplicates", "aliases", "destructuring", "comments"])
                .help("Run only the named check (can be specified multiple times)"),
        )
        .arg(
            Arg::new("max-lines")
                .long("max-lines")
                .value_parser(clap::value_parser!(usize))
                .help("Own-line limit for the length check [default: 30]"),
        )
        .arg(
            Arg::new("max-comments")
                .long("max-comments")
                .value_parser(clap::value_parser!(usize))
                .help("Countable inline-comment threshold [default: 5]"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("list-functions")
                .long("list-functions")
                .action(ArgAction::SetTrue)
                .help("List extracted functions with own-line counts instead of checking"),
        )
}

fn build_filter(matches: &ArgMatches) -> anyhow::Result<FilterConfig> {
    let mut filter = FilterConfig::new();
    if let Some(patterns) = matches.get_many::<String>("include") {
        for pattern in patterns {
            filter = filter.include(pattern)?;
        }
    }
    if let Some(patterns) = matches.get_many::<String>("exclude") {
        for pattern in patterns {
            filter = filter.exclude(pattern)?;
        }
    }
    Ok(filter)
}

fn build_config(matches: &ArgMatches) -> CheckConfig {
    let mut config = CheckConfig::new();
    if let Some(max) = matches.get_one::<usize>("max-lines") {
        config.max_own_lines = *max;
    }
    if let Some(max) = matches.get_one::<usize>("max-comments") {
        config.max_inline_comments = *max;
    }
    if let Some(checks) = matches.get_many::<String>("check") {
        // Values are pre-validated by clap's value_parser.
        config.checks = checks.filter_map(|s| s.parse::<Check>().ok()).collect();
    }
    config
}

/// Read and scan every file for the `--list-functions` view.
fn list_functions(files: &[PathBuf]) -> anyhow::Result<Vec<(PathBuf, Vec<ScopeMetric>)>> {
    files
        .iter()
        .map(|file| {
            let text = fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            Ok((file.clone(), compute_own_lines(&extract_functions(&text))))
        })
        .collect()
}

fn run(matches: &ArgMatches) -> anyhow::Result<bool> {
    let root = matches
        .get_one::<String>("path")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let filter = build_filter(matches)?;
    let config = build_config(matches);

    let files = discover_files(&root, &filter)
        .with_context(|| format!("cannot scan {}", root.display()))?;

    if matches.get_flag("list-functions") {
        let listing = list_functions(&files)?;
        print!("{}", render::render_functions(&listing, &root));
        return Ok(false);
    }

    // One independent scan task per file; rayon owns the fan-out. The
    // cross-file name index is merged sequentially from completed reports.
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|file| check_file(file, &config))
        .collect::<srclintlib::Result<Vec<_>>>()?;

    let mut violations: Vec<Violation> = reports
        .iter()
        .flat_map(|report| report.violations.iter().cloned())
        .collect();

    if config.enabled(Check::Duplicates) {
        let mut index = NameIndex::new();
        for report in &reports {
            index.record(&report.file, &report.names);
        }
        violations.extend(index.violations());
    }

    violations.sort_by(|a, b| (&a.file, a.line).cmp(&(&b.file, b.line)));

    match matches.get_one::<String>("output").map(String::as_str) {
        Some("json") => println!("{}", render::render_json(&violations, files.len())?),
        _ => print!("{}", render::render_violations(&violations, files.len(), &root)),
    }

    Ok(!violations.is_empty())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    match run(&matches) {
        Ok(true) => ExitCode::FAILURE,
        Ok(false) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}
