//! # langloc
//!
//! A CLI tool for counting lines of code by language.
//!
//! ## Overview
//!
//! langloc is built on top of langloclib. It walks a directory, classifies
//! files by name and extension, counts physical lines and prints one row per
//! language, largest first, with a TOTAL row last.
//!
//! ## Usage
//!
//! ```bash
//! # Count the current directory
//! langloc
//!
//! # Only code languages (Python, C++, Cython, C, Fortran)
//! langloc path/to/repo --code-only
//!
//! # Count unrecognised files as "Text" instead of skipping them
//! langloc . --unknown text
//!
//! # Per-file breakdown as CSV
//! langloc . --by-file --output csv
//!
//! # Include gitignored and hidden files
//! langloc . --no-ignore
//!
//! # Glob filters, extra skipped directories, a config file
//! langloc . --exclude "**/vendor/**" --skip-dir build --config langloc.json
//! ```
//!
//! Exit status is 0 on success, 1 when no file matched and 2 on errors.

mod logging;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use langloclib::{
    count_directory, Aggregation, ConfigFile, CountOptions, FilterConfig, LOCTable, OrderBy,
    Ordering, Report, ReportOptions, UnknownPolicy,
};
use tracing::info;

use logging::Verbosity;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("langloc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Count lines of code by language")
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
            Arg::new("skip-dir")
                .long("skip-dir")
                .action(ArgAction::Append)
                .help("Directory name to skip (added to the skip-list)"),
        )
        .arg(
            Arg::new("no-ignore")
                .long("no-ignore")
                .action(ArgAction::SetTrue)
                .help("Also count files hidden or excluded by .gitignore/.ignore rules"),
        )
        .arg(
            Arg::new("unknown")
                .long("unknown")
                .value_parser(["text", "exclude"])
                .help("What to do with unrecognised files [default: exclude]"),
        )
        .arg(
            Arg::new("code-only")
                .long("code-only")
                .action(ArgAction::SetTrue)
                .help("Only report code languages (Python, C++, Cython, C, Fortran)"),
        )
        .arg(
            Arg::new("by-file")
                .short('f')
                .long("by-file")
                .action(ArgAction::SetTrue)
                .help("Show breakdown by file"),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .value_parser(["lines", "language"])
                .default_value("lines")
                .help("Order rows by line count (largest first) or by name"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "json", "csv"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .value_parser(clap::value_parser!(usize))
                .default_value("1")
                .help("Worker threads (0 = all cores)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_parser(clap::value_parser!(PathBuf))
                .help("JSON file overriding the skip-list and language table"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Suppress warnings"),
        )
}

/// Build filter config from matches, on top of `base`
fn build_filter(matches: &ArgMatches, base: FilterConfig) -> anyhow::Result<FilterConfig> {
    let mut filter = base;

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    if let Some(dirs) = matches.get_many::<String>("skip-dir") {
        for dir in dirs {
            filter = filter.skip_dir(dir.clone());
        }
    }

    if matches.get_flag("no-ignore") {
        filter = filter.ignore_files(false);
    }

    Ok(filter)
}

/// Build count options: defaults, then the config file, then flags
fn build_count_options(matches: &ArgMatches) -> anyhow::Result<CountOptions> {
    let mut options = CountOptions::new();

    if let Some(path) = matches.get_one::<PathBuf>("config") {
        let config = ConfigFile::load(path)?;
        info!(path = %path.display(), "loaded config");
        options = config.apply(options);
    }

    let filter = build_filter(matches, options.file_filter.clone())?;
    let mut languages = options.languages.clone();
    if let Some(policy) = matches.get_one::<String>("unknown") {
        let policy: UnknownPolicy = policy.parse().map_err(anyhow::Error::msg)?;
        languages = languages.unknown_policy(policy);
    }
    let jobs = matches.get_one::<usize>("jobs").copied().unwrap_or(1);

    Ok(options.filter(filter).languages(languages).jobs(jobs))
}

fn build_report_options(
    matches: &ArgMatches,
    options: &CountOptions,
) -> anyhow::Result<ReportOptions> {
    let aggregation = if matches.get_flag("by-file") {
        Aggregation::ByFile
    } else {
        Aggregation::ByLanguage
    };

    let order_by: OrderBy = matches
        .get_one::<String>("sort")
        .map(|s| s.as_str())
        .unwrap_or("lines")
        .parse()
        .map_err(anyhow::Error::msg)?;
    let ordering = match order_by {
        OrderBy::Lines => Ordering::by_lines(),
        OrderBy::Label => Ordering::by_label(),
    };

    let report_options = ReportOptions::new()
        .aggregation(aggregation)
        .ordering(ordering);

    Ok(if matches.get_flag("code-only") {
        report_options.code_only(&options.languages)
    } else {
        report_options
    })
}

/// Count, render and print. Returns the exit status for a completed run.
fn run(matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let options = build_count_options(matches)?;
    let report_options = build_report_options(matches, &options)?;

    let result = count_directory(path, options)?;
    let report = Report::from_result(&result, &report_options);

    let status = if result.buckets.is_empty() {
        println!("No matching files found.");
        ExitCode::from(1)
    } else {
        let output = match matches
            .get_one::<String>("output")
            .map(|s| s.as_str())
            .unwrap_or("table")
        {
            "json" => render::render_json(&report).context("failed to serialize report")? + "\n",
            "csv" => render::render_csv(&LOCTable::from_report(&report)),
            _ => render::render_table(&LOCTable::from_report(&report)),
        };
        print!("{}", output);
        ExitCode::SUCCESS
    };

    if !report.warnings.is_empty() && !matches.get_flag("quiet") {
        eprintln!(
            "warning: skipped {} unreadable file(s)",
            report.warnings.len()
        );
        for warning in &report.warnings {
            eprintln!("  {}", warning);
        }
    }

    Ok(status)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    logging::init(Verbosity::from_flags(
        matches.get_count("verbose"),
        matches.get_flag("quiet"),
    ));

    match run(&matches) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["langloc"];
        argv.extend(args);
        build_command().try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn test_command_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let m = matches(&[]);
        let options = build_count_options(&m).unwrap();
        let report = build_report_options(&m, &options).unwrap();

        assert_eq!(options.jobs, 1);
        assert!(options.file_filter.ignore_files);
        assert_eq!(options.languages.policy(), UnknownPolicy::Exclude);
        assert_eq!(report.aggregation, Aggregation::ByLanguage);
        assert_eq!(report.ordering, Ordering::by_lines());
        assert!(report.languages.is_none());
    }

    #[test]
    fn test_flags_map_to_options() {
        let m = matches(&[
            "--unknown",
            "text",
            "--by-file",
            "--sort",
            "language",
            "--code-only",
            "-j",
            "4",
            "--skip-dir",
            "build",
            "-e",
            "**/vendor/**",
            "--no-ignore",
        ]);
        let options = build_count_options(&m).unwrap();
        let report = build_report_options(&m, &options).unwrap();

        assert_eq!(options.jobs, 4);
        assert_eq!(options.languages.policy(), UnknownPolicy::Text);
        assert!(options.file_filter.is_skipped_dir("build"));
        assert!(options.file_filter.is_skipped_dir(".git"));
        assert_eq!(options.file_filter.exclude.len(), 1);
        assert!(!options.file_filter.ignore_files);
        assert_eq!(report.aggregation, Aggregation::ByFile);
        assert_eq!(report.ordering, Ordering::by_label());
        assert!(report.includes("Python"));
        assert!(!report.includes("Markdown"));
    }

    #[test]
    fn test_invalid_glob_is_an_error() {
        let m = matches(&["--include", "[oops"]);
        assert!(build_count_options(&m).is_err());
    }
}
