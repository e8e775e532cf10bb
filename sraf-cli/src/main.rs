//! Command-line interface for sraf
//! This binary scans SEC filings against the Loughran-McDonald Master Dictionary and
//! writes one row of statistics per filing.
//!
//! Usage:
//!   sraf scan `<path>` --lexicon `<csv>` [--output `<file>`] [--format csv|json]  - Scan a file or directory
//!   sraf lookup --lexicon `<csv>` [`<word>`...] [--sequence `<n>`...]            - Show dictionary entries
//!   sraf wordcounts `<file>` --lexicon `<csv>` [--target `<word>`...] [--report]   - Decode a Document Dictionary
//!
//! Settings come from the built-in defaults, then `./sraf.toml` or `--config <file>`,
//! then `SRAF_*` environment variables, then command-line flags. Logging goes to stderr and honors `RUST_LOG`.
mod batch;
mod report;
mod wordcounts;

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use sraf_config::{Loader, SrafConfig};
use sraf_parser::{Lexicon, Scanner};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOCAL_CONFIG: &str = "sraf.toml";

fn config_args() -> [Arg; 2] {
    [
        Arg::new("config")
            .long("config")
            .short('c')
            .help("Configuration file layered over the defaults")
            .value_parser(value_parser!(PathBuf)),
        Arg::new("lexicon")
            .long("lexicon")
            .short('l')
            .help("Path to the Loughran-McDonald Master Dictionary CSV"),
    ]
}

fn build_cli() -> Command {
    Command::new("sraf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sentiment word counts for SEC filings using the Loughran-McDonald dictionary")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log output (-v info, -vv debug)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("scan")
                .about("Scan a file, or every file under a directory, and write a report")
                .arg(
                    Arg::new("path")
                        .help("File or directory of filings")
                        .required(true)
                        .index(1)
                        .value_parser(value_parser!(PathBuf)),
                )
                .args(config_args())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write the report here instead of stdout")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Report format")
                        .value_parser(["csv", "json"]),
                )
                .arg(
                    Arg::new("month-filter")
                        .long("month-filter")
                        .help("How the month name \"May\" is removed before counting")
                        .value_parser(["ignore-case", "exact-case", "disabled"]),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .short('n')
                        .help("Stop after this many files (0 for no limit)")
                        .value_parser(value_parser!(i64).range(0..)),
                )
                .arg(
                    Arg::new("threads")
                        .long("threads")
                        .short('j')
                        .help("Worker threads (0 for one per core)")
                        .value_parser(value_parser!(i64).range(0..)),
                ),
        )
        .subcommand(
            Command::new("lookup")
                .about("Print Master Dictionary entries as JSON lines")
                .arg(
                    Arg::new("words")
                        .help("Words to look up (case-insensitive)")
                        .num_args(0..)
                        .index(1),
                )
                .arg(
                    Arg::new("sequence")
                        .long("sequence")
                        .short('s')
                        .help("Look up an entry by its sequence number")
                        .action(ArgAction::Append)
                        .value_parser(value_parser!(u64)),
                )
                .args(config_args()),
        )
        .subcommand(
            Command::new("wordcounts")
                .about("Decode a Document Dictionary file into per-filing word counts")
                .arg(
                    Arg::new("path")
                        .help("Document Dictionary file (header|seq:count,...)")
                        .required(true)
                        .index(1)
                        .value_parser(value_parser!(PathBuf)),
                )
                .args(config_args())
                .arg(
                    Arg::new("target")
                        .long("target")
                        .short('t')
                        .help("Only report this word (repeatable, case-insensitive)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .help("Write sentiment report rows instead of raw counts")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Report format, with --report")
                        .value_parser(["csv", "json"]),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .short('n')
                        .help("Stop after this many filings (0 for no limit)")
                        .value_parser(value_parser!(i64).range(0..)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write here instead of stdout")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_count("verbose"));

    let result = match matches.subcommand() {
        Some(("scan", scan_matches)) => handle_scan_command(scan_matches),
        Some(("lookup", lookup_matches)) => handle_lookup_command(lookup_matches),
        Some(("wordcounts", wordcounts_matches)) => handle_wordcounts_command(wordcounts_matches),
        _ => unreachable!("a subcommand is required"),
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Layer defaults, the config file and command-line flags
fn load_config(matches: &ArgMatches) -> Result<SrafConfig> {
    let mut loader = match matches.get_one::<PathBuf>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    }
    .with_environment();

    let string_overrides = [
        ("lexicon", "lexicon.path"),
        ("month-filter", "scan.month_filter"),
        ("format", "output.format"),
    ];
    for (arg, key) in string_overrides {
        if let Some(value) = matches.try_get_one::<String>(arg).ok().flatten() {
            loader = loader.set_override(key, value.as_str())?;
        }
    }

    let integer_overrides = [("limit", "batch.limit"), ("threads", "batch.threads")];
    for (arg, key) in integer_overrides {
        if let Some(value) = matches.try_get_one::<i64>(arg).ok().flatten() {
            loader = loader.set_override(key, *value)?;
        }
    }

    loader.build().context("invalid configuration")
}

fn load_lexicon(config: &SrafConfig) -> Result<Lexicon> {
    let Some(path) = config.lexicon.path.as_ref() else {
        bail!("no lexicon given; pass --lexicon or set lexicon.path in {LOCAL_CONFIG}");
    };
    Lexicon::from_path(path)
        .with_context(|| format!("failed to load lexicon from '{}'", path.display()))
}

/// Handle the scan command
fn handle_scan_command(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let lexicon = load_lexicon(&config)?;
    let scanner = Scanner::new(&lexicon)?.with_month_filter(config.scan.month_filter);
    tracing::debug!(
        entries = scanner.lexicon().len(),
        month_filter = ?scanner.month_filter(),
        "scanner ready"
    );

    let root = matches
        .get_one::<PathBuf>("path")
        .context("a path to scan is required")?;
    let paths = batch::collect_paths(root, config.batch.limit())?;
    if paths.is_empty() {
        tracing::warn!(path = %root.display(), "no files to scan");
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.batch.threads)
        .build()
        .context("failed to start worker threads")?;
    let rows = pool.install(|| batch::scan_paths(&scanner, &paths));
    tracing::info!(documents = rows.len(), "scan complete");

    let writer = open_output(matches)?;
    report::write_report(writer, &config.output, &rows)
}

/// Handle the wordcounts command
fn handle_wordcounts_command(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let lexicon = load_lexicon(&config)?;

    let path = matches
        .get_one::<PathBuf>("path")
        .context("a document dictionary file is required")?;
    let file =
        File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;
    let records = wordcounts::read_records(BufReader::new(file), &lexicon, config.batch.limit())
        .with_context(|| format!("failed to decode '{}'", path.display()))?;

    let writer = open_output(matches)?;
    if matches.get_flag("report") {
        let rows = wordcounts::statistics(&records, &lexicon);
        return report::write_report(writer, &config.output, &rows);
    }
    let targets: Vec<String> = matches
        .get_many::<String>("target")
        .unwrap_or_default()
        .map(|word| sraf_parser::lexicon::normalize(word))
        .collect();
    wordcounts::write_counts(writer, &records, &targets)
}

/// `--output` file, or stdout
fn open_output(matches: &ArgMatches) -> Result<Box<dyn Write>> {
    match matches.get_one::<PathBuf>("output") {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create '{}'", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Handle the lookup command
fn handle_lookup_command(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let lexicon = load_lexicon(&config)?;

    let words: Vec<String> = matches
        .get_many::<String>("words")
        .unwrap_or_default()
        .map(|word| sraf_parser::lexicon::normalize(word))
        .collect();
    let sequences: Vec<u64> = matches
        .get_many::<u64>("sequence")
        .unwrap_or_default()
        .copied()
        .collect();
    if words.is_empty() && sequences.is_empty() {
        bail!("nothing to look up; give one or more words or --sequence numbers");
    }

    let mut out = io::stdout().lock();
    for word in &words {
        match lexicon.get(word) {
            Some(entry) => writeln!(out, "{}", serde_json::to_string(entry)?)?,
            None => tracing::warn!(word = %word, "not in lexicon"),
        }
    }
    for sequence in sequences {
        match lexicon
            .word_for_sequence(sequence)
            .and_then(|word| lexicon.get(word))
        {
            Some(entry) => writeln!(out, "{}", serde_json::to_string(entry)?)?,
            None => tracing::warn!(sequence, "no entry with this sequence number"),
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let matches = build_cli().get_matches_from([
            "sraf",
            "scan",
            "filings",
            "--lexicon",
            "lm.csv",
            "--month-filter",
            "exact-case",
            "--limit",
            "5",
            "--format",
            "json",
        ]);
        let (_, scan_matches) = matches.subcommand().unwrap();
        let config = load_config(scan_matches).unwrap();

        assert_eq!(config.lexicon.path, Some(PathBuf::from("lm.csv")));
        assert_eq!(
            config.scan.month_filter,
            sraf_parser::MonthFilter::ExactCase
        );
        assert_eq!(config.batch.limit(), Some(5));
        assert_eq!(config.output.format, sraf_config::OutputFormat::Json);
    }

    #[test]
    fn missing_lexicon_is_reported() {
        let config = sraf_config::load_defaults().unwrap();
        let err = load_lexicon(&config).unwrap_err();
        assert!(err.to_string().contains("--lexicon"));
    }
}
