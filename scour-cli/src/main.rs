use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use scour::{scan, HybridController, ScanConfig, ScanSummary, SearchOutcome};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
struct CliScanArgs {
    /// Pattern to search for (regex; empty matches every line)
    pattern: String,

    /// File or directory to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Perform case-insensitive search
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Patterns to ignore (glob format)
    #[arg(long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Show only statistics, not matches
    #[arg(short, long)]
    stats: bool,

    /// Number of threads to use
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Path to a configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan files under a path for lines matching a pattern
    Scan(CliScanArgs),

    /// Build an in-memory index over a directory, then answer term queries
    Index {
        /// Directory to index
        path: PathBuf,

        /// Whole-word terms to look up (must be lowercase; indexing
        /// lowercases all tokens)
        #[arg(required = true)]
        terms: Vec<String>,

        /// Log level (trace, debug, info, warn, error)
        #[arg(long, default_value = "warn")]
        log_level: String,
    },
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(summary: &ScanSummary, stats_only: bool) {
    for diagnostic in &summary.diagnostics {
        eprintln!("{}", diagnostic);
    }

    if !stats_only {
        for record in summary.records() {
            println!("{}", record);
        }
    }

    if stats_only {
        println!(
            "{} matches in {} of {} files",
            summary.total_matches.to_string().bold(),
            summary.files_with_matches,
            summary.files_scanned
        );
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(args) => {
            init_tracing(&args.log_level);

            let cli_config = ScanConfig {
                pattern: args.pattern,
                case_insensitive: args.ignore_case,
                root_path: args.path,
                ignore_patterns: args.ignore_patterns,
                stats_only: args.stats,
                thread_count: args
                    .threads
                    .unwrap_or_else(|| ScanConfig::default().thread_count),
                log_level: args.log_level,
            };

            let config = ScanConfig::load_from(args.config.as_deref())
                .context("failed to load configuration")?
                .merge_with_cli(cli_config);
            debug!("Effective configuration: {:?}", config);

            let summary = scan(&config)?;
            print_summary(&summary, config.stats_only);
            Ok(())
        }
        Commands::Index {
            path,
            terms,
            log_level,
        } => {
            init_tracing(&log_level);

            let mut controller = HybridController::new();
            controller.build_index(&path);

            let mut config = ScanConfig {
                root_path: path,
                ..Default::default()
            };
            for term in terms {
                config.pattern = term.clone();
                match controller.search(&config)? {
                    SearchOutcome::IndexHits(paths) => {
                        if paths.is_empty() {
                            eprintln!("{}: no matches", term);
                        }
                        for file in paths {
                            println!("{}", file);
                        }
                    }
                    // The controller has just been indexed; lookups never
                    // fall back to a scan.
                    SearchOutcome::Scan(_) => unreachable!("index was built before querying"),
                }
            }
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    run()
}
