#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod telemetry;

use anyhow::Context;
use citally_core::http::DEFAULT_API_URL;
use citally_core::log::{parse_log, passed};
use citally_core::output::{render_text, ReportWriter};
use citally_core::{CollectStats, GitHubSource, ReportCollector, ReportConfig, TestOutcomes};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "citally", version, about = "CI test tallies across an organization")]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(
        long,
        global = true,
        env = "CITALLY_LOG_JSON",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Collect the latest run of every action and write the report
    Collect(CollectArgs),
    /// Parse a local job log and print its outcomes
    Parse(ParseArgs),
    /// Print a persisted report as text
    Show(ShowArgs),
}

#[derive(clap::Args)]
struct CollectArgs {
    /// Configuration file (.json, .yaml, .yml)
    #[arg(long, env = "CITALLY_CONFIG", default_value = "config.json")]
    config: PathBuf,

    /// Report destination, overwritten on success
    #[arg(long, env = "CITALLY_OUTPUT", default_value = "docs/report.json")]
    output: PathBuf,

    /// GitHub token for API access
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub API root
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[derive(clap::Args)]
struct ParseArgs {
    /// Raw job log
    log_file: PathBuf,

    /// Expected tests (comma-separated); missing ones are shown as failed
    #[arg(long, value_delimiter = ',')]
    tests: Option<Vec<String>>,
}

#[derive(clap::Args)]
struct ShowArgs {
    /// Persisted report
    #[arg(long, default_value = "docs/report.json")]
    report: PathBuf,
}

fn main() {
    // Before parsing so .env values back the env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    telemetry::init_tracing(cli.log_json, Level::INFO);

    let code = match cli.command {
        Commands::Collect(args) => run_collect(args),
        Commands::Parse(args) => run_parse(args),
        Commands::Show(args) => run_show(args),
    };
    std::process::exit(code);
}

/// Filter empty string from Option (env vars may produce "" for empty values)
fn clean_opt(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn run_collect(args: CollectArgs) -> i32 {
    let Some(token) = clean_opt(&args.token) else {
        eprintln!("Error: GITHUB_TOKEN not found (set it or pass --token)");
        return 1;
    };

    match collect(&args, token) {
        Ok(stats) => {
            println!(
                "Wrote {}: {} runs recorded from {} repositories ({} without a section, {} actions without data)",
                args.output.display(),
                stats.runs_recorded,
                stats.repositories_seen,
                stats.repositories_skipped,
                stats.actions_skipped,
            );
            0
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    }
}

fn collect(args: &CollectArgs, token: &str) -> anyhow::Result<CollectStats> {
    let config = ReportConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let source = GitHubSource::new(args.api_url.clone(), token.to_string());

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create runtime")?;

    let (report, stats) = rt
        .block_on(ReportCollector::new(&source, &config).collect())
        .with_context(|| format!("collecting runs for '{}'", config.org))?;

    ReportWriter::write_json(&args.output, &report)
        .with_context(|| format!("writing {}", args.output.display()))?;

    Ok(stats)
}

/// Outcomes keyed by test name; with `expected`, exactly those tests.
fn outcome_view(outcomes: &TestOutcomes, expected: Option<&[String]>) -> BTreeMap<String, bool> {
    match expected {
        Some(tests) => tests
            .iter()
            .filter(|t| !t.is_empty())
            .map(|t| (t.clone(), passed(outcomes, t)))
            .collect(),
        None => outcomes.iter().map(|(k, v)| (k.clone(), *v)).collect(),
    }
}

fn read_log(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn run_parse(args: ParseArgs) -> i32 {
    let result = read_log(&args.log_file).and_then(|log| {
        let outcomes = parse_log(&log);
        let view = outcome_view(&outcomes, args.tests.as_deref());
        serde_json::to_string_pretty(&view).context("encoding outcomes")
    });

    match result {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    }
}

fn run_show(args: ShowArgs) -> i32 {
    match ReportWriter::read_json(&args.report) {
        Ok(report) => {
            print!("{}", render_text(&report));
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}
