use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use inclusify::discovery::{self, DiscoveryConfig};
use inclusify::{
    normalize_branches, AdapterKind, Diagnostic, GitBranchStore, LintConfig, LintReport, RewriteEngine,
};

#[derive(Parser, Debug)]
#[command(name = "inclusify")]
#[command(about = "Find and fix non-inclusive terminology in source files and git branches")]
#[command(version)]
struct Cli {
    /// Log progress at info level (RUST_LOG overrides)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lint JavaScript and TypeScript identifiers, strings and comments
    LintJs(LintArgs),
    /// Lint CSS, SCSS and Less comments
    LintCss(LintArgs),
    /// Lint Markdown text
    LintMd(LintArgs),
    /// Lint HTML text content
    LintHtml(LintArgs),
    /// Rename master and slave branches in a git repository
    FixGitBranches {
        /// Repository to operate on
        #[arg(default_value = ".")]
        repo: PathBuf,
    },
}

#[derive(Args, Debug)]
struct LintArgs {
    /// Root directory to scan
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Glob pattern to select files instead of walking the root
    #[arg(long)]
    glob: Option<String>,

    /// Apply fixes in place
    #[arg(long)]
    fix: bool,

    /// Include hidden files and directories in the walk
    #[arg(long)]
    hidden: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Use memory-mapped I/O instead of async buffered
    #[arg(long)]
    use_mmap: bool,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Output format for diagnostics
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write run statistics as JSON to this path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Files processed concurrently (default: number of cores)
    #[arg(long, default_value_t = 0)]
    jobs: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonFileReport<'a> {
    path: String,
    diagnostics: &'a [Diagnostic],
    error: Option<&'a str>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // WHY: structured JSON logging on stderr keeps stdout for diagnostics
    let default_level = if cli.verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!("Starting inclusify");
    info!(?cli, "Parsed CLI arguments");

    match cli.command {
        Command::LintJs(args) => run_lint(AdapterKind::JavaScript, args).await,
        Command::LintCss(args) => run_lint(AdapterKind::Css, args).await,
        Command::LintMd(args) => run_lint(AdapterKind::Markdown, args).await,
        Command::LintHtml(args) => run_lint(AdapterKind::Html, args).await,
        Command::FixGitBranches { repo } => run_fix_branches(&repo),
    }
}

async fn run_lint(kind: AdapterKind, args: LintArgs) -> Result<ExitCode> {
    // WHY: validate root directory exists early to fail fast with clear error
    if args.glob.is_none() {
        if !args.root.exists() {
            anyhow::bail!("Root directory does not exist: {}", args.root.display());
        }
        if !args.root.is_dir() {
            anyhow::bail!("Root path is not a directory: {}", args.root.display());
        }
    }

    let engine = RewriteEngine::shared().context("failed to build the rewrite engine")?;
    let adapter = kind.build().context("failed to build the adapter")?;

    let discovery_config = DiscoveryConfig {
        fail_fast: args.fail_fast,
        glob: args.glob.clone(),
        include_hidden: args.hidden,
    };
    let discovered = discovery::collect_discovered_files(&args.root, adapter.extensions(), discovery_config).await?;
    let paths: Vec<PathBuf> = discovered
        .into_iter()
        .filter(|f| f.error.is_none())
        .map(|f| f.path)
        .collect();
    info!("Discovered {} {} files", paths.len(), adapter.name());

    let config = LintConfig {
        fail_fast: args.fail_fast,
        fix: args.fix,
        use_mmap: args.use_mmap,
        jobs: args.jobs,
        show_progress: !args.no_progress,
    };
    let report = inclusify::lint_files(engine, adapter.as_ref(), &paths, &config).await?;

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => print_json(&report)?,
    }

    if let Some(stats_out) = &args.stats_out {
        report
            .stats
            .write_json(stats_out)
            .await
            .with_context(|| format!("failed to write stats to {}", stats_out.display()))?;
        info!("Wrote run statistics to {}", stats_out.display());
    }

    Ok(if report.has_findings() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_text(report: &LintReport) {
    for file in &report.files {
        if let Some(error) = &file.error {
            eprintln!("error: {error}");
            continue;
        }
        for diagnostic in &file.diagnostics {
            println!(
                "{}:{}: {}{}",
                file.path.display(),
                diagnostic.location,
                diagnostic.message,
                if diagnostic.fixed { " (fixed)" } else { "" }
            );
        }
    }

    let stats = &report.stats;
    println!(
        "{} diagnostics in {} of {} files, {} fixed, {} failed",
        stats.total_diagnostics,
        stats.files_flagged,
        report.files.len(),
        stats.total_fixes_applied,
        stats.files_failed
    );
}

fn print_json(report: &LintReport) -> Result<()> {
    let files: Vec<JsonFileReport<'_>> = report
        .files
        .iter()
        .map(|file| JsonFileReport {
            path: file.path.display().to_string(),
            diagnostics: &file.diagnostics,
            error: file.error.as_deref(),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&files)?);
    Ok(())
}

fn run_fix_branches(repo: &Path) -> Result<ExitCode> {
    let mut store = GitBranchStore::open(repo)
        .with_context(|| format!("cannot open git repository at {}", repo.display()))?;
    let renames = normalize_branches(&mut store)?;

    if renames.is_empty() {
        println!("No branches to rename");
    }
    let mut failed = false;
    for rename in &renames {
        match &rename.result {
            Ok(()) => println!("Renamed branch '{}' to '{}'", rename.from, rename.to),
            Err(e) => {
                failed = true;
                eprintln!("error: {e}");
            }
        }
    }

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
