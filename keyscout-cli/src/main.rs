use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use humantime::format_duration;
use keyscout::{
    config::ScanConfig,
    filters::list_text_files,
    strategy::process::run_worker_io,
    ExecutionStrategy, ProcessStrategy, ScanOutcome, ThreadStrategy,
};
use rand::seq::SliceRandom;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Hidden subcommand name the process strategy re-invokes this binary with.
const WORKER_SUBCOMMAND: &str = "scan-worker";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
struct CliScanConfig {
    /// Folder to scan
    #[arg(short = 'd', long, default_value = ".")]
    dir: PathBuf,

    /// Keyword to look for (can be specified multiple times)
    #[arg(short = 'k', long = "keyword")]
    keywords: Vec<String>,

    /// Number of workers (default: CPU cores)
    #[arg(short = 'j', long)]
    workers: Option<NonZeroUsize>,

    /// File extensions to include (e.g. txt,log)
    #[arg(short = 'e', long)]
    extensions: Option<String>,

    /// Execution strategy: threads, processes, or both
    #[arg(short = 's', long, default_value = "threads")]
    strategy: String,

    /// Path to a config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the merged result as JSON instead of a report
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a folder's text files for keywords
    Scan(CliScanConfig),

    /// Generate a folder of sample text files to scan
    Generate {
        /// Folder to write the files into
        #[arg(short = 'd', long, default_value = "files")]
        dir: PathBuf,

        /// Number of files to generate
        #[arg(short = 'n', long, default_value = "8")]
        count: usize,

        /// Words per file
        #[arg(short = 'w', long, default_value = "100")]
        words_per_file: usize,
    },

    /// Internal entry point for isolated-process workers
    #[command(name = "scan-worker", hide = true)]
    ScanWorker,
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(args) => run_scan(args),
        Commands::Generate {
            dir,
            count,
            words_per_file,
        } => generate_files(&dir, count, words_per_file),
        Commands::ScanWorker => {
            init_tracing("warn");
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            run_worker_io(stdin.lock(), stdout.lock())?;
            Ok(())
        }
    }
}

fn run_scan(args: CliScanConfig) -> Result<()> {
    let file_config = match args.config {
        Some(ref path) => ScanConfig::load_from(Some(path))
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ScanConfig::load().unwrap_or_default(),
    };

    let cli_config = ScanConfig {
        folder: args.dir,
        keywords: args.keywords,
        worker_count: args.workers.unwrap_or(file_config.worker_count),
        file_extensions: args
            .extensions
            .map(|exts| exts.split(',').map(str::trim).map(String::from).collect()),
        log_level: file_config.log_level.clone(),
    };
    let config = file_config.merge_with_cli(cli_config);

    init_tracing(&config.log_level);

    if config.keywords.is_empty() {
        bail!("no keywords given; pass at least one --keyword or set them in the config file");
    }

    let files = list_text_files(&config.folder, &config.extensions())?;
    info!(
        "Scanning {} files for {} keywords with {} workers",
        files.len(),
        config.keywords.len(),
        config.worker_count
    );
    if files.is_empty() {
        println!(
            "No matching files under {}",
            config.folder.display().to_string().blue()
        );
        return Ok(());
    }

    match args.strategy.as_str() {
        "threads" => {
            let outcome = ThreadStrategy.run(&files, &config.keywords, config.worker_count)?;
            report(&outcome, "threads", args.json)?;
        }
        "processes" => {
            let strategy = ProcessStrategy::from_current_exe(vec![WORKER_SUBCOMMAND.to_string()])?;
            let outcome = strategy.run(&files, &config.keywords, config.worker_count)?;
            report(&outcome, "processes", args.json)?;
        }
        "both" => {
            let threads = ThreadStrategy.run(&files, &config.keywords, config.worker_count)?;
            let strategy = ProcessStrategy::from_current_exe(vec![WORKER_SUBCOMMAND.to_string()])?;
            let processes = strategy.run(&files, &config.keywords, config.worker_count)?;

            report(&threads, "threads", args.json)?;
            report(&processes, "processes", args.json)?;

            if threads.merged != processes.merged {
                bail!("thread and process strategies produced different results");
            }
            println!("{}", "Both strategies produced identical results".green());
        }
        other => bail!("unknown strategy '{other}' (expected threads, processes, or both)"),
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn report(outcome: &ScanOutcome, label: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.merged)?);
        return Ok(());
    }

    println!("\n{}", format!("=== {label} ===").bold());
    for (keyword, files) in &outcome.merged.matches {
        println!(
            "{} ({} {})",
            keyword.blue(),
            files.len(),
            if files.len() == 1 { "file" } else { "files" }
        );
        for file in files {
            println!("  {}", file.display());
        }
    }
    if outcome.merged.files_skipped > 0 {
        println!(
            "{}",
            format!("{} unreadable file(s) skipped", outcome.merged.files_skipped).yellow()
        );
    }
    println!(
        "Scanned {} files in {}",
        outcome.merged.files_scanned,
        format_duration(outcome.elapsed).to_string().green()
    );
    Ok(())
}

fn generate_files(dir: &Path, count: usize, words_per_file: usize) -> Result<()> {
    const WORDS: &[&str] = &[
        "OpenMP", "Java", "семафори", "для", "стандартах", "random", "text",
    ];

    std::fs::create_dir_all(dir)?;
    let mut rng = rand::thread_rng();

    for i in 1..=count {
        let path = dir.join(format!("file{i}.txt"));
        let content: Vec<&str> = (0..words_per_file)
            .map(|_| *WORDS.choose(&mut rng).unwrap_or(&"text"))
            .collect();
        let mut file = std::fs::File::create(&path)?;
        file.write_all(content.join(" ").as_bytes())?;
    }

    println!("Generated {} files under {}", count, dir.display());
    Ok(())
}
