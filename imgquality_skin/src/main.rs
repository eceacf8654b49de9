use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use rayon::prelude::*;
use serde_json::json;
use skin_quality::batch::{
    check_dangerous_directory, collect_images, quick_validate_file, validate_files_with_progress,
    BatchResult,
};
use skin_quality::logging::{init_logging, log_operation_end, log_operation_start, LogConfig};
use skin_quality::ValidationConfig;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

mod output;

use output::{print_quick_human, print_summary_report, print_validation_human};

const BATCH_TEMPLATE: &str = "{spinner:.green} {prefix:.cyan.bold} ▕{bar:35.green/black}▏ {percent:>3}% • {pos}/{len} • ⏱️ {elapsed_precise} (ETA: {eta}) • {msg}";

#[derive(Parser)]
#[command(name = "imgquality-skin")]
#[command(version, about = "Photo quality gate for skin analysis uploads", long_about = None)]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full quality validation (resolution, lighting, sharpness, face)
    Validate {
        /// Input file or directory
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Recursive directory scan
        #[arg(short, long)]
        recursive: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        output: OutputFormat,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        /// Worker threads (default: number of CPUs)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Header-only pre-filter (dimensions and aspect ratio)
    Quick {
        /// Input file or directory
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Recursive directory scan
        #[arg(short, long)]
        recursive: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        output: OutputFormat,
    },

    /// Print the default validation config as JSON
    Config,
}

/// Per-run overrides layered on top of the defaults or `--config`.
#[derive(Args, Default)]
struct ThresholdArgs {
    /// JSON config file (camelCase keys, missing keys use defaults)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long)]
    min_width: Option<u32>,

    #[arg(long)]
    min_height: Option<u32>,

    #[arg(long)]
    max_aspect_ratio: Option<f64>,

    #[arg(long)]
    min_brightness: Option<f64>,

    #[arg(long)]
    max_brightness: Option<f64>,

    #[arg(long)]
    min_sharpness: Option<f64>,

    /// Skip the face check
    #[arg(long)]
    no_face: bool,

    /// Minimum face area, percent of the frame
    #[arg(long, value_name = "PERCENT")]
    min_face_size: Option<f64>,
}

impl ThresholdArgs {
    fn build(&self) -> anyhow::Result<ValidationConfig> {
        let mut config = match &self.config {
            Some(path) => ValidationConfig::from_json_file(path)?,
            None => ValidationConfig::default(),
        };

        if let Some(v) = self.min_width {
            config.min_width = v;
        }
        if let Some(v) = self.min_height {
            config.min_height = v;
        }
        if let Some(v) = self.max_aspect_ratio {
            config.max_aspect_ratio = v;
        }
        if let Some(v) = self.min_brightness {
            config.min_brightness = v;
        }
        if let Some(v) = self.max_brightness {
            config.max_brightness = v;
        }
        if let Some(v) = self.min_sharpness {
            config.min_sharpness = v;
        }
        if let Some(v) = self.min_face_size {
            config.min_face_size = v;
        }
        if self.no_face {
            config.require_face = false;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output (for API use)
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    if let Err(e) = init_logging("imgquality-skin", LogConfig::new().with_level(level)) {
        eprintln!("⚠️  Logging disabled: {:#}", e);
    }

    match cli.command {
        Commands::Validate {
            input,
            recursive,
            output,
            thresholds,
            jobs,
        } => {
            let config = thresholds.build()?;
            let threads = jobs.unwrap_or_else(num_cpus::get).max(1);
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?;
            tracing::debug!(threads, ?config, "Starting validation");

            let passed = pool.install(|| run_validate(&input, recursive, output, &config))?;
            Ok(exit_code(passed))
        }

        Commands::Quick {
            input,
            recursive,
            output,
        } => {
            let passed = run_quick(&input, recursive, output)?;
            Ok(exit_code(passed))
        }

        Commands::Config => {
            println!("{}", ValidationConfig::default().to_json_string()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Resolve INPUT to the list of files to check. A directory goes through the
/// system-directory guard first.
fn resolve_inputs(input: &Path, recursive: bool) -> anyhow::Result<Vec<PathBuf>> {
    if input.is_file() {
        Ok(vec![input.to_path_buf()])
    } else if input.is_dir() {
        check_dangerous_directory(input).map_err(anyhow::Error::msg)?;
        Ok(collect_images(input, recursive))
    } else {
        anyhow::bail!("Input path does not exist: {}", input.display())
    }
}

fn create_progress_bar(total: usize, prefix: &str, output: OutputFormat) -> ProgressBar {
    if output == OutputFormat::Json || total <= 1 {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total as u64);
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_bar()
            .template(BATCH_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░  "),
    );
    pb.set_prefix(prefix.to_string());
    pb
}

/// Returns true when every file was accepted or warned.
fn run_validate(
    input: &Path,
    recursive: bool,
    output: OutputFormat,
    config: &ValidationConfig,
) -> anyhow::Result<bool> {
    let start = Instant::now();
    log_operation_start("validate", input);

    let files = resolve_inputs(input, recursive)?;
    if files.is_empty() {
        println!("📂 No image files found in {}", input.display());
        return Ok(true);
    }

    let pb = create_progress_bar(files.len(), "Validating", output);
    let results = validate_files_with_progress(&files, config, |_| pb.inc(1));
    pb.finish_and_clear();

    let mut batch = BatchResult::new();
    let mut json_results = Vec::with_capacity(results.len());
    for (path, result) in &results {
        match result {
            Ok(r) => {
                batch.record(r.verdict());
                match output {
                    OutputFormat::Human => {
                        print_validation_human(path, r);
                        println!();
                    }
                    OutputFormat::Json => json_results.push(json!({
                        "file": path.display().to_string(),
                        "verdict": r.verdict(),
                        "result": r,
                    })),
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Validation failed");
                batch.fail(path.clone(), e.to_string());
                if output == OutputFormat::Json {
                    json_results.push(json!({
                        "file": path.display().to_string(),
                        "error": e.to_string(),
                    }));
                }
            }
        }
    }

    let duration = start.elapsed();
    match output {
        OutputFormat::Human => {
            if batch.total > 1 {
                print_summary_report(&batch, duration, "Skin Photo Validation");
            } else {
                for (path, error) in &batch.errors {
                    eprintln!("❌ {}: {}", path.display(), error);
                }
            }
        }
        OutputFormat::Json => {
            let report = json!({
                "total": batch.total,
                "accepted": batch.accepted,
                "warned": batch.warned,
                "rejected": batch.rejected,
                "failed": batch.failed,
                "results": json_results,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    let passed = batch.all_passed();
    log_operation_end("validate", duration, passed);
    Ok(passed)
}

fn run_quick(input: &Path, recursive: bool, output: OutputFormat) -> anyhow::Result<bool> {
    let start = Instant::now();
    log_operation_start("quick", input);

    let files = resolve_inputs(input, recursive)?;
    let results: Vec<_> = files
        .par_iter()
        .map(|path| (path.clone(), quick_validate_file(path)))
        .collect();

    let mut passed = true;
    let mut json_results = Vec::with_capacity(results.len());
    for (path, result) in &results {
        match result {
            Ok(r) => {
                passed &= r.is_valid;
                match output {
                    OutputFormat::Human => print_quick_human(path, r),
                    OutputFormat::Json => json_results.push(json!({
                        "file": path.display().to_string(),
                        "result": r,
                    })),
                }
            }
            Err(e) => {
                passed = false;
                match output {
                    OutputFormat::Human => eprintln!("❌ {}: {}", path.display(), e),
                    OutputFormat::Json => json_results.push(json!({
                        "file": path.display().to_string(),
                        "error": e.to_string(),
                    })),
                }
            }
        }
    }

    if output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&json_results)?);
    }

    log_operation_end("quick", start.elapsed(), passed);
    Ok(passed)
}
