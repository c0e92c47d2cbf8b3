use clap::Parser;
use std::path::PathBuf;
use sukashi::config::Config;
use sukashi::walker;
use sukashi::watermark;

/// Sukashi - batch photo watermarking tool
#[derive(Parser, Debug)]
#[command(name = "sukashi")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the input directory from the config file
    #[arg(long)]
    input: Option<PathBuf>,

    /// Override the output directory from the config file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Override the watermark image path from the config file
    #[arg(long)]
    watermark: Option<PathBuf>,

    /// Write the run summary as JSON to this path
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Test configuration and exit
    #[arg(long)]
    test: bool,
}

fn main() {
    // Initialize logging subsystem
    sukashi::logging::init_subscriber().expect("Failed to initialize logging subsystem");

    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration from file
    let mut config = Config::from_file(&args.config).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    // CLI overrides take precedence over the config file
    if let Some(input) = args.input {
        config.input_dir = input;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if let Some(watermark) = args.watermark {
        config.watermark = watermark;
    }

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    if args.test {
        println!("Configuration OK");
        return;
    }

    tracing::info!(
        config_file = %args.config.display(),
        input_dir = %config.input_dir.display(),
        output_dir = %config.output_dir.display(),
        watermark = %config.watermark.display(),
        "Configuration loaded successfully"
    );

    // Setup failures are fatal: with no input root or watermark, no file
    // could be validly processed
    if !config.input_dir.is_dir() {
        eprintln!(
            "Input directory does not exist: {}",
            config.input_dir.display()
        );
        std::process::exit(1);
    }

    let watermark = watermark::load_watermark(&config.watermark).unwrap_or_else(|e| {
        eprintln!("Failed to load watermark image: {}", e);
        std::process::exit(1);
    });

    let summary = walker::process_tree(&config, &watermark);

    tracing::info!(
        processed = summary.processed_count(),
        failed = summary.failed_count(),
        "Batch complete"
    );

    if let Some(path) = args.summary_json {
        let json = serde_json::to_string_pretty(&summary)
            .expect("summary serialization cannot fail");
        if let Err(e) = std::fs::write(&path, json) {
            eprintln!("Failed to write summary to {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    if !summary.is_success() {
        std::process::exit(1);
    }
}
