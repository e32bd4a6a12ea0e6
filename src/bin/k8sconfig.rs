//! k8sconfig - binds unset environment variables in Kubernetes manifests
//!
//! Scans a directory of manifests and points every container environment
//! variable without a value at the ConfigMap or Secret that provides it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use k8sconfig_processor::converter::{self, TargetKind};
use k8sconfig_processor::processor::{
    Execution, OutputMode, ProcessOptions, Processor, DEFAULT_OUTPUT_DIR,
};
use k8sconfig_processor::serialize::{encode_document, KeyOrder};

#[derive(Debug, Parser)]
#[command(name = "k8sconfig")]
#[command(version)]
#[command(about = "Bind unset container environment variables to ConfigMap and Secret keys")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    process: ProcessArgs,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a ConfigMap or Secret manifest from a .env file
    Convert {
        /// The .env file to convert
        file: PathBuf,

        /// Resource type: cm or secret
        #[arg(short = 't', long = "type", default_value = "cm")]
        kind: TargetKind,

        /// Resource name (defaults to the file name plus -config or -secret)
        #[arg(short, long)]
        name: Option<String>,

        /// Directory the generated manifest is saved in
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
}

#[derive(Debug, Args)]
struct ProcessArgs {
    /// Directory containing the YAML manifests
    #[arg(short, long, env = "K8SCONFIG_INPUT", default_value = ".")]
    input: PathBuf,

    /// Output directory for safe mode
    #[arg(short, long, env = "K8SCONFIG_OUTPUT", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Processing mode: safe, overwrite or dry-run
    #[arg(short, long, env = "K8SCONFIG_MODE", default_value = "safe")]
    mode: OutputMode,

    /// Required to confirm overwrite mode
    #[arg(short, long)]
    force: bool,

    /// Key order of rewritten manifests: preserve or kubernetes
    #[arg(long, default_value = "preserve")]
    key_order: KeyOrder,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

fn init_tracing(verbose: u8) {
    // The report already lists warnings and errors, so logging is opt-in.
    let default = match verbose {
        0 => "off",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Some(Command::Convert {
            file,
            kind,
            name,
            output_dir,
        }) => convert(&file, kind, name.as_deref(), &output_dir),
        None => process(cli.process),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn process(args: ProcessArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.mode == OutputMode::Overwrite && !args.force {
        return Err("overwrite mode requires --force".into());
    }

    let options = ProcessOptions::new(args.input)
        .with_output_dir(args.output)
        .with_mode(args.mode)
        .with_key_order(args.key_order);
    let dry_run = options.mode == OutputMode::DryRun;

    let execution = Processor::new(options).execute()?;
    if dry_run {
        print_previews(&execution);
    }

    match args.report {
        ReportFormat::Text => print!("\n{}", execution.report),
        ReportFormat::Json => println!("{}", execution.report.to_json()?),
    }
    Ok(())
}

fn print_previews(execution: &Execution) {
    print!("{}", execution.index);
    for preview in &execution.previews {
        println!("\n--- original: {}", preview.source.display());
        println!("+++ processed:");
        print!("{}", preview.rendered);
    }
}

fn convert(
    file: &Path,
    kind: TargetKind,
    name: Option<&str>,
    output_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = converter::convert_file(file, kind, name)?;
    let yaml = encode_document(&doc, KeyOrder::Preserve)?;
    print!("{}", yaml);

    let target = output_dir.join(converter::output_file_name(doc.name(), kind));
    fs::write(&target, &yaml)
        .map_err(|e| format!("Failed to write {}: {}", target.display(), e))?;
    println!("Generated {} and saved to {}", doc.kind(), target.display());
    Ok(())
}
