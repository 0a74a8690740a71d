use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use resgen::{report_warnings, run, ConfigOverrides, GeneratorConfig, RunMode, WriteOutcome};
use resgen_core::AccessLevel;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resgen")]
#[command(about = "Generate strongly typed Swift accessors for app resources", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the resource accessor file
    Generate(GenerateArgs),

    /// Run the pipeline and report warnings without writing anything
    Check(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Record manifest (JSON)
    #[arg(short, long, env = "RESGEN_RECORDS")]
    records: PathBuf,

    /// Config file, defaults to resgen.toml when present
    #[arg(short, long, env = "RESGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output path of the accessibility identifier file for UI tests
    #[arg(long)]
    ui_test_output: Option<PathBuf>,

    /// Access level of generated declarations
    #[arg(long, env = "RESGEN_ACCESS_LEVEL")]
    access_level: Option<AccessLevel>,

    /// Class name prefix for the Objective-C compatibility layer
    #[arg(long)]
    prefix: Option<String>,

    /// Append @objcMembers classes forwarding to the Swift accessors
    #[arg(long)]
    objc_compat: bool,

    /// Append a comment listing images no storyboard or nib references
    #[arg(long)]
    unused_images: bool,

    /// Identifier of the bundle that holds the resources
    #[arg(long, env = "RESGEN_BUNDLE_IDENTIFIER")]
    bundle_identifier: Option<String>,

    /// Module the generated file is compiled into
    #[arg(long)]
    product_module_name: Option<String>,

    /// Additional module to import (repeatable)
    #[arg(long = "import")]
    imports: Vec<String>,

    /// Run the resource builders in parallel
    #[arg(long)]
    parallel: bool,

    /// Write the internal namespace tree as JSON to this path
    #[arg(long)]
    dump_internal: Option<PathBuf>,
}

impl GenerateArgs {
    fn config(&self) -> Result<GeneratorConfig> {
        let cwd = std::env::current_dir()?;
        let config = GeneratorConfig::load(self.config.as_deref(), &cwd)?;
        Ok(config.with_overrides(ConfigOverrides {
            access_level: self.access_level,
            prefix: self.prefix.clone(),
            output: self.output.clone(),
            ui_test_output: self.ui_test_output.clone(),
            objc_compat: self.objc_compat,
            unused_images: self.unused_images,
            bundle_identifier: self.bundle_identifier.clone(),
            product_module_name: self.product_module_name.clone(),
            imports: self.imports.clone(),
            parallel: self.parallel,
            dump_internal: self.dump_internal.clone(),
        }))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over the flags
    let level = if cli.debug {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(cli.debug)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate(args) => {
            let config = args.config()?;
            let report = run(&args.records, &config, RunMode::Generate)?;
            report_warnings(&report.warnings);

            if report.primary == Some(WriteOutcome::Unchanged) {
                info!("{} is up to date", config.output_path().display());
            } else {
                info!("Generated {}", config.output_path().display());
            }
        }
        Commands::Check(args) => {
            let config = args.config()?;
            let report = run(&args.records, &config, RunMode::Check)?;
            for warning in &report.warnings {
                println!("{}", warning);
            }
            println!("{} warning(s)", report.warnings.len());
        }
    }

    Ok(())
}
