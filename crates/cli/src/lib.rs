//! CLI for Metricode.
//!
//! This crate provides the `metricode` command: it measures external
//! commands with the timing harness, records fields given on the command
//! line, and publishes the resulting document to the configured sink.
//!
//! Configuration comes from the environment (and a `.env` file if one is
//! present); see [`metricode_publisher::settings`].

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod args;

use anyhow::{bail, Context};
use args::{FieldSpec, SeriesSpec};
use clap::{Args, Parser, Subcommand};
use metricode_harness::Samples;
use metricode_publisher::report::render_summary;
use metricode_publisher::{MetricsCollector, Outcome, PublishingSink, Settings, SinkKind};
use std::process::{Command, Stdio};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Unit recorded for harness measurements.
pub const MICROS_UNIT: &str = "µs";

/// Metricode CLI.
#[derive(Parser, Debug)]
#[command(name = "metricode")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every publishing command.
#[derive(Args, Debug, Clone, Default)]
pub struct PublishOptions {
    /// Sink to publish through: http or store (default: METRICS_SINK, then http).
    #[arg(long)]
    pub sink: Option<SinkKind>,

    /// Exit with an error when the results were not stored.
    #[arg(long)]
    pub strict: bool,

    /// Print a summary of the published document.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Time a command over several iterations and publish the mean.
    ///
    /// The mean duration in microseconds is recorded under NAME, with
    /// NAME_min, NAME_max, NAME_p50, NAME_p95, NAME_p99 and NAME_iterations
    /// alongside.
    Measure {
        /// Field name for the measurement.
        #[arg(short, long)]
        name: String,

        /// Number of times to run the command.
        #[arg(short, long, default_value_t = metricode_harness::DEFAULT_ITERATIONS)]
        iterations: usize,

        /// Publishing options.
        #[command(flatten)]
        publish: PublishOptions,

        /// Command to measure, after `--`.
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },

    /// Record fields and time series given as arguments and publish them.
    Publish {
        /// Scalar field as NAME=VALUE[:UNIT]. Repeatable.
        #[arg(long = "field", value_parser = args::parse_field)]
        fields: Vec<FieldSpec>,

        /// Time series as NAME=V1,V2@T1,T2[:UNIT]. Repeatable.
        #[arg(long = "series", value_parser = args::parse_series)]
        series: Vec<SeriesSpec>,

        /// Publishing options.
        #[command(flatten)]
        publish: PublishOptions,
    },

    /// Show the resolved publishing configuration.
    Status {
        /// Show the environment variables that are read.
        #[arg(short, long)]
        detailed: bool,
    },
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if configuration is invalid,
/// a measured command fails, or `--strict` is set and publishing failed.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();
    init_tracing();

    let settings = Settings::from_env()?;
    execute(cli, &settings)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute a parsed command against the given settings.
pub fn execute(cli: Cli, settings: &Settings) -> anyhow::Result<()> {
    match cli.command {
        Commands::Measure {
            name,
            iterations,
            publish,
            command,
        } => {
            // Fail on configuration before spending time on the measurement.
            let mut collector = MetricsCollector::new(settings.collector_config())?;
            let sink = settings.build_sink(resolve_sink(&publish, settings)?)?;

            info!(name = %name, iterations, command = %command.join(" "), "Measuring command");
            let samples = measure_command(&command, iterations)?;
            record_measurement(&mut collector, &name, &samples);

            println!(
                "{}: mean {:.2} {} over {} runs",
                name,
                samples.mean(),
                MICROS_UNIT,
                samples.len()
            );
            publish_and_report(&collector, sink.as_ref(), &publish)
        }
        Commands::Publish {
            fields,
            series,
            publish,
        } => {
            let mut collector = MetricsCollector::new(settings.collector_config())?;
            let sink = settings.build_sink(resolve_sink(&publish, settings)?)?;

            for field in fields {
                collector.add_field(field.name, field.value, field.unit);
            }
            for series in series {
                collector.add_time_series_field(
                    series.name,
                    series.values,
                    series.timestamps,
                    series.unit,
                )?;
            }
            publish_and_report(&collector, sink.as_ref(), &publish)
        }
        Commands::Status { detailed } => {
            print_status(settings, detailed);
            Ok(())
        }
    }
}

fn resolve_sink(options: &PublishOptions, settings: &Settings) -> anyhow::Result<SinkKind> {
    match options.sink {
        Some(kind) => Ok(kind),
        None => Ok(settings.sink_kind()?),
    }
}

/// Record a measurement: the mean under `name`, the spread under
/// `name_min`, `name_max`, `name_p50`, `name_p95`, `name_p99`, and the
/// number of runs under `name_iterations`.
pub fn record_measurement(collector: &mut MetricsCollector, name: &str, samples: &Samples) {
    let distribution = samples.distribution();
    collector.add_field(name, samples.mean(), MICROS_UNIT);

    let spread = [
        ("min", distribution.min),
        ("max", distribution.max),
        ("p50", distribution.p50),
        ("p95", distribution.p95),
        ("p99", distribution.p99),
    ];
    for (suffix, value) in spread {
        collector.add_field(format!("{}_{}", name, suffix), value, MICROS_UNIT);
    }
    collector.add_field(format!("{}_iterations", name), samples.len() as i64, "");
}

/// Run `command` through the harness `iterations` times.
///
/// Output of the command is discarded. The first failed run stops further
/// executions and is returned as an error.
pub fn measure_command(command: &[String], iterations: usize) -> anyhow::Result<Samples> {
    let (program, arguments) = command.split_first().context("no command given")?;

    let mut failure: Option<anyhow::Error> = None;
    let samples = metricode_harness::sample(
        || {
            if failure.is_some() {
                return;
            }
            let status = Command::new(program)
                .args(arguments)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            failure = match status {
                Ok(status) if status.success() => None,
                Ok(status) => Some(anyhow::anyhow!("'{}' exited with {}", program, status)),
                Err(e) => {
                    Some(anyhow::Error::new(e).context(format!("failed to run '{}'", program)))
                }
            };
        },
        iterations,
    )?;

    if let Some(err) = failure {
        return Err(err);
    }
    debug!(runs = samples.len(), "Command measured");
    Ok(samples)
}

fn publish_and_report(
    collector: &MetricsCollector,
    sink: &dyn PublishingSink,
    options: &PublishOptions,
) -> anyhow::Result<()> {
    if options.verbose {
        print!("{}", render_summary(&collector.document()));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let outcome = runtime.block_on(collector.publish(sink));

    match &outcome {
        Outcome::Success => println!(
            "Results published for project {} at {}",
            collector.project_id(),
            collector.timestamp()
        ),
        failed => eprintln!("Results not stored: {}", failed),
    }

    if options.strict && !outcome.is_success() {
        bail!("publishing through the {} sink failed: {}", sink.name(), outcome);
    }
    Ok(())
}

fn print_status(settings: &Settings, detailed: bool) {
    println!("Metricode Benchmark Publisher");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let project = settings.project_id.as_deref().unwrap_or("<missing>");
    let collector = settings.collector_config();
    println!("Project: {}", project);
    println!(
        "Runtime: {}",
        collector
            .runtime
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| metricode_publisher::DEFAULT_RUNTIME.to_string())
    );

    match settings.sink_kind() {
        Ok(kind) => {
            println!("Sink: {}", kind);
            match settings.destination(kind) {
                Ok(destination) => println!("Destination: {}", destination),
                Err(e) => println!("Destination: <invalid> ({})", e),
            }
        }
        Err(e) => println!("Sink: <invalid> ({})", e),
    }
    println!("Timeout: {}s", settings.timeout().as_secs());

    if detailed {
        println!("\nEnvironment variables:");
        println!("  - PROJECT_ID (required)");
        println!("  - RUNTIME (default: unknown)");
        println!("  - METRICS_SINK (http | store, default: http)");
        println!("  - METRICS_API_URL (http sink)");
        println!("  - DATABASE_URL, DATABASE_NAME (store sink)");
        println!("  - PUBLISH_TIMEOUT_SECS (default: 10)");
    }
}
