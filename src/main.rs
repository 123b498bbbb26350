use std::path::{Path, PathBuf};

use anyhow::Context;
use structopt::StructOpt;
use thousands::Separable;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::BenchError;
use crate::lock_adapters::LockKind;
use crate::perf::BenchmarkSample;
use crate::perf_lock::RunConfig;
use crate::perf_lock_data::PERF_DATA_LOCKS;
use crate::plot::Series;

mod error;
mod lock_adapters;
mod perf;
mod perf_info;
mod perf_lock;
mod perf_lock_data;
mod plot;
mod report;

const DEFAULT_LOG_FILTER: &str = "lock_bench=info";

#[derive(Debug, StructOpt)]
#[structopt(
    name = "lock-bench",
    about = "Measures mutex and spin lock contention and plots thread count against time"
)]
struct Opt {
    #[structopt(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Plot a lock comparison table (the built-in measurements by default)
    Plot {
        /// CSV file with columns thread_count,mutex_ms,ttas_ms,best_spin_ms
        #[structopt(long, parse(from_os_str))]
        input: Option<PathBuf>,

        #[structopt(long, parse(from_os_str), default_value = "locks.svg")]
        output: PathBuf,
    },

    /// Time every selected lock over a sweep of thread counts
    Run {
        #[structopt(long, default_value = "200")]
        max_threads: usize,

        #[structopt(long, default_value = "10")]
        step: usize,

        /// Increments per sweep point, split evenly between the threads
        /// (7560 * 2 * 100 by default)
        #[structopt(long, default_value = "1512000")]
        total_increments: usize,

        #[structopt(long, use_delimiter = true, default_value = "mutex,ttas,best-spin")]
        locks: Vec<LockKind>,

        #[structopt(long, parse(from_os_str), default_value = ".")]
        out_dir: PathBuf,
    },

    /// Check that every lock keeps a shared counter exact under contention
    Check {
        #[structopt(long, default_value = "100")]
        threads: usize,

        /// Increments per thread
        #[structopt(long, default_value = "10000")]
        increments: usize,

        /// Include the ticket locks that take very long under contention
        #[structopt(long)]
        all: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let opt = Opt::from_args();
    match opt.command {
        None => run_plot(None, Path::new("locks.svg")),
        Some(Command::Plot { input, output }) => run_plot(input.as_deref(), &output),
        Some(Command::Run {
            max_threads,
            step,
            total_increments,
            locks,
            out_dir,
        }) => run_lock_sweep(max_threads, step, total_increments, &locks, &out_dir),
        Some(Command::Check {
            threads,
            increments,
            all,
        }) => run_lock_check(threads, increments, all),
    }
}

fn run_plot(input: Option<&Path>, output: &Path) -> anyhow::Result<()> {
    let samples = match input {
        Some(path) => report::read_samples(path)
            .with_context(|| format!("failed to read samples from {}", path.display()))?,
        None => PERF_DATA_LOCKS.to_vec(),
    };

    if samples.is_empty() {
        warn!("no samples to plot, drawing empty axes");
    }

    plot::write_plot(
        &Series::from_samples(&samples),
        "Lock contention",
        output,
    )
    .context("failed to plot")?;

    Ok(())
}

fn run_lock_sweep(
    max_threads: usize,
    step: usize,
    total_increments: usize,
    locks: &[LockKind],
    out_dir: &Path,
) -> anyhow::Result<()> {
    if locks.is_empty() {
        return Err(BenchError::InvalidConfig("no locks selected".to_string()).into());
    }

    perf_info::write_cpu_info();

    let sweep = RunConfig::sweep(max_threads, step, total_increments)?;
    let mut measurements = Vec::with_capacity(sweep.len() * locks.len());

    for config in &sweep {
        for kind in locks {
            let m = kind.run(config).with_context(|| {
                format!("lock {kind} failed with {} threads", config.thread_count)
            })?;
            measurements.push(m);
        }
    }

    report::prepare_out_dir(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    report::write_measurements(&measurements, &out_dir.join("measurements.csv"))?;

    let samples = BenchmarkSample::collect(&measurements);
    if samples.is_empty() {
        let compared: Vec<_> = LockKind::COMPARED.iter().map(LockKind::key).collect();
        warn!("samples.csv needs --locks to include {}, not written", compared.join(","));
    } else {
        report::write_samples(&samples, &out_dir.join("samples.csv"))?;
    }

    plot::write_plot(
        &Series::from_measurements(&measurements),
        &format!(
            "Lock contention ({} increments per point)",
            total_increments.separate_with_commas()
        ),
        &out_dir.join("locks.svg"),
    )
    .context("failed to plot")?;

    Ok(())
}

fn run_lock_check(threads: usize, increments: usize, all: bool) -> anyhow::Result<()> {
    perf_info::write_cpu_info();
    info!(
        "{threads} threads increment a shared counter {} times each",
        increments.separate_with_commas()
    );

    let config = RunConfig::new(threads, increments)?;

    for kind in LockKind::ALL {
        if kind.is_slow() && !all {
            info!("skipping {kind}, pass --all to include it");
            continue;
        }
        kind.run(&config)?;
    }

    info!("all locks kept the counter exact");
    Ok(())
}
