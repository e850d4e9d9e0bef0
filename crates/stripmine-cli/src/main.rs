//! `stripmine` - self-checking harness for the strip-mined kernels.
//!
//! Runs each kernel through the strip-mined path and its golden scalar
//! reference over generated data, times both, and reports pass/fail.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use stripmine_core::unit::DEFAULT_GROUP;
use stripmine_core::{simd, EngineConfig, ElementWidth, VectorUnit};

mod kernels;

use kernels::KernelId;

#[derive(Parser, Debug)]
#[command(name = "stripmine")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the detected SIMD level and per-width batch capacities
    Info,
    /// Run kernels against their golden references
    Run {
        /// Kernel to run (all of them when omitted)
        #[arg(short, long, value_enum)]
        kernel: Option<KernelId>,

        /// Number of elements per buffer
        #[arg(short = 'n', long, default_value_t = 4096)]
        len: usize,

        /// Register capacity in bytes (power of two; detected when omitted)
        #[arg(long, env = "STRIPMINE_VLEN_BYTES")]
        vlen_bytes: Option<usize>,

        /// Register-grouping factor
        #[arg(long, default_value_t = DEFAULT_GROUP)]
        group: usize,

        /// Seed for the generated test data
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Info => info(),
        Command::Run {
            kernel,
            len,
            vlen_bytes,
            group,
            seed,
        } => run(kernel, len, vlen_bytes, group, seed),
    }
}

fn info() -> Result<()> {
    simd::warmup();
    let level = simd::simd_level();
    let unit = VectorUnit::detect();

    println!("{} {:?}", "SIMD level:".bold(), level);
    println!(
        "{} {} bytes x {} registers",
        "Capacity:".bold(),
        unit.vlen_bytes(),
        DEFAULT_GROUP
    );
    println!("\n{}", "Max batch per element width:".bold());
    for width in [
        ElementWidth::I8,
        ElementWidth::I16,
        ElementWidth::I32,
        ElementWidth::I64,
        ElementWidth::F16,
        ElementWidth::F32,
        ElementWidth::F64,
    ] {
        println!("  {width:?}: {} elements", unit.max_batch(width));
    }
    println!("\n{}", "Kernels:".bold());
    for id in KernelId::all() {
        println!("  {}", id.name());
    }
    Ok(())
}

fn run(
    kernel: Option<KernelId>,
    len: usize,
    vlen_bytes: Option<usize>,
    group: usize,
    seed: u64,
) -> Result<()> {
    let mut config = EngineConfig::load().context("loading configuration")?;
    if vlen_bytes.is_some() {
        config.vlen_bytes = vlen_bytes;
    }
    config.group = group;
    let unit = config.vector_unit().context("building the vector unit")?;

    println!(
        "Running over {len} elements ({} bytes x {} registers, seed {seed})\n",
        unit.vlen_bytes(),
        group
    );

    let selected: Vec<KernelId> = kernel.map_or_else(KernelId::all, |id| vec![id]);
    let mut failures = 0usize;

    for id in selected {
        let outcome = kernels::run(id, &unit, len, seed, config.abs_tolerance)?;
        let verdict = if outcome.mismatches == 0 {
            "PASS".green().bold()
        } else {
            failures += 1;
            "FAIL".red().bold()
        };
        println!(
            "  [{verdict}] {:<12} {:>9.2} Melem/s (golden {:>9.2} Melem/s)",
            outcome.name,
            outcome.stripmined_throughput(len),
            outcome.golden_throughput(len),
        );
        if outcome.mismatches > 0 {
            println!(
                "         {} mismatches, first at index {}",
                outcome.mismatches,
                outcome.first_mismatch.map_or(0, |m| m.index)
            );
        }
    }

    if failures > 0 {
        bail!("{failures} kernel(s) diverged from the golden reference");
    }
    println!("\n{}", "All kernels match their golden references.".green());
    Ok(())
}
