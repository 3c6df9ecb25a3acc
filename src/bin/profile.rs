use std::{fs::File, io::BufWriter, path::PathBuf};

use clap::Parser;
use mazegrid::{app::Settings, bench};

#[derive(Parser)]
#[command(name = "profile")]
#[command(about = "Time every generator and solver over a range of maze sizes")]
struct Args {
    /// Explicit sizes n to test. Overrides --min/--max
    #[arg(long, num_args = 1..)]
    sizes: Vec<usize>,

    /// Smallest size n, inclusive
    #[arg(long, default_value_t = 1)]
    min: usize,

    /// Largest size n, inclusive
    #[arg(long, default_value_t = 200)]
    max: usize,

    /// Runs per algorithm and size
    #[arg(long, default_value_t = 5)]
    repeats: usize,

    /// Base seed, incremented per repeat
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Output CSV path (default: <data dir>/outputs/internal_bench.csv)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print progress for every size
    #[arg(long)]
    verbose: bool,
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let sizes = if args.sizes.is_empty() {
        (args.min..=args.max).collect()
    } else {
        args.sizes
    };
    let out = args.out.unwrap_or_else(|| {
        Settings::from_env()
            .data_dir
            .join("outputs")
            .join("internal_bench.csv")
    });
    tracing::info!(sizes = sizes.len(), repeats = args.repeats, seed = args.seed, "profiling");

    let mut rows = Vec::new();
    for &n in &sizes {
        if args.verbose {
            println!("Running size={} (repeats={}) ...", n, args.repeats);
        }
        rows.extend(bench::run_size(n, args.seed, args.repeats));
    }

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(&out)?);
    bench::write_csv(&rows, &mut writer)?;

    println!("\nSummary:");
    for summary in bench::summarize(&rows) {
        println!(" {}", summary);
    }
    println!("\nCSV saved to {}", out.display());
    Ok(())
}
