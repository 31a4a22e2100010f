use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::{error, info};

use rust_kinks::{creation_run, read_run_config, HeatBath, RunConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Thermal kink-antikink pair creation rate in 1-D φ⁴ theory", long_about = None)]
struct Args {
    /// YAML run file; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the heat-bath temperature
    #[arg(short, long)]
    temperature: Option<f64>,

    /// Override the random seed
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let log_level_filter = args
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);
    tracing_subscriber::fmt()
        .with_max_level(log_level_filter)
        .with_target(false)
        .init();

    let mut run = match args.config.as_deref() {
        Some(path) => {
            info!("Loading run configuration from {}", path.display());
            match read_run_config(path) {
                Ok(run) => run,
                Err(e) => {
                    error!("Failed to load configuration: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => RunConfig::default(),
    };
    if let Some(t) = args.temperature {
        run.thermalization.temperature = t;
    }
    if let Some(seed) = args.seed {
        run.thermalization.seed = Some(seed);
    }

    if let Err(e) = execute(&run) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn execute(run: &RunConfig) -> rust_kinks::Result<()> {
    let config = run.lattice_config()?;
    let thermal = run.thermalization;
    let bath = HeatBath::new(&config, thermal.temperature, thermal.sigma_factor)?;
    let mut rng = match thermal.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let measure = run.measurement;
    let result = creation_run(&config, &bath, thermal.iter_max, measure.tmax_frame, measure.e_tests, &mut rng)?;

    println!("Pair Creation Results");
    println!("---------------------");
    println!("Temperature: {:.4}", thermal.temperature);
    println!("Lattice: N = {}, L = {}, λ = {}", config.nodes(), config.length(), config.lambda());
    println!("Frames measured: {}", measure.tmax_frame);
    println!("Average energy: {:.4}", result.mean_energy);
    println!("Creations: {}", result.rates.creations);
    println!("Creation rate Γ: {:.6e}", result.rates.gamma);
    println!("Creation time τ: {:.4}", result.rates.tau);
    Ok(())
}
