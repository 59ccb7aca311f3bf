//! Runs a synthetic training run into a self-refreshing HTML dashboard.

use std::time::Duration;

use anyhow::anyhow;
use log::info;
use pico_args::Arguments;
use training_dashboard::{
    train_loop, HtmlFileSurface, RunConfig, SyntheticRun, TrainConfig, TrainingDashboard,
};

const HELP: &str = "\
Usage: training-dashboard [OPTIONS]

Options:
  -h, --help           Print help
  -c, --config         Run configuration JSON file (defaults to validation + accuracy)
  -o, --out            HTML file to write (defaults to 'dashboard.html')
  -n, --epochs         Number of epochs to simulate (defaults to 10)
  -b, --batches        Batches per epoch (defaults to 100)
  -d, --delay-ms       Pause after every batch, in milliseconds (defaults to 0)
  --seed               Seed for a reproducible run
";

#[derive(Debug)]
struct Args {
    config: Option<String>,
    out: String,
    epochs: usize,
    batches: usize,
    delay_ms: u64,
    seed: Option<u64>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            out: pargs
                .opt_value_from_str(["-o", "--out"])?
                .unwrap_or_else(|| "dashboard.html".to_string()),
            epochs: pargs.opt_value_from_str(["-n", "--epochs"])?.unwrap_or(10),
            batches: pargs.opt_value_from_str(["-b", "--batches"])?.unwrap_or(100),
            delay_ms: pargs.opt_value_from_str(["-d", "--delay-ms"])?.unwrap_or(0),
            seed: pargs.opt_value_from_str("--seed")?,
        };

        let rest = pargs.finish();
        if !rest.is_empty() {
            return Err(anyhow!("Unexpected arguments: {:?}", rest));
        }

        Ok(Some(args))
    }
}

/// Configuration used when no `--config` file is given.
fn demo_config() -> RunConfig {
    RunConfig::new()
        .with_validation(true)
        .with_loss_bounds(Some(0.0), None)
        .with_metric("accuracy", Some(0.0), Some(1.0))
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);
        return Ok(());
    };

    let config = match &args.config {
        Some(path) => RunConfig::load_json(path)
            .map_err(|e| anyhow!("Unable to load run configuration '{}': {}", path, e))?,
        None => demo_config(),
    };

    let mut source = SyntheticRun::new(&config, args.batches);
    if let Some(seed) = args.seed {
        source = source.with_seed(seed);
    }

    let surface = HtmlFileSurface::new(&args.out, "Training dashboard");
    let mut dashboard = TrainingDashboard::new(config, surface)?;

    let mut train_config = TrainConfig::new(args.epochs, args.batches);
    if args.delay_ms > 0 {
        train_config = train_config.with_batch_delay(Duration::from_millis(args.delay_ms));
    }

    info!("writing dashboard to {}", args.out);
    let summary = train_loop(&mut source, &mut dashboard, &train_config)?;

    println!(
        "{} epoch(s) in {:.1}s, dashboard written to {}",
        summary.epochs_completed,
        summary.elapsed_ms as f64 / 1000.0,
        args.out
    );
    print!("{}", dashboard.table());

    Ok(())
}
