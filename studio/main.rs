/// Training dashboard studio
///
/// Serves a live dashboard for synthetic training runs. Charts and the
/// history table are pushed to the browser over Server-Sent Events as the
/// run progresses. Served by a synchronous tiny_http server; no JavaScript
/// frameworks required.
///
/// Run with:
///   cargo run --bin studio --release
/// Then open http://127.0.0.1:7878

mod state;
mod render;
mod routes;
mod handlers;
mod util;

use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use log::info;
use pico_args::Arguments;
use tiny_http::Server;
use training_dashboard::RunConfig;

use state::{RunOptions, StudioState};

const HELP: &str = "\
Usage: studio [OPTIONS]

Options:
  -h, --help           Print help
  -a, --addr           Address to listen on (defaults to 127.0.0.1:7878)
  -c, --config         Run configuration JSON file (defaults to validation + accuracy)
  -n, --epochs         Epochs per run (defaults to 20)
  -b, --batches        Batches per epoch (defaults to 200)
  -d, --delay-ms       Pause after every batch, in milliseconds (defaults to 5)
";

struct Args {
    addr: String,
    config: Option<String>,
    options: RunOptions,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let defaults = RunOptions::default();
        let args = Args {
            addr: pargs
                .opt_value_from_str(["-a", "--addr"])?
                .unwrap_or_else(|| "127.0.0.1:7878".to_string()),
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            options: RunOptions {
                epochs: pargs.opt_value_from_str(["-n", "--epochs"])?.unwrap_or(defaults.epochs),
                batches: pargs.opt_value_from_str(["-b", "--batches"])?.unwrap_or(defaults.batches),
                delay_ms: pargs.opt_value_from_str(["-d", "--delay-ms"])?.unwrap_or(defaults.delay_ms),
            },
        };

        let rest = pargs.finish();
        if !rest.is_empty() {
            return Err(anyhow!("Unexpected arguments: {:?}", rest));
        }

        Ok(Some(args))
    }
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
        None => RunConfig::new()
            .with_validation(true)
            .with_loss_bounds(Some(0.0), None)
            .with_metric("accuracy", Some(0.0), Some(1.0)),
    };

    let server = Server::http(args.addr.as_str())
        .map_err(|e| anyhow!("Failed to bind HTTP server on {}: {}", args.addr, e))?;

    let shared_state = Arc::new(Mutex::new(StudioState::new(config, args.options)));

    println!("╔══════════════════════════════════════════════╗");
    println!("║          Training dashboard studio           ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Open in your browser:                       ║");
    println!("║  http://{:<37}║", args.addr);
    println!("╚══════════════════════════════════════════════╝");
    info!("listening on {}", args.addr);

    // Each request gets its own thread so a long-lived `/events` stream
    // does not stall page loads and form posts.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }

    Ok(())
}
