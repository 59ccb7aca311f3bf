use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
use std::thread;
use std::time::Duration;

use log::{info, warn};
use training_dashboard::{ChannelSurface, SyntheticRun, TrainConfig, TrainingDashboard, train_loop};

use crate::render::status_frame;
use crate::routes::{redirect, BodyResponse};
use crate::state::{SharedState, TrainingStatus};

// ---------------------------------------------------------------------------
// POST /train/start
// ---------------------------------------------------------------------------

/// Starts a synthetic run unless one is already going, then sends the
/// browser back to the dashboard.
pub fn handle_start(state: SharedState) -> BodyResponse {
    let stop_flag = Arc::new(AtomicBool::new(false));

    let (config, options) = {
        let mut st = state.lock().unwrap();
        if st.training.is_running() {
            return redirect("/");
        }
        st.training = TrainingStatus::Running { stop_flag: stop_flag.clone() };
        st.view = None;
        st.history = None;
        let frame = status_frame(&st.training);
        st.broadcast(&frame);
        (st.config.clone(), st.options.clone())
    };

    let (surface, events) = ChannelSurface::channel();

    // Pump: folds dashboard events into the shared state until the
    // dashboard (and with it the sender) is dropped.
    let pump_state = state.clone();
    let pump = thread::spawn(move || {
        for event in events {
            pump_state.lock().unwrap().apply(event);
        }
    });

    let run_state = state.clone();
    thread::spawn(move || {
        let mut source = SyntheticRun::new(&config, options.batches);
        let mut train_config = TrainConfig::new(options.epochs, options.batches)
            .with_stop_flag(stop_flag);
        if options.delay_ms > 0 {
            train_config = train_config.with_batch_delay(Duration::from_millis(options.delay_ms));
        }

        let outcome = TrainingDashboard::new(config, surface).and_then(|mut dashboard| {
            let summary = train_loop(&mut source, &mut dashboard, &train_config)?;
            Ok((summary, dashboard.history()))
        });

        // Every event is in the shared state before the final status goes out.
        let _ = pump.join();

        let mut st = run_state.lock().unwrap();
        let status = match outcome {
            Ok((summary, history)) => {
                st.history = Some(history);
                TrainingStatus::Done {
                    epochs_completed: summary.epochs_completed,
                    elapsed_total_ms: summary.elapsed_ms,
                    was_stopped:      summary.stopped,
                }
            }
            Err(e) => {
                warn!("training run failed: {}", e);
                TrainingStatus::Failed { reason: e.to_string() }
            }
        };
        let frame = status_frame(&status);
        st.training = status;
        st.broadcast(&frame);
    });

    info!("started synthetic run");
    redirect("/")
}

// ---------------------------------------------------------------------------
// POST /train/stop
// ---------------------------------------------------------------------------

/// Signals the running loop to stop at the next batch boundary.
pub fn handle_stop(state: SharedState) -> BodyResponse {
    let st = state.lock().unwrap();
    if let TrainingStatus::Running { stop_flag } = &st.training {
        stop_flag.store(true, Ordering::Relaxed);
        info!("stop requested");
    }
    redirect("/")
}
