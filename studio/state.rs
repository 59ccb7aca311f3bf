use std::sync::{Arc, Mutex, atomic::AtomicBool, mpsc};

use training_dashboard::{ChartSet, HistoryExport, Layout, RunConfig, StyledTable, SurfaceEvent};

use crate::render;

// ---------------------------------------------------------------------------
// Run options
// ---------------------------------------------------------------------------

/// Shape of the synthetic runs started from the page.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub epochs:   usize,
    pub batches:  usize,
    pub delay_ms: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions { epochs: 20, batches: 200, delay_ms: 5 }
    }
}

// ---------------------------------------------------------------------------
// Training status
// ---------------------------------------------------------------------------

pub enum TrainingStatus {
    /// No training has been started yet.
    Idle,
    /// Training is running in a background thread.
    Running {
        stop_flag: Arc<AtomicBool>,
    },
    /// The run ended, either after every epoch or because Stop was clicked.
    Done {
        epochs_completed: usize,
        elapsed_total_ms: u64,
        was_stopped:      bool,
    },
    /// A callback returned an error.
    Failed {
        reason: String,
    },
}

impl TrainingStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, TrainingStatus::Running { .. })
    }
}

// ---------------------------------------------------------------------------
// Live view
// ---------------------------------------------------------------------------

/// The latest state a dashboard surface was told to show.
#[derive(Debug, Clone)]
pub struct LiveView {
    pub layout: Layout,
    pub charts: ChartSet,
    pub table:  StyledTable,
}

impl LiveView {
    pub fn apply(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Display { layout, charts, table } => {
                *self = LiveView { layout, charts, table };
            }
            SurfaceEvent::Chart { slot, chart } => self.charts.replace(slot, chart),
            SurfaceEvent::Table { table } => self.table = table,
        }
    }
}

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

pub struct StudioState {
    /// Configuration every run is started with.
    pub config:      RunConfig,
    pub options:     RunOptions,
    /// Current training lifecycle state.
    pub training:    TrainingStatus,
    /// What the most recent run last displayed.
    pub view:        Option<LiveView>,
    /// History of the most recent finished run.
    pub history:     Option<HistoryExport>,
    /// One sender per connected `/events` stream; each carries ready SSE frames.
    pub subscribers: Vec<mpsc::Sender<String>>,
}

impl StudioState {
    pub fn new(config: RunConfig, options: RunOptions) -> Self {
        StudioState {
            config,
            options,
            training:    TrainingStatus::Idle,
            view:        None,
            history:     None,
            subscribers: Vec::new(),
        }
    }

    /// Registers a new `/events` stream.
    pub fn subscribe(&mut self) -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Sends `frame` to every stream, forgetting those that went away.
    pub fn broadcast(&mut self, frame: &str) {
        self.subscribers.retain(|tx| tx.send(frame.to_owned()).is_ok());
    }

    /// Folds a dashboard event into the live view and forwards it as a frame.
    pub fn apply(&mut self, event: SurfaceEvent) {
        let frame = render::event_frame(&event);
        if let Some(view) = &mut self.view {
            view.apply(event);
        } else if let SurfaceEvent::Display { layout, charts, table } = event {
            self.view = Some(LiveView { layout, charts, table });
        } else {
            // Partial updates before the first display have nothing to patch.
            return;
        }
        self.broadcast(&frame);
    }

    /// Frames a freshly connected stream needs to catch up.
    pub fn replay(&self) -> Vec<String> {
        let mut frames = Vec::new();
        if let Some(view) = &self.view {
            frames.push(render::layout_frame(view));
        }
        frames.push(render::status_frame(&self.training));
        frames
    }
}

/// Shared state type: an `Arc<Mutex<StudioState>>` passed to every handler.
pub type SharedState = Arc<Mutex<StudioState>>;
