use std::sync::mpsc;

use crate::chart::{Chart, ChartSet, ChartSlot};
use crate::error::{DashboardError, Result};
use crate::render::layout::Layout;
use crate::render::surface::{Surface, SurfaceEvent};
use crate::table::StyledTable;

/// Forwards every call as a `SurfaceEvent` to another thread.
///
/// Once the receiver is dropped every call fails with `SurfaceClosed`, which
/// ends the training loop driving the dashboard.
pub struct ChannelSurface {
    tx: mpsc::Sender<SurfaceEvent>,
}

impl ChannelSurface {
    pub fn new(tx: mpsc::Sender<SurfaceEvent>) -> Self {
        ChannelSurface { tx }
    }

    /// Creates a surface together with the receiving end.
    pub fn channel() -> (ChannelSurface, mpsc::Receiver<SurfaceEvent>) {
        let (tx, rx) = mpsc::channel();
        (ChannelSurface { tx }, rx)
    }

    fn send(&self, event: SurfaceEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| DashboardError::SurfaceClosed)
    }
}

impl Surface for ChannelSurface {
    fn display(&mut self, layout: &Layout, charts: &ChartSet, table: &StyledTable) -> Result<()> {
        self.send(SurfaceEvent::Display {
            layout: layout.clone(),
            charts: charts.clone(),
            table: table.clone(),
        })
    }

    fn update_chart(&mut self, slot: ChartSlot, chart: &Chart) -> Result<()> {
        self.send(SurfaceEvent::Chart { slot, chart: chart.clone() })
    }

    fn render_table(&mut self, table: &StyledTable) -> Result<()> {
        self.send(SurfaceEvent::Table { table: table.clone() })
    }
}
