use crate::chart::{Chart, ChartSet, ChartSlot};
use crate::error::Result;
use crate::render::layout::Layout;
use crate::render::surface::{Surface, SurfaceEvent};
use crate::table::StyledTable;

/// Keeps every call in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface::default()
    }

    pub fn display_count(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, SurfaceEvent::Display { .. })).count()
    }

    /// The most recently rendered table, including the one shown by `display`.
    pub fn last_table(&self) -> Option<&StyledTable> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Table { table } | SurfaceEvent::Display { table, .. } => Some(table),
            SurfaceEvent::Chart { .. } => None,
        })
    }

    /// The most recent state reported for `slot`.
    pub fn last_chart(&self, slot: ChartSlot) -> Option<&Chart> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Chart { slot: s, chart } if *s == slot => Some(chart),
            SurfaceEvent::Display { charts, .. } => charts.get(slot),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn display(&mut self, layout: &Layout, charts: &ChartSet, table: &StyledTable) -> Result<()> {
        self.events.push(SurfaceEvent::Display {
            layout: layout.clone(),
            charts: charts.clone(),
            table: table.clone(),
        });
        Ok(())
    }

    fn update_chart(&mut self, slot: ChartSlot, chart: &Chart) -> Result<()> {
        self.events.push(SurfaceEvent::Chart { slot, chart: chart.clone() });
        Ok(())
    }

    fn render_table(&mut self, table: &StyledTable) -> Result<()> {
        self.events.push(SurfaceEvent::Table { table: table.clone() });
        Ok(())
    }
}
