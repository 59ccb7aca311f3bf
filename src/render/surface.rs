use serde::{Serialize, Deserialize};

use crate::chart::{Chart, ChartSet, ChartSlot};
use crate::error::Result;
use crate::render::layout::Layout;
use crate::table::StyledTable;

/// Where a dashboard draws itself.
///
/// `display` is called once when training starts. Afterwards the dashboard
/// reports each chart it mutated through `update_chart` and each rebuilt
/// table through `render_table`; the surface must make the new state
/// visible before returning.
pub trait Surface {
    fn display(&mut self, layout: &Layout, charts: &ChartSet, table: &StyledTable) -> Result<()>;

    fn update_chart(&mut self, slot: ChartSlot, chart: &Chart) -> Result<()>;

    /// Replaces whatever table was shown before.
    fn render_table(&mut self, table: &StyledTable) -> Result<()>;
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn display(&mut self, layout: &Layout, charts: &ChartSet, table: &StyledTable) -> Result<()> {
        (**self).display(layout, charts, table)
    }

    fn update_chart(&mut self, slot: ChartSlot, chart: &Chart) -> Result<()> {
        (**self).update_chart(slot, chart)
    }

    fn render_table(&mut self, table: &StyledTable) -> Result<()> {
        (**self).render_table(table)
    }
}

/// Owned copy of one surface call, for surfaces that record or forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SurfaceEvent {
    Display { layout: Layout, charts: ChartSet, table: StyledTable },
    Chart { slot: ChartSlot, chart: Chart },
    Table { table: StyledTable },
}
