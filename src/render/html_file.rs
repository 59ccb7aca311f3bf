use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::chart::{Chart, ChartSet, ChartSlot};
use crate::error::Result;
use crate::render::layout::Layout;
use crate::render::page::{meta_refresh, render_layout_html, render_page};
use crate::render::surface::Surface;
use crate::table::StyledTable;

/// Rewrites one self-contained HTML page on every update.
///
/// Nothing is written before `display`; chart updates arriving earlier are
/// dropped since `display` carries the full chart set anyway.
pub struct HtmlFileSurface {
    path: PathBuf,
    title: String,
    refresh_secs: Option<u32>,
    layout: Option<Layout>,
    charts: Option<ChartSet>,
    table: Option<StyledTable>,
}

impl HtmlFileSurface {
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        HtmlFileSurface {
            path: path.into(),
            title: title.into(),
            refresh_secs: Some(2),
            layout: None,
            charts: None,
            table: None,
        }
    }

    /// Sets (or with `None` removes) the page's auto-reload interval.
    pub fn with_refresh(mut self, secs: Option<u32>) -> Self {
        self.refresh_secs = secs;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    fn write(&self) -> Result<()> {
        let (Some(layout), Some(charts), Some(table)) = (&self.layout, &self.charts, &self.table) else {
            return Ok(());
        };

        let body = render_layout_html(layout, charts, table);
        let refresh = self.refresh_secs.map(meta_refresh).unwrap_or_default();
        let status = format!("{} epoch(s) recorded", table.rows());
        let html = render_page(&self.title, |tmpl| {
            tmpl.replace("{{BODY}}", &body)
                .replace("{{REFRESH}}", &refresh)
                .replace("{{STATUS}}", &status)
        });

        // Readers reloading the page only ever see a complete file.
        let tmp = self.tmp_path();
        fs::write(&tmp, html)?;
        fs::rename(&tmp, &self.path)?;
        debug!("wrote dashboard to {}", self.path.display());
        Ok(())
    }
}

impl Surface for HtmlFileSurface {
    fn display(&mut self, layout: &Layout, charts: &ChartSet, table: &StyledTable) -> Result<()> {
        self.layout = Some(layout.clone());
        self.charts = Some(charts.clone());
        self.table = Some(table.clone());
        self.write()
    }

    fn update_chart(&mut self, slot: ChartSlot, chart: &Chart) -> Result<()> {
        if let Some(charts) = &mut self.charts {
            charts.replace(slot, chart.clone());
        }
        self.write()
    }

    fn render_table(&mut self, table: &StyledTable) -> Result<()> {
        self.table = Some(table.clone());
        self.write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{build_live_epoch_chart, build_loss_chart};
    use crate::config::{HighlightColors, Palette};

    fn charts() -> ChartSet {
        let palette = Palette::default();
        ChartSet {
            live: build_live_epoch_chart(None, None, None, None, None, &palette),
            loss: build_loss_chart(false, None, None, &palette),
            metrics: Vec::new(),
        }
    }

    fn empty_table() -> StyledTable {
        StyledTable { columns: Vec::new(), colors: HighlightColors::default() }
    }

    #[test]
    fn nothing_written_before_display() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dash.html");
        let mut surface = HtmlFileSurface::new(&path, "run");
        surface.render_table(&empty_table()).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn chart_updates_rewrite_the_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dash.html");
        let mut surface = HtmlFileSurface::new(&path, "run").with_refresh(None);

        let mut set = charts();
        surface.display(&Layout::for_metrics(0), &set, &empty_table()).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        assert!(first.contains("Epoch 0"));
        assert!(!first.contains("http-equiv"));

        set.live.set_title("Epoch 1");
        surface.update_chart(ChartSlot::Live, &set.live).unwrap();
        let second = fs::read_to_string(surface.path()).unwrap();
        assert!(second.contains("Epoch 1"));
        assert!(!second.contains("Epoch 0"));
    }

    #[test]
    fn page_is_replaced_without_leftover_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dash.html");
        let mut surface = HtmlFileSurface::new(&path, "run");
        surface.display(&Layout::for_metrics(0), &charts(), &empty_table()).unwrap();
        surface.render_table(&empty_table()).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path()).unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["dash.html".to_string()]);
    }

    #[test]
    fn braces_in_metric_names_survive_the_written_page() {
        use crate::dashboard::TrainingDashboard;
        use crate::callback::TrainingCallback;
        use crate::config::RunConfig;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dash.html");
        let config = RunConfig::new()
            .with_metric("f1{{", None, None)
            .with_metric("}}auc", None, None);
        let mut dash = TrainingDashboard::new(config, HtmlFileSurface::new(&path, "run")).unwrap();
        dash.on_train_begin().unwrap();

        let page = fs::read_to_string(&path).unwrap();
        assert!(page.contains("id=\"chart-metric-0\""));
        assert!(page.contains("id=\"chart-metric-1\""));
        assert!(page.contains("f1&#123;&#123;"));
    }
}
