use log::{debug, info, warn};

use crate::callback::TrainingCallback;
use crate::chart::{build_live_epoch_chart, build_loss_chart, build_metric_charts, ChartSet, ChartSlot};
use crate::config::RunConfig;
use crate::dashboard::phase::Phase;
use crate::error::{DashboardError, Result};
use crate::history::{HistoryExport, LiveEpochSeries, LossHistory, MetricsHistory};
use crate::logs::{BatchRecord, EpochRecord, Logs};
use crate::render::{Layout, Surface};
use crate::table::{SnapshotTable, StyledTable};

/// Live training dashboard.
///
/// Owns every chart, the loss/metric histories and the batch samples of the
/// current epoch, and pushes each change to its `Surface`. Charts are built
/// once here and afterwards only their data and titles change.
///
/// Payloads are validated in full before anything is mutated, so a call that
/// fails with `MissingKey` or `SequenceCall` leaves the dashboard exactly as
/// it was. A failing surface is reported after the state change it was
/// asked to show.
pub struct TrainingDashboard<S: Surface> {
    config: RunConfig,
    layout: Layout,
    charts: ChartSet,
    loss_history: LossHistory,
    metrics_history: MetricsHistory,
    live: LiveEpochSeries,
    table: StyledTable,
    surface: S,
    phase: Phase,
}

impl<S: Surface> TrainingDashboard<S> {
    /// Validates `config` and builds every chart. Nothing is drawn until
    /// `on_train_begin`.
    pub fn new(config: RunConfig, surface: S) -> Result<Self> {
        config.validate()?;

        let first = config.first_metric();
        let palette = &config.palette;
        let charts = ChartSet {
            live: build_live_epoch_chart(
                first,
                config.min_loss,
                config.max_loss,
                first.and_then(|m| config.min_metric(m)),
                first.and_then(|m| config.max_metric(m)),
                palette,
            ),
            loss: build_loss_chart(config.validation, config.min_loss, config.max_loss, palette),
            metrics: build_metric_charts(
                &config.metrics,
                config.validation,
                &config.min_metric_bounds,
                &config.max_metric_bounds,
                palette,
            ),
        };

        let tracks_metric = first.is_some();
        let loss_history = LossHistory::new();
        let metrics_history = MetricsHistory::new(&config.metrics);
        let table = SnapshotTable::from_histories(&loss_history, &metrics_history, config.validation)
            .style(&config.highlight)?;

        Ok(TrainingDashboard {
            layout: Layout::for_metrics(config.metrics.len()),
            live: LiveEpochSeries::new(tracks_metric),
            charts,
            loss_history,
            metrics_history,
            table,
            surface,
            phase: Phase::Uninitialized,
            config,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    pub fn loss_history(&self) -> &LossHistory {
        &self.loss_history
    }

    pub fn metrics_history(&self) -> &MetricsHistory {
        &self.metrics_history
    }

    pub fn live_series(&self) -> &LiveEpochSeries {
        &self.live
    }

    /// The table as last rendered.
    pub fn table(&self) -> &StyledTable {
        &self.table
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Everything recorded so far, keyed by log name.
    pub fn history(&self) -> HistoryExport {
        HistoryExport::new(&self.loss_history, &self.metrics_history, self.config.validation)
    }

    fn reject(&self, call: &'static str) -> DashboardError {
        let err = DashboardError::sequence(call, self.phase.describe());
        warn!("{}", err);
        err
    }

    fn open_epoch(&self, call: &'static str) -> Result<usize> {
        match self.phase {
            Phase::InEpoch(epoch) => Ok(epoch),
            _ => Err(self.reject(call)),
        }
    }

    fn push_cross_epoch(&mut self, epoch: usize, record: &EpochRecord) {
        let mut loss_point = vec![record.loss];
        loss_point.extend(record.val_loss);
        self.charts.loss.push_point(epoch, &loss_point);

        for (chart, values) in self.charts.metrics.iter_mut().zip(&record.metrics) {
            let mut point = vec![values.train];
            point.extend(values.val);
            chart.push_point(epoch, &point);
        }

        self.loss_history.record(record.loss, record.val_loss);
        self.metrics_history.record(&record.metrics);
    }
}

impl<S: Surface> TrainingCallback for TrainingDashboard<S> {
    fn on_train_begin(&mut self) -> Result<()> {
        if self.phase != Phase::Uninitialized {
            return Err(self.reject("on_train_begin"));
        }

        self.surface.display(&self.layout, &self.charts, &self.table)?;
        self.phase = Phase::Ready;

        info!(
            "dashboard displayed: {} metric chart(s), validation {}",
            self.charts.metrics.len(),
            if self.config.validation { "on" } else { "off" }
        );
        Ok(())
    }

    fn on_epoch_begin(&mut self, epoch: usize) -> Result<()> {
        if self.phase != Phase::Ready {
            return Err(self.reject("on_epoch_begin"));
        }

        self.live.reset();
        self.charts.live.clear();
        self.charts.live.set_title(format!("Epoch {}", epoch + 1));
        self.phase = Phase::InEpoch(epoch);

        self.surface.update_chart(ChartSlot::Live, &self.charts.live)
    }

    fn on_train_batch_end(&mut self, batch: usize, logs: &Logs) -> Result<()> {
        self.open_epoch("on_train_batch_end")?;
        if batch % self.config.batch_step != 0 {
            return Ok(());
        }

        let record = BatchRecord::parse(logs, &self.config)?;

        let mut point = vec![record.loss];
        point.extend(record.metric);
        self.charts.live.push_point(batch, &point);
        self.live.push(batch, record.loss, record.metric);

        debug!("batch {}: loss {:.6}", batch, record.loss);
        self.surface.update_chart(ChartSlot::Live, &self.charts.live)
    }

    fn on_epoch_end(&mut self, epoch: usize, logs: &Logs) -> Result<()> {
        let open = self.open_epoch("on_epoch_end")?;
        if open != epoch {
            let err = DashboardError::sequence(
                "on_epoch_end",
                format!("epoch {} ended while epoch {} is open", epoch, open),
            );
            warn!("{}", err);
            return Err(err);
        }

        let record = EpochRecord::parse(logs, &self.config)?;

        self.push_cross_epoch(epoch, &record);
        self.table = SnapshotTable::from_histories(
            &self.loss_history,
            &self.metrics_history,
            self.config.validation,
        )
        .style(&self.config.highlight)?;
        self.phase = Phase::Ready;

        match record.val_loss {
            Some(val) => info!("epoch {}: loss {:.6}, val_loss {:.6}", epoch + 1, record.loss, val),
            None      => info!("epoch {}: loss {:.6}", epoch + 1, record.loss),
        }

        self.surface.update_chart(ChartSlot::Loss, &self.charts.loss)?;
        for (i, chart) in self.charts.metrics.iter().enumerate() {
            self.surface.update_chart(ChartSlot::Metric(i), chart)?;
        }
        self.surface.render_table(&self.table)
    }

    fn on_train_end(&mut self) -> Result<()> {
        match self.phase {
            Phase::Ready | Phase::InEpoch(_) => {}
            _ => return Err(self.reject("on_train_end")),
        }
        self.phase = Phase::Finished;

        info!("training finished after {} epoch(s)\n{}", self.loss_history.len(), self.table);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "TrainingDashboard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::logs;
    use crate::render::{RecordingSurface, SurfaceEvent};
    use pretty_assertions::assert_eq;

    fn dashboard(config: RunConfig) -> TrainingDashboard<RecordingSurface> {
        TrainingDashboard::new(config, RecordingSurface::new()).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let result = TrainingDashboard::new(RunConfig::new().with_batch_step(0), RecordingSurface::new());
        assert!(matches!(result, Err(DashboardError::InvalidConfiguration(_))));
    }

    #[test]
    fn train_begin_displays_once() {
        let mut dash = dashboard(RunConfig::new());
        dash.on_train_begin().unwrap();
        assert_eq!(dash.phase(), Phase::Ready);
        assert_eq!(dash.surface().display_count(), 1);

        let err = dash.on_train_begin().unwrap_err();
        assert!(matches!(err, DashboardError::SequenceCall { call: "on_train_begin", .. }));
        assert_eq!(dash.surface().display_count(), 1);
    }

    #[test]
    fn epoch_begin_resets_live_chart_and_sets_title() {
        let mut dash = dashboard(RunConfig::new().with_batch_step(1));
        dash.on_train_begin().unwrap();
        dash.on_epoch_begin(0).unwrap();
        dash.on_train_batch_end(0, &logs([("loss", 1.0)])).unwrap();
        dash.on_epoch_end(0, &logs([("loss", 1.0)])).unwrap();

        dash.on_epoch_begin(1).unwrap();
        assert_eq!(dash.charts().live.title, "Epoch 2");
        assert!(dash.charts().live.is_empty());
        assert!(dash.live_series().is_empty());
        assert_eq!(dash.surface().last_chart(ChartSlot::Live).unwrap().title, "Epoch 2");
    }

    #[test]
    fn batch_end_outside_epoch_is_a_sequence_error() {
        let mut dash = dashboard(RunConfig::new());
        dash.on_train_begin().unwrap();
        let err = dash.on_train_batch_end(0, &logs([("loss", 1.0)])).unwrap_err();
        assert!(matches!(err, DashboardError::SequenceCall { .. }));
    }

    #[test]
    fn epoch_begin_before_train_begin_is_rejected() {
        let mut dash = dashboard(RunConfig::new());
        assert!(dash.on_epoch_begin(0).is_err());
        assert_eq!(dash.phase(), Phase::Uninitialized);
    }

    #[test]
    fn epoch_end_must_match_open_epoch() {
        let mut dash = dashboard(RunConfig::new());
        dash.on_train_begin().unwrap();
        dash.on_epoch_begin(0).unwrap();
        let err = dash.on_epoch_end(1, &logs([("loss", 1.0)])).unwrap_err();
        assert!(matches!(err, DashboardError::SequenceCall { call: "on_epoch_end", .. }));
        assert_eq!(dash.phase(), Phase::InEpoch(0));
        assert!(dash.loss_history().is_empty());
    }

    #[test]
    fn skipped_batches_need_no_payload() {
        let mut dash = dashboard(RunConfig::new().with_batch_step(5));
        dash.on_train_begin().unwrap();
        dash.on_epoch_begin(0).unwrap();
        dash.on_train_batch_end(3, &Logs::new()).unwrap();
        assert!(dash.live_series().is_empty());
    }

    #[test]
    fn live_chart_tracks_first_metric_only() {
        let config = RunConfig::new()
            .with_batch_step(1)
            .with_metric("accuracy", None, None)
            .with_metric("auc", None, None);
        let mut dash = dashboard(config);
        dash.on_train_begin().unwrap();
        dash.on_epoch_begin(0).unwrap();
        dash.on_train_batch_end(0, &logs([("loss", 0.9), ("accuracy", 0.4)])).unwrap();

        let live = &dash.charts().live;
        assert_eq!(live.lines.len(), 2);
        assert_eq!(live.line("accuracy").unwrap().y, vec![0.4]);
        assert_eq!(dash.live_series().metric, Some(vec![0.4]));
    }

    #[test]
    fn epoch_end_updates_charts_history_and_table() {
        let config = RunConfig::new().with_validation(true).with_metric("accuracy", None, None);
        let mut dash = dashboard(config);
        dash.on_train_begin().unwrap();
        for (epoch, loss) in [0.8, 0.5].into_iter().enumerate() {
            dash.on_epoch_begin(epoch).unwrap();
            dash.on_epoch_end(epoch, &logs([
                ("loss", loss),
                ("val_loss", loss + 0.1),
                ("accuracy", 1.0 - loss),
                ("val_accuracy", 0.9 - loss),
            ])).unwrap();
        }

        assert_eq!(dash.charts().loss.x, vec![0, 1]);
        assert_eq!(dash.charts().metrics[0].x, vec![0, 1]);
        assert_eq!(dash.loss_history().loss, vec![0.8, 0.5]);
        assert_eq!(dash.table().rows(), 2);

        let tables = dash.surface().events.iter()
            .filter(|e| matches!(e, SurfaceEvent::Table { .. }))
            .count();
        assert_eq!(tables, 2);
    }

    #[test]
    fn train_end_closes_the_dashboard() {
        let mut dash = dashboard(RunConfig::new());
        assert!(dash.on_train_end().is_err());
        dash.on_train_begin().unwrap();
        dash.on_epoch_begin(0).unwrap();
        dash.on_train_end().unwrap();
        assert_eq!(dash.phase(), Phase::Finished);
        assert!(dash.on_epoch_begin(1).is_err());
    }
}
