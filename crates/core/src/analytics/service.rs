//! Analytics service - load an owner's timers and aggregate them

use std::sync::Arc;

use tempo_common::time::SharedClock;
use tempo_domain::{
    AnalyticsDashboard, AnalyticsReport, DashboardSummary, DateRange, Period, Result, Timer,
};
use tracing::debug;
use uuid::Uuid;

use super::engine::AnalyticsEngine;
use crate::timer::ports::TimerRepository;

/// Analytics service
pub struct AnalyticsService {
    timers: Arc<dyn TimerRepository>,
    engine: AnalyticsEngine,
    clock: SharedClock,
}

impl AnalyticsService {
    /// Create a new analytics service
    pub fn new(timers: Arc<dyn TimerRepository>, engine: AnalyticsEngine, clock: SharedClock) -> Self {
        Self { timers, engine, clock }
    }

    pub const fn engine(&self) -> &AnalyticsEngine {
        &self.engine
    }

    /// Analytics page for `period`
    ///
    /// Streaks run over every day the owner has a timer, so the whole history
    /// is loaded; the period figures and calendar pick their own windows.
    ///
    /// # Errors
    ///
    /// Repository errors are passed through.
    pub async fn dashboard(&self, owner_id: Uuid, period: Period) -> Result<AnalyticsDashboard> {
        let now = self.clock.now();
        let timers = self.load(owner_id, DateRange::unbounded()).await?;

        let dashboard = self.engine.dashboard(period, &timers, now);
        debug!(
            owner_id = %owner_id,
            period = %period,
            total_time = dashboard.total_time,
            score = dashboard.productivity_score,
            "Analytics dashboard built"
        );
        Ok(dashboard)
    }

    /// Analytics page for a caller-supplied period identifier
    ///
    /// # Errors
    ///
    /// `TempoError::InvalidPeriod` for anything but `day`, `week` or
    /// `month`; repository errors are passed through.
    pub async fn dashboard_for(&self, owner_id: Uuid, period: &str) -> Result<AnalyticsDashboard> {
        self.dashboard(owner_id, Period::parse(period)?).await
    }

    /// Period breakdown only
    ///
    /// # Errors
    ///
    /// Repository errors are passed through.
    pub async fn report(&self, owner_id: Uuid, period: Period) -> Result<AnalyticsReport> {
        let now = self.clock.now();
        let timers = self.load(owner_id, self.engine.period_range(period, now)).await?;
        Ok(self.engine.analytics_for(period, &timers, now))
    }

    /// Landing-page overview over every timer the owner has
    ///
    /// # Errors
    ///
    /// Repository errors are passed through.
    pub async fn summary(&self, owner_id: Uuid) -> Result<DashboardSummary> {
        let now = self.clock.now();
        let timers = self.load(owner_id, DateRange::unbounded()).await?;
        Ok(self.engine.summarize(&timers, now))
    }

    async fn load(&self, owner_id: Uuid, range: DateRange) -> Result<Vec<Timer>> {
        let timers = self.timers.load_timers_for_owner(owner_id, range).await?;
        debug!(owner_id = %owner_id, count = timers.len(), "Loaded timers for analytics");
        Ok(timers)
    }
}
