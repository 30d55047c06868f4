//! Productivity score

use tempo_domain::constants::MAX_PRODUCTIVITY_SCORE;
use tempo_domain::AnalyticsReport;

/// Bounded 0..=200 heuristic over a period report and the current streak
///
/// - 10 points per tracked hour, at most 100
/// - 5 points per streak day, at most 50
/// - 10 points per bucket of the report with any activity
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn productivity_score(report: &AnalyticsReport, current_streak: u32) -> u32 {
    let total_hours = report.total_time.max(0) as f64 / 3600.0;
    let time_score = (total_hours * 10.0).min(100.0);
    let streak_bonus = f64::from(current_streak.saturating_mul(5).min(50));
    let consistency_bonus = report.active_buckets() as f64 * 10.0;

    let score = (time_score + streak_bonus + consistency_bonus).round();
    (score as u32).min(MAX_PRODUCTIVITY_SCORE)
}
