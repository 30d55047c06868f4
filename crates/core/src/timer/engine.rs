//! Clock-driven timer lifecycle

use chrono::{DateTime, Utc};
use tempo_common::time::SharedClock;
use tempo_domain::{Result, Timer, TimerEvent, TimerView};
use tracing::{debug, info, warn};

use super::transitions::{self, TimerAction};
use super::{elapsed, view};

/// Applies lifecycle transitions to a timer using an injected clock
///
/// The clock is read once per call and that instant is used for every
/// derived field. On failure the timer is left untouched.
#[derive(Clone)]
pub struct TimerEngine {
    clock: SharedClock,
}

impl TimerEngine {
    pub fn new(clock: SharedClock) -> Self {
        Self { clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Run `action` against `timer`, committing only on success
    ///
    /// # Errors
    ///
    /// Returns `TempoError::InvalidTransition` when the current status does
    /// not allow `action`.
    pub fn apply(&self, timer: &mut Timer, action: TimerAction) -> Result<()> {
        let now = self.clock.now();
        let next = transitions::apply(timer, action, now).map_err(|err| {
            warn!(
                timer_id = %timer.id,
                status = %timer.status,
                action = %action,
                reason = %err,
                "Rejected timer transition"
            );
            err
        })?;

        debug!(
            timer_id = %timer.id,
            action = %action,
            from = %timer.status,
            to = %next.status,
            "Timer transition"
        );
        if matches!(action, TimerAction::Stop | TimerAction::Expire) {
            info!(
                timer_id = %next.id,
                owner_id = %next.owner_id,
                status = %next.status,
                duration = next.duration,
                "Timer finished"
            );
        }

        *timer = next;
        Ok(())
    }

    pub fn start(&self, timer: &mut Timer) -> Result<()> {
        self.apply(timer, TimerAction::Start)
    }

    pub fn pause(&self, timer: &mut Timer) -> Result<()> {
        self.apply(timer, TimerAction::Pause)
    }

    pub fn resume(&self, timer: &mut Timer) -> Result<()> {
        self.apply(timer, TimerAction::Resume)
    }

    pub fn stop(&self, timer: &mut Timer) -> Result<()> {
        self.apply(timer, TimerAction::Stop)
    }

    pub fn reset(&self, timer: &mut Timer) -> Result<()> {
        self.apply(timer, TimerAction::Reset)
    }

    pub fn expire(&self, timer: &mut Timer) -> Result<()> {
        self.apply(timer, TimerAction::Expire)
    }

    /// Expire the timer if its countdown has run out
    ///
    /// Returns the expiry event when the timer changed, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Only fails if the expire transition is rejected, which cannot happen
    /// once `should_expire` holds.
    pub fn poll_expiry(&self, timer: &mut Timer) -> Result<Option<TimerEvent>> {
        let now = self.clock.now();
        if !elapsed::should_expire(timer, now) {
            return Ok(None);
        }

        let next = transitions::expire(timer, now)?;
        info!(
            timer_id = %next.id,
            owner_id = %next.owner_id,
            duration = next.duration,
            "Countdown expired"
        );
        *timer = next;

        Ok(Some(TimerEvent::Expired { timer_id: timer.id, owner_id: timer.owner_id, at: now }))
    }

    pub fn calculate_duration(&self, timer: &Timer) -> i64 {
        elapsed::calculate_duration(timer, self.clock.now())
    }

    pub fn calculate_remaining_time(&self, timer: &Timer) -> i64 {
        elapsed::calculate_remaining_time(timer, self.clock.now())
    }

    pub fn progress_percentage(&self, timer: &Timer) -> f64 {
        elapsed::progress_percentage(timer, self.clock.now())
    }

    pub fn is_expired(&self, timer: &Timer) -> bool {
        elapsed::is_expired(timer, self.clock.now())
    }

    pub fn display_time(&self, timer: &Timer) -> i64 {
        elapsed::display_time(timer, self.clock.now())
    }

    pub fn formatted_duration(&self, timer: &Timer) -> String {
        elapsed::formatted_duration(timer, self.clock.now())
    }

    pub fn view(&self, timer: &Timer) -> TimerView {
        view::to_view(timer, self.clock.now())
    }
}
