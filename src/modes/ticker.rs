//! The periodic game timer
//!
//! The ticker holds at most one armed `Interval` and mirrors the engine's
//! [`Schedule`]: a new epoch drops the old interval before arming the next one,
//! and `Stopped` drops it outright, so a stale period can never fire again.

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::Schedule;

#[derive(Debug, Default)]
pub struct Ticker {
    armed: Option<(u64, Interval)>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel-then-arm whenever the schedule differs from what is held
    pub fn sync(&mut self, schedule: Schedule) {
        match schedule {
            Schedule::Stopped => {
                self.armed = None;
            }
            Schedule::Armed { every, epoch } => {
                if self.epoch() == Some(epoch) {
                    return;
                }
                self.armed = None;
                // First firing one full period out, like a fresh periodic timer
                let mut timer = interval_at(Instant::now() + every, every);
                timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.armed = Some((epoch, timer));
            }
        }
    }

    pub fn epoch(&self) -> Option<u64> {
        self.armed.as_ref().map(|(epoch, _)| *epoch)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Resolves on the next firing; never resolves while stopped
    pub async fn tick(&mut self) {
        match &mut self.armed {
            Some((_, timer)) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
