use crate::domain::handle::Handle;
use crate::domain::ports::{Activity, ActivityLookup};
use chrono::{DateTime, TimeDelta, Utc};

/// Keeps accounts that posted publicly within `max_inactivity`.
pub struct ActivityFilter<L: ActivityLookup> {
    lookup: L,
    max_inactivity: TimeDelta,
    reference_time: Option<DateTime<Utc>>,
}

impl<L: ActivityLookup> ActivityFilter<L> {
    pub fn new(lookup: L, max_inactivity: TimeDelta) -> Self {
        Self {
            lookup,
            max_inactivity,
            reference_time: None,
        }
    }

    /// Pins "now" instead of reading the clock on every decision.
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self
    }

    pub async fn keep(&self, handle: &Handle) -> bool {
        let acct = handle.acct();
        let activity = match self.lookup.lookup(&acct).await {
            Ok(activity) => activity,
            Err(e) => {
                tracing::warn!("Dropping {}: directory lookup failed: {}", handle, e);
                return false;
            }
        };

        let now = self.reference_time.unwrap_or_else(Utc::now);
        let keep = is_recently_active(activity, now, self.max_inactivity);
        if !keep {
            match activity {
                Activity::NotFound => tracing::info!("Dropping {}: account not found", handle),
                Activity::NeverPosted => tracing::info!("Dropping {}: no public posts", handle),
                Activity::LastPost(at) => {
                    tracing::info!("Dropping {}: last post {} is too old", handle, at.date_naive())
                }
            }
        }
        keep
    }
}

/// Missing accounts and accounts that never posted count as inactive.
pub fn is_recently_active(
    activity: Activity,
    now: DateTime<Utc>,
    max_inactivity: TimeDelta,
) -> bool {
    match activity {
        Activity::NotFound | Activity::NeverPosted => false,
        Activity::LastPost(at) => now - at < max_inactivity,
    }
}
