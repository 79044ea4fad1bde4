//! Booking rules service
//!
//! Wires the identity source and the booking store into the pure rules.
//! Every entry point takes `now` so callers own the clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use virexa_access::{usage_stats, UsageStats};
use virexa_bookings::{
    authorize, awaiting_confirmation, collect_valid, count_period_bookings, evaluate_booking,
    has_active_booking, partition, progress, AttendancePolicy, BillingPeriod, BookingAction,
    BookingDecision, BookingLists, BookingRecord, BookingRequest, BookingStatus,
    ProgressSummary, RawBooking, SnapshotDefaults,
};
use virexa_tiers::{plan_key_from_metadata, Subscription, Tier, TierResolver};

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::ports::{BookingStore, IdentitySource};

/// Everything the member's bookings page shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingsOverview {
    /// The member's subscription
    pub subscription: Subscription,

    /// Quota usage for the current billing period
    pub usage: Option<UsageStats>,

    /// Upcoming and past bookings
    pub lists: BookingLists,

    /// Bookings whose attendance can be confirmed right now
    pub awaiting_confirmation: Vec<BookingRecord>,

    /// Progress towards the monthly goal
    pub progress: ProgressSummary,
}

/// Booking rules service over an identity source and a booking store.
#[derive(Debug)]
pub struct BookingsService<I, B> {
    identity: I,
    store: B,
    config: ServiceConfig,
    resolver: TierResolver,
    policy: AttendancePolicy,
    defaults: SnapshotDefaults,
}

impl<I, B> BookingsService<I, B>
where
    I: IdentitySource,
    B: BookingStore,
{
    /// Create a service, validating the configuration.
    pub fn new(identity: I, store: B, config: ServiceConfig) -> ServiceResult<Self> {
        config.validate()?;

        Ok(Self {
            identity,
            store,
            resolver: config.resolver(),
            policy: config.attendance_policy(),
            defaults: config.snapshot_defaults(),
            config,
        })
    }

    /// Create a service with the default configuration.
    pub fn with_defaults(identity: I, store: B) -> Self {
        let config = ServiceConfig::default();
        Self {
            identity,
            store,
            resolver: config.resolver(),
            policy: config.attendance_policy(),
            defaults: config.snapshot_defaults(),
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Resolve the viewer's subscription.
    ///
    /// Anonymous viewers have no subscription. A failed identity lookup is
    /// logged and treated as the entry tier.
    #[instrument(skip(self))]
    pub async fn subscription(&self, user_id: Option<&str>) -> Subscription {
        let Some(user_id) = user_id else {
            return Subscription::None;
        };

        let metadata = match self.identity.plan_metadata(user_id).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Identity lookup failed, using entry tier");
                return Subscription::Active(Tier::Basic);
            }
        };

        let plan_key = metadata.as_ref().and_then(plan_key_from_metadata);
        let subscription = Subscription::resolve_with(&self.resolver, plan_key.as_deref());

        debug!(
            user_id = %user_id,
            plan_key = ?plan_key,
            subscription = ?subscription,
            "Resolved subscription"
        );
        subscription
    }

    /// Build the member's bookings page.
    #[instrument(skip(self))]
    pub async fn overview(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> ServiceResult<BookingsOverview> {
        let subscription = self.subscription(Some(user_id)).await;
        let records = self.load_bookings(user_id).await?;

        let period = BillingPeriod::containing(now);
        let used = count_period_bookings(&records, &period);
        let usage = subscription.tier().map(|tier| usage_stats(tier, used));

        let summary = progress(&records, now, self.config.monthly_goal);
        let awaiting: Vec<BookingRecord> = awaiting_confirmation(&records, now, &self.policy)
            .into_iter()
            .cloned()
            .collect();
        let lists = partition(records, now);

        debug!(
            upcoming = lists.upcoming.len(),
            past = lists.past.len(),
            awaiting = awaiting.len(),
            used,
            "Built bookings overview"
        );

        Ok(BookingsOverview {
            subscription,
            usage,
            lists,
            awaiting_confirmation: awaiting,
            progress: summary,
        })
    }

    /// Decide what the booking button offers for a session.
    #[instrument(skip(self))]
    pub async fn check_booking(
        &self,
        user_id: Option<&str>,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> ServiceResult<BookingDecision> {
        let session = self
            .store
            .session(session_id)
            .await?
            .ok_or_else(|| ServiceError::SessionNotFound(session_id.to_string()))?
            .into_session(&self.defaults)?;

        let subscription = self.subscription(user_id).await;

        let (already_booked, used_this_period) = match user_id {
            Some(user_id) => {
                let records = self.load_bookings(user_id).await?;
                let period = BillingPeriod::containing(now);
                (
                    has_active_booking(&records, &session.id),
                    count_period_bookings(&records, &period),
                )
            }
            None => (false, 0),
        };

        let decision = evaluate_booking(&BookingRequest {
            signed_in: user_id.is_some(),
            subscription,
            session: &session,
            already_booked,
            used_this_period,
            now,
        });

        debug!(decision = ?decision, "Evaluated booking");
        Ok(decision)
    }

    /// Check a member or administrator action and return the status it
    /// would produce.
    ///
    /// Member actions only see the member's own bookings. Administrator
    /// cancellation looks the booking up regardless of owner. The store is
    /// never written to.
    #[instrument(skip(self))]
    pub async fn authorize_action(
        &self,
        user_id: &str,
        booking_id: &str,
        action: BookingAction,
        now: DateTime<Utc>,
    ) -> ServiceResult<BookingStatus> {
        let raw = match action {
            BookingAction::AdminCancel => self.store.booking(booking_id).await?,
            BookingAction::ConfirmAttendance | BookingAction::Cancel => self
                .store
                .bookings_for_user(user_id)
                .await?
                .into_iter()
                .rev()
                .find(|raw| raw.id.as_deref() == Some(booking_id)),
        };

        let record = raw
            .ok_or_else(|| ServiceError::BookingNotFound(booking_id.to_string()))?
            .into_record(&self.defaults)?;

        match authorize(&record, action, now, &self.policy) {
            Ok(next) => {
                debug!(from = %record.status, to = %next, "Action authorized");
                Ok(next)
            }
            Err(e) => {
                debug!(from = %record.status, error = %e, "Action refused");
                Err(e.into())
            }
        }
    }

    async fn load_bookings(&self, user_id: &str) -> ServiceResult<Vec<BookingRecord>> {
        let raws: Vec<RawBooking> = self.store.bookings_for_user(user_id).await?;
        Ok(collect_valid(raws, &self.defaults))
    }
}
