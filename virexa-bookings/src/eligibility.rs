//! Booking eligibility
//!
//! Combines session state, the viewer's subscription and their quota into
//! one decision for the booking button.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use virexa_access::{decide_access, usage_stats, AccessDecision};
use virexa_tiers::{Subscription, Tier};

use crate::session::{BookingRecord, ClassSession};

/// Everything needed to decide whether a viewer can book a session.
#[derive(Debug, Clone, Copy)]
pub struct BookingRequest<'a> {
    /// Whether the viewer is signed in
    pub signed_in: bool,

    /// The viewer's subscription
    pub subscription: Subscription,

    /// The session to book
    pub session: &'a ClassSession,

    /// Whether the viewer already holds a non-cancelled booking for it
    pub already_booked: bool,

    /// Bookings already counted against the current billing period
    pub used_this_period: u32,

    /// Evaluation time
    pub now: DateTime<Utc>,
}

/// What the booking button should offer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum BookingDecision {
    /// The viewer may book.
    Bookable,

    /// The viewer already holds a booking for this session.
    AlreadyBooked,

    /// The session has started.
    BookingClosed,

    /// No places left.
    ClassFull,

    /// The viewer must sign in first.
    SignInRequired,

    /// The viewer has no subscription.
    SubscriptionRequired,

    /// The viewer's tier is below the session's.
    UpgradeRequired {
        /// Tier the session requires
        required: Tier,
    },

    /// The viewer has used every booking in the billing period.
    QuotaExhausted {
        /// Bookings allowed per period
        limit: u32,
    },
}

impl BookingDecision {
    /// Check if the viewer may book.
    pub fn is_bookable(&self) -> bool {
        matches!(self, BookingDecision::Bookable)
    }
}

/// Decide what the booking button offers.
///
/// Checks run in this order: existing booking, session started, session
/// full, signed in, subscribed, tier high enough, quota left.
pub fn evaluate_booking(request: &BookingRequest<'_>) -> BookingDecision {
    if request.already_booked {
        return BookingDecision::AlreadyBooked;
    }
    if request.session.has_started(request.now) {
        return BookingDecision::BookingClosed;
    }
    if request.session.is_full() {
        return BookingDecision::ClassFull;
    }
    if !request.signed_in {
        return BookingDecision::SignInRequired;
    }

    let tier = match decide_access(&request.subscription, request.session.required_tier) {
        AccessDecision::SubscriptionRequired => return BookingDecision::SubscriptionRequired,
        AccessDecision::UpgradeRequired { required } => {
            return BookingDecision::UpgradeRequired { required }
        }
        AccessDecision::Granted => match request.subscription.tier() {
            Some(tier) => tier,
            None => return BookingDecision::SubscriptionRequired,
        },
    };

    let usage = usage_stats(tier, request.used_this_period);
    if usage.is_exhausted() {
        if let Some(limit) = usage.limit.as_option() {
            return BookingDecision::QuotaExhausted { limit };
        }
    }

    BookingDecision::Bookable
}

/// Check if `records` hold a non-cancelled booking for `session_id`.
pub fn has_active_booking<'a, I>(records: I, session_id: &str) -> bool
where
    I: IntoIterator<Item = &'a BookingRecord>,
{
    records
        .into_iter()
        .any(|record| record.is_active() && record.session.id == session_id)
}
