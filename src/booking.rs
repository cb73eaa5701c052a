use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::clock;

/// Position of a class within the catalog.
///
/// Bookings point back at their class through this id rather than holding a
/// reference, so a class owns its bookings without a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub usize);

/// The fact that a member holds one slot of one class.
///
/// Created by a successful booking, dropped by a successful cancellation,
/// never modified in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    member: String,
    class: ClassId,
    slot: usize,
    booked_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(member: &str, class: ClassId, slot: usize, booked_at: DateTime<Utc>) -> Self {
        Self {
            member: member.to_string(),
            class,
            slot,
            booked_at,
        }
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn class(&self) -> ClassId {
        self.class
    }

    /// Zero-based slot index.
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn booked_at(&self) -> DateTime<Utc> {
        self.booked_at
    }

    /// Human-readable confirmation, one line per field.
    pub fn confirmation(&self, class_name: &str, timezone: Option<Tz>) -> String {
        format!(
            "Booking confirmed for {}:\nClass: {}\nSlot: {}\nBooking Time: {}",
            self.member,
            class_name,
            self.slot.saturating_add(1),
            clock::format_timestamp(self.booked_at, timezone)
        )
    }
}
