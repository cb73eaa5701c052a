use crate::booking::Booking;

/// One member's active bookings within a single class, in booking order.
///
/// The ledger does no validation; the owning class keeps it consistent with
/// its slot table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    name: String,
    bookings: Vec<Booking>,
}

impl Member {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            bookings: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub(crate) fn add_booking(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    /// Remove the booking at `position`, shifting later ones down.
    pub(crate) fn remove_booking(&mut self, position: usize) -> Option<Booking> {
        if position < self.bookings.len() {
            Some(self.bookings.remove(position))
        } else {
            None
        }
    }
}
