use thiserror::Error;

/// Why a slot could not be booked. Slot numbers render 1-based, as the menu shows them.
/// A failed booking leaves the class untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("slot {} does not exist ({class} has {num_slots} slots)", .slot.saturating_add(1))]
    SlotOutOfRange {
        class: String,
        slot: usize,
        num_slots: usize,
    },

    #[error("slot {} is already booked", .slot.saturating_add(1))]
    SlotAlreadyBooked { slot: usize },

    #[error("{class} is full ({max_capacity} bookings)")]
    ClassFull { class: String, max_capacity: usize },
}

/// Why a cancellation did not happen. A failed cancellation leaves the class untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CancelError {
    #[error("{member} has no bookings in {class}")]
    UnknownMember { member: String, class: String },

    #[error("{member} has no booking #{} ({count} active)", .position.saturating_add(1))]
    PositionOutOfRange {
        member: String,
        position: usize,
        count: usize,
    },
}

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("unknown class id {0}")]
    UnknownClass(usize),

    #[error("lock for class {0} is poisoned")]
    Poisoned(usize),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Cancel(#[from] CancelError),
}
