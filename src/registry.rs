use std::collections::HashMap;
use std::io::{self, Write};

use tracing::debug;

use crate::booking::{Booking, ClassId};
use crate::clock;
use crate::error::{BookingError, CancelError};
use crate::member::Member;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Available,
    Booked,
}

impl SlotStatus {
    pub fn label(self) -> &'static str {
        match self {
            SlotStatus::Available => "Available",
            SlotStatus::Booked => "Booked",
        }
    }
}

/// A fitness class: its slot table and the members holding those slots.
///
/// A slot is booked exactly when one member's ledger holds a booking for it.
/// Every mutation goes through `book_slot` / `cancel_booking`, which keep both
/// sides in step. Not synchronized; see [`crate::shared::SharedCatalog`].
#[derive(Debug)]
pub struct FitnessClass {
    id: ClassId,
    name: String,
    max_capacity: usize,
    slots: Vec<SlotStatus>,
    // Ledgers in first-seen order, indexed by member name
    members: Vec<Member>,
    index: HashMap<String, usize>,
}

impl FitnessClass {
    pub fn new(id: ClassId, name: &str, max_capacity: usize, num_slots: usize) -> Self {
        Self {
            id,
            name: name.to_string(),
            max_capacity,
            slots: vec![SlotStatus::Available; num_slots],
            members: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn slot_statuses(&self) -> &[SlotStatus] {
        &self.slots
    }

    pub fn is_available(&self, slot: usize) -> bool {
        self.slots.get(slot) == Some(&SlotStatus::Available)
    }

    pub fn available_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| **s == SlotStatus::Available)
            .count()
    }

    pub fn active_bookings(&self) -> usize {
        self.members.iter().map(Member::len).sum()
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.index.get(name).map(|&i| &self.members[i])
    }

    /// Members in the order they first booked this class.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    /// Book zero-based `slot` for `member_name`, creating the member's ledger
    /// on first sight.
    pub fn book_slot(&mut self, member_name: &str, slot: usize) -> Result<&Booking, BookingError> {
        match self.slots.get(slot) {
            None => {
                return Err(BookingError::SlotOutOfRange {
                    class: self.name.clone(),
                    slot,
                    num_slots: self.slots.len(),
                })
            }
            Some(SlotStatus::Booked) => return Err(BookingError::SlotAlreadyBooked { slot }),
            Some(SlotStatus::Available) => {}
        }
        if self.active_bookings() >= self.max_capacity {
            return Err(BookingError::ClassFull {
                class: self.name.clone(),
                max_capacity: self.max_capacity,
            });
        }

        self.slots[slot] = SlotStatus::Booked;
        let booking = Booking::new(member_name, self.id, slot, clock::now());
        debug!(class = %self.name, member = member_name, slot, "slot booked");

        let member = self.member_entry(member_name);
        member.add_booking(booking);
        let bookings = member.bookings();
        Ok(&bookings[bookings.len() - 1])
    }

    /// Cancel the booking at zero-based `position` in the member's ledger and
    /// free its slot. Nothing changes when the member or position is unknown.
    pub fn cancel_booking(&mut self, member_name: &str, position: usize) -> Result<Booking, CancelError> {
        let Some(&i) = self.index.get(member_name) else {
            return Err(CancelError::UnknownMember {
                member: member_name.to_string(),
                class: self.name.clone(),
            });
        };
        let member = &mut self.members[i];
        let count = member.len();
        let booking = member
            .remove_booking(position)
            .ok_or_else(|| CancelError::PositionOutOfRange {
                member: member_name.to_string(),
                position,
                count,
            })?;

        self.slots[booking.slot()] = SlotStatus::Available;
        debug!(class = %self.name, member = member_name, slot = booking.slot(), "booking cancelled");
        Ok(booking)
    }

    /// Slot table, one line per slot. Labels are the 1-based numbers the user
    /// types, so stored index 3 prints as "Slot 4".
    pub fn write_available_slots<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Available slots for {}:", self.name)?;
        for (i, status) in self.slots.iter().enumerate() {
            writeln!(out, "Slot {}: {}", i + 1, status.label())?;
        }
        Ok(())
    }

    /// Every known member with the numbered list of their active bookings.
    pub fn write_bookings<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Bookings for {}:", self.name)?;
        if self.members.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for member in &self.members {
            writeln!(out, "Member: {}", member.name())?;
            for (position, booking) in member.bookings().iter().enumerate() {
                writeln!(out, "  #{} Slot: {}", position + 1, booking.slot() + 1)?;
            }
        }
        Ok(())
    }

    /// Check that the slot table and the ledgers describe the same bookings.
    pub fn check_consistency(&self) -> Result<(), String> {
        let mut holders: Vec<Option<&str>> = vec![None; self.slots.len()];
        for member in &self.members {
            for booking in member.bookings() {
                let slot = booking.slot();
                let Some(holder) = holders.get_mut(slot) else {
                    return Err(format!("{} holds slot {} outside the table", member.name(), slot));
                };
                if let Some(other) = holder {
                    return Err(format!("slot {} held by both {} and {}", slot, other, member.name()));
                }
                *holder = Some(member.name());
            }
        }
        for (slot, (status, holder)) in self.slots.iter().zip(&holders).enumerate() {
            match (status, holder) {
                (SlotStatus::Booked, None) => return Err(format!("slot {} booked by nobody", slot)),
                (SlotStatus::Available, Some(name)) => {
                    return Err(format!("slot {} available but held by {}", slot, name))
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn member_entry(&mut self, name: &str) -> &mut Member {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => {
                self.members.push(Member::new(name));
                let i = self.members.len() - 1;
                self.index.insert(name.to_string(), i);
                i
            }
        };
        &mut self.members[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yoga() -> FitnessClass {
        FitnessClass::new(ClassId(0), "Yoga", 20, 10)
    }

    fn render<F: Fn(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_new_class_is_empty() {
        let class = yoga();
        assert_eq!(class.num_slots(), 10);
        assert_eq!(class.available_count(), 10);
        assert_eq!(class.active_bookings(), 0);
        assert!(class.members().next().is_none());
        assert!(class.check_consistency().is_ok());
    }

    #[test]
    fn test_book_slot() {
        let mut class = yoga();
        let booking = class.book_slot("Alice", 3).unwrap();
        assert_eq!(booking.member(), "Alice");
        assert_eq!(booking.slot(), 3);
        assert_eq!(booking.class(), ClassId(0));

        assert!(!class.is_available(3));
        assert_eq!(class.available_count(), 9);
        assert_eq!(class.member("Alice").unwrap().len(), 1);
        assert!(class.check_consistency().is_ok());
    }

    #[test]
    fn test_book_taken_slot_fails() {
        let mut class = yoga();
        class.book_slot("Alice", 3).unwrap();
        let err = class.book_slot("Bob", 3).unwrap_err();
        assert_eq!(err, BookingError::SlotAlreadyBooked { slot: 3 });
        assert_eq!(err.to_string(), "slot 4 is already booked");

        // Bob is not registered by a failed booking
        assert!(class.member("Bob").is_none());
        assert_eq!(class.active_bookings(), 1);
    }

    #[test]
    fn test_book_out_of_range_fails() {
        let mut class = yoga();
        let err = class.book_slot("Alice", 10).unwrap_err();
        assert!(matches!(err, BookingError::SlotOutOfRange { slot: 10, num_slots: 10, .. }));
        assert_eq!(class.available_count(), 10);
        assert!(class.member("Alice").is_none());
    }

    #[test]
    fn test_huge_indices_render_without_overflow() {
        let mut class = yoga();
        let err = class.book_slot("Alice", usize::MAX).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("slot {} does not exist (Yoga has 10 slots)", usize::MAX)
        );

        class.book_slot("Alice", 0).unwrap();
        let err = class.cancel_booking("Alice", usize::MAX).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Alice has no booking #{} (1 active)", usize::MAX)
        );
        assert_eq!(
            BookingError::SlotAlreadyBooked { slot: usize::MAX }.to_string(),
            format!("slot {} is already booked", usize::MAX)
        );
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut class = FitnessClass::new(ClassId(2), "Spin", 2, 5);
        class.book_slot("Alice", 0).unwrap();
        class.book_slot("Bob", 1).unwrap();
        let err = class.book_slot("Carol", 2).unwrap_err();
        assert_eq!(
            err,
            BookingError::ClassFull {
                class: "Spin".to_string(),
                max_capacity: 2
            }
        );
        assert!(class.is_available(2));

        // Cancelling frees capacity again
        class.cancel_booking("Bob", 0).unwrap();
        class.book_slot("Carol", 2).unwrap();
        assert!(class.check_consistency().is_ok());
    }

    #[test]
    fn test_book_then_cancel_round_trip() {
        let mut class = yoga();
        class.book_slot("Alice", 3).unwrap();
        let cancelled = class.cancel_booking("Alice", 0).unwrap();
        assert_eq!(cancelled.slot(), 3);
        assert!(class.is_available(3));
        assert!(class.member("Alice").unwrap().is_empty());
        assert_eq!(class.available_count(), 10);
        assert!(class.check_consistency().is_ok());
    }

    #[test]
    fn test_cancel_uses_ledger_position() {
        let mut class = yoga();
        class.book_slot("Alice", 7).unwrap();
        class.book_slot("Alice", 2).unwrap();
        class.book_slot("Alice", 5).unwrap();

        // Position 1 is the second booking made, slot 2
        let cancelled = class.cancel_booking("Alice", 1).unwrap();
        assert_eq!(cancelled.slot(), 2);

        // Remaining bookings shift down
        let cancelled = class.cancel_booking("Alice", 1).unwrap();
        assert_eq!(cancelled.slot(), 5);
        let slots: Vec<usize> = class
            .member("Alice")
            .unwrap()
            .bookings()
            .iter()
            .map(|b| b.slot())
            .collect();
        assert_eq!(slots, vec![7]);
        assert!(class.check_consistency().is_ok());
    }

    #[test]
    fn test_cancel_out_of_range_changes_nothing() {
        let mut class = yoga();
        class.book_slot("Alice", 3).unwrap();
        let err = class.cancel_booking("Alice", 1).unwrap_err();
        assert_eq!(
            err,
            CancelError::PositionOutOfRange {
                member: "Alice".to_string(),
                position: 1,
                count: 1
            }
        );
        assert!(!class.is_available(3));
        assert_eq!(class.member("Alice").unwrap().len(), 1);
    }

    #[test]
    fn test_cancel_unknown_member_creates_nothing() {
        let mut class = yoga();
        let err = class.cancel_booking("Mallory", 0).unwrap_err();
        assert!(matches!(err, CancelError::UnknownMember { .. }));
        assert!(class.member("Mallory").is_none());
        assert!(class.members().next().is_none());
    }

    #[test]
    fn test_member_survives_cancelling_everything() {
        let mut class = yoga();
        class.book_slot("Alice", 0).unwrap();
        class.cancel_booking("Alice", 0).unwrap();
        let names: Vec<&str> = class.members().map(Member::name).collect();
        assert_eq!(names, vec!["Alice"]);
    }

    #[test]
    fn test_write_available_slots() {
        let mut class = FitnessClass::new(ClassId(0), "Yoga", 20, 3);
        class.book_slot("Alice", 1).unwrap();
        let text = render(|out| class.write_available_slots(out));
        assert_eq!(
            text,
            "Available slots for Yoga:\nSlot 1: Available\nSlot 2: Booked\nSlot 3: Available\n"
        );
    }

    #[test]
    fn test_write_bookings_in_first_seen_order() {
        let mut class = yoga();
        class.book_slot("Zed", 4).unwrap();
        class.book_slot("Amy", 0).unwrap();
        class.book_slot("Zed", 1).unwrap();
        let text = render(|out| class.write_bookings(out));
        assert_eq!(
            text,
            "Bookings for Yoga:\nMember: Zed\n  #1 Slot: 5\n  #2 Slot: 2\nMember: Amy\n  #1 Slot: 1\n"
        );
    }

    #[test]
    fn test_write_bookings_empty() {
        let class = yoga();
        let text = render(|out| class.write_bookings(out));
        assert_eq!(text, "Bookings for Yoga:\n  (none)\n");
    }
}
