//! In-memory booking of fitness class slots.
//!
//! A [`catalog::Catalog`] owns one [`registry::FitnessClass`] per configured
//! class. Each class tracks which of its slots are taken and, per member, the
//! bookings that member holds. [`session::Session`] drives the catalog from an
//! interactive text menu and mirrors its output into a transcript file.

pub mod booking;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod member;
pub mod models;
pub mod registry;
pub mod session;
pub mod shared;
pub mod transcript;

pub use booking::{Booking, ClassId};
pub use catalog::Catalog;
pub use error::{BookingError, CancelError, SharedError};
pub use member::Member;
pub use registry::{FitnessClass, SlotStatus};
pub use shared::SharedCatalog;
