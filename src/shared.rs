use std::sync::{Arc, Mutex, MutexGuard};

use crate::booking::{Booking, ClassId};
use crate::catalog::Catalog;
use crate::error::SharedError;
use crate::registry::FitnessClass;

/// A catalog that several threads can book against.
///
/// Each class sits behind its own lock, so work on one class never waits on
/// another. Every operation holds the class lock for its whole duration.
#[derive(Clone)]
pub struct SharedCatalog {
    classes: Arc<Vec<Mutex<FitnessClass>>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        let classes = catalog.into_classes().into_iter().map(Mutex::new).collect();
        Self {
            classes: Arc::new(classes),
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Run `f` with exclusive access to one class.
    pub fn with_class<T>(
        &self,
        id: ClassId,
        f: impl FnOnce(&mut FitnessClass) -> T,
    ) -> Result<T, SharedError> {
        let mut class = self.lock(id)?;
        Ok(f(&mut class))
    }

    pub fn book_slot(&self, id: ClassId, member: &str, slot: usize) -> Result<Booking, SharedError> {
        let mut class = self.lock(id)?;
        let booking = class.book_slot(member, slot)?;
        Ok(booking.clone())
    }

    pub fn cancel_booking(
        &self,
        id: ClassId,
        member: &str,
        position: usize,
    ) -> Result<Booking, SharedError> {
        let mut class = self.lock(id)?;
        Ok(class.cancel_booking(member, position)?)
    }

    fn lock(&self, id: ClassId) -> Result<MutexGuard<'_, FitnessClass>, SharedError> {
        self.classes
            .get(id.0)
            .ok_or(SharedError::UnknownClass(id.0))?
            .lock()
            .map_err(|_| SharedError::Poisoned(id.0))
    }
}
