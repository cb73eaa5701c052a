use crate::booking::ClassId;
use crate::models::ClassConfig;
use crate::registry::FitnessClass;

/// The classes on offer, in menu order. Owns every registry for the life of
/// the session.
#[derive(Debug)]
pub struct Catalog {
    classes: Vec<FitnessClass>,
}

impl Catalog {
    pub fn from_config(classes: &[ClassConfig]) -> Self {
        let classes = classes
            .iter()
            .enumerate()
            .map(|(i, c)| FitnessClass::new(ClassId(i), c.name.trim(), c.max_capacity, c.num_slots))
            .collect();
        Self { classes }
    }

    /// Yoga (20 places, 10 slots) and Zumba (30 places, 15 slots).
    pub fn reference() -> Self {
        Self::from_config(&crate::models::Config::default().classes)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, id: ClassId) -> Option<&FitnessClass> {
        self.classes.get(id.0)
    }

    pub fn get_mut(&mut self, id: ClassId) -> Option<&mut FitnessClass> {
        self.classes.get_mut(id.0)
    }

    /// Resolve a 1-based menu entry.
    pub fn by_menu_number(&self, number: i64) -> Option<ClassId> {
        usize::try_from(number)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .filter(|&i| i < self.classes.len())
            .map(ClassId)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FitnessClass> {
        self.classes.iter()
    }

    pub(crate) fn into_classes(self) -> Vec<FitnessClass> {
        self.classes
    }
}
