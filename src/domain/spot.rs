//! Spot inventory
//!
//! A fixed set of numbered spots, each typed by category. Spots are numbered
//! from 1 in the order categories are declared, so the standard layout of
//! 30 cars then 20 motorcycles yields car spots 1-30 and motorcycle spots 31-50.

use serde::Serialize;

use super::vehicle::Category;

/// A single numbered space in the facility
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Spot {
    pub number: u32,
    pub category: Category,
    pub occupied: bool,
}

/// The facility's spots, indexed by `number - 1`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpotInventory {
    spots: Vec<Spot>,
}

impl SpotInventory {
    /// Builds the inventory, all spots free
    ///
    /// A category listed twice gets two runs of spots; configuration
    /// validation rejects that before it reaches here.
    pub fn initialize(counts: &[(Category, u32)]) -> Self {
        let mut spots = Vec::new();
        for (category, count) in counts {
            for _ in 0..*count {
                spots.push(Spot {
                    number: spots.len() as u32 + 1,
                    category: category.clone(),
                    occupied: false,
                });
            }
        }
        Self { spots }
    }

    /// Lowest-numbered free spot of the category
    pub fn find_free(&self, category: &Category) -> Option<u32> {
        self.spots
            .iter()
            .find(|s| !s.occupied && &s.category == category)
            .map(|s| s.number)
    }

    /// Marks a spot occupied. Returns false if it was already occupied or
    /// does not exist.
    pub fn occupy(&mut self, number: u32) -> bool {
        match self.get_mut(number) {
            Some(spot) if !spot.occupied => {
                spot.occupied = true;
                true
            }
            _ => false,
        }
    }

    /// Marks a spot free. Returns false if it was already free or does not
    /// exist.
    pub fn vacate(&mut self, number: u32) -> bool {
        match self.get_mut(number) {
            Some(spot) if spot.occupied => {
                spot.occupied = false;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, number: u32) -> Option<&Spot> {
        let idx = number.checked_sub(1)? as usize;
        self.spots.get(idx)
    }

    fn get_mut(&mut self, number: u32) -> Option<&mut Spot> {
        let idx = number.checked_sub(1)? as usize;
        self.spots.get_mut(idx)
    }

    /// Returns `(occupied, total)` for a category
    pub fn occupancy(&self, category: &Category) -> (u32, u32) {
        self.spots
            .iter()
            .filter(|s| &s.category == category)
            .fold((0, 0), |(occupied, total), s| {
                (occupied + s.occupied as u32, total + 1)
            })
    }

    /// Categories in declaration order, without repeats
    pub fn categories(&self) -> Vec<Category> {
        let mut seen: Vec<Category> = Vec::new();
        for spot in &self.spots {
            if !seen.contains(&spot.category) {
                seen.push(spot.category.clone());
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spot> {
        self.spots.iter()
    }
}
