//! Reduction of a cell's occupants to a single [`CategoryCode`].
//!
//! Priority when several kinds share a cell:
//! `GrazerHunter > GrazerGrower > HunterGrower > single kind > Empty`.
//! Predator/prey co-presence outranks either pairing with a grower, and a
//! cell holding all three kinds reports `GrazerHunter`.

use pasture_data::{CategoryCode, Species};

/// Presence flags for the three species inside one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occupants {
    pub grower: bool,
    pub grazer: bool,
    pub hunter: bool,
}

impl Occupants {
    #[inline]
    pub fn mark(&mut self, species: Species) {
        match species {
            Species::Grower => self.grower = true,
            Species::Grazer => self.grazer = true,
            Species::Hunter => self.hunter = true,
        }
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.grower && self.grazer && self.hunter
    }

    #[must_use]
    pub fn code(&self) -> CategoryCode {
        match (self.grazer, self.hunter, self.grower) {
            (true, true, _) => CategoryCode::GrazerHunter,
            (true, false, true) => CategoryCode::GrazerGrower,
            (false, true, true) => CategoryCode::HunterGrower,
            (false, false, true) => CategoryCode::GrowerOnly,
            (true, false, false) => CategoryCode::GrazerOnly,
            (false, true, false) => CategoryCode::HunterOnly,
            (false, false, false) => CategoryCode::Empty,
        }
    }
}

/// Classifies the species present in a cell. Pure and order-independent.
pub fn classify<I>(kinds: I) -> CategoryCode
where
    I: IntoIterator<Item = Species>,
{
    let mut occupants = Occupants::default();
    for species in kinds {
        occupants.mark(species);
        if occupants.is_full() {
            break;
        }
    }
    occupants.code()
}

/// Whether a cell with this code holds at least one agent of `species`.
#[must_use]
pub fn contains(code: CategoryCode, species: Species) -> bool {
    use CategoryCode::*;
    match species {
        Species::Grower => matches!(code, GrowerOnly | GrazerGrower | HunterGrower),
        Species::Grazer => matches!(code, GrazerOnly | GrazerHunter | GrazerGrower),
        Species::Hunter => matches!(code, HunterOnly | GrazerHunter | HunterGrower),
    }
}
