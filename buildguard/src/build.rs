//! The parts a shopper has selected so far.

use serde::{Deserialize, Serialize};

use crate::parts::{Case, Category, Cooler, Cpu, Gpu, Motherboard, Part, Psu, Ram, Storage};

/// At most one part per slot, except storage which holds a list.
///
/// The evaluator only reads a `BuildState`; "what if" queries go through
/// [`BuildState::with_candidate`], which leaves the original untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuildState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<Cpu>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motherboard: Option<Motherboard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram: Option<Ram>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu: Option<Gpu>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<Case>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooler: Option<Cooler>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub storage: Vec<Storage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psu: Option<Psu>,
}

impl BuildState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a part in its slot. Storage is appended; any other slot is replaced.
    pub fn place(&mut self, part: Part) {
        match part {
            Part::Cpu(p) => self.cpu = Some(p),
            Part::Motherboard(p) => self.motherboard = Some(p),
            Part::Ram(p) => self.ram = Some(p),
            Part::Gpu(p) => self.gpu = Some(p),
            Part::Case(p) => self.case = Some(p),
            Part::Cooler(p) => self.cooler = Some(p),
            Part::Storage(p) => self.storage.push(p),
            Part::Psu(p) => self.psu = Some(p),
        }
    }

    /// Chainable form of [`place`](Self::place).
    pub fn with(mut self, part: Part) -> Self {
        self.place(part);
        self
    }

    /// Copy of this build with `candidate` placed in its slot.
    pub fn with_candidate(&self, candidate: &Part) -> Self {
        self.clone().with(candidate.clone())
    }

    /// Empty a slot. For storage this drops every drive.
    pub fn remove(&mut self, category: Category) {
        match category {
            Category::Cpu => self.cpu = None,
            Category::Motherboard => self.motherboard = None,
            Category::Ram => self.ram = None,
            Category::Gpu => self.gpu = None,
            Category::Case => self.case = None,
            Category::Cooler => self.cooler = None,
            Category::Storage => self.storage.clear(),
            Category::Psu => self.psu = None,
        }
    }

    pub fn remove_storage(&mut self, index: usize) -> Option<Storage> {
        if index < self.storage.len() {
            Some(self.storage.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.part_count() == 0
    }

    pub fn is_filled(&self, category: Category) -> bool {
        match category {
            Category::Cpu => self.cpu.is_some(),
            Category::Motherboard => self.motherboard.is_some(),
            Category::Ram => self.ram.is_some(),
            Category::Gpu => self.gpu.is_some(),
            Category::Case => self.case.is_some(),
            Category::Cooler => self.cooler.is_some(),
            Category::Storage => !self.storage.is_empty(),
            Category::Psu => self.psu.is_some(),
        }
    }

    pub fn part_count(&self) -> usize {
        [
            self.cpu.is_some(),
            self.motherboard.is_some(),
            self.ram.is_some(),
            self.gpu.is_some(),
            self.case.is_some(),
            self.cooler.is_some(),
            self.psu.is_some(),
        ]
        .iter()
        .filter(|filled| **filled)
        .count()
            + self.storage.len()
    }

    /// Selected parts in builder step order, storage in insertion order.
    pub fn parts(&self) -> Vec<Part> {
        let mut parts = Vec::with_capacity(self.part_count());
        for category in Category::BUILD_ORDER {
            match category {
                Category::Cpu => parts.extend(self.cpu.clone().map(Part::Cpu)),
                Category::Motherboard => {
                    parts.extend(self.motherboard.clone().map(Part::Motherboard))
                }
                Category::Ram => parts.extend(self.ram.clone().map(Part::Ram)),
                Category::Gpu => parts.extend(self.gpu.clone().map(Part::Gpu)),
                Category::Storage => parts.extend(self.storage.iter().cloned().map(Part::Storage)),
                Category::Cooler => parts.extend(self.cooler.clone().map(Part::Cooler)),
                Category::Psu => parts.extend(self.psu.clone().map(Part::Psu)),
                Category::Case => parts.extend(self.case.clone().map(Part::Case)),
            }
        }
        parts
    }
}

impl FromIterator<Part> for BuildState {
    fn from_iter<I: IntoIterator<Item = Part>>(iter: I) -> Self {
        let mut build = BuildState::new();
        for part in iter {
            build.place(part);
        }
        build
    }
}
