mod rule;
mod step;

pub use self::step::next_generation;
use crate::Coord;
use std::collections::BTreeSet;

/// A Game of Life simulation on an unbounded plane
///
/// Only live cells are stored; every coordinate missing from the set is dead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Life {
    alive: BTreeSet<Coord>,
    generation: u64,
}

impl Life {
    /// Starts a simulation at generation 0, duplicate cells collapse
    pub fn new<I: IntoIterator<Item = Coord>>(alive: I) -> Self {
        Self {
            alive: alive.into_iter().collect(),
            generation: 0,
        }
    }

    pub fn advance_one(&mut self) {
        self.alive = next_generation(&self.alive);
        self.generation += 1;
    }

    /// Advances until [`Life::generation`] reaches `target`
    ///
    /// Never goes backwards: a target at or before the current generation
    /// leaves the simulation untouched.
    pub fn advance_to(&mut self, target: u64) {
        while self.generation < target {
            self.advance_one();
        }
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn live_cell_count(&self) -> usize {
        self.alive.len()
    }

    #[inline]
    pub fn is_alive(&self, pos: Coord) -> bool {
        self.alive.contains(&pos)
    }

    /// Borrowed view of the live cells, in lexicographic order
    #[inline]
    pub fn live_cells(&self) -> &BTreeSet<Coord> {
        &self.alive
    }

    /// Owned copy of the live cells, in lexicographic order
    pub fn live_cells_snapshot(&self) -> BTreeSet<Coord> {
        self.alive.clone()
    }

    #[inline]
    pub fn take(self) -> BTreeSet<Coord> {
        self.alive
    }
}

impl FromIterator<Coord> for Life {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self::new(iter)
    }
}
