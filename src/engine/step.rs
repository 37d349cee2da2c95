use super::rule;
use crate::Coord;
use std::collections::BTreeSet;

/// Counts how many of `pos`'s neighbors are in `alive`
#[inline]
fn live_neighbors(alive: &BTreeSet<Coord>, pos: Coord) -> usize {
    pos.neighbors().filter(|n| alive.contains(n)).count()
}

/// Collects the dead cells adjacent to at least one live cell
///
/// These are the only dead cells that can be born, since a dead cell with no
/// live neighbors stays dead.
fn dead_neighbors(alive: &BTreeSet<Coord>) -> BTreeSet<Coord> {
    alive
        .iter()
        .flat_map(|pos| pos.neighbors())
        .filter(|pos| !alive.contains(pos))
        .collect()
}

/// Dead cells that come alive in the next generation
fn births(alive: &BTreeSet<Coord>) -> impl Iterator<Item = Coord> + '_ {
    dead_neighbors(alive)
        .into_iter()
        .filter(move |&pos| rule::next_state(false, live_neighbors(alive, pos)))
}

/// Live cells that stay alive in the next generation
fn survivors(alive: &BTreeSet<Coord>) -> impl Iterator<Item = Coord> + '_ {
    alive
        .iter()
        .copied()
        .filter(move |&pos| rule::next_state(true, live_neighbors(alive, pos)))
}

/// Computes the live cells of the generation following `alive`
///
/// Only live cells and their dead neighbors are evaluated, so the cost scales
/// with the population rather than with the area it spans.
pub fn next_generation(alive: &BTreeSet<Coord>) -> BTreeSet<Coord> {
    // births and survivors are disjoint, the union needs no precedence rule
    births(alive).chain(survivors(alive)).collect()
}
