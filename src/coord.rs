use std::{cmp::Ordering, fmt};

/// Offsets of the Moore neighborhood, in lexicographic order.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}
impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
    #[inline]
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Iterates the 8 cells adjacent to this one, in lexicographic order.
    ///
    /// Neighbors that would fall outside the `i32` range are skipped, so the
    /// plane ends at the integer limits.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |offset| self.checked_add(offset.into()))
    }

    /// Offsets this coordinate, `None` if either component overflows
    #[inline]
    pub fn checked_add(self, rhs: Coord) -> Option<Coord> {
        Some(Self {
            x: self.x.checked_add(rhs.x)?,
            y: self.y.checked_add(rhs.y)?,
        })
    }

    /// Offset from `rhs` to this coordinate, `None` if either component overflows
    #[inline]
    pub fn checked_sub(self, rhs: Coord) -> Option<Coord> {
        Some(Self {
            x: self.x.checked_sub(rhs.x)?,
            y: self.y.checked_sub(rhs.y)?,
        })
    }
}
impl Default for Coord {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}
impl From<(i32, i32)> for Coord {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
impl PartialOrd for Coord {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Coord {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // compare x coordinate first, then y coordinate
        Ord::cmp(&self.x, &other.x).then(Ord::cmp(&self.y, &other.y))
    }
}
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
