/// Number of states a Moore neighborhood can count: 0 through 8 live neighbors
const NEIGHBOR_COUNTS: usize = 9;
type RuleTable = [bool; NEIGHBOR_COUNTS];

/// Live-neighbor counts at which a dead cell is born (B3)
const BIRTH: RuleTable = rule_table(&[3]);
/// Live-neighbor counts at which a live cell survives (S23)
const SURVIVAL: RuleTable = rule_table(&[2, 3]);

const fn rule_table(counts: &[usize]) -> RuleTable {
    let mut table = [false; NEIGHBOR_COUNTS];
    let mut i = 0;
    while i < counts.len() {
        table[counts[i]] = true;
        i += 1;
    }
    table
}

/// Returns whether a cell is alive in the next generation
///
/// `alive` is the cell's current state and `live_neighbors` the number of
/// live cells in its Moore neighborhood. Counts above 8 cannot occur and are
/// treated as dead.
#[inline]
pub(super) fn next_state(alive: bool, live_neighbors: usize) -> bool {
    let table = if alive { &SURVIVAL } else { &BIRTH };
    table.get(live_neighbors).copied().unwrap_or(false)
}
