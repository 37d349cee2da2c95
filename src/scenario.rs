//! Fixed demonstration patterns, each built to show what happens to the
//! cell at the origin after an advance.

use crate::error::CliError;
use sparselife::{Coord, Life};
use std::io::Write;

/// Width of the `*`-padded scenario headers
const HEADER_WIDTH: usize = 50;

pub const COUNT: usize = SCENARIOS.len();

#[derive(Clone, Copy)]
struct Scenario {
    cells: &'static [(i32, i32)],
    advances: u64,
}

const fn scenario(cells: &'static [(i32, i32)], advances: u64) -> Option<Scenario> {
    Some(Scenario { cells, advances })
}

/// `None` marks a scenario that is skipped because another one covers it
const SCENARIOS: [Option<Scenario>; 7] = [
    // empty plane stays empty
    scenario(&[], 1),
    // one neighbor, under-population
    scenario(&[(0, 0), (1, 1)], 1),
    // four neighbors, overcrowding
    scenario(&[(0, 0), (1, 1), (1, -1), (-1, 1), (-1, -1)], 1),
    // two neighbors, survival
    scenario(&[(0, 0), (1, 1), (1, 0)], 1),
    // dead with three neighbors, birth
    scenario(&[(1, 0), (-1, 0), (0, 1)], 1),
    None,
    // blinker, back to its start after two advances
    scenario(&[(0, 0), (1, 0), (-1, 0)], 2),
];

/// Pads `text` on both sides with asterisks up to `width` characters
///
/// An odd amount of padding loses its last asterisk, and text that is
/// already wider than `width` is returned unpadded.
pub fn centre(text: &str, width: usize) -> String {
    let pad = "*".repeat(width.saturating_sub(text.chars().count()) / 2);
    format!("{pad}{text}{pad}")
}

/// Renders cells as `{(x1,y1),(x2,y2),...}`, or `{}` when there are none
pub fn format_cells<'a, I: IntoIterator<Item = &'a Coord>>(cells: I) -> String {
    let cells = cells
        .into_iter()
        .map(Coord::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{cells}}}")
}

pub fn describe(game: &Life) -> String {
    format!(
        "Game at generation {}:\n{}",
        game.generation(),
        format_cells(game.live_cells())
    )
}

pub fn run<W: Write>(index: usize, out: &mut W) -> Result<(), CliError> {
    let entry = *SCENARIOS
        .get(index)
        .ok_or(CliError::UnknownScenario(index))?;

    writeln!(out, "{}", centre(&format!("SCENARIO_{index}"), HEADER_WIDTH))?;
    let Some(scenario) = entry else {
        writeln!(out, "Omitted - similar to scenario 0.")?;
        return Ok(());
    };

    let mut game: Life = scenario.cells.iter().copied().map(Coord::from).collect();
    writeln!(out, "{}", describe(&game))?;
    for _ in 0..scenario.advances {
        game.advance_one();
        writeln!(out, "{}", describe(&game))?;
    }
    Ok(())
}

pub fn run_all<W: Write>(out: &mut W) -> Result<(), CliError> {
    for index in 0..COUNT {
        if index > 0 {
            writeln!(out)?;
        }
        run(index, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(index: usize) -> String {
        let mut out = Vec::new();
        run(index, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn centre_pads_with_asterisks() {
        let header = centre("SCENARIO_0", 50);

        assert_eq!(header.len(), 50);
        assert_eq!(header, format!("{0}SCENARIO_0{0}", "*".repeat(20)));
        assert_eq!(centre("abc", 6), "*abc*");
        assert_eq!(centre("too wide", 3), "too wide");
    }

    #[test]
    fn formats_empty_and_populated_sets() {
        assert_eq!(format_cells(&[] as &[Coord]), "{}");

        let game: Life = [Coord::new(1, 0), Coord::new(-1, 2)].into_iter().collect();
        assert_eq!(format_cells(game.live_cells()), "{(-1,2),(1,0)}");
    }

    #[test]
    fn empty_scenario_stays_empty() {
        let expected = format!(
            "{}\nGame at generation 0:\n{{}}\nGame at generation 1:\n{{}}\n",
            centre("SCENARIO_0", HEADER_WIDTH)
        );
        assert_eq!(output(0), expected);
    }

    #[test]
    fn birth_scenario_populates_origin() {
        let text = output(4);
        let last = text.lines().last().unwrap();

        assert_eq!(last, "{(0,0),(0,1)}");
    }

    #[test]
    fn omitted_scenario_says_so() {
        assert!(output(5).ends_with("Omitted - similar to scenario 0.\n"));
    }

    #[test]
    fn blinker_scenario_returns_to_start() {
        let text = output(6);
        let sets: Vec<_> = text.lines().filter(|l| l.starts_with('{')).collect();

        assert_eq!(
            sets,
            vec!["{(-1,0),(0,0),(1,0)}", "{(0,-1),(0,0),(0,1)}", "{(-1,0),(0,0),(1,0)}"]
        );
    }

    #[test]
    fn unknown_scenario_writes_nothing() {
        let mut out = Vec::new();

        assert!(matches!(
            run(COUNT, &mut out),
            Err(CliError::UnknownScenario(COUNT))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn all_scenarios_are_separated() {
        let mut out = Vec::new();
        run_all(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches("SCENARIO_").count(), COUNT);
        assert_eq!(text.matches("\n\n").count(), COUNT - 1);
    }
}
