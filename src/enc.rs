use crate::Coord;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Default cap on the number of live cells a single pattern may decode to
pub const DEFAULT_MAX_CELLS: usize = 1 << 24;

/// Rule strings accepted in an RLE header, compared case-insensitively
const SUPPORTED_RULES: [&str; 3] = ["b3/s23", "23/3", "s23/b3"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The pattern was written for a rule other than B3/S23.
    #[error("unsupported rule: {0}")]
    UnsupportedRule(String),

    /// A run count could not be parsed.
    #[error("invalid run length {run:?} on line {line}")]
    InvalidRun { line: usize, run: String },

    /// The pattern extends past the representable coordinate range.
    #[error("pattern exceeds the coordinate range on line {line}")]
    OutOfRange { line: usize },

    /// The pattern holds more live cells than the decoder allows.
    #[error("pattern exceeds {limit} live cells on line {line}")]
    TooManyCells { line: usize, limit: usize },
}

pub trait PositionEncoder {
    fn encode(self, positions: &[Coord]) -> String;
    fn decode(self, value: &str) -> Result<Vec<Coord>, DecodeError>;
}

struct RunEncoder {
    sequence: String,
    line_len: usize,
    max_line_len: usize,
}
impl RunEncoder {
    fn new(max_line_len: usize) -> Self {
        Self {
            sequence: String::new(),
            line_len: 0,
            max_line_len,
        }
    }

    fn push_run(&mut self, run: i64, c: char) {
        let append = match run {
            0 => String::new(),
            1 => c.to_string(),
            n => format!("{}{}", n, c),
        };
        if self.line_len + append.len() > self.max_line_len {
            self.sequence.push('\n');
            self.line_len = 0;
        }
        self.line_len += append.len();
        self.sequence.push_str(&append);
    }

    pub fn end(mut self) -> String {
        self.sequence.push('!');
        self.sequence
    }
}

/// Bounding box of a set of cells, as (top left, bottom right)
fn bounds(cells: &[Coord]) -> Option<(Coord, Coord)> {
    let first = *cells.first()?;
    Some(cells.iter().fold((first, first), |(tl, br), p| {
        (
            Coord::new(tl.x.min(p.x), tl.y.min(p.y)),
            Coord::new(br.x.max(p.x), br.y.max(p.y)),
        )
    }))
}

/// Run-length encoded patterns, the de facto format for sharing Life patterns
///
/// Rows run along x; each `$` moves to the next y.
pub struct RunLengthEncoded {
    name: Option<String>,
    header: bool,
    max_cells: usize,
}
impl RunLengthEncoded {
    pub fn set_name<T: AsRef<str>>(mut self, name: T) -> Self {
        self.name = Some(name.as_ref().to_owned());
        self
    }

    pub fn set_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Limits how many live cells [`PositionEncoder::decode`] accepts
    pub fn set_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    fn encode_header(&self, cells: &[Coord]) -> String {
        let mut header = String::new();
        if !self.header {
            return header;
        }
        if let Some(name) = &self.name {
            header.push_str(&format!("#N {}\n", name));
        }
        let (w, h) = match bounds(cells) {
            Some((tl, br)) => (
                i64::from(br.x) - i64::from(tl.x) + 1,
                i64::from(br.y) - i64::from(tl.y) + 1,
            ),
            None => (0, 0),
        };
        header.push_str(&format!("x = {}, y = {}, rule = B3/S23\n", w, h));
        header
    }

    /// Expects `cells` sorted row by row, see [`row_major`]
    fn encode_cells(&self, cells: &[Coord]) -> String {
        let Some((tl, _)) = bounds(cells) else {
            return RunEncoder::new(70).end();
        };

        // widen to i64 so runs spanning the whole i32 range cannot overflow
        let (left, top) = (i64::from(tl.x), i64::from(tl.y));
        let mut last = (left - 1, top);
        let mut alive_run = 0;
        let mut seq = RunEncoder::new(70);
        for pos in cells {
            let pos = (i64::from(pos.x), i64::from(pos.y));
            // if we're one ahead of the last, then only increment the run
            if last.1 == pos.1 && (last.0 + 1) == pos.0 {
                alive_run += 1;
                last = pos;
                continue;
            }

            let lines_run = pos.1 - last.1;
            let dead_run = match lines_run {
                0 => pos.0 - last.0 - 1,
                _ => pos.0 - left,
            };
            // NOTE: order matters!
            seq.push_run(alive_run, 'o');
            seq.push_run(lines_run, '$');
            seq.push_run(dead_run, 'b');

            alive_run = 1;
            last = pos;
        }

        seq.push_run(alive_run, 'o');
        seq.end()
    }
}
impl Default for RunLengthEncoded {
    fn default() -> Self {
        Self {
            name: None,
            header: true,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

/// Sorts cells by row (y), then column (x), dropping duplicates
fn row_major(cells: &[Coord]) -> Vec<Coord> {
    let mut rows = cells.to_vec();
    rows.sort_by_key(|p| (p.y, p.x));
    rows.dedup();
    rows
}

fn run_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(r"(\d*)([bo$!])").expect("valid run regex"))
}

fn rule_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(r"rule\s*=\s*([^,\s]+)").expect("valid rule regex"))
}

fn check_rule(header: &str) -> Result<(), DecodeError> {
    let Some(caps) = rule_regex().captures(header) else {
        return Ok(());
    };
    let rule = &caps[1];
    if SUPPORTED_RULES.iter().any(|r| r.eq_ignore_ascii_case(rule)) {
        Ok(())
    } else {
        Err(DecodeError::UnsupportedRule(rule.to_owned()))
    }
}

impl PositionEncoder for RunLengthEncoded {
    fn encode(self, cells: &[Coord]) -> String {
        let cells = row_major(cells);
        format!("{}{}\n", self.encode_header(&cells), self.encode_cells(&cells))
    }

    fn decode(self, value: &str) -> Result<Vec<Coord>, DecodeError> {
        let mut alive = Vec::new();
        // the cursor may step past the i32 range, only cells are range checked
        let (mut x, mut y) = (0i64, 0i64);
        'lines_loop: for (i, mut line) in value.lines().enumerate() {
            let line_no = i + 1;
            let out_of_range = || DecodeError::OutOfRange { line: line_no };

            if let Some(i) = line.find('#') {
                line = &line[..i];
            }
            if line.trim_start().starts_with('x') {
                check_rule(line)?;
                continue;
            }

            for (_, [run_str, state]) in run_regex().captures_iter(line).map(|x| x.extract()) {
                let run = match run_str {
                    "" => 1,
                    s => s.parse::<u32>().map_err(|_| DecodeError::InvalidRun {
                        line: line_no,
                        run: s.to_owned(),
                    })?,
                };
                let run = i64::from(run);
                match state {
                    "!" => break 'lines_loop,
                    "o" => {
                        if alive.len() as u64 + run as u64 > self.max_cells as u64 {
                            return Err(DecodeError::TooManyCells {
                                line: line_no,
                                limit: self.max_cells,
                            });
                        }
                        let row = i32::try_from(y).map_err(|_| out_of_range())?;
                        let end = x.saturating_add(run);
                        for cell_x in x..end {
                            let cell_x = i32::try_from(cell_x).map_err(|_| out_of_range())?;
                            alive.push(Coord::new(cell_x, row));
                        }
                        x = end;
                    }
                    "b" => x = x.saturating_add(run),
                    "$" => {
                        x = 0;
                        y = y.saturating_add(run);
                    }
                    _ => unreachable!(),
                }
            }
        }

        Ok(alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    fn glider() -> Vec<Coord> {
        vec![c(1, 0), c(2, 1), c(0, 2), c(1, 2), c(2, 2)]
    }

    #[test]
    fn encodes_glider() {
        let encoded = RunLengthEncoded::default()
            .set_name("glider")
            .encode(&glider());

        assert_eq!(encoded, "#N glider\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n");
    }

    #[test]
    fn encodes_without_header() {
        let encoded = RunLengthEncoded::default()
            .set_header(false)
            .encode(&[c(0, 0), c(1, 0), c(-1, 0)]);

        assert_eq!(encoded, "3o!\n");
    }

    #[test]
    fn encodes_empty_pattern() {
        let encoded = RunLengthEncoded::default().encode(&[]);

        assert_eq!(encoded, "x = 0, y = 0, rule = B3/S23\n!\n");
    }

    #[test]
    fn encoding_ignores_input_order() {
        let mut shuffled = glider();
        shuffled.reverse();

        assert_eq!(
            RunLengthEncoded::default().encode(&shuffled),
            RunLengthEncoded::default().encode(&glider())
        );
    }

    #[test]
    fn decodes_glider_with_comments() {
        let input = "#N glider\n#C a comment\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n";
        let mut decoded = RunLengthEncoded::default().decode(input).unwrap();
        decoded.sort();

        let mut expected = glider();
        expected.sort();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn decodes_multiline_runs_and_stops_at_terminator() {
        let input = "2o$\n2$o!\nooo";
        let decoded = RunLengthEncoded::default().decode(input).unwrap();

        assert_eq!(decoded, vec![c(0, 0), c(1, 0), c(0, 3)]);
    }

    #[test]
    fn accepts_legacy_rule_notation() {
        let input = "x = 1, y = 1, rule = 23/3\no!";

        assert_eq!(RunLengthEncoded::default().decode(input), Ok(vec![c(0, 0)]));
    }

    #[test]
    fn rejects_other_rules() {
        let input = "x = 1, y = 1, rule = B36/S23\no!";

        assert_eq!(
            RunLengthEncoded::default().decode(input),
            Err(DecodeError::UnsupportedRule("B36/S23".to_owned()))
        );
    }

    #[test]
    fn rejects_overflowing_runs() {
        let input = "99999999999o!";

        assert!(matches!(
            RunLengthEncoded::default().decode(input),
            Err(DecodeError::InvalidRun { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_patterns_past_coordinate_range() {
        let input = "2147483647b2o!";

        assert_eq!(
            RunLengthEncoded::default().decode(input),
            Err(DecodeError::OutOfRange { line: 1 })
        );
    }

    #[test]
    fn decodes_cell_at_coordinate_limit() {
        let decoded = RunLengthEncoded::default().decode("2147483647bo!");

        assert_eq!(decoded, Ok(vec![c(i32::MAX, 0)]));
    }

    #[test]
    fn encoded_row_at_coordinate_limit_decodes() {
        let cells = vec![c(0, 0), c(i32::MAX, 0)];
        let encoded = RunLengthEncoded::default().encode(&cells);

        assert_eq!(RunLengthEncoded::default().decode(&encoded), Ok(cells));
    }

    #[test]
    fn rejects_patterns_over_cell_limit() {
        assert_eq!(
            RunLengthEncoded::default().decode("50000000o!"),
            Err(DecodeError::TooManyCells {
                line: 1,
                limit: DEFAULT_MAX_CELLS
            })
        );
        assert_eq!(
            RunLengthEncoded::default().decode("2147483647o!"),
            Err(DecodeError::TooManyCells {
                line: 1,
                limit: DEFAULT_MAX_CELLS
            })
        );
    }

    #[test]
    fn cell_limit_counts_across_runs() {
        let decoder = || RunLengthEncoded::default().set_max_cells(4);

        assert_eq!(decoder().decode("2o$2o!").map(|v| v.len()), Ok(4));
        assert_eq!(
            decoder().decode("2o$\n2o$o!"),
            Err(DecodeError::TooManyCells { line: 2, limit: 4 })
        );
    }

    #[test]
    fn encoded_pattern_decodes_to_same_shape() {
        let cells = vec![c(-5, -5), c(-4, -5), c(10, 2), c(0, 0)];
        let encoded = RunLengthEncoded::default().encode(&cells);
        let decoded = RunLengthEncoded::default().decode(&encoded).unwrap();

        // decoding anchors the pattern's top left corner at the origin
        let offset = c(-5, -5);
        let mut restored: Vec<_> = decoded
            .into_iter()
            .filter_map(|p| p.checked_add(offset))
            .collect();
        restored.sort();
        let mut expected = cells;
        expected.sort();
        assert_eq!(restored, expected);
    }
}
