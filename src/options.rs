use std::str::FromStr;

use crate::error::CliError;
use rand::{Rng, SeedableRng, rngs::StdRng};
use sparselife::{Coord, Life};

const DEFAULT_GRID_SIZE: i32 = 64;
const DEFAULT_GENERATIONS: u64 = 100;
/// Largest block `--fill` may cover, in cells
const MAX_FILL_AREA: u64 = 1 << 24;

/// Options that each pick the starting pattern, at most one may be given
const PATTERN_SOURCES: [&str; 3] = ["scenario", "input", "fill"];

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>, CliError> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optopt("s", "scenario", "run a single demonstration scenario", "N");
        opts.optopt("i", "input", "read the initial pattern from an RLE file", "FILE");
        opts.optopt("o", "output", "write the final pattern as RLE", "FILE");
        opts.optopt("w", "width", "set fill width", "WIDTH");
        opts.optopt("h", "height", "set fill height", "HEIGHT");
        opts.optopt(
            "f",
            "fill",
            "fill the initial pattern: random, alternating, all or empty",
            "TYPE",
        );
        opts.optopt("", "seed", "seed for the random fill", "SEED");
        opts.optopt("g", "gens", "number of generations to simulate", "COUNT");
        opts.optflag("p", "print", "print the live cells after every generation");
        opts.optopt("", "stats", "write stats csv to file", "FILE");

        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: sparselife [options]"));
            return Ok(None);
        }

        let mut sources = PATTERN_SOURCES
            .into_iter()
            .filter(|name| matches.opt_present(name));
        if let (Some(first), Some(second)) = (sources.next(), sources.next()) {
            return Err(CliError::Conflict(first, second));
        }
        Ok(Some(Self { matches }))
    }
    pub fn from_env() -> Result<Option<Self>, CliError> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    fn get<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, CliError> {
        self.matches.opt_get(name).map_err(|_| CliError::InvalidValue {
            name,
            value: self.matches.opt_str(name).unwrap_or_default(),
        })
    }

    pub fn scenario(&self) -> Result<Option<usize>, CliError> {
        self.get("scenario")
    }

    pub fn generations(&self) -> Result<u64, CliError> {
        Ok(self.get("gens")?.unwrap_or(DEFAULT_GENERATIONS))
    }
    pub fn print(&self) -> bool {
        self.matches.opt_present("print")
    }

    fn size(&self, name: &'static str) -> Result<i32, CliError> {
        match self.get::<i32>(name)? {
            Some(n) if n < 0 => Err(CliError::InvalidValue {
                name,
                value: n.to_string(),
            }),
            n => Ok(n.unwrap_or(DEFAULT_GRID_SIZE)),
        }
    }
    pub fn grid_size(&self) -> Result<(i32, i32), CliError> {
        let (width, height) = (self.size("width")?, self.size("height")?);
        if width as u64 * height as u64 > MAX_FILL_AREA {
            return Err(CliError::FillTooLarge {
                width,
                height,
                max: MAX_FILL_AREA,
            });
        }
        Ok((width, height))
    }
    fn rng(&self) -> Result<StdRng, CliError> {
        Ok(match self.get::<u64>("seed")? {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        })
    }
    fn fill_mode(&self) -> Result<Option<FillMode>, CliError> {
        self.matches
            .opt_str("fill")
            .map(|s| {
                FillMode::new(&s).ok_or(CliError::InvalidValue {
                    name: "fill",
                    value: s,
                })
            })
            .transpose()
    }

    /// Builds the `--fill` pattern, `None` when no fill was requested
    pub fn fill(&self) -> Result<Option<Life>, CliError> {
        let Some(mode) = self.fill_mode()? else {
            return Ok(None);
        };
        let (w, h) = self.grid_size()?;
        Ok(Some(mode.seed_life(w, h, &mut self.rng()?)))
    }

    pub fn output_file(&self) -> Option<String> {
        self.matches.opt_str("output")
    }
    pub fn input_file(&self) -> Option<String> {
        self.matches.opt_str("input")
    }

    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FillMode {
    Random,
    Alternating,
    All,
    Empty,
}
impl FillMode {
    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "random" => Some(Self::Random),
            "alternating" => Some(Self::Alternating),
            "all" => Some(Self::All),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    /// Whether `cell` starts alive, only [`FillMode::Random`] draws from `rng`
    fn is_alive<R: Rng>(self, cell: Coord, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.random_bool(0.5),
            Self::Alternating => (cell.x + cell.y) % 2 == 0,
            Self::All => true,
            Self::Empty => false,
        }
    }

    /// Starts a simulation from a `w` by `h` block with its corner at the origin
    pub fn seed_life<R: Rng>(self, w: i32, h: i32, rng: &mut R) -> Life {
        if let Self::Empty = self {
            return Life::default();
        }
        (0..h)
            .flat_map(|y| (0..w).map(move |x| Coord::new(x, y)))
            .filter(|&cell| self.is_alive(cell, rng))
            .collect()
    }
}
