use sparselife::Life;
use std::{
    fmt, io,
    path::Path,
    time::{Duration, Instant},
};

/// How often [`Throughput::poll`] hands out a progress line
const REPORT_INTERVAL: Duration = Duration::from_millis(500);

/// Observes a simulation after every generation
pub trait Recorder {
    fn record(&mut self, game: &Life);
}

/// One progress line: where the simulation is and how fast it got there
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub generation: u64,
    pub alive: usize,
    pub gens_per_sec: f64,
}
impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gen:{}, alive:{}, {:.02}gen/s",
            self.generation, self.alive, self.gens_per_sec
        )
    }
}

/// Tracks generation rate between progress lines
pub struct Throughput {
    generation: u64,
    alive: usize,
    window_start: Instant,
    window_generation: u64,
}
impl Throughput {
    pub fn new(game: &Life) -> Self {
        Self {
            generation: game.generation(),
            alive: game.live_cell_count(),
            window_start: Instant::now(),
            window_generation: game.generation(),
        }
    }

    /// Closes the current window and reports on it
    pub fn progress(&mut self) -> Progress {
        let elapsed = self.window_start.elapsed().as_secs_f64();
        let advanced = self.generation - self.window_generation;
        let gens_per_sec = if elapsed > 0.0 {
            advanced as f64 / elapsed
        } else {
            0.0
        };

        self.window_start = Instant::now();
        self.window_generation = self.generation;
        Progress {
            generation: self.generation,
            alive: self.alive,
            gens_per_sec,
        }
    }

    /// Reports once per [`REPORT_INTERVAL`], `None` in between
    pub fn poll(&mut self) -> Option<Progress> {
        (self.window_start.elapsed() >= REPORT_INTERVAL).then(|| self.progress())
    }
}
impl Recorder for Throughput {
    fn record(&mut self, game: &Life) {
        self.generation = game.generation();
        self.alive = game.live_cell_count();
    }
}

/// A recorded generation, as written to the CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sample {
    generation: u64,
    delta: Duration,
    alive: usize,
}

/// Keeps one [`Sample`] per generation for `--stats`
pub struct Timeline {
    samples: Vec<Sample>,
    last: Instant,
}
impl Timeline {
    /// Starts with the initial population, at a zero time delta
    pub fn new(game: &Life) -> Self {
        Self {
            samples: vec![Sample {
                generation: game.generation(),
                delta: Duration::ZERO,
                alive: game.live_cell_count(),
            }],
            last: Instant::now(),
        }
    }

    pub fn write_csv<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(b"gen,delta_us,alive\n")?;
        for sample in &self.samples {
            writeln!(
                out,
                "{},{},{}",
                sample.generation,
                sample.delta.as_micros(),
                sample.alive
            )?;
        }
        out.flush()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(io::BufWriter::new(file))
    }
}
impl Recorder for Timeline {
    fn record(&mut self, game: &Life) {
        let now = Instant::now();
        self.samples.push(Sample {
            generation: game.generation(),
            delta: now - self.last,
            alive: game.live_cell_count(),
        });
        self.last = now;
    }
}
