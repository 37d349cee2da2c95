use std::{io, process::ExitCode};

mod error;
mod options;
mod scenario;
mod stats;

use error::CliError;
use sparselife::{Coord, Life, PositionEncoder, RunLengthEncoded};
use stats::{Recorder, Throughput, Timeline};

/// Builds the initial pattern from `--input` or `--fill`, if either was given
fn initial_life(args: &options::Args) -> Result<Option<Life>, CliError> {
    let Some(path) = args.input_file() else {
        return args.fill();
    };

    let encoded_str = std::fs::read_to_string(&path).map_err(|source| CliError::File {
        path: path.clone(),
        source,
    })?;
    let alive = RunLengthEncoded::default()
        .decode(&encoded_str)
        .map_err(|source| CliError::Decode { path, source })?;
    Ok(Some(Life::new(alive)))
}

fn simulate(args: &options::Args, mut game: Life) -> Result<(), CliError> {
    println!("alive: {}", game.live_cell_count());

    let print = args.print();
    let stats_file = args.stats_file();
    let mut throughput = Throughput::new(&game);
    let mut timeline = stats_file.as_ref().map(|_| Timeline::new(&game));
    if print {
        println!("{}", scenario::describe(&game));
    }

    for _ in 0..args.generations()? {
        game.advance_one();
        throughput.record(&game);
        if let Some(timeline) = timeline.as_mut() {
            timeline.record(&game);
        }

        if print {
            println!("{}", scenario::describe(&game));
        } else if let Some(progress) = throughput.poll() {
            println!("{progress}");
        }
    }
    println!("{}", throughput.progress());

    if let (Some(path), Some(timeline)) = (stats_file, timeline) {
        timeline
            .save(&path)
            .map_err(|source| CliError::File { path, source })?;
    }

    if let Some(path) = args.output_file() {
        let encoder = RunLengthEncoded::default().set_name(format!(
            "sparselife generation {}",
            game.generation()
        ));
        let alive: Vec<Coord> = game.take().into_iter().collect();
        std::fs::write(&path, encoder.encode(&alive))
            .map_err(|source| CliError::File { path, source })?;
    }

    Ok(())
}

fn run() -> Result<(), CliError> {
    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };

    match initial_life(&args)? {
        Some(game) => simulate(&args, game),
        // no pattern given, show the demonstration scenarios instead
        None => {
            let mut stdout = io::stdout().lock();
            match args.scenario()? {
                Some(index) => scenario::run(index, &mut stdout)?,
                None => scenario::run_all(&mut stdout)?,
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
