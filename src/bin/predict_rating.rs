// Predicts one contestant's rating change from a contest's current standings.
// Usage: predict_rating [contest_id] [handle] [--output adjusted.(csv|json)]
// Missing positional arguments are read from stdin.
use anyhow::Context;
use cf_predict::configuration::get_configuration;
use cf_predict::data_processing::{CodeforcesApi, StandingsSource, try_write_slice_to_file};
use cf_predict::predict::predict_for_input;
use cf_predict::systems::{SimpleElo, adjust_ranks};
use cf_predict::telemetry::{get_subscriber, init_subscriber};
use itertools::Itertools;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const NUM_PREVIEW_HANDLES: usize = 10;

#[derive(Debug, Default)]
struct Args {
    contest_id: Option<String>,
    handle: Option<String>,
    output: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        if arg == "--output" {
            let path = args.next().context("--output requires a file name")?;
            parsed.output = Some(path.into());
        } else if parsed.contest_id.is_none() {
            parsed.contest_id = Some(arg);
        } else if parsed.handle.is_none() {
            parsed.handle = Some(arg);
        } else {
            anyhow::bail!("Unexpected argument {}", arg);
        }
    }
    Ok(parsed)
}

fn prompt(message: &str) -> anyhow::Result<String> {
    print!("{} ", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed stdin read")?;
    Ok(line.trim().to_owned())
}

fn run(args: Args) -> anyhow::Result<()> {
    let configuration = get_configuration().context("Failed to read configuration")?;

    let contest_id = match args.contest_id {
        Some(id) => id,
        None => prompt("Enter the Codeforces contest ID:")?,
    };
    let contest_id: usize = contest_id
        .trim()
        .parse()
        .with_context(|| format!("Contest ID {} is not a positive integer", contest_id))?;
    let handle = match args.handle {
        Some(handle) => handle,
        None => prompt("Enter the user ID to predict:")?,
    };
    let handle = handle.trim().to_owned();

    let api = CodeforcesApi::new(&configuration.codeforces)?;
    let source: Box<dyn StandingsSource> = match configuration.cache.directory {
        Some(dir) => Box::new(api.cached(dir)),
        None => Box::new(api),
    };
    let standings = source.fetch(contest_id)?;

    println!("Contest: {}", standings.contest.name);
    if let Some(start) = standings.contest.start_time() {
        println!("Started: {}", start.format("%Y-%m-%d %H:%M UTC"));
    }
    println!("\nFirst few participants (handles):");
    println!("{}", standings.preview_handles(NUM_PREVIEW_HANDLES).join("\n"));

    let field = adjust_ranks(standings.participants);
    if let Some(path) = &args.output {
        try_write_slice_to_file(field.as_slice(), path);
    }

    match predict_for_input(&SimpleElo::default(), &field, &handle) {
        Some(prediction) => println!("{}", prediction),
        None => println!("User with ID '{}' not found in this contest.", handle),
    }
    Ok(())
}

fn main() -> ExitCode {
    let result = init_subscriber(get_subscriber("warn".into(), io::stderr))
        .and_then(|()| parse_args(std::env::args().skip(1)))
        .and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
