use std::process::ExitCode;

use dfamin::prelude::*;

use tracing::{debug, error, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{value_parser, Arg, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("dfamin")
        .about("Reads deterministic finite automata from comma separated files and prints their minimal equivalent")
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("max-states")
                .long("max-states")
                .help("exclusive upper bound on state ids")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(["text", "dot"])
                .default_value("text"),
        )
        .arg(
            Arg::new("files")
                .help("automaton descriptions, processed in the given order")
                .num_args(1..)
                .required(true),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    let limits = Limits::new(
        matches
            .get_one::<usize>("max-states")
            .copied()
            .unwrap_or(DEFAULT_MAX_STATES),
    );
    let dot = matches.get_one::<String>("format").map(|f| f.as_str()) == Some("dot");

    for path in matches.get_many::<String>("files").into_iter().flatten() {
        info!("processing file {path}");

        let dfa = match read_dfa(path, limits) {
            Ok(dfa) => dfa,
            Err(e) => {
                error!("could not load {path}");
                eprintln!("{path}: {e}");
                return ExitCode::FAILURE;
            }
        };
        debug!("read automaton\n{:?}", dfa);

        let start = std::time::Instant::now();
        let minimization = minimize(&dfa);
        info!(
            "minimization took {}µs, {} states remain",
            start.elapsed().as_micros(),
            minimization.dfa().size()
        );

        println!("***** {path} *****");
        if dot {
            println!("{}", minimization.dfa().dot_representation());
        } else {
            print!("{}", Report::new(&minimization));
        }
    }

    ExitCode::SUCCESS
}
