use std::io::BufRead;
use std::process::ExitCode;

use owo_colors::OwoColorize;
use pushdown::prelude::*;

use tracing::{debug, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgMatches, Command};

const SAMPLES: [&str; 8] = [
    "aabxcaa",
    "aabbxyyccaa",
    "aaabxyyycaaa",
    "abxcaa",
    "aabxca",
    "aaxcaa",
    "aabbxcaa",
    "aabxyzcaa",
];

fn cli() -> clap::Command {
    Command::new("pdarun")
    .about("Runs the pushdown automaton for a^n b^m x y^p c^m a^n (n >= 2, m >= 1)")
    .subcommand_required(true)
    .arg(
        Arg::new("verbosity")
        .short('v')
        .long("verbosity")
        .num_args(0..=1)
        .require_equals(true)
        .value_parser(["info", "debug", "trace"])
        .default_missing_value("info")
    )
    .subcommand(
        Command::new("run")
        .about("runs the automaton on INPUT to completion and prints the trace")
        .arg(Arg::new("input").required(true))
    )
    .subcommand(
        Command::new("step")
        .about("steps through INPUT one transition per line read from stdin, `q` quits")
        .arg(Arg::new("input").required(true))
    )
    .subcommand(
        Command::new("table")
        .about("prints the transition table")
    )
    .subcommand(
        Command::new("samples")
        .about("runs a gallery of sample inputs")
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

fn verdict(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Accepted => "ACCEPTED".green().bold().to_string(),
        RunOutcome::Rejected(rejection) => {
            format!("{} ({})", "REJECTED".red().bold(), rejection)
        }
    }
}

fn exit_code(outcome: &RunOutcome) -> ExitCode {
    if outcome.is_accepted() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn load(pda: &mut Pda, input: &str) -> Result<(), ExitCode> {
    pda.load_input(input).map_err(|e| {
        eprintln!("{} {e}", "error:".red().bold());
        ExitCode::from(2)
    })
}

fn run(input: &str) -> ExitCode {
    let mut pda = Pda::new();
    if let Err(code) = load(&mut pda, input) {
        return code;
    }
    let outcome = pda.run_to_completion();
    println!("{}", pda.trace().to_table());
    println!("{}", verdict(&outcome));
    exit_code(&outcome)
}

fn step(input: &str) -> ExitCode {
    let mut pda = Pda::new();
    if let Err(code) = load(&mut pda, input) {
        return code;
    }
    if let Some(initial) = pda.trace().last() {
        println!("{}", initial.show());
    }

    let mut lines = std::io::stdin().lock().lines();
    loop {
        match lines.next() {
            Some(Ok(line)) if line.trim() == "q" => {
                debug!("stepping aborted by user");
                return ExitCode::from(1);
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                eprintln!("{} {e}", "error:".red().bold());
                return ExitCode::from(2);
            }
            None => {
                debug!("stdin closed, running to completion");
                let outcome = pda.run_to_completion();
                println!("{}", verdict(&outcome));
                return exit_code(&outcome);
            }
        }

        let result = pda.step();
        if let Some(entry) = pda.trace().last() {
            if matches!(result, StepResult::Advanced) || entry.state() == State::Qf {
                println!("{}", entry.show().bold());
            }
        }
        println!("    stack: {}", pda.stack().show().cyan());
        if let StepResult::Halted(outcome) = result {
            println!("{}", verdict(&outcome));
            return exit_code(&outcome);
        }
    }
}

fn samples() -> ExitCode {
    for sample in SAMPLES {
        match Pda::recognize(sample) {
            Ok(outcome) => println!("{:<14} {}", sample, verdict(&outcome)),
            Err(e) => println!("{:<14} {} ({e})", sample, "INVALID".yellow().bold()),
        }
    }
    ExitCode::SUCCESS
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    match matches.subcommand() {
        Some(("run", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .map(String::as_str)
                .unwrap_or_default();
            run(input)
        }
        Some(("step", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .map(String::as_str)
                .unwrap_or_default();
            step(input)
        }
        Some(("table", _)) => {
            println!("{}", pushdown::transition::transition_table());
            ExitCode::SUCCESS
        }
        Some(("samples", _)) => samples(),
        _ => unreachable!(),
    }
}
