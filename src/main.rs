use clap::{App, Arg};
use lc3::{Config, TerminalGuard};
use std::process;

fn main() {
    process::exit(run());
}

/// Parses arguments, loads images, and drives the machine to completion, returning the
/// process exit code. Kept separate from `main` so the `TerminalGuard` acquired here is
/// dropped (and the terminal restored) by ordinary scope exit before `process::exit` runs,
/// since `process::exit` itself skips destructors.
fn run() -> i32 {
    let matches = App::new("LC-3 VM")
        .arg(
            Arg::with_name("IMAGE")
                .help("LC-3 image file(s) to load, in order.")
                .multiple(true)
                .index(1),
        )
        .get_matches();

    let images = matches
        .values_of("IMAGE")
        .map(|values| values.map(String::from).collect())
        .unwrap_or_else(Vec::new);

    let config = match Config::new(images) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return 2;
        }
    };

    let guard = match TerminalGuard::acquire() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("failed to configure terminal: {}", e);
            return 1;
        }
    };

    if lc3::install_interrupt_handler(guard.original()).is_err() {
        eprintln!("failed to install interrupt handler");
    }

    match lc3::run(config) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}
