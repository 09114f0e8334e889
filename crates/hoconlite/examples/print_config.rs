//! Loads a configuration file and prints it as JSON, or prints the value at a
//! dotted path.
//!
//! Run with
//!
//! ```bash
//! cargo run -p hoconlite --example print_config -- app.conf server.port
//! ```

use std::{env, process::ExitCode};

use hoconlite::{ConfigExt, Value};

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let Some(file) = args.next() else {
        eprintln!("usage: print_config <file> [dotted.path]");
        return ExitCode::FAILURE;
    };

    let config = match hoconlite::load(&file) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{file}: {err}");
            return ExitCode::FAILURE;
        }
    };

    match args.next() {
        None => println!("{}", Value::Object(config)),
        Some(path) => match config.lookup(&path) {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("{path}: not set");
                return ExitCode::FAILURE;
            }
        },
    }
    ExitCode::SUCCESS
}
