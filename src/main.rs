//! Command-line runner: load a CSV file, then read semicolon-separated
//! SELECT statements from stdin and print each result.

use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tabsql::{csv, execute_batch};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Parser)]
#[command(name = "tabsql", about = "Run SQL-subset queries against a CSV file")]
struct Args {
    /// CSV file to query. The first line is the header.
    file: PathBuf,

    /// Output format for query results.
    #[arg(long, value_enum, default_value = "csv")]
    format: Format,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let input = match std::fs::read_to_string(&args.file) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("error: can't read {}: {err}", args.file.display());
            return ExitCode::FAILURE;
        }
    };
    let table = match csv::parse_csv(&input) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut statements = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut statements) {
        eprintln!("error: can't read stdin: {err}");
        return ExitCode::FAILURE;
    }

    for (statement, result) in execute_batch(&table, &statements) {
        match result {
            Ok(result) if result.rows().is_empty() => {}
            Ok(result) => match args.format {
                Format::Csv => print!("{}", csv::format_csv(&result)),
                Format::Json => match serde_json::to_string_pretty(&result) {
                    Ok(json) => println!("{json}"),
                    Err(err) => eprintln!("error: {err}"),
                },
            },
            Err(err) => eprintln!("error in {statement:?}: {err}"),
        }
    }
    ExitCode::SUCCESS
}
