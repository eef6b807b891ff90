mod table;

use apportion::rpc::{calculate, JsonRPCRequest};
use apportion::{ApportionError, ApportionmentInput};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Apportion(#[from] ApportionError),
}

/// Seat allocation for one district by largest remainder.
#[derive(Parser)]
struct Opts {
    /// JSON input file, stdin when omitted
    input: Option<PathBuf>,
    /// Read a JSON-RPC `calculate` request and write a JSON-RPC response
    #[clap(long, conflicts_with = "table")]
    rpc: bool,
    /// Print a plain-text table instead of JSON
    #[clap(long)]
    table: bool,
    /// District name shown above the table
    #[clap(long)]
    district: Option<String>,
    /// Indent JSON output
    #[clap(long)]
    pretty: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("apportion=info"))
        .init();

    let opts = Opts::parse();

    if let Err(err) = run(&opts) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(opts: &Opts) -> Result<(), CliError> {
    let raw = read_input(opts.input.as_ref())?;

    if opts.rpc {
        let request: JsonRPCRequest = serde_json::from_str(&raw)?;
        let response = calculate(&request);
        if !response.is_success() {
            warn!("request {} failed", request.id());
        }
        return print_json(&response, opts.pretty);
    }

    let input: ApportionmentInput = serde_json::from_str(&raw)?;
    let apportionment = input.apportion()?;
    info!(
        "quota {}, {} seats over {} parties",
        apportionment.quota,
        apportionment.totals.total_seats,
        apportionment.results.len()
    );

    if opts.table {
        print!(
            "{}",
            table::render(&apportionment, opts.district.as_deref())
        );
        Ok(())
    } else {
        print_json(&apportionment, opts.pretty)
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String, CliError> {
    match path {
        Some(p) => Ok(fs::read_to_string(p)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let out = match pretty {
        true => serde_json::to_string_pretty(value)?,
        false => serde_json::to_string(value)?,
    };
    println!("{}", out);
    Ok(())
}
