use std::io::Write;
use std::process::ExitCode;

use log::info;
use pagerank_solver::{fixed_point_residual, pagerank, DenseMatrix, Matrix};

mod args;
mod error;
mod report;
mod source;

use crate::args::{Command, MatrixSource, RunOptions};
use crate::error::{CliError, Result};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let argv: Vec<String> = std::env::args().collect();
    let appname = argv.first().map(String::as_str).unwrap_or("pagerank");

    let outcome = match args::parse_args(&argv) {
        Ok(Command::Help) => {
            print!("{}", args::help_text(appname));
            Ok(())
        }
        Ok(Command::Run(options)) => run(options),
        Err(err) => Err(CliError::from(err)),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR!! {err}");
            if err.is_usage() {
                eprint!("{}", args::help_text(appname));
            }
            ExitCode::from(err.exit_code())
        }
    }
}

/// Loads or generates the transition matrix, then solves and reports.
fn run(options: RunOptions) -> Result<()> {
    let RunOptions {
        mut config,
        source,
        dump_override,
        json,
    } = options;

    let transition: DenseMatrix = match source {
        MatrixSource::File(path) => {
            let parsed = source::read_matrix_file(&path)?;
            config.dumping_factor = dump_override.unwrap_or(parsed.dumping_factor);
            config.dims = parsed.transition.dims();
            parsed.transition
        }
        MatrixSource::Random { seed } => {
            // Reject bad dimensions before allocating anything.
            config.validate()?;
            source::generate_random(config.dims.0, seed)?
        }
    };

    info!(
        "Running PageRank: mode={:?}, dims={}x{}, iterations={}, threads={}, d={}",
        config.mode,
        config.dims.0,
        config.dims.1,
        config.iterations,
        config.threads,
        config.dumping_factor
    );
    let result = pagerank(&config, &transition)?;

    let residual = fixed_point_residual(&transition, config.dumping_factor, &result.x)?;
    info!("Fixed-point residual after {} sweeps: {:e}", result.metadata.sweeps, residual);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        report::write_json(&mut out, &config, &result)?;
    } else {
        report::write_plain(&mut out, &result.x)?;
    }
    out.flush()?;
    Ok(())
}
