//! Command-line parsing.
//!
//! The grammar is `<app> <COMMAND> [(<OPTION> <VALUE>).. | <FLAG>..]` with the
//! commands `help` and `run`. Flags use the single-dash `-f<name>` form, which
//! is why this is parsed by hand instead of through a derive-based parser.

use std::path::PathBuf;

use pagerank_solver::{ConfigError, ExecutionMode, PageRankConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgId {
    Iterations,
    Dims,
    Jobs,
    Dump,
    Read,
    Seed,
    Serial,
    Parallel,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgKind {
    /// Takes the next parameter as its value.
    Option,
    Flag,
}

struct Argument {
    long_name: &'static str,
    short_name: &'static str,
    id: ArgId,
    kind: ArgKind,
}

const ARGUMENTS: &[Argument] = &[
    Argument { long_name: "--iter", short_name: "-i", id: ArgId::Iterations, kind: ArgKind::Option },
    Argument { long_name: "--dims", short_name: "-d", id: ArgId::Dims, kind: ArgKind::Option },
    Argument { long_name: "--jobs", short_name: "-j", id: ArgId::Jobs, kind: ArgKind::Option },
    Argument { long_name: "--dump", short_name: "-D", id: ArgId::Dump, kind: ArgKind::Option },
    Argument { long_name: "--read", short_name: "-r", id: ArgId::Read, kind: ArgKind::Option },
    Argument { long_name: "--seed", short_name: "-S", id: ArgId::Seed, kind: ArgKind::Option },
    Argument { long_name: "-fserial", short_name: "-fs", id: ArgId::Serial, kind: ArgKind::Flag },
    Argument { long_name: "-fparallel", short_name: "-fp", id: ArgId::Parallel, kind: ArgKind::Flag },
    Argument { long_name: "-fjson", short_name: "-fJ", id: ArgId::Json, kind: ArgKind::Flag },
];

/// Where the transition matrix comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixSource {
    /// Uniform [0, 1) entries; entropy-seeded unless a seed is given.
    Random { seed: Option<u64> },
    /// Text file: dumping factor on the first line, one row per following line.
    File(PathBuf),
}

/// Everything the `run` command needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub config: PageRankConfig,
    pub source: MatrixSource,
    /// Set when `--dump` was given explicitly; overrides a file's value.
    pub dump_override: Option<f64>,
    pub json: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: PageRankConfig::default(),
            source: MatrixSource::Random { seed: None },
            dump_override: None,
            json: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Run(RunOptions),
}

/// Parses the full argument list, including the program name at index 0.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Command, ConfigError> {
    let Some(command) = args.get(1) else {
        return Ok(Command::Help);
    };
    match command.as_ref() {
        "help" => Ok(Command::Help),
        "run" => parse_run_options(&args[2..]).map(Command::Run),
        other => Err(ConfigError::WrongCommand(other.to_string())),
    }
}

fn lookup(param: &str) -> Option<&'static Argument> {
    ARGUMENTS
        .iter()
        .find(|arg| param == arg.long_name || param == arg.short_name)
}

fn parse_run_options<S: AsRef<str>>(params: &[S]) -> Result<RunOptions, ConfigError> {
    let mut options = RunOptions::default();
    let mut seed = None;
    let mut path = None;

    let mut i = 0;
    while i < params.len() {
        let param = params[i].as_ref();
        let arg = lookup(param).ok_or_else(|| ConfigError::WrongOption(param.to_string()))?;

        let value = match arg.kind {
            ArgKind::Flag => "",
            ArgKind::Option => {
                i += 1;
                params
                    .get(i)
                    .map(|value| value.as_ref())
                    .ok_or_else(|| ConfigError::NoValue(param.to_string()))?
            }
        };

        match arg.id {
            ArgId::Iterations => options.config.iterations = parse_number(value)?,
            ArgId::Jobs => options.config.threads = parse_number(value)?,
            ArgId::Dims => {
                let (rows, cols) = parse_dims(value)?;
                options.config.dims = (rows, cols);
            }
            ArgId::Dump => {
                let dump = parse_number(value)?;
                options.config.dumping_factor = dump;
                options.dump_override = Some(dump);
            }
            ArgId::Read => path = Some(PathBuf::from(value)),
            ArgId::Seed => seed = Some(parse_number(value)?),
            ArgId::Serial => options.config.mode = ExecutionMode::Serial,
            ArgId::Parallel => options.config.mode = ExecutionMode::Parallel,
            ArgId::Json => options.json = true,
        }
        i += 1;
    }

    options.source = match path {
        Some(path) => MatrixSource::File(path),
        None => MatrixSource::Random { seed },
    };
    Ok(options)
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::BadValue(value.to_string()))
}

/// Parses the `RxC` form, e.g. `100x100`.
fn parse_dims(value: &str) -> Result<(usize, usize), ConfigError> {
    let (rows, cols) = value
        .split_once('x')
        .ok_or_else(|| ConfigError::BadValue(value.to_string()))?;
    Ok((
        parse_number(rows).map_err(|_| ConfigError::BadValue(value.to_string()))?,
        parse_number(cols).map_err(|_| ConfigError::BadValue(value.to_string()))?,
    ))
}

/// Usage text shown by `help` and after a command-line error.
pub fn help_text(appname: &str) -> String {
    format!(
        r#"Serial and parallel PageRank by power iteration
USAGE: {appname} <COMMAND> [(<OPTION> <VALUE>).. | <FLAG>..]

--- AVAILABLE COMMANDS ---
help: Print this message
run: Execute PageRank

--- AVAILABLE OPTIONS ---
-> run
  * --iter <number> | -i <number> : The amount of iterations to run the algorithm for
  * --dims <number>x<number> | -d <number>x<number> : The dimensions of the matrix to generate
  * --jobs <number> | -j <number> : The amount of threads to run the algorithm on
  * --dump <number> | -D <number> : The dumping factor to use. Has to be between 0 and 1 (exclusive)
  * --read <path> | -r <path> : Read the dumping factor and the transition matrix from a file
  * --seed <number> | -S <number> : Seed for the generated matrix

--- AVAILABLE FLAGS ---
-> run
  * -fserial | -fs : Run the serial execution
  * -fparallel | -fp : Run the parallel execution
  * -fjson | -fJ : Print the result as JSON
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, ConfigError> {
        let mut full = vec!["pagerank"];
        full.extend_from_slice(args);
        parse_args(&full)
    }

    fn run_options(args: &[&str]) -> RunOptions {
        match parse(args) {
            Ok(Command::Run(options)) => options,
            other => panic!("expected run options, got {:?}", other),
        }
    }

    #[test]
    fn test_no_command_is_help() {
        assert_eq!(parse(&[]), Ok(Command::Help));
        assert_eq!(parse(&["help"]), Ok(Command::Help));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse(&["walk"]),
            Err(ConfigError::WrongCommand("walk".to_string()))
        );
    }

    #[test]
    fn test_run_defaults() {
        let options = run_options(&["run"]);
        assert_eq!(options, RunOptions::default());
    }

    #[test]
    fn test_run_with_all_options() {
        let options = run_options(&[
            "run", "--iter", "50", "-d", "8x8", "-j", "4", "--dump", "0.85", "-fp", "-S", "11",
            "-fJ",
        ]);
        assert_eq!(options.config.iterations, 50);
        assert_eq!(options.config.dims, (8, 8));
        assert_eq!(options.config.threads, 4);
        assert_eq!(options.config.dumping_factor, 0.85);
        assert_eq!(options.dump_override, Some(0.85));
        assert_eq!(options.config.mode, ExecutionMode::Parallel);
        assert_eq!(options.source, MatrixSource::Random { seed: Some(11) });
        assert!(options.json);
    }

    #[test]
    fn test_last_mode_flag_wins() {
        let options = run_options(&["run", "-fparallel", "-fserial"]);
        assert_eq!(options.config.mode, ExecutionMode::Serial);
    }

    #[test]
    fn test_read_option_selects_file_source() {
        let options = run_options(&["run", "-r", "data/matrix.txt"]);
        assert_eq!(
            options.source,
            MatrixSource::File(PathBuf::from("data/matrix.txt"))
        );
        assert_eq!(options.dump_override, None);
    }

    #[test]
    fn test_unknown_option() {
        assert_eq!(
            parse(&["run", "--fast"]),
            Err(ConfigError::WrongOption("--fast".to_string()))
        );
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            parse(&["run", "-i", "5", "--jobs"]),
            Err(ConfigError::NoValue("--jobs".to_string()))
        );
    }

    #[test]
    fn test_bad_values() {
        for (option, value) in [
            ("--iter", "ten"),
            ("--iter", "-3"),
            ("--jobs", "1.5"),
            ("--dump", "half"),
            ("--dims", "10"),
            ("--dims", "10xten"),
            ("--seed", "abc"),
        ] {
            assert_eq!(
                parse(&["run", option, value]),
                Err(ConfigError::BadValue(value.to_string())),
                "{} {}",
                option,
                value
            );
        }
    }

    #[test]
    fn test_out_of_range_dump_is_parsed_but_not_validated_here() {
        let options = run_options(&["run", "-D", "1.5"]);
        assert_eq!(options.config.dumping_factor, 1.5);
        assert!(matches!(
            options.config.validate(),
            Err(ConfigError::BadDumpingFactor(_))
        ));
    }

    #[test]
    fn test_help_text_mentions_every_argument() {
        let text = help_text("pagerank");
        for arg in ARGUMENTS {
            assert!(text.contains(arg.long_name), "{}", arg.long_name);
            assert!(text.contains(arg.short_name), "{}", arg.short_name);
        }
    }
}
