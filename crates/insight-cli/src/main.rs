use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use insight_cli::{load_config, parse_now, run_check, run_keywords, run_report, ConfigOverrides};
use insight_engine::TimeRange;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let input = Arg::new("input")
        .long("input")
        .short('i')
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON export of story rows");
    let config = Arg::new("config")
        .long("config")
        .value_parser(value_parser!(PathBuf))
        .help("TOML configuration file");
    let json = Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON");

    Command::new("story-insights")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Community insights over exported story records")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("report")
                .about("Compose an insights report for each input")
                .arg(input.clone().action(ArgAction::Append))
                .arg(config.clone())
                .arg(json.clone())
                .arg(
                    Arg::new("now")
                        .long("now")
                        .help("Reference instant (RFC 3339), defaults to the current time"),
                )
                .arg(
                    Arg::new("trailing-months")
                        .long("trailing-months")
                        .value_parser(value_parser!(u32))
                        .help("Months in the trend window"),
                )
                .arg(
                    Arg::new("range")
                        .long("range")
                        .value_parser(value_parser!(TimeRange))
                        .help("Reporting period: all, year, quarter or month"),
                ),
        )
        .subcommand(
            Command::new("keywords")
                .about("Extract the most frequent keywords")
                .arg(input.clone())
                .arg(config)
                .arg(json)
                .arg(
                    Arg::new("top")
                        .long("top")
                        .value_parser(value_parser!(usize))
                        .help("Number of keywords to keep"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate an input and report rejected rows")
                .arg(input),
        )
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(matches: &ArgMatches) -> Result<ExitCode> {
    match matches.subcommand() {
        Some(("report", args)) => {
            let overrides = ConfigOverrides {
                trailing_months: args.get_one::<u32>("trailing-months").copied(),
                time_range: args.get_one::<TimeRange>("range").copied(),
                keyword_limit: None,
            };
            let config = load_config(
                args.get_one::<PathBuf>("config").map(PathBuf::as_path),
                &overrides,
            )?;
            let now = parse_now(args.get_one::<String>("now").map(String::as_str))?;
            let inputs: Vec<PathBuf> = args
                .get_many::<PathBuf>("input")
                .into_iter()
                .flatten()
                .cloned()
                .collect();

            tracing::info!(inputs = inputs.len(), %now, "composing reports");
            println!("{}", run_report(&inputs, &config, now, args.get_flag("json"))?);
            Ok(ExitCode::SUCCESS)
        }
        Some(("keywords", args)) => {
            let overrides = ConfigOverrides {
                keyword_limit: args.get_one::<usize>("top").copied(),
                ..ConfigOverrides::default()
            };
            let config = load_config(
                args.get_one::<PathBuf>("config").map(PathBuf::as_path),
                &overrides,
            )?;
            let Some(input) = args.get_one::<PathBuf>("input") else {
                anyhow::bail!("--input is required");
            };
            print!("{}", run_keywords(input, &config, args.get_flag("json"))?);
            Ok(ExitCode::SUCCESS)
        }
        Some(("check", args)) => {
            let Some(input) = args.get_one::<PathBuf>("input") else {
                anyhow::bail!("--input is required");
            };
            let outcome = run_check(input)?;
            print!("{}", outcome.summary);
            Ok(if outcome.passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        _ => Ok(ExitCode::SUCCESS),
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    match run(&matches) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
