use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::warn;

mod bag;
mod bench;
mod checker;
mod config;
mod error;
mod report;
mod requirements;

use config::CheckConfig;
use requirements::RateRange;

#[derive(Parser, Debug)]
#[command(name = "rosbag-checker")]
#[command(about = "Check the contents of a rosbag against topic and frequency requirements")]
#[command(version)]
struct Args {
    /// Path to the rosbag file (.db3 or .mcap)
    #[arg(long)]
    bag_file: PathBuf,

    /// Path to a YAML file listing topics and optional frequency requirements
    #[arg(long)]
    topic_list: Option<PathBuf>,

    /// Topic name or regular expression to check (used when --topic-list is absent)
    #[arg(long)]
    topics: Option<String>,

    /// Whether to check frequency requirements
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    check_frequency: bool,

    /// Default frequency requirements for entries without an hz_range
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], default_values_t = [-1.0, f64::MAX])]
    default_frequency_requirements: Vec<f64>,

    /// Run the check repeatedly and report the average latency
    #[arg(long)]
    time_check_bag: bool,

    /// Number of runs for the speed test
    #[arg(long, default_value_t = 1000)]
    num_runs: u32,

    /// Print the report as JSON instead of colored text
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // logs go to stderr so the report (and --json output) stays pipeable
    let level = args.log_level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let default_range = RateRange::new(
        args.default_frequency_requirements[0],
        args.default_frequency_requirements[1],
    )?;
    let config = CheckConfig::resolve(
        args.bag_file,
        args.topic_list,
        args.topics,
        args.check_frequency,
        default_range,
    )?;

    if args.time_check_bag {
        bench::time_check_bag(&config, args.num_runs)?;
    } else {
        let report = checker::check_bag(&config)?;
        if !report.all_healthy() {
            warn!("one or more topics failed their checks");
        }
        if args.json {
            println!("{}", report.to_json()?);
        } else {
            println!("Results: \n{}", report.render());
        }
    }

    Ok(())
}
