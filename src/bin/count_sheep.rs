use std::io;

use anyhow::Result;
use clap::{ArgGroup, Parser};
use count_sheep::{runner, Config, DEFAULT_MAX_MULTIPLIER};

/// Starting with N, count the digits seen in i * N for i = 1, 2, 3, ...
/// until every digit 0-9 has appeared.
#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(group(ArgGroup::new("mode").required(true).args(["num", "data"])))]
struct Args {
    /// Run for multiples of this number.
    #[arg(short, long)]
    num: Option<u64>,

    /// Output the accumulated digit set for each multiple. Ignored with --data.
    #[arg(short, long)]
    verbose: bool,

    /// Process a count and then that many numbers from stdin.
    #[arg(long)]
    data: bool,

    /// Largest multiplier tried before reporting NOT FOUND.
    #[arg(
        long,
        env = "COUNT_SHEEP_MAX_MULTIPLIER",
        default_value_t = DEFAULT_MAX_MULTIPLIER,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    max_multiplier: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Silent unless RUST_LOG says otherwise
    env_logger::init();

    let config = Config::new(args.max_multiplier)?;
    let mut out = io::stdout().lock();

    if let Some(number) = args.num {
        runner::run_single(&mut out, number, args.verbose, &config)?;
    } else if args.data {
        runner::run_batch(io::stdin().lock(), &mut out, &config)?;
    }

    Ok(())
}
