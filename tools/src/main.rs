use anyhow::Result;
use clap::Parser;

use nbs_tools::inspect::{inspect, InspectArgs};
use nbs_tools::rewrite::{rewrite, RewriteArgs};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
enum Cli {
    Inspect(InspectArgs),
    Rewrite(RewriteArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse_from(wild::args()) {
        Cli::Inspect(args) => inspect(&args),
        Cli::Rewrite(args) => rewrite(args),
    }
}
