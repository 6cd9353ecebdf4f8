use std::process::ExitCode;

use clap::Parser;
use labsight_lib::cli::{self, Cli};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    labsight_lib::init_tracing(cli.log_filter.as_deref());

    let status = cli::run(&cli)?;
    Ok(ExitCode::from(status))
}
