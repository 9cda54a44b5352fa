use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tsbench_report::{cli::PlotsCli, generate_plots, logging};

fn main() -> ExitCode {
    let cli = PlotsCli::parse();
    logging::init(cli.input.verbose);

    match generate_plots(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}
