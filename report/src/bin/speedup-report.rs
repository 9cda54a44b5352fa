use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tsbench_report::{cli::ReportCli, generate_report, logging};

fn main() -> ExitCode {
    let cli = ReportCli::parse();
    logging::init(cli.input.verbose);

    match generate_report(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}
