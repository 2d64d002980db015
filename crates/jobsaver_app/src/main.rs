use anyhow::Result;
use jobsaver_app::cli::{self, Invocation};
use jobsaver_app::session;
use jobsaver_logging::LogDestination;
use log::LevelFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let params = match cli::parse_args(std::env::args().skip(1))? {
        Invocation::Help => {
            print!("{}", cli::HELP);
            return Ok(());
        }
        Invocation::Run(params) => params,
    };

    let level = if params.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let destination = match &params.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    jobsaver_logging::initialize(destination, level);

    session::run(params)
}
