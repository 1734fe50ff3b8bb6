mod args;
mod survey;

use clap::Parser;
use log::debug;

use crate::args::Args;

fn run(args: &Args) -> survey::SurveyResult<()> {
    let settings = survey::settings_from_args(args)?;
    survey::run_report(&settings)
}

fn main() {
    let args = Args::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
    debug!("main: args: {:?}", args);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}
