use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser;
use miette::Result;
use ripper::cli::{rip, Cli, Commands};
use ripper::output::Printer;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rip(args) => {
            let printer = Printer::new().with_verbose(args.verbose);
            let interrupt = Arc::new(AtomicBool::new(false));

            let flag = Arc::clone(&interrupt);
            let handler = move || {
                if rip::note_interrupt(&flag) {
                    std::process::exit(rip::ABORT_EXIT_CODE);
                }
            };
            if let Err(e) = ctrlc::set_handler(handler) {
                log::warn!("could not install interrupt handler: {}", e);
            }

            rip::run(args, &printer, interrupt)?;
        }
        Commands::Completions(args) => ripper::cli::completions::run(args)?,
    }

    Ok(())
}
