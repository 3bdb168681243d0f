mod cli;
mod commands;
mod formatting;
mod logging;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_analyze, run_selectors};

fn main() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();
    logging::init(args.verbose);

    match args.command {
        Commands::Analyze {
            input,
            input_format,
            format,
            output,
            max_rules,
            fail_on,
            vars,
        } => run_analyze(
            &raw_args,
            args.config,
            args.verbose,
            input,
            input_format,
            format,
            output,
            max_rules,
            fail_on,
            vars,
        ),
        Commands::Selectors {
            selectors,
            format,
            output,
        } => run_selectors(selectors, format, output),
    }
}
