use std::path::PathBuf;
use std::process::ExitCode;

use scc_lib::output::SCC_OUTPUT_VERSION;
use scc_lib::{specificity_report, SccOutput, SelectorsOutput};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};

/// Run the selectors command.
pub fn run_selectors(
    selectors: Vec<String>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    tracing::debug!(count = selectors.len(), "building selector report");
    let body = SccOutput::Selectors(SelectorsOutput {
        version: SCC_OUTPUT_VERSION.to_string(),
        report: specificity_report(&selectors),
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(err, format, output);
    }
    ExitCode::SUCCESS
}
