use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use scc_lib::analysis::parse_error_result;
use scc_lib::output::SCC_OUTPUT_VERSION;
use scc_lib::{
    AnalyzeOutput, ConflictDetector, InputDescriptor, RuleFileParser, RuleFormat, SccError,
    SccOutput, StylesheetParser,
};
use tracing::{debug, info, warn};

use crate::cli::{FailOnArg, InputFormat, OutputFormat};
use crate::formatting::{exit_code_for_analyze, render_error, write_output};
use crate::settings::{
    format_effective_config, load_config, resolve_analyze_settings, AnalyzeFlagSources,
};

const STDIN_MARKER: &str = "-";

/// Run the analyze command.
#[allow(clippy::too_many_arguments)]
pub fn run_analyze(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    input: String,
    input_format: Option<InputFormat>,
    format: OutputFormat,
    output: Option<PathBuf>,
    max_rules: usize,
    fail_on: FailOnArg,
    vars: Vec<String>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output.clone()),
    };
    let flag_sources = AnalyzeFlagSources::from_args(raw_args);
    let settings =
        match resolve_analyze_settings(max_rules, fail_on.into(), &vars, &config, &flag_sources) {
            Ok(settings) => settings,
            Err(err) => return render_error(err, format, output.clone()),
        };
    if verbose {
        info!("{}", format_effective_config(&settings, config_path.as_deref()));
    }

    let rule_format = match resolve_rule_format(&input, input_format) {
        Ok(rule_format) => rule_format,
        Err(err) => return render_error(err, format, output.clone()),
    };
    let source = match read_input(&input) {
        Ok(source) => source,
        Err(err) => return render_error(err, format, output.clone()),
    };
    debug!(input = %input, bytes = source.len(), format = ?rule_format, "read rule dump");

    let parser = RuleFileParser::new(rule_format);
    let (result, rule_count) = match parser.parse(&source, &settings.variables) {
        Ok(rules) => {
            if rules.len() > settings.max_rules {
                let err = SccError::InputTooLarge {
                    rules: rules.len(),
                    limit: settings.max_rules,
                };
                return render_error(err, format, output.clone());
            }
            (ConflictDetector::new().analyze_rules(&rules), rules.len())
        }
        Err(err) => {
            warn!(kind = ?err.kind(), error = %err, "stylesheet parsing failed");
            (parse_error_result(&err), 0)
        }
    };

    let passed = settings.fail_on.passes(&result);
    let summary = result.summary();
    debug!(passed, summary = ?summary, "analysis finished");

    let body = SccOutput::Analyze(AnalyzeOutput {
        version: SCC_OUTPUT_VERSION.to_string(),
        input: InputDescriptor {
            path: input,
            format: format_name(rule_format).to_string(),
            rules: rule_count,
        },
        passed,
        summary,
        result,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(err, format, output);
    }
    exit_code_for_analyze(passed)
}

/// Explicit flag first, then the file extension; stdin defaults to JSON.
fn resolve_rule_format(input: &str, flag: Option<InputFormat>) -> Result<RuleFormat, SccError> {
    if let Some(flag) = flag {
        return Ok(flag.into());
    }
    if input == STDIN_MARKER {
        return Ok(RuleFormat::Json);
    }
    RuleFormat::from_path(Path::new(input)).ok_or_else(|| {
        SccError::config(format!(
            "Cannot infer input format from the extension of '{input}'; pass --input-format json|yaml"
        ))
    })
}

fn read_input(input: &str) -> Result<String, SccError> {
    if input == STDIN_MARKER {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

fn format_name(format: RuleFormat) -> &'static str {
    match format {
        RuleFormat::Json => "json",
        RuleFormat::Yaml => "yaml",
    }
}
