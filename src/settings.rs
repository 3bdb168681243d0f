use std::path::Path;

use scc_lib::{Config, FailOn, SccError, Variables};

/// Tracks which CLI flags were explicitly provided vs. defaulted.
#[derive(Debug, Default)]
pub struct AnalyzeFlagSources {
    pub max_rules: bool,
    pub fail_on: bool,
}

impl AnalyzeFlagSources {
    pub fn from_args(args: &[String]) -> Self {
        Self {
            max_rules: flag_present(args, "--max-rules"),
            fail_on: flag_present(args, "--fail-on"),
        }
    }
}

/// Checks if a flag was present in the command-line arguments.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// Resolved settings after merging CLI args and config file.
#[derive(Debug, Clone)]
pub struct ResolvedAnalyzeSettings {
    pub max_rules: usize,
    pub fail_on: FailOn,
    pub variables: Variables,
}

/// Merge CLI arguments with config file, preferring CLI when flags are present.
/// `--var` entries are layered over the config's `[variables]` table.
pub fn resolve_analyze_settings(
    cli_max_rules: usize,
    cli_fail_on: FailOn,
    cli_vars: &[String],
    config: &Config,
    flags: &AnalyzeFlagSources,
) -> Result<ResolvedAnalyzeSettings, SccError> {
    let mut variables = config.variables.clone();
    for raw in cli_vars {
        let (name, value) = parse_var(raw)?;
        variables.insert(name, value);
    }

    let max_rules = if flags.max_rules {
        cli_max_rules
    } else {
        config.max_rules
    };
    if max_rules == 0 {
        return Err(SccError::config("--max-rules must be greater than zero"));
    }

    Ok(ResolvedAnalyzeSettings {
        max_rules,
        fail_on: if flags.fail_on {
            cli_fail_on
        } else {
            config.fail_on
        },
        variables,
    })
}

/// Split a `NAME=VALUE` pair; a leading `$` on the name is dropped.
fn parse_var(raw: &str) -> Result<(String, String), SccError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| SccError::config(format!("Invalid variable '{raw}': expected NAME=VALUE")))?;
    let name = name.trim().trim_start_matches('$');
    if name.is_empty() {
        return Err(SccError::config(format!(
            "Invalid variable '{raw}': variable name must not be empty"
        )));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/scc/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, SccError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        SccError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        SccError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Format effective settings as a single-line string.
pub fn format_effective_config(
    settings: &ResolvedAnalyzeSettings,
    config_source: Option<&Path>,
) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let names: Vec<&str> = settings.variables.keys().map(String::as_str).collect();
    format!(
        "Effective config [{source}]: max_rules={}, fail_on={:?}, variables=[{}]",
        settings.max_rules,
        settings.fail_on,
        names.join(", ")
    )
}
