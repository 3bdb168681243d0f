use clap::{Parser, Subcommand, ValueEnum};
use scc_lib::{FailOn, RuleFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scc")]
#[command(
    version,
    about = "Style Conflict Checker - Detect overlapping selectors and colliding style rules",
    long_about = "Style Conflict Checker (SCC)\n\nModes:\n- analyze: find overlapping selectors, property conflicts and specificity issues in a parsed rule dump (JSON/YAML).\n- selectors: report specificity and complexity for individual selectors.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output (debug logging on stderr)")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) to set max_rules/fail_on/variables; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a parsed rule dump for overlaps and conflicts
    Analyze {
        #[arg(help = "Rule dump to analyze (JSON or YAML); `-` reads stdin")]
        input: String,

        #[arg(
            long,
            value_enum,
            help = "Rule dump format (inferred from the file extension when omitted; stdin defaults to json)"
        )]
        input_format: Option<InputFormat>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,

        #[arg(
            long,
            default_value_t = scc_lib::config::DEFAULT_MAX_RULES,
            help = "Maximum number of rules to analyze; larger inputs are rejected"
        )]
        max_rules: usize,

        #[arg(
            long,
            value_enum,
            default_value = "conflicts",
            help = "Findings that produce a failing exit code"
        )]
        fail_on: FailOnArg,

        #[arg(
            long = "var",
            value_name = "NAME=VALUE",
            help = "Stylesheet variable for `$NAME` substitution (repeatable; overrides config)"
        )]
        vars: Vec<String>,
    },

    /// Report specificity and complexity for selectors
    Selectors {
        #[arg(required = true, help = "Selectors to analyze")]
        selectors: Vec<String>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl From<InputFormat> for RuleFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Json => RuleFormat::Json,
            InputFormat::Yaml => RuleFormat::Yaml,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailOnArg {
    Conflicts,
    Issues,
    Never,
}

impl From<FailOnArg> for FailOn {
    fn from(arg: FailOnArg) -> Self {
        match arg {
            FailOnArg::Conflicts => FailOn::Conflicts,
            FailOnArg::Issues => FailOn::Issues,
            FailOnArg::Never => FailOn::Never,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
