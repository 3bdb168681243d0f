use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "SCC_LOG";

/// Install the stderr subscriber. Stdout stays reserved for reports.
///
/// `SCC_LOG` wins when set; otherwise `--verbose` selects `debug`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "scc_lib=debug,scc=debug,info"
    } else {
        "info"
    }
}
