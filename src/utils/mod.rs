pub mod build_info;
pub mod clock;

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "balance_core=warn";

/// Installs the global subscriber; `RUST_LOG` overrides the default level.
///
/// Logs go to stderr so listings on stdout stay clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        if std::env::var_os("RUST_LOG").is_none() {
            if let Ok(directive) = DEFAULT_DIRECTIVE.parse() {
                filter = filter.add_directive(directive);
            }
        }

        // A subscriber may already be installed by an embedding application.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
