use std::sync::Once;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";
const VERBOSE_LEVEL: &str = "debug";

static INIT: Once = Once::new();

/// Installs the global subscriber. `RUST_LOG` wins over `verbose`; later
/// calls are no-ops.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose { VERBOSE_LEVEL } else { DEFAULT_LEVEL };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        if tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
            .is_err()
        {
            eprintln!("toolhub: a tracing subscriber is already installed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init(false);
        init(true);
        tracing::debug!("logging initialised twice");
    }
}
