use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output shape of the log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable, with file and line of each event.
    Pretty,
    /// One JSON object per line for log shipping.
    Json,
}

impl LogFormat {
    /// `HAMSAFAR_ENV=production` switches to JSON; anything else stays pretty.
    pub fn from_env() -> Self {
        Self::for_environment(std::env::var("HAMSAFAR_ENV").ok().as_deref())
    }

    fn for_environment(env: Option<&str>) -> Self {
        match env {
            Some("production") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Default directive: `info` everywhere, `debug` for the calling crate.
fn default_directive(service_name: &str) -> String {
    format!("info,{}=debug", service_name.replace('-', "_"))
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
///
/// Calling it again once a subscriber is installed is a no-op.
pub fn init_tracing(service_name: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(service_name)));
    let format = LogFormat::from_env();

    let installed = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(false),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
    };

    if installed.is_ok() {
        tracing::info!(service = service_name, ?format, "tracing initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_production_logs_json() {
        assert_eq!(LogFormat::for_environment(Some("production")), LogFormat::Json);
        assert_eq!(LogFormat::for_environment(Some("staging")), LogFormat::Pretty);
        assert_eq!(LogFormat::for_environment(None), LogFormat::Pretty);
    }

    #[test]
    fn default_directive_targets_crate_name() {
        assert_eq!(default_directive("hamsafar-data"), "info,hamsafar_data=debug");
    }

    #[test]
    fn repeated_init_does_not_panic() {
        init_tracing("hamsafar-test");
        init_tracing("hamsafar-test");
    }
}
