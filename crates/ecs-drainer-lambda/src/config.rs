//! Environment toggles and tracing setup

use tracing_subscriber::EnvFilter;

/// Baseline filter: drainer at info, AWS SDK internals capped at warn so
/// invocation logs stay readable.
const DEFAULT_DIRECTIVES: &str =
    "info,aws_config=warn,aws_smithy_runtime=warn,aws_runtime=warn,hyper=warn";

/// Verbose filter: debug everywhere, including SDK request traces.
const VERBOSE_DIRECTIVES: &str = "debug,hyper=info";

/// Environment toggles, resolved once at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    /// Verbose diagnostics (`VERBOSE=true`, or implied by `AWS_SAM_LOCAL`).
    pub verbose: bool,
    /// Running under `sam local`; switches log output to human-readable.
    pub sam_local: bool,
}

impl Settings {
    /// Read the toggles from the process environment.
    pub fn from_env() -> Self {
        let sam_local = env_flag("AWS_SAM_LOCAL");
        Self {
            verbose: env_flag("VERBOSE") || sam_local,
            sam_local,
        }
    }
}

/// Whether an environment toggle is set.
fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| flag_enabled(&v))
}

/// A toggle is enabled only by the literal `true`.
fn flag_enabled(value: &str) -> bool {
    value == "true"
}

/// Install the process-wide tracing subscriber.
///
/// `RUST_LOG` overrides the built-in directives in either mode. Output is
/// JSON for CloudWatch, human-readable under `sam local`.
pub fn init_tracing(settings: &Settings) {
    let directives = if settings.verbose {
        VERBOSE_DIRECTIVES
    } else {
        DEFAULT_DIRECTIVES
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false);

    if settings.sam_local {
        builder.init();
    } else {
        builder.json().init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_literal_true_enables_a_flag() {
        assert!(flag_enabled("true"));
        assert!(!flag_enabled("TRUE"));
        assert!(!flag_enabled("1"));
        assert!(!flag_enabled("yes"));
        assert!(!flag_enabled(""));
    }

    #[test]
    fn settings_default_to_quiet() {
        let settings = Settings::default();
        assert!(!settings.verbose);
        assert!(!settings.sam_local);
    }
}
