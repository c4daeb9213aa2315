use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Initialize logging.  If you set the environment variable `RUST_LOG` to a
/// non-empty value, we interpret it as an `EnvFilter` and enable compact
/// logging; an empty or absent value leaves logging off.  (Shell wrappers
/// frequently export RUST_LOG unconditionally but empty, and we don't want
/// that to be interpreted as a desire to enable logging.)
pub fn init_logging() {
    if let Ok(rustlog) = std::env::var("RUST_LOG") {
        if !rustlog.is_empty() {
            if let Ok(env_filter) = EnvFilter::try_from_default_env() {
                tracing_subscriber::fmt()
                    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
                    .compact()
                    // This mostly ends up in logs that get excerpted for
                    // email, so ANSI isn't helpful.
                    .with_ansi(false)
                    .without_time()
                    .with_env_filter(env_filter)
                    .init();
            }
        }
    }
}
