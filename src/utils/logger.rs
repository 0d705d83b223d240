use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "inspection_map=info";
const VERBOSE_DIRECTIVES: &str = "inspection_map=debug,info";

/// `RUST_LOG` wins over the built-in directives when set.
fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// Event lines carry the message and fields only; source locations are noise
/// for a one-shot CLI run.
fn event_layer<S>() -> fmt::Layer<S> {
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

pub fn init_cli_logger(verbose: bool) {
    let directives = if verbose {
        VERBOSE_DIRECTIVES
    } else {
        DEFAULT_DIRECTIVES
    };

    tracing_subscriber::registry()
        .with(env_filter(directives))
        .with(event_layer().compact())
        .init();
}

/// JSON lines on stdout, for runs whose logs are collected by a shipper.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_DIRECTIVES))
        .with(event_layer().json())
        .init();
}
