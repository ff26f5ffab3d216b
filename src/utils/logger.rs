use std::io::{self, Stderr};

use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Compact,
    Json,
}

pub fn init_cli_logger(verbose: bool) {
    init_logger(default_directives(verbose), LogFormat::Compact);
}

pub fn init_json_logger() {
    init_logger(default_directives(false), LogFormat::Json);
}

/// Filter used when `RUST_LOG` is unset.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "geo_location=debug,info"
    } else {
        "geo_location=info"
    }
}

fn init_logger(directives: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Compact => registry.with(stderr_layer().compact()).init(),
        LogFormat::Json => registry.with(stderr_layer().json()).init(),
    }
}

// Stdout carries command results, so logs go to stderr.
fn stderr_layer<S>() -> fmt::Layer<S, format::DefaultFields, format::Format, fn() -> Stderr>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(io::stderr as fn() -> Stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}
