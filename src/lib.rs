//! Project Aon gamebook pages → structured book JSON, plus a consistency
//! checker for the JSON it writes.

pub mod model;
pub mod parser;
pub mod settings;
pub mod validate;

/// Install the `tracing` subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
