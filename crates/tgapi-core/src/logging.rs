//! Process-wide `tracing` subscriber for binaries built on this client.
//!
//! The library itself only emits events (one `debug` per request, `warn` on
//! failures); installing a subscriber is left to the embedding process.

use crate::Result;

/// Filter directives applied when `RUST_LOG` is unset: the client crates and
/// the calling service at `info`, dependencies at `warn`.
pub fn default_directives(service_name: &str) -> String {
    format!("warn,tgapi_core=info,tgapi_http=info,{service_name}=info")
}

/// Install a compact fmt subscriber. Only the first call in a process wins;
/// later calls return [`Error::Config`](crate::errors::Error::Config).
#[cfg(feature = "subscriber")]
pub fn init(service_name: &str) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(service_name)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
        .map_err(|e| {
            crate::errors::Error::Config(format!("cannot install tracing subscriber: {e}"))
        })
}

/// Built without the `subscriber` feature: the embedder owns the subscriber.
#[cfg(not(feature = "subscriber"))]
pub fn init(_service_name: &str) -> Result<()> {
    Ok(())
}
