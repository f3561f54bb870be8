//! Feature highlighter node binary
//!
//! Runs the highlighter service against the in-process dispatcher and
//! parameter store until interrupted. Deployments embedding this node in a
//! larger process swap in their own `Dispatcher` and `ParameterSource`.

use std::sync::Arc;

use feature_highlighter::config::{HighlighterConfig, InMemoryParameterSource};
use feature_highlighter::service::HighlighterService;
use feature_highlighter::transport::LocalDispatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    feature_highlighter::init()?;

    let dispatcher = Arc::new(LocalDispatcher::new());
    let params = Arc::new(InMemoryParameterSource::new());
    let config = HighlighterConfig::default();

    tracing::info!(
        node = %config.node_name,
        output = %config.output_topic(),
        "starting feature highlighter"
    );

    let mut service = HighlighterService::new(config, dispatcher, params);

    tokio::select! {
        result = service.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
        }
    }

    Ok(())
}
