//! Highlighter service
//!
//! The explicit context object wiring the node to a dispatcher: it owns the
//! node, subscribes its two callbacks to the image and feature streams,
//! publishes the annotated stream, and keeps the subscriptions reconciled
//! against the polled parameter surface.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{HighlighterConfig, ParameterSource};
use crate::data::StreamData;
use crate::nodes::FeatureHighlighterNode;
use crate::transport::{reconcile, Dispatcher, Resubscribe, SubscriptionHandler, SubscriptionId};
use crate::Result;

/// Poll cadence for the parameter surface
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Bridges the feature stream subscription to the accumulator callback
struct FeatureInput {
    node: Arc<FeatureHighlighterNode>,
}

impl SubscriptionHandler for FeatureInput {
    fn on_message(&self, data: StreamData) {
        match data {
            StreamData::Feature(feature) => self.node.on_feature(feature),
            other => tracing::warn!(
                data_type = other.data_type(),
                "feature stream delivered non-feature message"
            ),
        }
    }
}

/// Bridges the image stream subscription to the renderer callback and
/// publishes the annotated frame
struct FrameInput {
    node: Arc<FeatureHighlighterNode>,
    dispatcher: Arc<dyn Dispatcher>,
    output_topic: String,
}

impl SubscriptionHandler for FrameInput {
    fn on_message(&self, data: StreamData) {
        let frame = match data {
            StreamData::Video(frame) => frame,
            other => {
                tracing::warn!(
                    data_type = other.data_type(),
                    "image stream delivered non-video message"
                );
                return;
            }
        };

        match self.node.on_frame(frame) {
            Ok(annotated) => {
                if let Err(err) = self
                    .dispatcher
                    .publish(&self.output_topic, StreamData::Video(annotated))
                {
                    tracing::warn!(%err, topic = %self.output_topic, "failed to publish highlighted frame");
                }
            }
            Err(err) => tracing::warn!(%err, "failed to highlight frame"),
        }
    }
}

/// One input stream's subscription state
#[derive(Default)]
struct StreamSlot {
    topic: Option<String>,
    subscription: Option<SubscriptionId>,
}

/// Feature highlighter service
///
/// Construct with a dispatcher and parameter source, then either drive it
/// manually with `ensure_parameters` + `poll_once` (tests) or hand it a task
/// with `run` (deployments).
pub struct HighlighterService {
    config: HighlighterConfig,
    dispatcher: Arc<dyn Dispatcher>,
    params: Arc<dyn ParameterSource>,
    node: Arc<FeatureHighlighterNode>,
    image_slot: StreamSlot,
    feature_slot: StreamSlot,
}

impl HighlighterService {
    /// Create a service around a fresh highlighter node
    pub fn new(
        config: HighlighterConfig,
        dispatcher: Arc<dyn Dispatcher>,
        params: Arc<dyn ParameterSource>,
    ) -> Self {
        Self {
            config,
            dispatcher,
            params,
            node: Arc::new(FeatureHighlighterNode::new()),
            image_slot: StreamSlot::default(),
            feature_slot: StreamSlot::default(),
        }
    }

    /// Topic the annotated stream is published on
    pub fn output_topic(&self) -> String {
        self.config.output_topic()
    }

    /// Seed the source parameters and their metadata
    ///
    /// Source topics already present in the store are left alone so that
    /// externally configured values survive a restart; metadata entries are
    /// always (re)written.
    pub async fn ensure_parameters(&self) -> Result<()> {
        let defaults = [
            (self.config.image_source_key(), self.config.image_source.clone()),
            (
                self.config.feature_source_key(),
                self.config.feature_source.clone(),
            ),
        ];
        for (key, default) in defaults {
            if self.params.get_string(&key).await?.is_none() {
                self.params.set_string(&key, &default).await?;
            }
        }
        for (key, value) in self.config.parameter_metadata() {
            self.params.set_string(&key, &value).await?;
        }
        Ok(())
    }

    /// One reconciliation tick
    ///
    /// Polls the desired source topics and moves each subscription only when
    /// its topic changed.
    pub async fn poll_once(&mut self) -> Result<()> {
        let desired_image = self
            .params
            .get_string(&self.config.image_source_key())
            .await?
            .unwrap_or_else(|| self.config.image_source.clone());
        let desired_features = self
            .params
            .get_string(&self.config.feature_source_key())
            .await?
            .unwrap_or_else(|| self.config.feature_source.clone());

        if let Some(action) = reconcile(self.image_slot.topic.as_deref(), &desired_image) {
            let handler = Arc::new(FrameInput {
                node: Arc::clone(&self.node),
                dispatcher: Arc::clone(&self.dispatcher),
                output_topic: self.config.output_topic(),
            });
            Self::move_subscription(&*self.dispatcher, &mut self.image_slot, action, handler)?;
        }

        if let Some(action) = reconcile(self.feature_slot.topic.as_deref(), &desired_features) {
            let handler = Arc::new(FeatureInput {
                node: Arc::clone(&self.node),
            });
            Self::move_subscription(&*self.dispatcher, &mut self.feature_slot, action, handler)?;
        }

        Ok(())
    }

    fn move_subscription(
        dispatcher: &dyn Dispatcher,
        slot: &mut StreamSlot,
        action: Resubscribe,
        handler: Arc<dyn SubscriptionHandler>,
    ) -> Result<()> {
        // The slot records a topic only while a live subscription backs it.
        // Clearing it first means a failure below leaves the slot empty, so
        // the next tick reconciles and retries instead of treating the old
        // topic as still subscribed.
        slot.topic = None;
        if let Some(id) = slot.subscription.take() {
            dispatcher.unsubscribe(id)?;
        }
        let id = dispatcher.subscribe(&action.topic, handler)?;
        tracing::info!(topic = %action.topic, "stream subscribed");
        slot.subscription = Some(id);
        slot.topic = Some(action.topic);
        Ok(())
    }

    /// Run the service until the task is cancelled
    ///
    /// Seeds the parameters, then reconciles subscriptions at the poll
    /// cadence. Callers typically `tokio::select!` this against a shutdown
    /// signal.
    ///
    /// Only a startup failure in `ensure_parameters` returns an error. A
    /// transient parameter-store or dispatcher failure skips that tick's
    /// update and is retried on the next one; it never terminates the
    /// service.
    pub async fn run(&mut self) -> Result<()> {
        self.ensure_parameters().await?;
        let mut ticker = tokio::time::interval(POLL_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(err) = self.poll_once().await {
                tracing::warn!(%err, "subscription reconciliation failed, retrying next tick");
            }
        }
    }
}
