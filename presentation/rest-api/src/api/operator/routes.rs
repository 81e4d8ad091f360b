use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, BoxStream, StreamExt};
use notifier::BroadcastOrderNotifier;
use poem_openapi::{OpenApi, payload::EventStream};
use tokio::sync::broadcast::error::RecvError;

use crate::api::operator::dto::OrderPlacedResponse;
use crate::api::security::OperatorKey;
use crate::api::tags::ApiTags;

const KEEP_ALIVE: Duration = Duration::from_secs(15);

pub struct OperatorApi {
    notifier: Arc<BroadcastOrderNotifier>,
}

impl OperatorApi {
    pub fn new(notifier: Arc<BroadcastOrderNotifier>) -> Self {
        Self { notifier }
    }
}

/// Restaurant operators
#[OpenApi]
impl OperatorApi {
    /// New order stream
    ///
    /// Server-sent events, one per placed order, starting from the moment of
    /// connection. Requires the `x-api-key` header; disabled when the service
    /// has no operator key configured.
    #[oai(
        path = "/operator/orders/stream",
        method = "get",
        tag = "ApiTags::Operator"
    )]
    async fn order_stream(
        &self,
        _auth: OperatorKey,
    ) -> EventStream<BoxStream<'static, OrderPlacedResponse>> {
        let receiver = self.notifier.subscribe();

        let events = stream::unfold(receiver, |mut receiver| async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => return Some((OrderPlacedResponse::from(event), receiver)),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Operator stream lagging, events skipped");
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        });

        EventStream::new(events.boxed()).keep_alive(KEEP_ALIVE)
    }
}
