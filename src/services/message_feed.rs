use std::convert::Infallible;

use actix_web::web::Bytes;
use futures::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

use crate::models::domain::Message;

/// Reconnect delay advertised to SSE clients. Matches the list-endpoint
/// polling interval clients fall back to.
pub const RETRY_MS: u64 = 5000;

/// Fans new messages out to live subscribers.
#[derive(Clone)]
pub struct MessageFeed {
    tx: broadcast::Sender<Message>,
}

impl MessageFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        log::info!("Message feed initialized with capacity {}", capacity);
        Self { tx }
    }

    /// Sends to whoever is listening. Nobody listening is fine.
    pub fn publish(&self, message: Message) {
        let _ = self.tx.send(message);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Server-sent events for one conversation. Dropping the stream (client
    /// gone) unsubscribes.
    pub fn subscribe(
        &self,
        parent_id: &str,
        teacher_id: &str,
    ) -> impl Stream<Item = Result<Bytes, Infallible>> + 'static {
        let parent_id = parent_id.to_string();
        let teacher_id = teacher_id.to_string();
        let messages = BroadcastStream::new(self.tx.subscribe());

        let events = messages.filter_map(move |result| {
            let frame = match result {
                Ok(message) if message.belongs_to(&parent_id, &teacher_id) => {
                    sse_frame(&message)
                }
                Ok(_) => None,
                Err(e) => {
                    log::warn!("Message feed subscriber lagged: {:?}", e);
                    None
                }
            };
            async move { frame.map(Ok) }
        });

        let preamble = stream::once(async { Ok(Bytes::from(format!("retry: {}\n\n", RETRY_MS))) });
        preamble.chain(events)
    }
}

fn sse_frame(message: &Message) -> Option<Bytes> {
    match serde_json::to_string(message) {
        Ok(data) => Some(Bytes::from(format!("event: message\ndata: {}\n\n", data))),
        Err(e) => {
            log::error!("Failed to encode message {}: {}", message.id, e);
            None
        }
    }
}
