use std::sync::Arc;
use crate::gateway::events::EventPublisher;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::logs::publisher::{DiscardPublisher, LogsPublisher};

pub fn create_publisher(via: GatewayPublisherVia) -> Arc<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Logs => Arc::new(LogsPublisher::new()),
        GatewayPublisherVia::Discard => Arc::new(DiscardPublisher),
    }
}

#[cfg(test)]
mod tests {
    use crate::core::events::{DomainEvent, EventStream};
    use crate::gateway::factory::create_publisher;
    use crate::gateway::GatewayPublisherVia;

    #[tokio::test]
    async fn test_should_create_publishers() {
        let event = DomainEvent::book("name", "key", &"data").expect("build event");

        let logs = create_publisher(GatewayPublisherVia::Logs);
        logs.publish(&event).await.expect("should publish");
        assert_eq!(1, logs.published(EventStream::Book).await.expect("should list").len());

        let discard = create_publisher(GatewayPublisherVia::Discard);
        discard.publish(&event).await.expect("should publish");
        assert!(discard.published(EventStream::Book).await.expect("should list").is_empty());
    }
}
