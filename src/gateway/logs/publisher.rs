use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;
use crate::core::events::{DomainEvent, EventStream};
use crate::core::library::LibraryResult;
use crate::gateway::events::EventPublisher;

#[derive(Debug, Default)]
pub struct LogsPublisher {
    events: RwLock<Vec<DomainEvent>>,
}

impl LogsPublisher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventPublisher for LogsPublisher {
    async fn publish(&self, event: &DomainEvent) -> LibraryResult<()> {
        info!(event_id = %event.event_id, name = %event.name, stream = ?event.stream, key = %event.key,
            data = %event.json_data, "published event");
        self.events.write().await.push(event.clone());
        Ok(())
    }

    async fn published(&self, stream: EventStream) -> LibraryResult<Vec<DomainEvent>> {
        Ok(self.events.read().await.iter()
            .filter(|event| event.stream == stream)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardPublisher;

#[async_trait]
impl EventPublisher for DiscardPublisher {
    async fn publish(&self, _event: &DomainEvent) -> LibraryResult<()> {
        Ok(())
    }

    async fn published(&self, _stream: EventStream) -> LibraryResult<Vec<DomainEvent>> {
        Ok(vec![])
    }
}

#[cfg(test)]
mod tests {
    use crate::core::events::{DomainEvent, EventStream};
    use crate::gateway::events::EventPublisher;
    use crate::gateway::logs::publisher::LogsPublisher;

    #[tokio::test]
    async fn test_should_keep_events_per_stream() {
        let publisher = LogsPublisher::new();
        publisher.publish(&DomainEvent::book("book_duplicate_hold_found", "book", &1).expect("build event"))
            .await.expect("should publish");
        publisher.publish(&DomainEvent::patron("book_hold_failed", "patron", &2).expect("build event"))
            .await.expect("should publish");
        publisher.publish(&DomainEvent::patron("book_placed_on_hold", "patron", &3).expect("build event"))
            .await.expect("should publish");

        let book_events = publisher.published(EventStream::Book).await.expect("should list");
        assert_eq!(1, book_events.len());
        let patron_events = publisher.published(EventStream::Patron).await.expect("should list");
        let names: Vec<&str> = patron_events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(vec!["book_hold_failed", "book_placed_on_hold"], names);
    }
}
