use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::lending::domain::book::{AvailableBook, Book, BookEvent};
use crate::lending::repository::BookRepository;
use crate::lending::value_objects::{BookId, LibraryBranchId, Version};

#[derive(Debug)]
struct BookStream {
    library_branch_id: LibraryBranchId,
    version: Version,
    events: Vec<DomainEvent>,
}

impl BookStream {
    fn decode(&self) -> LibraryResult<Vec<BookEvent>> {
        self.events.iter().map(DomainEvent::decode::<BookEvent>).collect()
    }

    fn replay(&self, book_id: BookId) -> LibraryResult<Book> {
        let events = self.decode()?;
        Book::replay(book_id, self.library_branch_id, self.version, &events)
    }
}

#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    streams: RwLock<HashMap<BookId, BookStream>>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn create(&self, book: &AvailableBook) -> LibraryResult<()> {
        let mut streams = self.streams.write().await;
        if streams.contains_key(&book.book_id()) {
            return Err(LibraryError::duplicate_key(
                format!("book {} already exists", book.book_id()).as_str()));
        }
        streams.insert(book.book_id(), BookStream {
            library_branch_id: book.library_branch_id(),
            version: book.version(),
            events: vec![],
        });
        debug!(book_id = %book.book_id(), "book stream created");
        Ok(())
    }

    async fn load(&self, book_id: BookId) -> LibraryResult<Book> {
        let streams = self.streams.read().await;
        let stream = streams.get(&book_id).ok_or_else(|| LibraryError::not_found(
            format!("book {} not found", book_id).as_str()))?;
        stream.replay(book_id)
    }

    async fn append(&self, book_id: BookId, expected: Version, events: &[BookEvent]) -> LibraryResult<Version> {
        let mut streams = self.streams.write().await;
        let stream = streams.get_mut(&book_id).ok_or_else(|| LibraryError::not_found(
            format!("book {} not found", book_id).as_str()))?;
        if stream.version != expected {
            warn!(book_id = %book_id, expected = %expected, actual = %stream.version, "stale book version");
            return Err(LibraryError::concurrent_modification(
                format!("book {} was modified concurrently", book_id).as_str(),
                expected.value(), stream.version.value()));
        }
        if events.is_empty() {
            return Ok(stream.version);
        }

        // refuse to store a history that could not be replayed later
        let current = stream.replay(book_id)?;
        events.iter().try_fold(current, Book::apply)?;

        let mut envelopes = events.iter()
            .map(|event| DomainEvent::book(event.name(), book_id.to_string().as_str(), event))
            .collect::<LibraryResult<Vec<DomainEvent>>>()?;
        stream.events.append(&mut envelopes);
        stream.version = stream.version.next();
        debug!(book_id = %book_id, version = %stream.version, appended = events.len(), "book events appended");
        Ok(stream.version)
    }

    async fn history(&self, book_id: BookId) -> LibraryResult<Vec<BookEvent>> {
        let streams = self.streams.read().await;
        let stream = streams.get(&book_id).ok_or_else(|| LibraryError::not_found(
            format!("book {} not found", book_id).as_str()))?;
        stream.decode()
    }
}
