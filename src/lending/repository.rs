pub mod memory_book_repository;
pub mod memory_patron_repository;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;
use crate::lending::domain::book::{AvailableBook, Book, BookEvent};
use crate::lending::domain::patron::Patron;
use crate::lending::value_objects::{BookId, PatronId, Version};

// BookRepository keeps every book as an append-only stream of book events
#[async_trait]
pub trait BookRepository: Sync + Send {
    // opens the stream of a book entering the system
    async fn create(&self, book: &AvailableBook) -> LibraryResult<()>;

    // replays the stream into the current book variant
    async fn load(&self, book_id: BookId) -> LibraryResult<Book>;

    // appends events if the stream is still at `expected`, returning the new version
    async fn append(&self, book_id: BookId, expected: Version, events: &[BookEvent]) -> LibraryResult<Version>;

    async fn history(&self, book_id: BookId) -> LibraryResult<Vec<BookEvent>>;
}

#[async_trait]
pub trait PatronRepository: Repository<Patron, PatronId> {}
