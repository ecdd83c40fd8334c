use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::lending::domain::book::{AvailableBook, Book};
use crate::lending::domain::patron::Patron;
use crate::lending::events::PatronEvent;
use crate::lending::value_objects::{BookId, HoldDuration, LibraryBranchId, PatronId};

pub mod book;
pub mod patron;
pub mod policy;
pub mod service;

#[async_trait]
pub trait HoldService: Sync + Send {
    async fn add_book(&self, book_id: BookId, library_branch_id: LibraryBranchId) -> LibraryResult<AvailableBook>;
    async fn add_patron(&self, patron: &Patron) -> LibraryResult<()>;
    async fn find_book(&self, book_id: BookId) -> LibraryResult<Book>;
    async fn find_patron(&self, patron_id: PatronId) -> LibraryResult<Patron>;
    async fn place_on_hold(&self, patron_id: PatronId, book_id: BookId, duration: HoldDuration) -> LibraryResult<PatronEvent>;
    async fn cancel_hold(&self, patron_id: PatronId, book_id: BookId) -> LibraryResult<PatronEvent>;
}
