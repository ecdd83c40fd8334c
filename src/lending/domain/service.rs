use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::core::domain::{Configuration, Identifiable};
use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;
use crate::gateway::events::EventPublisher;
use crate::lending::domain::book::{AvailableBook, Book, BookEvent};
use crate::lending::domain::HoldService;
use crate::lending::domain::patron::Patron;
use crate::lending::domain::policy::{max_holds_reached, PlacingOnHoldPolicy, PolicyDecision, PolicySet};
use crate::lending::events::{BookDuplicateHoldFoundEvent, BookHoldCanceled, BookHoldCancelingFailed, BookHoldFailed,
                             BookPlacedOnHold, BookPlacedOnHoldEvents, PatronEvent};
use crate::lending::repository::{BookRepository, PatronRepository};
use crate::lending::value_objects::{BookId, HoldDuration, LibraryBranchId, PatronId, Version};

pub struct HoldServiceImpl {
    branch_id: String,
    max_holds: usize,
    policies: PolicySet,
    book_repository: Arc<dyn BookRepository>,
    patron_repository: Arc<dyn PatronRepository>,
    events_publisher: Arc<dyn EventPublisher>,
}

impl HoldServiceImpl {
    pub fn new(config: &Configuration, policies: PolicySet,
               book_repository: Arc<dyn BookRepository>, patron_repository: Arc<dyn PatronRepository>,
               events_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            max_holds: config.max_holds,
            policies,
            book_repository,
            patron_repository,
            events_publisher,
        }
    }

    async fn publish_patron_event(&self, event: &PatronEvent) -> LibraryResult<()> {
        let envelope = DomainEvent::patron(event.name(), event.patron_id().to_string().as_str(), event)?
            .with_metadata("branch_id", self.branch_id.as_str());
        self.events_publisher.publish(&envelope).await
    }

    async fn publish_duplicate_hold(&self, event: &BookDuplicateHoldFoundEvent) -> LibraryResult<()> {
        let envelope = DomainEvent::book("book_duplicate_hold_found", event.book_id().to_string().as_str(), event)?
            .with_metadata("branch_id", self.branch_id.as_str());
        self.events_publisher.publish(&envelope).await
    }

    // Undoes the patron side of a hold whose book append failed. The failure is logged and
    // the caller keeps reporting the append error.
    async fn restore_patron<F>(&self, patron_id: PatronId, undo: F)
        where F: FnOnce(&mut Patron) + Send {
        let restored = match self.patron_repository.get(patron_id).await {
            Ok(mut patron) => {
                undo(&mut patron);
                self.patron_repository.update(&patron).await
            }
            Err(err) => Err(err),
        };
        if let Err(err) = restored {
            error!(patron_id = %patron_id, error = %err, "failed to restore patron holds");
        }
    }

    async fn hold_available(&self, mut patron: Patron, book: AvailableBook,
                            duration: HoldDuration) -> LibraryResult<PatronEvent> {
        let patron_id = patron.patron_id;
        match self.policies.evaluate(&book, &patron, &duration) {
            PolicyDecision::Rejection(rejection) => {
                info!(patron_id = %patron_id, patron_type = %patron.patron_type, book_id = %book.book_id(),
                    reason = rejection.reason(), "hold rejected");
                Ok(BookHoldFailed::book_hold_failed(&rejection, patron_id).into())
            }
            PolicyDecision::Allowance(_) => {
                let book_id = book.book_id();
                let placed = BookPlacedOnHold::new(patron_id, book_id, book.library_branch_id(), duration.to());
                let on_hold = book.handle_book_placed_on_hold(&placed);
                let warning = max_holds_reached(&patron, self.max_holds);

                // the patron update fails if another hold changed the patron after the policies read it
                patron.hold(book_id);
                self.patron_repository.update(&patron).await?;
                let appended = self.book_repository.append(
                    book_id, book.version(), &[BookEvent::PlacedOnHold(placed.clone())]).await;
                let version = match appended {
                    Ok(version) => version,
                    Err(err) => {
                        warn!(patron_id = %patron_id, book_id = %book_id, error = %err, "book hold not stored");
                        self.restore_patron(patron_id, |patron| patron.release(book_id)).await;
                        return Err(err);
                    }
                };
                debug!(patron_id = %on_hold.patron_id(), book_id = %on_hold.book_id(), version = %version, "book placed on hold");

                let events = match warning {
                    Some(warning) => {
                        info!(patron_id = %patron_id, holds = warning.number_of_holds(), "maximum number of holds reached");
                        BookPlacedOnHoldEvents::events(patron_id, placed, warning)
                    }
                    None => BookPlacedOnHoldEvents::event(patron_id, placed),
                };
                Ok(events.into())
            }
        }
    }
}

#[async_trait]
impl HoldService for HoldServiceImpl {
    async fn add_book(&self, book_id: BookId, library_branch_id: LibraryBranchId) -> LibraryResult<AvailableBook> {
        let book = AvailableBook::new(book_id, library_branch_id, Version::zero());
        self.book_repository.create(&book).await?;
        Ok(book)
    }

    async fn add_patron(&self, patron: &Patron) -> LibraryResult<()> {
        self.patron_repository.create(patron).await
    }

    async fn find_book(&self, book_id: BookId) -> LibraryResult<Book> {
        self.book_repository.load(book_id).await
    }

    async fn find_patron(&self, patron_id: PatronId) -> LibraryResult<Patron> {
        self.patron_repository.get(patron_id).await
    }

    async fn place_on_hold(&self, patron_id: PatronId, book_id: BookId, duration: HoldDuration) -> LibraryResult<PatronEvent> {
        let patron = self.patron_repository.get(patron_id).await?;
        let book = self.book_repository.load(book_id).await?;
        let event = match book {
            Book::Available(book) => self.hold_available(patron, book, duration).await?,
            Book::OnHold(book) => {
                if !book.by(patron_id) {
                    warn!(book_id = %book_id, patron_id = %patron_id, "book already on hold by another patron");
                    self.publish_duplicate_hold(&BookDuplicateHoldFoundEvent::new(book_id, patron_id)).await?;
                }
                BookHoldFailed::new(format!("book {} is not available", book.book_id()).as_str(), patron_id).into()
            }
        };
        self.publish_patron_event(&event).await?;
        Ok(event)
    }

    async fn cancel_hold(&self, patron_id: PatronId, book_id: BookId) -> LibraryResult<PatronEvent> {
        let mut patron = self.patron_repository.get(patron_id).await?;
        let book = self.book_repository.load(book_id).await?;
        let event: PatronEvent = match book {
            Book::OnHold(book) if book.by(patron_id) => {
                let canceled = BookHoldCanceled::new(patron_id, book_id, book.library_branch_id());
                let available = book.handle_hold_canceled(&canceled);
                patron.release(book_id);
                self.patron_repository.update(&patron).await?;
                let appended = self.book_repository.append(
                    book_id, book.version(), &[BookEvent::HoldCanceled(canceled.clone())]).await;
                let version = match appended {
                    Ok(version) => version,
                    Err(err) => {
                        warn!(patron_id = %patron_id, book_id = %book_id, error = %err, "hold cancellation not stored");
                        self.restore_patron(patron_id, |patron| patron.hold(book_id)).await;
                        return Err(err);
                    }
                };
                debug!(book_id = %available.book_id(), version = %version, "hold canceled");
                canceled.into()
            }
            other => {
                info!(book_id = %book_id, patron_id = %patron_id, status = %other.status(), version = %other.version(),
                    "hold cannot be canceled");
                BookHoldCancelingFailed::new(patron_id).into()
            }
        };
        self.publish_patron_event(&event).await?;
        Ok(event)
    }
}
