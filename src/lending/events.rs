//! Facts produced by the lending context. Events are plain records and never
//! change once built.
//!
//! Patron-directed events are gathered in [`PatronEvent`] so consumers can route
//! them to the patron's stream with an exhaustive match. The book-centric
//! [`BookDuplicateHoldFoundEvent`] is deliberately kept outside of it.

use serde::{Deserialize, Serialize};

use crate::lending::domain::policy::Rejection;
use crate::lending::value_objects::{BookId, DateVO, LibraryBranchId, PatronId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPlacedOnHold {
    patron_id: PatronId,
    book_id: BookId,
    library_branch_id: LibraryBranchId,
    till: Option<DateVO>,
}

impl BookPlacedOnHold {
    pub fn new(patron_id: PatronId, book_id: BookId, library_branch_id: LibraryBranchId,
               till: Option<DateVO>) -> Self {
        Self { patron_id, book_id, library_branch_id, till }
    }

    pub fn patron_id(&self) -> PatronId {
        self.patron_id
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    pub fn library_branch_id(&self) -> LibraryBranchId {
        self.library_branch_id
    }

    pub fn till(&self) -> Option<DateVO> {
        self.till
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookHoldCanceled {
    patron_id: PatronId,
    book_id: BookId,
    library_branch_id: LibraryBranchId,
}

impl BookHoldCanceled {
    pub fn new(patron_id: PatronId, book_id: BookId, library_branch_id: LibraryBranchId) -> Self {
        Self { patron_id, book_id, library_branch_id }
    }

    pub fn patron_id(&self) -> PatronId {
        self.patron_id
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    pub fn library_branch_id(&self) -> LibraryBranchId {
        self.library_branch_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookHoldFailed {
    reason: String,
    patron_id: PatronId,
}

impl BookHoldFailed {
    pub fn new(reason: &str, patron_id: PatronId) -> Self {
        Self { reason: reason.to_string(), patron_id }
    }

    pub fn book_hold_failed(rejection: &Rejection, patron_id: PatronId) -> Self {
        Self::new(rejection.reason(), patron_id)
    }

    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }

    pub fn patron_id(&self) -> PatronId {
        self.patron_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookHoldCancelingFailed {
    patron_id: PatronId,
}

impl BookHoldCancelingFailed {
    pub fn new(patron_id: PatronId) -> Self {
        Self { patron_id }
    }

    pub fn patron_id(&self) -> PatronId {
        self.patron_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookCheckedOut {
    patron_id: PatronId,
}

impl BookCheckedOut {
    pub fn new(patron_id: PatronId) -> Self {
        Self { patron_id }
    }

    pub fn patron_id(&self) -> PatronId {
        self.patron_id
    }
}

/// Warning raised alongside a successful hold when the patron has just reached
/// the maximum number of concurrent holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaximumNumberOnHoldsReached {
    patron_id: PatronId,
    number_of_holds: usize,
}

impl MaximumNumberOnHoldsReached {
    pub fn new(patron_id: PatronId, number_of_holds: usize) -> Self {
        Self { patron_id, number_of_holds }
    }

    pub fn patron_id(&self) -> PatronId {
        self.patron_id
    }

    pub fn number_of_holds(&self) -> usize {
        self.number_of_holds
    }
}

/// A successful hold, optionally carrying the max-holds warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPlacedOnHoldEvents {
    patron_id: PatronId,
    book_placed_on_hold: BookPlacedOnHold,
    maximum_number_on_holds_reached: Option<MaximumNumberOnHoldsReached>,
}

impl BookPlacedOnHoldEvents {
    pub fn event(patron_id: PatronId, book_placed_on_hold: BookPlacedOnHold) -> Self {
        Self { patron_id, book_placed_on_hold, maximum_number_on_holds_reached: None }
    }

    pub fn events(patron_id: PatronId, book_placed_on_hold: BookPlacedOnHold,
                  maximum_number_on_holds_reached: MaximumNumberOnHoldsReached) -> Self {
        Self {
            patron_id,
            book_placed_on_hold,
            maximum_number_on_holds_reached: Some(maximum_number_on_holds_reached),
        }
    }

    pub fn patron_id(&self) -> PatronId {
        self.patron_id
    }

    pub fn book_placed_on_hold(&self) -> &BookPlacedOnHold {
        &self.book_placed_on_hold
    }

    pub fn maximum_number_on_holds_reached(&self) -> Option<&MaximumNumberOnHoldsReached> {
        self.maximum_number_on_holds_reached.as_ref()
    }
}

/// Raised when a second patron asks for a book already held by someone else.
/// Informational only; the first hold is left untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDuplicateHoldFoundEvent {
    book_id: BookId,
    second_patron_id: PatronId,
}

impl BookDuplicateHoldFoundEvent {
    pub fn new(book_id: BookId, second_patron_id: PatronId) -> Self {
        Self { book_id, second_patron_id }
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    pub fn second_patron_id(&self) -> PatronId {
        self.second_patron_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PatronEvent {
    BookCheckedOut(BookCheckedOut),
    BookHoldCanceled(BookHoldCanceled),
    BookHoldCancelingFailed(BookHoldCancelingFailed),
    BookHoldFailed(BookHoldFailed),
    BookPlacedOnHold(BookPlacedOnHoldEvents),
}

impl PatronEvent {
    pub fn patron_id(&self) -> PatronId {
        match self {
            PatronEvent::BookCheckedOut(e) => e.patron_id(),
            PatronEvent::BookHoldCanceled(e) => e.patron_id(),
            PatronEvent::BookHoldCancelingFailed(e) => e.patron_id(),
            PatronEvent::BookHoldFailed(e) => e.patron_id(),
            PatronEvent::BookPlacedOnHold(e) => e.patron_id(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PatronEvent::BookCheckedOut(_) => "book_checked_out",
            PatronEvent::BookHoldCanceled(_) => "book_hold_canceled",
            PatronEvent::BookHoldCancelingFailed(_) => "book_hold_canceling_failed",
            PatronEvent::BookHoldFailed(_) => "book_hold_failed",
            PatronEvent::BookPlacedOnHold(_) => "book_placed_on_hold",
        }
    }
}

impl From<BookPlacedOnHoldEvents> for PatronEvent {
    fn from(other: BookPlacedOnHoldEvents) -> Self {
        PatronEvent::BookPlacedOnHold(other)
    }
}

impl From<BookHoldFailed> for PatronEvent {
    fn from(other: BookHoldFailed) -> Self {
        PatronEvent::BookHoldFailed(other)
    }
}

impl From<BookHoldCanceled> for PatronEvent {
    fn from(other: BookHoldCanceled) -> Self {
        PatronEvent::BookHoldCanceled(other)
    }
}

impl From<BookHoldCancelingFailed> for PatronEvent {
    fn from(other: BookHoldCancelingFailed) -> Self {
        PatronEvent::BookHoldCancelingFailed(other)
    }
}

impl From<BookCheckedOut> for PatronEvent {
    fn from(other: BookCheckedOut) -> Self {
        PatronEvent::BookCheckedOut(other)
    }
}
