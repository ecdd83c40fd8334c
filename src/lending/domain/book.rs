use serde::{Deserialize, Serialize};

use crate::core::domain::Identifiable;
use crate::core::library::{BookStatus, LibraryError, LibraryResult};
use crate::lending::events::{BookHoldCanceled, BookPlacedOnHold};
use crate::lending::value_objects::{BookId, LibraryBranchId, PatronId, Version};

// AvailableBook is a book that can be placed on hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableBook {
    book_id: BookId,
    library_branch_id: LibraryBranchId,
    version: Version,
}

impl AvailableBook {
    pub fn new(book_id: BookId, library_branch_id: LibraryBranchId, version: Version) -> Self {
        Self { book_id, library_branch_id, version }
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    pub fn library_branch_id(&self) -> LibraryBranchId {
        self.library_branch_id
    }

    pub fn version(&self) -> Version {
        self.version
    }

    // The policy has already approved the hold; the branch and patron come from the event.
    pub fn handle_book_placed_on_hold(&self, event: &BookPlacedOnHold) -> BookOnHold {
        BookOnHold {
            book_id: self.book_id,
            library_branch_id: event.library_branch_id(),
            patron_id: event.patron_id(),
            version: self.version,
        }
    }
}

// BookOnHold is a book reserved by exactly one patron
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookOnHold {
    book_id: BookId,
    library_branch_id: LibraryBranchId,
    patron_id: PatronId,
    version: Version,
}

impl BookOnHold {
    pub fn new(book_id: BookId, library_branch_id: LibraryBranchId, patron_id: PatronId, version: Version) -> Self {
        Self { book_id, library_branch_id, patron_id, version }
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    pub fn library_branch_id(&self) -> LibraryBranchId {
        self.library_branch_id
    }

    pub fn patron_id(&self) -> PatronId {
        self.patron_id
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn by(&self, patron_id: PatronId) -> bool {
        self.patron_id == patron_id
    }

    pub fn handle_hold_canceled(&self, event: &BookHoldCanceled) -> AvailableBook {
        AvailableBook {
            book_id: self.book_id,
            library_branch_id: event.library_branch_id(),
            version: self.version,
        }
    }
}

// BookEvent is the ordered history of a single book stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum BookEvent {
    PlacedOnHold(BookPlacedOnHold),
    HoldCanceled(BookHoldCanceled),
}

impl BookEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BookEvent::PlacedOnHold(_) => "book_placed_on_hold",
            BookEvent::HoldCanceled(_) => "book_hold_canceled",
        }
    }

    pub fn book_id(&self) -> BookId {
        match self {
            BookEvent::PlacedOnHold(e) => e.book_id(),
            BookEvent::HoldCanceled(e) => e.book_id(),
        }
    }
}

/// A book is in exactly one of its variants at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Book {
    Available(AvailableBook),
    OnHold(BookOnHold),
}

impl Book {
    /// The state every book enters the system in.
    pub fn initial(book_id: BookId, library_branch_id: LibraryBranchId) -> Self {
        Book::Available(AvailableBook::new(book_id, library_branch_id, Version::zero()))
    }

    pub fn status(&self) -> BookStatus {
        match self {
            Book::Available(_) => BookStatus::Available,
            Book::OnHold(_) => BookStatus::OnHold,
        }
    }

    /// Applies a stored fact to the current variant.
    ///
    /// Histories only ever contain facts that were decided against the matching
    /// variant, so a mismatch means the stream is corrupted.
    pub fn apply(self, event: &BookEvent) -> LibraryResult<Book> {
        if event.book_id() != self.id() {
            return Err(LibraryError::corrupted_state(
                format!("event {} for book {} found in stream of book {}",
                        event.name(), event.book_id(), self.id()).as_str()));
        }
        match (self, event) {
            (Book::Available(book), BookEvent::PlacedOnHold(e)) => {
                Ok(Book::OnHold(book.handle_book_placed_on_hold(e)))
            }
            (Book::OnHold(book), BookEvent::HoldCanceled(e)) => {
                Ok(Book::Available(book.handle_hold_canceled(e)))
            }
            (book, event) => {
                Err(LibraryError::corrupted_state(
                    format!("cannot apply {} to book {} in status {}",
                            event.name(), book.id(), book.status()).as_str()))
            }
        }
    }

    /// Rebuilds the current state by folding the history over the initial state.
    pub fn replay<'a, I>(book_id: BookId, library_branch_id: LibraryBranchId, version: Version,
                         events: I) -> LibraryResult<Book>
        where I: IntoIterator<Item=&'a BookEvent> {
        let initial = Book::Available(AvailableBook::new(book_id, library_branch_id, version));
        events.into_iter().try_fold(initial, Book::apply)
    }
}

impl Identifiable for Book {
    type Id = BookId;

    fn id(&self) -> BookId {
        match self {
            Book::Available(book) => book.book_id(),
            Book::OnHold(book) => book.book_id(),
        }
    }

    fn version(&self) -> Version {
        match self {
            Book::Available(book) => book.version(),
            Book::OnHold(book) => book.version(),
        }
    }
}

impl From<AvailableBook> for Book {
    fn from(other: AvailableBook) -> Self {
        Book::Available(other)
    }
}

impl From<BookOnHold> for Book {
    fn from(other: BookOnHold) -> Self {
        Book::OnHold(other)
    }
}

// BookSnapshot is the flat, tagged form a book takes when read from storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub book_id: BookId,
    pub library_branch_id: LibraryBranchId,
    pub patron_id: Option<PatronId>,
    pub status: String,
    pub version: i64,
}

impl From<&Book> for BookSnapshot {
    fn from(other: &Book) -> BookSnapshot {
        match other {
            Book::Available(book) => BookSnapshot {
                book_id: book.book_id(),
                library_branch_id: book.library_branch_id(),
                patron_id: None,
                status: BookStatus::Available.to_string(),
                version: book.version().value(),
            },
            Book::OnHold(book) => BookSnapshot {
                book_id: book.book_id(),
                library_branch_id: book.library_branch_id(),
                patron_id: Some(book.patron_id()),
                status: BookStatus::OnHold.to_string(),
                version: book.version().value(),
            },
        }
    }
}

impl TryFrom<BookSnapshot> for Book {
    type Error = LibraryError;

    fn try_from(other: BookSnapshot) -> Result<Self, Self::Error> {
        let version = Version::of(other.version);
        match BookStatus::try_from(other.status.as_str())? {
            BookStatus::Available => {
                Ok(Book::Available(AvailableBook::new(other.book_id, other.library_branch_id, version)))
            }
            BookStatus::OnHold => {
                let patron_id = other.patron_id.ok_or_else(|| LibraryError::corrupted_state(
                    format!("book {} is on hold without a patron", other.book_id).as_str()))?;
                Ok(Book::OnHold(BookOnHold::new(other.book_id, other.library_branch_id, patron_id, version)))
            }
        }
    }
}
