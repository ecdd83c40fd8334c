use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::domain::Identifiable;
use crate::core::library::PatronType;
use crate::lending::value_objects::{BookId, PatronId, Version};

// PatronHolds is everything the placing-on-hold policies need to know about a patron
pub trait PatronHolds: Sync + Send {
    fn patron_id(&self) -> PatronId;
    fn patron_type(&self) -> PatronType;
    fn number_of_holds(&self) -> usize;
    fn is_holding(&self, book_id: BookId) -> bool;

    fn is_regular(&self) -> bool {
        self.patron_type() == PatronType::Regular
    }
}

// Patron is the lending view of a library member and the books it currently holds.
// The version is advanced by the repository on every successful update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patron {
    pub patron_id: PatronId,
    pub patron_type: PatronType,
    pub holds: BTreeSet<BookId>,
    pub version: Version,
}

impl Patron {
    pub fn new(patron_type: PatronType) -> Self {
        Self {
            patron_id: PatronId::generate(),
            patron_type,
            holds: BTreeSet::new(),
            version: Version::zero(),
        }
    }

    pub fn with_holds<I: IntoIterator<Item=BookId>>(mut self, holds: I) -> Self {
        self.holds.extend(holds);
        self
    }

    pub(crate) fn hold(&mut self, book_id: BookId) {
        self.holds.insert(book_id);
    }

    pub(crate) fn release(&mut self, book_id: BookId) {
        self.holds.remove(&book_id);
    }
}

impl Identifiable for Patron {
    type Id = PatronId;

    fn id(&self) -> PatronId {
        self.patron_id
    }

    fn version(&self) -> Version {
        self.version
    }
}

impl PatronHolds for Patron {
    fn patron_id(&self) -> PatronId {
        self.patron_id
    }

    fn patron_type(&self) -> PatronType {
        self.patron_type
    }

    fn number_of_holds(&self) -> usize {
        self.holds.len()
    }

    fn is_holding(&self, book_id: BookId) -> bool {
        self.holds.contains(&book_id)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Identifiable;
    use crate::core::library::PatronType;
    use crate::lending::domain::patron::{Patron, PatronHolds};
    use crate::lending::value_objects::{BookId, Version};

    #[test]
    fn test_should_build_patron() {
        let patron = Patron::new(PatronType::Regular);
        assert!(patron.is_regular());
        assert_eq!(0, patron.number_of_holds());
        assert_eq!(Version::zero(), patron.version());
        assert_eq!(patron.patron_id, patron.id());
    }

    #[test]
    fn test_should_track_holds() {
        let (book1, book2) = (BookId::generate(), BookId::generate());
        let mut patron = Patron::new(PatronType::Researcher).with_holds([book1]);
        assert!(!patron.is_regular());
        assert!(patron.is_holding(book1));
        assert!(!patron.is_holding(book2));
        patron.hold(book2);
        patron.hold(book2);
        assert_eq!(2, patron.number_of_holds());
        patron.release(book1);
        assert!(!patron.is_holding(book1));
        assert_eq!(1, patron.number_of_holds());
    }
}
