use std::sync::Arc;
use crate::core::domain::Configuration;
use crate::gateway::factory::create_publisher;
use crate::gateway::GatewayPublisherVia;
use crate::lending::domain::HoldService;
use crate::lending::domain::policy::PolicySet;
use crate::lending::domain::service::HoldServiceImpl;
use crate::lending::repository::{BookRepository, PatronRepository};
use crate::lending::repository::memory_book_repository::MemoryBookRepository;
use crate::lending::repository::memory_patron_repository::MemoryPatronRepository;

pub fn create_book_repository() -> Arc<dyn BookRepository> {
    Arc::new(MemoryBookRepository::new())
}

pub fn create_patron_repository() -> Arc<dyn PatronRepository> {
    Arc::new(MemoryPatronRepository::new())
}

pub fn create_hold_service(config: &Configuration, via: GatewayPublisherVia) -> Arc<dyn HoldService> {
    Arc::new(HoldServiceImpl::new(config, PolicySet::default_policies(config),
                                  create_book_repository(), create_patron_repository(),
                                  create_publisher(via)))
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Configuration;
    use crate::core::library::{BookStatus, PatronType};
    use crate::gateway::GatewayPublisherVia;
    use crate::lending::domain::patron::Patron;
    use crate::lending::events::PatronEvent;
    use crate::lending::factory::create_hold_service;
    use crate::lending::value_objects::{BookId, HoldDuration, LibraryBranchId};

    #[tokio::test]
    async fn test_should_wire_hold_service() {
        let svc = create_hold_service(&Configuration::new("test"), GatewayPublisherVia::Discard);
        let patron = Patron::new(PatronType::Regular);
        svc.add_patron(&patron).await.expect("should add patron");
        let book = svc.add_book(BookId::generate(), LibraryBranchId::generate()).await.expect("should add book");
        let event = svc.place_on_hold(patron.patron_id, book.book_id(), HoldDuration::close_ended(10).expect("should build duration"))
            .await.expect("should hold");
        assert!(matches!(event, PatronEvent::BookPlacedOnHold(_)));
        assert_eq!(BookStatus::OnHold, svc.find_book(book.book_id()).await.expect("should find").status());
    }
}
