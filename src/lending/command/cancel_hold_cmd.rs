use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::lending::domain::HoldService;
use crate::lending::events::PatronEvent;
use crate::lending::value_objects::{BookId, PatronId};

pub struct CancelHoldCommand {
    hold_service: Arc<dyn HoldService>,
}

impl CancelHoldCommand {
    pub fn new(hold_service: Arc<dyn HoldService>) -> Self {
        Self {
            hold_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CancelHoldCommandRequest {
    patron_id: String,
    book_id: String,
}

impl CancelHoldCommandRequest {
    pub fn new(patron_id: String, book_id: String) -> Self {
        Self {
            patron_id,
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CancelHoldCommandResponse {
    pub event: PatronEvent,
}

impl CancelHoldCommandResponse {
    pub fn new(event: PatronEvent) -> Self {
        Self {
            event,
        }
    }
}

#[async_trait]
impl Command<CancelHoldCommandRequest, CancelHoldCommandResponse> for CancelHoldCommand {
    async fn execute(&self, req: CancelHoldCommandRequest) -> Result<CancelHoldCommandResponse, CommandError> {
        let patron_id: PatronId = req.patron_id.parse()?;
        let book_id: BookId = req.book_id.parse()?;
        self.hold_service.cancel_hold(patron_id, book_id)
            .await.map_err(CommandError::from).map(CancelHoldCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::PatronType;
    use crate::gateway::GatewayPublisherVia;
    use crate::lending::command::cancel_hold_cmd::{CancelHoldCommand, CancelHoldCommandRequest};
    use crate::lending::command::place_on_hold_cmd::{PlaceOnHoldCommand, PlaceOnHoldCommandRequest};
    use crate::lending::domain::patron::Patron;
    use crate::lending::events::PatronEvent;
    use crate::lending::factory::create_hold_service;
    use crate::lending::value_objects::{BookId, LibraryBranchId};

    #[tokio::test]
    async fn test_should_run_cancel_hold() {
        let svc = create_hold_service(&Configuration::new("test"), GatewayPublisherVia::Logs);
        let patron = Patron::new(PatronType::Researcher);
        svc.add_patron(&patron).await.expect("should add patron");
        let book = svc.add_book(BookId::generate(), LibraryBranchId::generate()).await.expect("should add book");
        let hold_cmd = PlaceOnHoldCommand::new(svc.clone());
        let cancel_cmd = CancelHoldCommand::new(svc);

        let _ = hold_cmd.execute(PlaceOnHoldCommandRequest::new(
            patron.patron_id.to_string(), book.book_id().to_string(), None)).await.expect("should hold book");
        let res = cancel_cmd.execute(CancelHoldCommandRequest::new(
            patron.patron_id.to_string(), book.book_id().to_string())).await.expect("should cancel hold");
        match res.event {
            PatronEvent::BookHoldCanceled(canceled) => {
                assert_eq!(patron.patron_id, canceled.patron_id());
                assert_eq!(book.book_id(), canceled.book_id());
                assert_eq!(book.library_branch_id(), canceled.library_branch_id());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_should_fail_cancel_for_unknown_book() {
        let svc = create_hold_service(&Configuration::new("test"), GatewayPublisherVia::Discard);
        let patron = Patron::new(PatronType::Regular);
        svc.add_patron(&patron).await.expect("should add patron");
        let res = CancelHoldCommand::new(svc).execute(CancelHoldCommandRequest::new(
            patron.patron_id.to_string(), BookId::generate().to_string())).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
