use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::lending::domain::HoldService;
use crate::lending::events::PatronEvent;
use crate::lending::value_objects::{BookId, HoldDuration, PatronId};

pub struct PlaceOnHoldCommand {
    hold_service: Arc<dyn HoldService>,
}

impl PlaceOnHoldCommand {
    pub fn new(hold_service: Arc<dyn HoldService>) -> Self {
        Self {
            hold_service,
        }
    }
}

// a request without `days` asks for an open-ended hold
#[derive(Debug, Deserialize)]
pub struct PlaceOnHoldCommandRequest {
    patron_id: String,
    book_id: String,
    days: Option<u32>,
}

impl PlaceOnHoldCommandRequest {
    pub fn new(patron_id: String, book_id: String, days: Option<u32>) -> Self {
        Self {
            patron_id,
            book_id,
            days,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlaceOnHoldCommandResponse {
    pub event: PatronEvent,
}

impl PlaceOnHoldCommandResponse {
    pub fn new(event: PatronEvent) -> Self {
        Self {
            event,
        }
    }
}

#[async_trait]
impl Command<PlaceOnHoldCommandRequest, PlaceOnHoldCommandResponse> for PlaceOnHoldCommand {
    async fn execute(&self, req: PlaceOnHoldCommandRequest) -> Result<PlaceOnHoldCommandResponse, CommandError> {
        let patron_id: PatronId = req.patron_id.parse()?;
        let book_id: BookId = req.book_id.parse()?;
        let duration = match req.days {
            Some(days) => HoldDuration::close_ended(days)?,
            None => HoldDuration::open_ended(),
        };
        self.hold_service.place_on_hold(patron_id, book_id, duration)
            .await.map_err(CommandError::from).map(PlaceOnHoldCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::{BookStatus, PatronType};
    use crate::gateway::GatewayPublisherVia;
    use crate::lending::command::place_on_hold_cmd::{PlaceOnHoldCommand, PlaceOnHoldCommandRequest};
    use crate::lending::domain::patron::Patron;
    use crate::lending::events::PatronEvent;
    use crate::lending::factory::create_hold_service;
    use crate::lending::value_objects::{BookId, LibraryBranchId};

    #[tokio::test]
    async fn test_should_run_place_on_hold() {
        let svc = create_hold_service(&Configuration::new("test"), GatewayPublisherVia::Logs);
        let patron = Patron::new(PatronType::Regular);
        svc.add_patron(&patron).await.expect("should add patron");
        let book = svc.add_book(BookId::generate(), LibraryBranchId::generate()).await.expect("should add book");
        let cmd = PlaceOnHoldCommand::new(svc);

        let req: PlaceOnHoldCommandRequest = serde_json::from_value(serde_json::json!({
            "patron_id": patron.patron_id.to_string(),
            "book_id": book.book_id().to_string(),
            "days": 7,
        })).expect("should parse request");
        let res = cmd.execute(req).await.expect("should place on hold");
        assert!(matches!(res.event, PatronEvent::BookPlacedOnHold(_)));
        let json = serde_json::to_value(&res).expect("should serialize response");
        assert_eq!("BookPlacedOnHold", json["event"]["type"]);
    }

    #[tokio::test]
    async fn test_should_fail_with_invalid_ids() {
        let cmd = PlaceOnHoldCommand::new(create_hold_service(&Configuration::new("test"), GatewayPublisherVia::Discard));
        let res = cmd.execute(PlaceOnHoldCommandRequest::new(
            "patron".to_string(), BookId::generate().to_string(), None)).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_should_fail_with_days_out_of_calendar_range() {
        let svc = create_hold_service(&Configuration::new("test"), GatewayPublisherVia::Discard);
        let patron = Patron::new(PatronType::Regular);
        svc.add_patron(&patron).await.expect("should add patron");
        let book = svc.add_book(BookId::generate(), LibraryBranchId::generate()).await.expect("should add book");
        let cmd = PlaceOnHoldCommand::new(svc.clone());

        let req: PlaceOnHoldCommandRequest = serde_json::from_value(serde_json::json!({
            "patron_id": patron.patron_id.to_string(),
            "book_id": book.book_id().to_string(),
            "days": 4294967295u32,
        })).expect("should parse request");
        let res = cmd.execute(req).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
        assert_eq!(BookStatus::Available, svc.find_book(book.book_id()).await.expect("should find book").status());
    }
}
