use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::library::LibraryResult;
use crate::utils::date::serializer;

// EventStream defines which append-only stream an event is routed to
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum EventStream {
    Book,
    Patron,
}

// DomainEvent is the stored envelope around a serialized lending event
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    pub event_id: String,
    pub name: String,
    pub stream: EventStream,
    pub key: String,
    pub metadata: HashMap<String, String>,
    pub json_data: String,
    #[serde(with = "serializer")]
    pub created_at: DateTime<Utc>,
}

impl DomainEvent {
    pub fn book<T: Serialize>(name: &str, key: &str, data: &T) -> LibraryResult<Self> {
        let json = serde_json::to_string(data)?;
        Ok(Self::build(name, EventStream::Book, key, json))
    }

    pub fn patron<T: Serialize>(name: &str, key: &str, data: &T) -> LibraryResult<Self> {
        let json = serde_json::to_string(data)?;
        Ok(Self::build(name, EventStream::Patron, key, json))
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn decode<T: DeserializeOwned>(&self) -> LibraryResult<T> {
        Ok(serde_json::from_str(self.json_data.as_str())?)
    }

    fn build(name: &str, stream: EventStream, key: &str, json: String) -> DomainEvent {
        DomainEvent {
            event_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            stream,
            key: key.to_string(),
            metadata: HashMap::new(),
            json_data: json,
            created_at: Utc::now(),
        }
    }
}
