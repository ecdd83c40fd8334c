use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::lending::domain::patron::Patron;
use crate::lending::repository::PatronRepository;
use crate::lending::value_objects::PatronId;

#[derive(Debug, Default)]
pub struct MemoryPatronRepository {
    patrons: RwLock<HashMap<PatronId, Patron>>,
}

impl MemoryPatronRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Patron, PatronId> for MemoryPatronRepository {
    async fn create(&self, patron: &Patron) -> LibraryResult<()> {
        let mut patrons = self.patrons.write().await;
        if patrons.contains_key(&patron.patron_id) {
            return Err(LibraryError::duplicate_key(
                format!("patron {} already exists", patron.patron_id).as_str()));
        }
        patrons.insert(patron.patron_id, patron.clone());
        Ok(())
    }

    // stores the patron only if nobody updated it since it was read
    async fn update(&self, patron: &Patron) -> LibraryResult<()> {
        let mut patrons = self.patrons.write().await;
        match patrons.get_mut(&patron.patron_id) {
            Some(existing) => {
                if existing.version != patron.version {
                    debug!(patron_id = %patron.patron_id, expected = %patron.version,
                        actual = %existing.version, "rejecting stale patron update");
                    return Err(LibraryError::concurrent_modification(
                        format!("patron {} was modified concurrently", patron.patron_id).as_str(),
                        patron.version.value(), existing.version.value()));
                }
                *existing = Patron { version: patron.version.next(), ..patron.clone() };
                Ok(())
            }
            None => Err(LibraryError::not_found(
                format!("patron {} not found", patron.patron_id).as_str())),
        }
    }

    async fn get(&self, id: PatronId) -> LibraryResult<Patron> {
        self.patrons.read().await.get(&id).cloned().ok_or_else(|| LibraryError::not_found(
            format!("patron {} not found", id).as_str()))
    }
}

impl PatronRepository for MemoryPatronRepository {}
