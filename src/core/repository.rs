use async_trait::async_trait;
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity, Id>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LibraryResult<()>;

    // updates an entity
    async fn update(&self, entity: &Entity) -> LibraryResult<()>;

    // get an entity
    async fn get(&self, id: Id) -> LibraryResult<Entity>;
}
