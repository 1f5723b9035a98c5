use async_trait::async_trait;
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // updates an entity
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> LibraryResult<Option<Entity>>;

    // delete an entity
    async fn delete(&self, id: &str) -> LibraryResult<usize>;

    // all entities, in storage order
    async fn find_all(&self) -> LibraryResult<Vec<Entity>>;
}
