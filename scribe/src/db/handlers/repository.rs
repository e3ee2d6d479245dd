//! Base repository traits for database operations.
//!
//! A repository is a data access layer for one table. Each repository is
//! generic over its own request and response types, which live in
//! [`crate::db::models`].
use crate::db::errors::Result;

/// Base repository trait providing the operations every entity supports
///
/// This trait has separate associated types for create requests and responses.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// Create a new entity
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;
}

/// Repositories whose entities are browsed in pages.
#[async_trait::async_trait]
pub trait ListableRepository: Repository {
    /// The filter type for list operations
    type Filter: Send + Sync;

    /// List entities with filtering and pagination
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Count the entities matching the filter, ignoring its pagination
    async fn count(&mut self, filter: &Self::Filter) -> Result<i64>;
}

/// Repositories for entities that can change after creation.
///
/// Users are immutable once registered, so only some repositories implement this.
#[async_trait::async_trait]
pub trait MutableRepository: Repository {
    /// The request type for updating entities
    type UpdateRequest;

    /// Update an entity by ID
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response>;

    /// Delete an entity by ID, returning whether a row was removed
    async fn delete(&mut self, id: Self::Id) -> Result<bool>;
}
