//! Common repository traits
//!
//! Generic interfaces for database operations. Every repository owns a clone
//! of the `SqlitePool` and returns raw `sqlx::Error`s; the services translate
//! them into `AppError`.

/// Trait for creating new entities in the database
///
/// # Type Parameters
/// * `Entity` - Type of the returned entity (with ID assigned by the database)
/// * `CreateDTO` - DTO for creation (without ID, generated by SQLite)
pub trait Create<Entity, CreateDTO> {
    /// Inserts a new row and returns the persisted entity
    async fn create(&self, data: &CreateDTO) -> Result<Entity, sqlx::Error>;
}

/// Trait for reading a single entity by primary key
pub trait Read<Entity, Id> {
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that ID
    async fn read(&self, id: &Id) -> Result<Option<Entity>, sqlx::Error>;
}

/// Trait for partial updates
///
/// # Type Parameters
/// * `Entity` - Type returned after the update
/// * `UpdateDTO` - DTO with optional fields (only `Some(_)` fields are modified)
/// * `Id` - Type of the primary key
pub trait Update<Entity, UpdateDTO, Id> {
    /// Fails with `sqlx::Error::RowNotFound` when no row has that ID
    async fn update(&self, id: &Id, data: &UpdateDTO) -> Result<Entity, sqlx::Error>;
}

/// Trait for deleting entities
pub trait Delete<Id> {
    /// Deleting a missing row is not an error at this level
    async fn delete(&self, id: &Id) -> Result<(), sqlx::Error>;
}
