//! Core traits for entity identity.
//!
//! The container engine reconciles collections after create/update/delete by
//! entity identity alone; everything else about a record is opaque to it.
//! Resource types in `emporia-model` implement [`Identify`], which is the
//! only requirement the generic engine places on them.

/// An entity with a server-assigned identity.
///
/// # Bounds
///
/// - `Send + Sync`: entities cross task boundaries inside containers
/// - `'static`: entity lifetime is not borrowed
pub trait Identify: Send + Sync + 'static {
    /// The server-assigned identity used for collection reconciliation.
    fn id(&self) -> &str;
}
