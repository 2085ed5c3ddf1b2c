//! Document store abstraction layer.
//!
//! This module defines the `UserStore` trait that hides the concrete document
//! database behind the few read operations the API needs.

mod memory;
mod mongo;

pub use memory::InMemoryUserStore;
pub use mongo::MongoUserStore;

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use mongodb::bson::Document;

use crate::error::Result;

/// Stream of raw documents produced by [`UserStore::find`].
///
/// Dropping the stream releases whatever server-side cursor backs it, so an
/// early return while iterating never leaks the cursor.
pub type DocumentCursor = BoxStream<'static, Result<Document>>;

/// Read access to the user collection.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Short backend name used in logs and the health endpoint.
    fn backend(&self) -> &'static str;

    /// Round-trip check that the store is reachable.
    async fn ping(&self) -> Result<()>;

    /// Every document whose top-level fields equal those in `filter`.
    /// An empty filter matches the whole collection.
    async fn find(&self, filter: Document) -> Result<DocumentCursor>;

    /// The first document matching `filter` in the store's natural order.
    async fn find_one(&self, filter: Document) -> Result<Option<Document>>;
}
