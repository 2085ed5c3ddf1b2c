//! Query service: maps API requests onto store queries.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc, Document};
use serde::Deserialize;
use user_directory_common::user::non_empty;
use user_directory_common::UserRecord;

use crate::error::{Error, Result};
use crate::store::UserStore;

/// Document field holding the upstream user identifier.
pub const EXTERNAL_ID_FIELD: &str = "user_id";

/// Stored shape of a user document.
///
/// Every field is optional in storage; absent and empty values are
/// normalized away when converting to [`UserRecord`].
#[derive(Debug, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id", default)]
    id: Option<ObjectId>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    fullname: Option<String>,
    #[serde(default)]
    nickname: Option<String>,
}

impl From<UserDocument> for UserRecord {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id.map(|oid| oid.to_hex()),
            external_user_id: non_empty(doc.user_id),
            full_name: doc.fullname.unwrap_or_default(),
            nickname: non_empty(doc.nickname),
        }
    }
}

fn decode(document: Document) -> Result<UserRecord> {
    let user: UserDocument = bson::from_document(document)?;
    Ok(user.into())
}

/// Read-only queries over the user collection.
///
/// Holds no state between calls beyond the shared store handle; every
/// result reflects the store at the moment the query runs.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn UserStore>,
    timeout: Option<Duration>,
    skip_malformed: bool,
}

impl QueryService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            timeout: None,
            skip_malformed: true,
        }
    }

    /// Deadline applied to each query, including cursor iteration.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether `list_all` drops undecodable documents (`true`) or fails the
    /// whole request with [`Error::Decode`] (`false`).
    pub fn with_skip_malformed(mut self, skip_malformed: bool) -> Self {
        self.skip_malformed = skip_malformed;
        self
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    /// Every user in the collection, in the store's natural order.
    pub async fn list_all(&self) -> Result<Vec<UserRecord>> {
        self.bounded(async {
            // The cursor is dropped, and released, on every return path.
            let mut cursor = self.store.find(doc! {}).await?;
            let mut users = Vec::new();

            while let Some(document) = cursor.try_next().await? {
                match decode(document) {
                    Ok(user) => users.push(user),
                    Err(e) if self.skip_malformed => {
                        tracing::warn!("Skipping malformed user document: {}", e);
                    }
                    Err(e) => return Err(e),
                }
            }

            Ok(users)
        })
        .await
    }

    /// The first user whose `user_id` equals `external_id`.
    ///
    /// `user_id` is not unique in the collection; when several documents
    /// share it, the store's first match in natural order is returned.
    pub async fn get_by_external_id(&self, external_id: &str) -> Result<UserRecord> {
        self.bounded(async {
            let filter = doc! { EXTERNAL_ID_FIELD: external_id };
            match self.store.find_one(filter).await? {
                Some(document) => decode(document),
                None => Err(Error::NotFound(external_id.to_string())),
            }
        })
        .await
    }

    async fn bounded<T>(&self, query: impl Future<Output = Result<T>>) -> Result<T> {
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, query).await.map_err(|_| {
                Error::StoreUnavailable(format!("query timed out after {:?}", timeout))
            })?,
            None => query.await,
        }
    }
}
