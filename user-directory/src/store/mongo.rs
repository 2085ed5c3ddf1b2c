//! MongoDB store implementation.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

use super::{DocumentCursor, UserStore};
use crate::config::StoreConfig;
use crate::error::{Error, Result};

/// User store backed by a MongoDB collection.
///
/// The driver's `Client` pools connections internally; one instance is
/// shared by every request.
pub struct MongoUserStore {
    client: Client,
    database: String,
    collection: Collection<Document>,
}

impl MongoUserStore {
    /// Build a client from the configured connection string.
    ///
    /// The driver connects lazily, so this only fails on a malformed URI or
    /// invalid options. Use [`UserStore::ping`] to check reachability.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some(config.app_name.clone());
        options.server_selection_timeout =
            Some(Duration::from_secs(config.server_selection_timeout_secs));

        let client = Client::with_options(options)?;
        let collection = client
            .database(&config.database)
            .collection::<Document>(&config.collection);

        Ok(Self {
            client,
            database: config.database.clone(),
            collection,
        })
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }

    async fn find(&self, filter: Document) -> Result<DocumentCursor> {
        let cursor = self.collection.find(filter, None).await?;
        Ok(cursor.map_err(Error::from).boxed())
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>> {
        Ok(self.collection.find_one(filter, None).await?)
    }
}
