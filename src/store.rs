use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId},
    options::ReturnDocument,
    Client, Collection, Database,
};
use serde::{Deserialize, Serialize};

use crate::{
    errors::StoreError,
    models::{Recipe, RecipeDraft},
};

/// The persistence gateway: five collection operations plus a readiness ping.
///
/// Handlers only see this trait; the concrete store is injected at startup.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn insert(&self, draft: RecipeDraft) -> Result<Recipe, StoreError>;
    async fn find_all(&self) -> Result<Vec<Recipe>, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError>;
    async fn update_by_id(
        &self,
        id: &str,
        draft: RecipeDraft,
    ) -> Result<Option<Recipe>, StoreError>;
    async fn delete_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}

/// A recipe as stored in MongoDB. Identical to [`Recipe`] except that the
/// identifier is a real `ObjectId` rather than its hex rendering.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<chrono::DateTime<chrono::Utc>>,
}

impl RecipeDocument {
    fn from_draft(draft: RecipeDraft) -> Self {
        Self {
            id: None,
            title: draft.title,
            instructions: draft.instructions,
            level: draft.level,
            ingredients: draft.ingredients,
            image: draft.image,
            duration: draft.duration,
            is_archived: draft.is_archived,
            created: draft.created,
        }
    }
}

impl From<RecipeDocument> for Recipe {
    fn from(doc: RecipeDocument) -> Self {
        Recipe {
            id: doc.id.map(|oid| oid.to_hex()),
            title: doc.title,
            instructions: doc.instructions,
            level: doc.level,
            ingredients: doc.ingredients,
            image: doc.image,
            duration: doc.duration,
            is_archived: doc.is_archived,
            created: doc.created,
        }
    }
}

/// MongoDB-backed [`RecipeStore`], a direct pass-through to the collection.
pub struct MongoStore {
    database: Database,
    recipes: Collection<RecipeDocument>,
}

impl MongoStore {
    /// Build the store from a connection string. The driver resolves the
    /// topology lazily, so this succeeds even while the server is down;
    /// requests arriving before it is reachable fail at the persistence call.
    pub async fn connect(uri: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database("recipes"));
        let recipes = database.collection("recipes");
        Ok(Self { database, recipes })
    }

    fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
        ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
    }
}

#[async_trait]
impl RecipeStore for MongoStore {
    async fn insert(&self, draft: RecipeDraft) -> Result<Recipe, StoreError> {
        let inserted = self
            .recipes
            .insert_one(RecipeDocument::from_draft(draft.clone()))
            .await?;
        let id = inserted
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Unknown(anyhow::anyhow!("insert returned a non-ObjectId")))?;
        Ok(draft.into_recipe(id.to_hex()))
    }

    async fn find_all(&self) -> Result<Vec<Recipe>, StoreError> {
        let cursor = self.recipes.find(doc! {}).await?;
        let documents: Vec<RecipeDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let oid = Self::parse_id(id)?;
        let found = self.recipes.find_one(doc! { "_id": oid }).await?;
        Ok(found.map(Into::into))
    }

    async fn update_by_id(
        &self,
        id: &str,
        draft: RecipeDraft,
    ) -> Result<Option<Recipe>, StoreError> {
        let oid = Self::parse_id(id)?;
        let changes = bson::to_document(&draft).map_err(anyhow::Error::from)?;
        // The server rejects an empty $set, and there is nothing to change.
        let updated = if changes.is_empty() {
            self.recipes.find_one(doc! { "_id": oid }).await?
        } else {
            self.recipes
                .find_one_and_update(doc! { "_id": oid }, doc! { "$set": changes })
                .return_document(ReturnDocument::After)
                .await?
        };
        Ok(updated.map(Into::into))
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let oid = Self::parse_id(id)?;
        let deleted = self.recipes.find_one_and_delete(doc! { "_id": oid }).await?;
        Ok(deleted.map(Into::into))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
