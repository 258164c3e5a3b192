use anyhow::Context;
use axum::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Bson, Document},
    options::{ClientOptions, FindOneAndUpdateOptions, ReturnDocument},
    Client, Collection,
};
use serde_json::{Map, Value};
use std::sync::Mutex;

#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Persist a new document with exactly the supplied fields plus a
    /// generated `_id`; returns the created document.
    async fn insert(&self, fields: Map<String, Value>) -> anyhow::Result<Value>;
    async fn find_all(&self) -> anyhow::Result<Vec<Value>>;
    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Value>>;
    /// Merge the supplied fields into the matching document and return the
    /// updated document, or `None` when the id matches nothing.
    async fn update_by_id(
        &self,
        id: ObjectId,
        changes: Map<String, Value>,
    ) -> anyhow::Result<Option<Value>>;
    async fn delete_by_id(&self, id: ObjectId) -> anyhow::Result<()>;
}

pub struct MongoRecipeStore {
    recipes: Collection<Document>,
}

impl MongoRecipeStore {
    pub async fn connect(uri: &str) -> anyhow::Result<Self> {
        let options = ClientOptions::parse(uri)
            .await
            .context("parse mongodb uri")?;
        let client = Client::with_options(options).context("build mongodb client")?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database("recipebook-dev"));
        db.run_command(doc! { "ping": 1 }, None)
            .await
            .context("connect to mongodb")?;
        tracing::info!(database = %db.name(), "connected to mongodb");
        Ok(Self {
            recipes: db.collection::<Document>("recipes"),
        })
    }
}

fn to_document(fields: Map<String, Value>) -> anyhow::Result<Document> {
    bson::to_document(&fields).context("encode document")
}

/// Clients see the generated id as its 24-char hex form, not as extended JSON.
fn to_json(mut doc: Document) -> Value {
    if let Ok(id) = doc.get_object_id("_id") {
        doc.insert("_id", id.to_hex());
    }
    Bson::Document(doc).into_relaxed_extjson()
}

#[async_trait]
impl RecipeStore for MongoRecipeStore {
    async fn insert(&self, fields: Map<String, Value>) -> anyhow::Result<Value> {
        let mut doc = to_document(fields)?;
        if !doc.contains_key("_id") {
            doc.insert("_id", ObjectId::new());
        }
        self.recipes
            .insert_one(&doc, None)
            .await
            .context("insert recipe")?;
        Ok(to_json(doc))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Value>> {
        let cursor = self
            .recipes
            .find(None, None)
            .await
            .context("find recipes")?;
        let docs: Vec<Document> = cursor.try_collect().await.context("drain recipes cursor")?;
        Ok(docs.into_iter().map(to_json).collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Value>> {
        let doc = self
            .recipes
            .find_one(doc! { "_id": id }, None)
            .await
            .context("find recipe")?;
        Ok(doc.map(to_json))
    }

    async fn update_by_id(
        &self,
        id: ObjectId,
        changes: Map<String, Value>,
    ) -> anyhow::Result<Option<Value>> {
        if changes.is_empty() {
            // the server rejects an empty $set
            return self.find_by_id(id).await;
        }
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let doc = self
            .recipes
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": to_document(changes)? }, options)
            .await
            .context("update recipe")?;
        Ok(doc.map(to_json))
    }

    async fn delete_by_id(&self, id: ObjectId) -> anyhow::Result<()> {
        self.recipes
            .delete_one(doc! { "_id": id }, None)
            .await
            .context("delete recipe")?;
        Ok(())
    }
}

/// In-memory store backing `AppState::fake()`.
#[derive(Default)]
pub struct MemoryRecipeStore {
    recipes: Mutex<Vec<Map<String, Value>>>,
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn insert(&self, mut fields: Map<String, Value>) -> anyhow::Result<Value> {
        fields
            .entry("_id".to_string())
            .or_insert_with(|| Value::String(ObjectId::new().to_hex()));
        self.recipes
            .lock()
            .expect("recipes lock poisoned")
            .push(fields.clone());
        Ok(Value::Object(fields))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Value>> {
        let recipes = self.recipes.lock().expect("recipes lock poisoned");
        Ok(recipes.iter().cloned().map(Value::Object).collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Value>> {
        let hex = id.to_hex();
        let recipes = self.recipes.lock().expect("recipes lock poisoned");
        Ok(recipes
            .iter()
            .find(|r| r.get("_id").and_then(Value::as_str) == Some(hex.as_str()))
            .cloned()
            .map(Value::Object))
    }

    async fn update_by_id(
        &self,
        id: ObjectId,
        changes: Map<String, Value>,
    ) -> anyhow::Result<Option<Value>> {
        let hex = id.to_hex();
        let mut recipes = self.recipes.lock().expect("recipes lock poisoned");
        let Some(recipe) = recipes
            .iter_mut()
            .find(|r| r.get("_id").and_then(Value::as_str) == Some(hex.as_str()))
        else {
            return Ok(None);
        };
        for (key, value) in changes {
            if key != "_id" {
                recipe.insert(key, value);
            }
        }
        Ok(Some(Value::Object(recipe.clone())))
    }

    async fn delete_by_id(&self, id: ObjectId) -> anyhow::Result<()> {
        let hex = id.to_hex();
        let mut recipes = self.recipes.lock().expect("recipes lock poisoned");
        recipes.retain(|r| r.get("_id").and_then(Value::as_str) != Some(hex.as_str()));
        Ok(())
    }
}
