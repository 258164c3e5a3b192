use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::{MemoryRecipeStore, MongoRecipeStore, RecipeStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store =
            Arc::new(MongoRecipeStore::connect(&config.mongodb_uri).await?) as Arc<dyn RecipeStore>;
        Ok(Self { store, config })
    }

    pub fn from_parts(store: Arc<dyn RecipeStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            mongodb_uri: "mongodb://127.0.0.1:27017/recipebook-test".into(),
            app_host: "127.0.0.1".into(),
            app_port: 0,
        });
        Self {
            store: Arc::new(MemoryRecipeStore::default()),
            config,
        }
    }
}
