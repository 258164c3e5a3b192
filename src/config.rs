use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub app_host: String,
    pub app_port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mongodb_uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://127.0.0.1:27017/recipebook-dev".into());
        let app_host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let app_port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(3000);
        Ok(Self {
            mongodb_uri,
            app_host,
            app_port,
        })
    }
}
