use crate::error::AppResult;
use crate::infrastructure::ApiClient;
use crate::models::{ApiKey, ApiKeyUpdate, NewApiKey};

pub async fn list_api_keys(client: &ApiClient) -> AppResult<Vec<ApiKey>> {
    client.get("/api-keys").await
}

pub async fn add_api_key(client: &ApiClient, key: &NewApiKey) -> AppResult<ApiKey> {
    client.post("/api-keys", key).await
}

pub async fn update_api_key(client: &ApiClient, id: &str, update: &ApiKeyUpdate) -> AppResult<ApiKey> {
    client.put(&format!("/api-keys/{}", id), update).await
}

pub async fn delete_api_key(client: &ApiClient, id: &str) -> AppResult<()> {
    client.delete(&format!("/api-keys/{}", id)).await
}
