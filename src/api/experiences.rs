use crate::error::AppResult;
use crate::infrastructure::ApiClient;
use crate::models::{Experience, ExperienceData};

pub async fn list_experiences(client: &ApiClient) -> AppResult<Vec<Experience>> {
    client.get("/experiences").await
}

pub async fn add_experience(client: &ApiClient, data: &ExperienceData) -> AppResult<Experience> {
    client.post("/experiences", data).await
}

pub async fn update_experience(
    client: &ApiClient,
    id: &str,
    data: &ExperienceData,
) -> AppResult<Experience> {
    client.put(&format!("/experiences/{}", id), data).await
}

pub async fn delete_experience(client: &ApiClient, id: &str) -> AppResult<()> {
    client.delete(&format!("/experiences/{}", id)).await
}
