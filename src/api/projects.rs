use crate::error::AppResult;
use crate::infrastructure::ApiClient;
use crate::models::{Project, ProjectData};

pub async fn list_projects(client: &ApiClient) -> AppResult<Vec<Project>> {
    client.get("/projects").await
}

pub async fn add_project(client: &ApiClient, data: &ProjectData) -> AppResult<Project> {
    client.post("/projects", data).await
}

pub async fn update_project(client: &ApiClient, id: &str, data: &ProjectData) -> AppResult<Project> {
    client.put(&format!("/projects/{}", id), data).await
}

pub async fn delete_project(client: &ApiClient, id: &str) -> AppResult<()> {
    client.delete(&format!("/projects/{}", id)).await
}
