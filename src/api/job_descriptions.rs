use crate::error::AppResult;
use crate::infrastructure::ApiClient;
use crate::models::{JobDescription, JobDescriptionData};

pub async fn list_job_descriptions(client: &ApiClient) -> AppResult<Vec<JobDescription>> {
    client.get("/job-descriptions").await
}

pub async fn add_job_description(
    client: &ApiClient,
    data: &JobDescriptionData,
) -> AppResult<JobDescription> {
    client.post("/job-descriptions", data).await
}

pub async fn update_job_description(
    client: &ApiClient,
    id: &str,
    data: &JobDescriptionData,
) -> AppResult<JobDescription> {
    client.put(&format!("/job-descriptions/{}", id), data).await
}

pub async fn delete_job_description(client: &ApiClient, id: &str) -> AppResult<()> {
    client.delete(&format!("/job-descriptions/{}", id)).await
}
