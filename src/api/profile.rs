//! 个人资料和头像 API

use crate::error::AppResult;
use crate::infrastructure::ApiClient;
use crate::models::{Photo, Profile, ProfileData, ProfileSaved};
use std::path::Path;

use super::export_import::file_part;

pub async fn get_profile(client: &ApiClient) -> AppResult<Profile> {
    client.get("/profile").await
}

pub async fn save_profile(client: &ApiClient, data: &ProfileData) -> AppResult<ProfileSaved> {
    client.put("/profile", data).await
}

/// 上传头像（multipart 字段名 `photo`）
pub async fn upload_photo(client: &ApiClient, path: &Path) -> AppResult<Photo> {
    let form = reqwest::multipart::Form::new().part("photo", file_part(path).await?);
    client.post_multipart("/profile/photos", form).await
}

/// 使用内存中的图片数据上传头像
pub async fn upload_photo_bytes(
    client: &ApiClient,
    file_name: &str,
    bytes: Vec<u8>,
) -> AppResult<Photo> {
    let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
    let form = reqwest::multipart::Form::new().part("photo", part);
    client.post_multipart("/profile/photos", form).await
}

pub async fn delete_photo(client: &ApiClient, photo_id: &str) -> AppResult<()> {
    client.delete(&format!("/profile/photos/{}", photo_id)).await
}

/// 设为主头像
pub async fn set_main_photo(client: &ApiClient, photo_id: &str) -> AppResult<()> {
    client
        .put_empty(&format!("/profile/photos/{}/select-main", photo_id))
        .await
}
