//! Corpus file management / 语料文件管理
//!
//! Corpus files are published artifacts: uploads never overwrite an
//! existing file, and the active corpus can not be deleted out from under
//! the site.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_cookies::Cookies;

use praisesongs_backend::models::CorpusFileInfo;
use praisesongs_backend::search::store::parse_record;
use praisesongs_backend::utils::{
    is_safe_corpus_filename, timestamped_corpus_filename, unique_corpus_filename,
};

use super::ApiResponse;
use crate::auth::admin_from_cookies;
use crate::state::AppState;

/// Gate an admin route / 管理员路由门禁
fn require_admin(
    state: &AppState,
    cookies: &Cookies,
) -> Result<(), (StatusCode, Json<Value>)> {
    match admin_from_cookies(cookies, &state.config.admin) {
        Some(_) => Ok(()),
        None => Err((StatusCode::UNAUTHORIZED, Json(json!({"error": "未登录"})))),
    }
}

/// GET /api/admin/files - 列出语料文件
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<Json<ApiResponse<Vec<CorpusFileInfo>>>, (StatusCode, Json<Value>)> {
    require_admin(&state, &cookies)?;

    let data_dir = state.config.get_data_dir();
    let mut entries = match tokio::fs::read_dir(&data_dir).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("failed to read data dir {:?}: {}", data_dir, e);
            return Ok(Json(ApiResponse::error("无法读取数据目录")));
        }
    };

    let mut files = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name().to_string_lossy().to_string();
        // 指针文件不是语料
        if !name.ends_with(".json") || name == "config.json" {
            continue;
        }
        if let Ok(meta) = entry.metadata().await {
            let modified = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0);
            files.push(CorpusFileInfo {
                name,
                size: meta.len(),
                modified,
            });
        }
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(ApiResponse::success(files)))
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub song_count: usize,
}

/// POST /api/admin/upload - 上传新语料
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, (StatusCode, Json<Value>)> {
    require_admin(&state, &cookies)?;

    // 取出上传的文件字段
    let mut filename = String::new();
    let mut content: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| (StatusCode::BAD_REQUEST, Json(json!({"error": "无效的上传数据"}))))?
    {
        if field.name() == Some("file") {
            filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(|_| {
                (StatusCode::BAD_REQUEST, Json(json!({"error": "读取上传内容失败"})))
            })?;
            content = Some(bytes.to_vec());
        }
    }

    let content = match content {
        Some(content) => content,
        None => return Ok(Json(ApiResponse::error("缺少文件"))),
    };

    if !is_safe_corpus_filename(&filename) {
        return Ok(Json(ApiResponse::error("只接受 .json 文件")));
    }
    if content.len() > state.config.max_upload_bytes() {
        return Ok(Json(ApiResponse::error("文件超过大小限制")));
    }

    let song_count = match validate_corpus_document(&content) {
        Ok(count) => count,
        Err(message) => return Ok(Json(ApiResponse::error(&message))),
    };

    // 不覆盖当前语料，也不覆盖任何已发布文件
    let data_dir = state.config.get_data_dir();
    let final_name = if filename == state.active_corpus() {
        timestamped_corpus_filename(&filename)
    } else {
        unique_corpus_filename(&data_dir, &filename)
    };

    if let Err(e) = tokio::fs::write(data_dir.join(&final_name), &content).await {
        tracing::error!("failed to write corpus {}: {}", final_name, e);
        return Ok(Json(ApiResponse::error("保存文件失败")));
    }

    tracing::info!("corpus {} uploaded: {} songs", final_name, song_count);
    Ok(Json(ApiResponse::success(UploadResponse {
        filename: final_name,
        song_count,
    })))
}

/// Check an uploaded document record by record / 逐条校验上传的语料
fn validate_corpus_document(content: &[u8]) -> Result<usize, String> {
    let document: Value =
        serde_json::from_slice(content).map_err(|_| "文件不是有效的 JSON".to_string())?;

    let records = match document {
        Value::Array(records) => records,
        _ => return Err("文件必须是歌曲数组".to_string()),
    };
    if records.is_empty() {
        return Err("文件不能为空".to_string());
    }

    let total = records.len();
    for (position, record) in records.into_iter().enumerate() {
        parse_record(record).map_err(|e| format!("第 {} 条歌曲记录无效: {}", position, e))?;
    }
    Ok(total)
}

/// POST /api/admin/files/:filename/delete - 删除语料文件
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Path(filename): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<Value>)> {
    require_admin(&state, &cookies)?;

    if !is_safe_corpus_filename(&filename) || filename == "config.json" {
        return Ok(Json(ApiResponse::error("无效的文件名")));
    }
    if filename == state.active_corpus() {
        return Ok(Json(ApiResponse::error("不能删除当前使用中的语料")));
    }

    let path = state.config.get_data_dir().join(&filename);
    if !path.exists() {
        return Ok(Json(ApiResponse::error("文件不存在")));
    }

    match tokio::fs::remove_file(&path).await {
        Ok(()) => {
            tracing::info!("corpus {} deleted", filename);
            Ok(Json(ApiResponse::success(())))
        }
        Err(e) => {
            tracing::error!("failed to delete corpus {}: {}", filename, e);
            Ok(Json(ApiResponse::error("删除文件失败")))
        }
    }
}

/// GET /api/data/:filename - 原样提供语料文件
pub async fn serve_corpus(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if !is_safe_corpus_filename(&filename) {
        return Err((StatusCode::BAD_REQUEST, Json(json!({"error": "无效的文件名"}))));
    }

    let path = state.config.get_data_dir().join(&filename);
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|_| (StatusCode::NOT_FOUND, Json(json!({"error": "文件不存在"}))))?;

    let document: Value = serde_json::from_str(&content).map_err(|e| {
        tracing::error!("corpus {} is not valid JSON: {}", filename, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "文件内容无效"})),
        )
    })?;

    Ok(Json(document))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_corpus_document() {
        let ok = br#"[{"id":"1","title":"t","cn_lines":[],"en_lines":[]}]"#;
        assert_eq!(validate_corpus_document(ok).unwrap(), 1);

        assert!(validate_corpus_document(b"not json").is_err());
        assert!(validate_corpus_document(br#"{"id":"1"}"#).is_err());
        assert!(validate_corpus_document(b"[]").is_err());

        // 第二条缺少标题
        let bad = br#"[
            {"id":"1","title":"t","cn_lines":[],"en_lines":[]},
            {"id":"2","cn_lines":[],"en_lines":[]}
        ]"#;
        let err = validate_corpus_document(bad).unwrap_err();
        assert!(err.contains("1"));
    }
}
