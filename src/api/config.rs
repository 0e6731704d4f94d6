//! Active-corpus configuration / 当前语料配置

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_cookies::Cookies;

use praisesongs_backend::utils::is_safe_corpus_filename;

use super::ApiResponse;
use crate::auth::admin_from_cookies;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub active_file: String,
}

/// GET /api/config - 查询当前语料
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        active_file: state.active_corpus(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SetConfigRequest {
    pub active_file: String,
}

/// POST /api/config - 切换当前语料
pub async fn set_config(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(req): Json<SetConfigRequest>,
) -> Result<Json<ApiResponse<ConfigResponse>>, (StatusCode, Json<Value>)> {
    if admin_from_cookies(&cookies, &state.config.admin).is_none() {
        return Err((StatusCode::UNAUTHORIZED, Json(json!({"error": "未登录"}))));
    }

    if !is_safe_corpus_filename(&req.active_file) {
        return Ok(Json(ApiResponse::error("无效的文件名")));
    }

    // 只允许指向已存在的文件
    let path = state.config.get_data_dir().join(&req.active_file);
    if !path.exists() {
        return Ok(Json(ApiResponse::error("文件不存在")));
    }

    if let Err(e) = state.set_active_corpus(req.active_file.clone()) {
        tracing::error!("failed to persist corpus config: {}", e);
        return Ok(Json(ApiResponse::error("保存配置失败")));
    }

    tracing::info!("active corpus switched to {}", req.active_file);
    Ok(Json(ApiResponse::success(ConfigResponse {
        active_file: req.active_file,
    })))
}
