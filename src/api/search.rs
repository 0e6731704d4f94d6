//! Search and song lookup / 搜索与歌曲查询

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use praisesongs_backend::models::IndexedSong;
use praisesongs_backend::search::DEFAULT_SEARCH_LIMIT;

use super::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<IndexedSong>,
    pub total: usize,
}

/// POST /api/search - 在当前语料中搜索
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Json<ApiResponse<SearchResponse>> {
    let corpus_id = state.active_corpus();
    let limit = if req.limit == 0 {
        state.config.search.default_limit
    } else {
        req.limit
    };

    let results = state.engine.search(&req.query, &corpus_id, limit).await;
    let total = results.len();
    Json(ApiResponse::success(SearchResponse { results, total }))
}

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// GET /api/songs - 按语料顺序浏览
pub async fn list_songs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BrowseQuery>,
) -> Json<ApiResponse<SearchResponse>> {
    let corpus_id = state.active_corpus();
    let results = state.engine.search("", &corpus_id, params.limit).await;
    let total = results.len();
    Json(ApiResponse::success(SearchResponse { results, total }))
}

/// GET /api/songs/:id - 按编号查询单首歌曲
pub async fn get_song(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ApiResponse<IndexedSong>> {
    let corpus_id = state.active_corpus();
    match state.engine.song_by_id(&id, &corpus_id).await {
        Some(song) => Json(ApiResponse::success(song)),
        None => Json(ApiResponse::error("歌曲不存在")),
    }
}
