use axum::Json;
use serde_json::{json, Value};

/// GET /api/health - 健康检查
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "双语赞美诗服务运行正常",
        "version": env!("CARGO_PKG_VERSION"),
        "build_time": env!("BUILD_TIME"),
    }))
}
