//! Admin login / 管理员登录

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_cookies::{Cookie, Cookies};

use crate::auth::{admin_from_cookies, issue_token, ADMIN_COOKIE_NAME};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let admin = &state.config.admin;

    // 用户名与密码错误返回同一种提示
    if req.username != admin.username {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "账号或密码错误"})),
        ));
    }

    let valid = bcrypt::verify(&req.password, &admin.password_hash)
        .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "服务器错误"}))))?;

    if !valid {
        tracing::warn!("failed admin login attempt for {}", req.username);
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "账号或密码错误"})),
        ));
    }

    let token = issue_token(admin)
        .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "服务器错误"}))))?;

    let mut cookie = Cookie::new(ADMIN_COOKIE_NAME, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.add(cookie);

    Ok(Json(json!({
        "user": { "username": admin.username, "role": "admin" }
    })))
}

pub async fn logout(cookies: Cookies) -> Json<Value> {
    // 必须设置相同的 path 才能正确删除 cookie
    let mut removal_cookie = Cookie::new(ADMIN_COOKIE_NAME, "");
    removal_cookie.set_path("/");
    cookies.remove(removal_cookie);

    Json(json!({"message": "已退出登录"}))
}

/// 检查当前登录状态；该接口不会返回401，总是返回认证信息
pub async fn check(State(state): State<Arc<AppState>>, cookies: Cookies) -> Json<Value> {
    match admin_from_cookies(&cookies, &state.config.admin) {
        Some(claims) => Json(json!({
            "authenticated": true,
            "user": { "username": claims.username, "role": claims.role }
        })),
        None => Json(json!({ "authenticated": false, "user": null })),
    }
}
