//! Admin session tokens / 管理员会话令牌
//!
//! Stateless signed tokens instead of a session table: the cookie value is
//! `base64(claims).hex(hmac-sha256)`, signed with the secret generated into
//! config.json on first run. Verification checks signature, role and expiry.

use base64::prelude::*;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tower_cookies::Cookies;

use praisesongs_backend::config::AdminConfig;

type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying the admin token / 存放管理员令牌的Cookie
pub const ADMIN_COOKIE_NAME: &str = "admin_token";

/// Signed token claims / 令牌声明
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminClaims {
    pub username: String,
    pub role: String,
    pub expires_at: i64,
}

/// Issue a token for a freshly authenticated admin / 为登录成功的管理员签发令牌
pub fn issue_token(admin: &AdminConfig) -> Result<String, String> {
    let claims = AdminClaims {
        username: admin.username.clone(),
        role: "admin".to_string(),
        expires_at: Utc::now().timestamp() + admin.session_hours * 3600,
    };

    let payload =
        BASE64_STANDARD.encode(serde_json::to_vec(&claims).map_err(|e| e.to_string())?);
    let signature = sign(&payload, &admin.token_secret)?;
    Ok(format!("{}.{}", payload, signature))
}

/// Verify a token and return its claims / 校验令牌并返回声明
///
/// Any malformed, tampered, mis-roled or expired token is simply invalid;
/// callers never learn which check failed.
pub fn verify_token(token: &str, admin: &AdminConfig) -> Option<AdminClaims> {
    let (payload, signature) = token.split_once('.')?;

    let mut mac = HmacSha256::new_from_slice(admin.token_secret.as_bytes()).ok()?;
    mac.update(payload.as_bytes());
    let signature = hex::decode(signature).ok()?;
    mac.verify_slice(&signature).ok()?;

    let claims: AdminClaims =
        serde_json::from_slice(&BASE64_STANDARD.decode(payload).ok()?).ok()?;

    if claims.role != "admin" || claims.expires_at <= Utc::now().timestamp() {
        return None;
    }
    Some(claims)
}

/// Extract and verify the admin cookie / 从Cookie中提取并校验管理员身份
pub fn admin_from_cookies(cookies: &Cookies, admin: &AdminConfig) -> Option<AdminClaims> {
    let cookie = cookies.get(ADMIN_COOKIE_NAME)?;
    verify_token(cookie.value(), admin)
}

fn sign(payload: &str, secret: &str) -> Result<String, String> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| e.to_string())?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_admin() -> AdminConfig {
        AdminConfig {
            username: "admin".to_string(),
            password_hash: String::new(),
            token_secret: "unit-test-secret".to_string(),
            session_hours: 24,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let admin = test_admin();
        let token = issue_token(&admin).unwrap();
        let claims = verify_token(&token, &admin).unwrap();
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, "admin");
        assert!(claims.expires_at > Utc::now().timestamp());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let admin = test_admin();
        let token = issue_token(&admin).unwrap();

        // 改动负载
        let mut tampered = token.clone();
        tampered.replace_range(0..1, "x");
        assert!(verify_token(&tampered, &admin).is_none());

        // 改动签名
        let mut bad_sig = token.clone();
        bad_sig.pop();
        bad_sig.push(if token.ends_with('0') { '1' } else { '0' });
        assert!(verify_token(&bad_sig, &admin).is_none());

        // 缺少分隔符
        assert!(verify_token("nodotatall", &admin).is_none());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let admin = test_admin();
        let token = issue_token(&admin).unwrap();

        let mut other = test_admin();
        other.token_secret = "another-secret".to_string();
        assert!(verify_token(&token, &other).is_none());
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut admin = test_admin();
        admin.session_hours = -1;
        let token = issue_token(&admin).unwrap();
        assert!(verify_token(&token, &admin).is_none());
    }
}
