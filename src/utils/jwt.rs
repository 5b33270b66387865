use crate::config::JwtConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (用户邮箱)
    pub exp: usize,  // Expiration time (时间戳)
    pub iat: usize,  // Issued at (签发时间)
}

/// HS256 令牌签发与校验
#[derive(Clone)]
pub struct JwtUtils {
    secret: String,
    token_expiry: chrono::Duration,
    cookie_name: String,
    secure_cookie: bool,
}

impl JwtUtils {
    pub fn new(config: &JwtConfig, secure_cookie: bool) -> Self {
        Self {
            secret: config.secret.clone(),
            token_expiry: chrono::Duration::hours(config.token_expiry),
            cookie_name: config.cookie_name.clone(),
            secure_cookie,
        }
    }

    // 生成以邮箱为 subject 的 Token
    pub fn generate_token(&self, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + self.token_expiry;

        let claims = Claims {
            sub: email.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());
        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
    }

    // 验证 JWT token，只接受 HS256
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    /// 创建 Token Cookie
    pub fn create_token_cookie(&self, token: &str) -> Cookie<'static> {
        Cookie::build(self.cookie_name.clone(), token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(
                self.token_expiry.num_seconds(),
            ))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(self.secure_cookie) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 从请求中提取 Token
    pub fn extract_token_from_cookie(&self, req: &actix_web::dev::ServiceRequest) -> Option<String> {
        req.cookie(&self.cookie_name)
            .map(|cookie| cookie.value().to_string())
    }
}
