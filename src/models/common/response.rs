use serde::{Deserialize, Serialize};

/// 非 GraphQL 响应使用的错误代码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Unauthorized = 1001,
    InternalServerError = 1500,
}

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ApiResponse<()> {
    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_empty_omits_data() {
        let resp = ApiResponse::error_empty(ErrorCode::Unauthorized, "Invalid token");
        let json = serde_json::to_value(&resp).expect("serializable");
        assert_eq!(json["code"], 1001);
        assert_eq!(json["message"], "Invalid token");
        assert!(json.get("data").is_none());
    }
}
