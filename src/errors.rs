//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称以及 GraphQL 扩展代码。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - graphql_code() 方法 - 返回写入 GraphQL `extensions.code` 的代码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_autograde_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $gql_code:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum AutogradeError {
            $($variant(String),)*
        }

        impl AutogradeError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AutogradeError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AutogradeError::$variant(_) => $type_name,)*
                }
            }

            /// 获取 GraphQL 错误代码
            pub fn graphql_code(&self) -> &'static str {
                match self {
                    $(AutogradeError::$variant(_) => $gql_code,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AutogradeError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AutogradeError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AutogradeError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_autograde_errors! {
    Configuration("E001", "Configuration Error", "CONFIGURATION_ERROR"),
    DatabaseConnection("E002", "Database Connection Error", "STORAGE_ERROR"),
    DatabaseOperation("E003", "Database Operation Error", "STORAGE_ERROR"),
    Validation("E004", "Validation Error", "VALIDATION_ERROR"),
    NotFound("E005", "Resource Not Found", "NOT_FOUND"),
    AlreadyExists("E006", "Resource Already Exists", "ALREADY_EXISTS"),
    Authentication("E007", "Authentication Error", "UNAUTHENTICATED"),
    Authorization("E008", "Authorization Error", "UNAUTHORIZED"),
    Upstream("E009", "Upstream Service Error", "UPSTREAM_ERROR"),
    Serialization("E010", "Serialization Error", "INTERNAL_ERROR"),
    Token("E011", "Token Error", "INTERNAL_ERROR"),
}

impl AutogradeError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 资源不存在时的统一消息，如 `unit not found`
    pub fn entity_not_found(entity: &str) -> Self {
        AutogradeError::NotFound(format!("{entity} not found"))
    }
}

impl fmt::Display for AutogradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AutogradeError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AutogradeError {
    fn from(err: sea_orm::DbErr) -> Self {
        AutogradeError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AutogradeError {
    fn from(err: serde_json::Error) -> Self {
        AutogradeError::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AutogradeError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AutogradeError::Token(err.to_string())
    }
}

impl From<reqwest::Error> for AutogradeError {
    fn from(err: reqwest::Error) -> Self {
        AutogradeError::Upstream(format!("error running test: {err}"))
    }
}

impl From<config::ConfigError> for AutogradeError {
    fn from(err: config::ConfigError) -> Self {
        AutogradeError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AutogradeError>;
