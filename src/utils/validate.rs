use crate::errors::{AutogradeError, Result};

/// 必填字符串字段，空白视为缺失
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AutogradeError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// 解析十进制 ID
pub fn parse_id(field: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| AutogradeError::validation(format!("invalid {field}: {value}")))
}
