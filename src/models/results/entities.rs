use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 成绩日期展示格式（日/月/年）
pub const RESULT_DATE_FORMAT: &str = "%d/%m/%Y";

// 测试成绩，与提交一一对应
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestResult {
    pub id: i64,
    pub score: f64,
    pub submission_id: i64,
    pub created_at: DateTime<Utc>,
}

impl TestResult {
    /// 成绩记录日期，如 `07/03/2025`
    pub fn date(&self) -> String {
        self.created_at.format(RESULT_DATE_FORMAT).to_string()
    }
}
