use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 学生提交
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: i64,
    pub student_id: String,
    pub assignment_id: i64,
    pub created_at: DateTime<Utc>,
}
