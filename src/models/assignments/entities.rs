use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 作业
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub id: i64,
    pub name: String,
    pub due_date: DateTime<Utc>,
    pub class_id: i64,
    pub created_at: DateTime<Utc>,
}
