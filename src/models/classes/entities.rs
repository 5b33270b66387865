use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 班级
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Class {
    pub id: i64,
    pub name: String,
    pub unit_id: i64,
    pub created_at: DateTime<Utc>,
}
