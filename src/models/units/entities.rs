use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::classes::entities::Class;

// 单元（课程）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Unit {
    pub id: i64,
    pub name: String,
    // 仅 get_unit_with_classes 预加载时填充
    pub classes: Vec<Class>,
    pub created_at: DateTime<Utc>,
}
