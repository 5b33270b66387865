use serde::Deserialize;

// 作业创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub name: String,
    pub due_date: i64, // Unix 时间戳（秒）
    pub class_id: i64,
}
