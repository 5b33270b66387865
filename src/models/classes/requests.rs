use serde::Deserialize;

// 班级创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub unit_id: i64,
}
