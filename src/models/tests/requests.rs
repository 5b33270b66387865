use serde::Deserialize;

// 测试用例创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestRequest {
    pub name: String,
    #[serde(default)]
    pub storage_path: String,
    pub assignment_id: i64,
}
