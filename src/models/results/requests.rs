use serde::Deserialize;

// 成绩创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResultRequest {
    pub score: f64,
    pub submission_id: i64,
}
