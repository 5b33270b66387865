use serde::Deserialize;

// 提交创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionRequest {
    pub student_id: String,
    pub assignment_id: i64,
}
