use serde::Deserialize;

// 单元创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUnitRequest {
    pub name: String,
}
