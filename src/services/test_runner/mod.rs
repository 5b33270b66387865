//! 自动化测试执行
//!
//! 按 Test → Assignment → Class → Unit 组装对象存储键，交给外部执行服务。

mod http;

pub use http::HttpTestExecutor;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::services::lookup;
use crate::storage::Storage;

/// 发送给执行服务的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTestPayload {
    pub s3_key_test_file: String,
    pub s3_key_project_file: String,
}

impl RunTestPayload {
    pub fn new(unit_name: &str, assignment_name: &str, test_id: i64) -> Self {
        Self {
            s3_key_test_file: format!("{unit_name}/{assignment_name}/Tests/{test_id}/Test.java"),
            s3_key_project_file: format!("{unit_name}/{assignment_name}/Projects/"),
        }
    }
}

/// 外部测试执行服务
#[async_trait::async_trait]
pub trait TestExecutor: Send + Sync {
    async fn execute(&self, payload: &RunTestPayload) -> Result<()>;
}

pub struct TestRunService;

impl TestRunService {
    /// 运行单个测试，成功返回 true
    pub async fn run_test(
        storage: &dyn Storage,
        executor: &dyn TestExecutor,
        test_id: i64,
    ) -> Result<bool> {
        let test = lookup::test(storage, test_id).await?;
        let assignment = lookup::assignment(storage, test.assignment_id).await?;
        let class = lookup::class(storage, assignment.class_id).await?;
        let unit = lookup::unit(storage, class.unit_id, false).await?;

        let payload = RunTestPayload::new(&unit.name, &assignment.name, test.id);
        tracing::info!("Running test {} ({})", test.id, payload.s3_key_test_file);

        executor.execute(&payload).await.inspect_err(|e| {
            tracing::error!("Test {} failed to run: {}", test.id, e);
        })?;
        Ok(true)
    }
}
