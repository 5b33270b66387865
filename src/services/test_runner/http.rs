use std::time::Duration;

use reqwest::StatusCode;

use super::{RunTestPayload, TestExecutor};
use crate::config::TestExecutorConfig;
use crate::errors::{AutogradeError, Result};

/// 通过 HTTP POST 调用执行服务，只有 200 视为成功
pub struct HttpTestExecutor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTestExecutor {
    pub fn new(config: &TestExecutorConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if config.timeout > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout));
        }
        let client = builder
            .build()
            .map_err(|e| AutogradeError::configuration(format!("HTTP 客户端创建失败: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait::async_trait]
impl TestExecutor for HttpTestExecutor {
    async fn execute(&self, payload: &RunTestPayload) -> Result<()> {
        let response = self.client.post(&self.endpoint).json(payload).send().await?;

        if response.status() != StatusCode::OK {
            return Err(AutogradeError::upstream(format!(
                "error running test: executor returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
