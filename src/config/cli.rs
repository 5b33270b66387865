use clap::Parser;

/// 命令行参数
///
/// 每个参数也可以通过对应的环境变量提供。
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "rust-autograde", version, about)]
pub struct Cli {
    /// JWT 签名密钥（必填）
    #[arg(long = "jwt-secret", env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// 监听端口，默认 8080
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// SQLite 数据库文件路径，默认 autograde.db
    #[arg(long = "db-path", env = "DB_PATH")]
    pub db_path: Option<String>,

    /// 测试执行服务地址，默认 http://localhost:8080/
    #[arg(long = "test-executor-endpoint", env = "TEST_EXECUTOR_ENDPOINT")]
    pub test_executor_endpoint: Option<String>,
}
