use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::{AppConfig, Cli};

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 内置默认值
            .set_default("app.system_name", "autograde")?
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .set_default("server.workers", 0_i64)?
            .set_default("server.max_workers", 16_i64)?
            .set_default("server.timeouts.client_request", 5000_i64)?
            .set_default("server.timeouts.client_disconnect", 1000_i64)?
            .set_default("server.timeouts.keep_alive", 30_i64)?
            .set_default("server.limits.max_payload_size", 1_048_576_i64)?
            .set_default("jwt.secret", "")?
            .set_default("jwt.token_expiry", 168_i64)?
            .set_default("jwt.cookie_name", "token")?
            .set_default("argon2.memory_cost", i64::from(argon2::Params::DEFAULT_M_COST))?
            .set_default("argon2.time_cost", i64::from(argon2::Params::DEFAULT_T_COST))?
            .set_default("argon2.parallelism", i64::from(argon2::Params::DEFAULT_P_COST))?
            .set_default("database.url", "autograde.db")?
            .set_default("database.pool_size", 5_i64)?
            .set_default("database.timeout", 10_i64)?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .set_default(
                "cors.allowed_origin_patterns",
                vec![r"^https://([a-z0-9-]+\.)*example\.com$"],
            )?
            .set_default("cors.max_age", 3600_i64)?
            .set_default("test_executor.endpoint", "http://localhost:8080/")?
            .set_default("test_executor.timeout", 0_i64)?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 环境变量覆盖，如 AUTOGRADE__SERVER__PORT
            .add_source(
                Environment::with_prefix("AUTOGRADE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            // 命令行参数（clap 已合并对应环境变量）优先级最高
            .set_override_option("jwt.secret", cli.jwt_secret.clone())?
            .set_override_option("server.port", cli.port.map(i64::from))?
            .set_override_option("database.url", cli.db_path.clone())?
            .set_override_option(
                "test_executor.endpoint",
                cli.test_executor_endpoint.clone(),
            )?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load(&Cli::default()).unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init(cli: &Cli) -> Result<(), ConfigError> {
        let config = Self::load(cli)?;
        config.validate()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 校验启动必需项
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "The JWT secret is required (--jwt-secret or JWT_SECRET)".to_string(),
            ));
        }
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
