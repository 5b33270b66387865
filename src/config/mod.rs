//! 配置管理
//!
//! 配置来源优先级（由低到高）：内置默认值、`config.toml`、`config.<APP_ENV>.toml`、
//! `AUTOGRADE__*` 环境变量、常用环境变量、命令行参数。

mod cli;
mod r#impl;
mod structs;

pub use cli::Cli;
pub use structs::*;
