//! Autograde - 课程作业与自动评测管理后端
//!
//! 基于 Actix Web 与 async-graphql 构建的 GraphQL 服务。
//!
//! # 架构
//! - `config`: 配置管理（命令行、环境变量、配置文件）
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `graphql`: Schema、解析器与批量加载器
//! - `middlewares`: Cookie 令牌认证中间件
//! - `models`: 数据模型定义
//! - `routes`: HTTP 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（认证、测试执行、系统操作）
//! - `storage`: 数据存储层（SeaORM + SQLite）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod graphql;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
