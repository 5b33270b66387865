use actix_cors::Cors;
use actix_web::http::Method;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use clap::Parser;
use dotenv::dotenv;
use human_panic::setup_panic;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, error, warn};

// 从 lib.rs 导入模块
use rust_autograde::config::{AppConfig, Cli, CorsConfig};
use rust_autograde::routes;
use rust_autograde::runtime::lifetime;

/// 按配置构造 CORS：精确来源与正则来源均允许携带 Cookie
fn build_cors(config: &CorsConfig, patterns: Arc<Vec<Regex>>) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_any_header()
        .supports_credentials()
        .max_age(config.max_age);

    for origin in &config.allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    cors.allowed_origin_fn(move |origin, _req_head| {
        origin
            .to_str()
            .map(|origin| patterns.iter().any(|re| re.is_match(origin)))
            .unwrap_or(false)
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    // 记录程序启动时间
    let app_start_time = chrono::Utc::now();

    // 启动前预处理 //

    // 初始化配置
    setup_panic!();
    let cli = Cli::parse();
    if let Err(e) = AppConfig::init(&cli) {
        eprintln!("Failed to initialize configuration: {e}");
        std::process::exit(1);
    }
    let config = AppConfig::get();

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    // 打印信息
    warn!(
        "Starting pre-startup processing...
        Project: {}
        Version: {}
        Authors: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS")
    );

    let startup = match lifetime::startup::prepare_server_startup().await {
        Ok(startup) => startup,
        Err(e) => {
            error!("Server startup failed: {}", e);
            std::process::exit(1);
        }
    };

    // 预编译 CORS 来源正则
    let mut patterns = Vec::with_capacity(config.cors.allowed_origin_patterns.len());
    for pattern in &config.cors.allowed_origin_patterns {
        match Regex::new(pattern) {
            Ok(re) => patterns.push(re),
            Err(e) => warn!("Ignoring invalid CORS origin pattern {}: {}", pattern, e),
        }
    }
    let patterns = Arc::new(patterns);

    // 输出预处理时间
    debug!(
        "Pre-startup processing completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(app_start_time)
            .num_milliseconds()
    );

    // 预处理完成 //

    warn!("Using {} CPU cores for the server", config.server.workers);

    let context = web::Data::new(startup.context);
    let schema = web::Data::new(startup.schema);

    // Start the HTTP server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&config.cors, patterns.clone()))
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add((
                        "Keep-Alive",
                        format!("timeout={}, max=1000", config.server.timeouts.keep_alive),
                    ))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .app_data(context.clone())
            .app_data(schema.clone())
            .app_data(web::PayloadConfig::new(
                config.server.limits.max_payload_size,
            )) // 设置最大请求体大小
            .configure(routes::configure_graphql_routes) // 配置 GraphQL 路由
    })
    .keep_alive(std::time::Duration::from_secs(
        config.server.timeouts.keep_alive,
    )) // 启用长连接
    .client_request_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_request,
    )) // 客户端超时
    .client_disconnect_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_disconnect,
    )) // 断连超时
    .workers(config.server.workers);

    let bind_address = config.server_bind_address();
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
