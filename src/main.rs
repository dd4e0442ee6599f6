use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use gameshop_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 创建服务
    let auth_service = AuthService::new(pool.clone());
    let game_service = GameService::new(pool.clone());
    let promotion_service = PromotionService::new(pool.clone());
    let cart_service = CartService::new(pool.clone());
    let checkout_service = CheckoutService::new(pool.clone());
    let wallet_service = WalletService::new(pool.clone());

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(game_service.clone()))
            .app_data(web::Data::new(promotion_service.clone()))
            .app_data(web::Data::new(cart_service.clone()))
            .app_data(web::Data::new(checkout_service.clone()))
            .app_data(web::Data::new(wallet_service.clone()))
            .configure(swagger_config)
            .configure(handlers::user_config)
            .configure(handlers::game_config)
            .configure(handlers::promotion_config)
            .configure(handlers::cart_config)
            .configure(handlers::wallet_config)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
