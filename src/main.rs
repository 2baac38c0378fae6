use sqlx::MySqlPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use yuansfer_gateway::api::{self, AppState};
use yuansfer_gateway::application::{
    CheckoutService, CreditCardAdapter, EventBus, PaymentMethodRegistry,
};
use yuansfer_gateway::domain::{DomainEvent, PaymentEvent};
use yuansfer_gateway::infrastructure::{
    MySqlOrderRepository, ServerConfig, SessionNotifier, YuansferApiAdapter, YuansferConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载环境变量
    dotenvy::dotenv().ok();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting Yuansfer gateway...");

    let server_config = ServerConfig::from_env()?;
    let yuansfer_config = YuansferConfig::from_env()?;
    info!(
        "Yuansfer configuration loaded for merchant {} store {} ({})",
        yuansfer_config.merchant_no, yuansfer_config.store_no, yuansfer_config.base_url
    );

    // 创建数据库连接池
    info!("Connecting to store database...");
    let pool = MySqlPool::connect(&server_config.database_url).await?;
    info!("Database connected successfully");

    let repository = Arc::new(MySqlOrderRepository::new(
        Arc::new(pool),
        server_config.table_prefix.clone(),
    )?);
    let yuansfer = Arc::new(YuansferApiAdapter::new(yuansfer_config.clone()));
    let notifier = Arc::new(SessionNotifier::new());

    let events = Arc::new(EventBus::new().subscribe(Arc::new(|event: &PaymentEvent| {
        info!("{} for order {}", event.event_type(), event.order_id());
    })));

    // 注册支付方式
    let mut registry = PaymentMethodRegistry::new();
    registry.register(Arc::new(CreditCardAdapter::new(
        yuansfer_config.clone(),
        yuansfer,
        repository,
        notifier.clone(),
        events,
    )));

    let app_state = AppState {
        checkout_service: Arc::new(CheckoutService::new(Arc::new(registry))),
        notifier,
    };

    let app = api::create_router(app_state).layer(CorsLayer::permissive());

    let addr = server_config.bind_addr();
    info!("Server listening on {}", addr);
    info!("Available endpoints:");
    info!("  GET  /health - Health check");
    info!("  GET  /api/payment-methods - List payment methods");
    info!("  GET  /api/payment-methods/:method_id/fields - Render payment fields");
    info!("  POST /api/payment-methods/:method_id/orders/:order_id/process - Process payment");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
