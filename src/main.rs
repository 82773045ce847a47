use std::sync::Arc;

use axum::http::HeaderName;
use kaito_vision::adapters::http::{webhook_router, WebhookAppState};
use kaito_vision::adapters::{
    DisabledNotificationDispatcher, EdgeFunctionConfig, EdgeFunctionNotificationDispatcher,
    PostgresGoalReader, PostgresSaleRepository, PostgresWebhookLogWriter,
};
use kaito_vision::config::{AppConfig, ServerConfig};
use kaito_vision::ports::NotificationDispatcher;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = AppConfig::load()?;
    cfg.validate()?;

    init_tracing(&cfg.server);

    let pool = cfg.database.pool_options().connect(&cfg.database.url).await?;

    if cfg.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let notifier: Arc<dyn NotificationDispatcher> = if cfg.notification.enabled {
        let edge_config = EdgeFunctionConfig::new(
            cfg.notification.function_url.clone(),
            cfg.notification.service_key.clone(),
        )
        .with_timeout(cfg.notification.timeout());
        Arc::new(EdgeFunctionNotificationDispatcher::new(edge_config)?)
    } else {
        tracing::info!("notifications disabled");
        Arc::new(DisabledNotificationDispatcher)
    };

    if !cfg.webhook.is_secured() {
        tracing::warn!(
            "KAITO_VISION__WEBHOOK__SHARED_SECRET is not set; the Lojou webhook accepts unauthenticated requests"
        );
    }

    let state = WebhookAppState {
        sale_repository: Arc::new(PostgresSaleRepository::new(pool.clone())),
        goal_reader: Arc::new(PostgresGoalReader::new(pool.clone())),
        webhook_log: Arc::new(PostgresWebhookLogWriter::new(pool)),
        notifier,
        policy: cfg.webhook.ingestion_policy(cfg.notification.timeout())?,
    };

    let request_id = HeaderName::from_static("x-request-id");
    let app = webhook_router()
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TimeoutLayer::new(cfg.server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state);

    let addr = cfg.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?cfg.server.environment, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
