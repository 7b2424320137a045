//! NexusEdge billing service entry point.

use std::sync::Arc;

use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;

use nexus_edge::adapters::email::{ResendConfig, ResendEmailSender, TracingEmailSender};
use nexus_edge::adapters::http::{payment_router, with_middleware, PaymentAppState};
use nexus_edge::adapters::midtrans::{MidtransSnapAdapter, SnapConfig};
use nexus_edge::adapters::postgres::PostgresSubscriptionRepository;
use nexus_edge::adapters::reconciliation::LogReconciliationReporter;
use nexus_edge::adapters::storage::InMemorySubscriptionRepository;
use nexus_edge::application::handlers::payment::{
    CreateCheckoutHandler, HandlePaymentNotificationHandler,
};
use nexus_edge::config::{AppConfig, DatabaseConfig, EmailConfig};
use nexus_edge::domain::payment::SignatureVerifier;
use nexus_edge::ports::{EmailSender, SubscriptionRepository};
use nexus_edge::telemetry;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    telemetry::init_tracing(&config.server)?;
    config.validate()?;

    let repository = subscription_repository(&config.database).await?;
    let email_sender = email_sender(&config.email);
    let reporter = Arc::new(LogReconciliationReporter::new());

    let server_key = config.payment.server_key().map(|k| SecretString::new(k.to_string()));
    if server_key.is_none() {
        tracing::warn!("NEXUS_EDGE__PAYMENT__SERVER_KEY not set; webhook will answer 500");
    }

    let notification_handler = HandlePaymentNotificationHandler::new(
        server_key.clone(),
        SignatureVerifier::new(config.payment.missing_signature_policy),
        repository,
        email_sender,
        reporter,
    )
    .with_downstream_timeout(config.payment.downstream_timeout());

    let snap = SnapConfig::new(server_key.unwrap_or_else(|| SecretString::new(String::new())))
        .with_base_url(config.payment.snap_base_url());
    let checkout_handler = CreateCheckoutHandler::new(
        Arc::new(MidtransSnapAdapter::new(snap)),
        config.server.public_base_url(),
    );

    let state = PaymentAppState {
        notification_handler: Arc::new(notification_handler),
        checkout_handler: Arc::new(checkout_handler),
    };

    let app = with_middleware(payment_router().with_state(state), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, public_base_url = %config.server.public_base_url(), "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn subscription_repository(
    config: &DatabaseConfig,
) -> Result<Arc<dyn SubscriptionRepository>, BoxError> {
    let Some(url) = config.url() else {
        tracing::warn!("no database configured; subscriptions are kept in memory");
        return Ok(Arc::new(InMemorySubscriptionRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(url)
        .await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    Ok(Arc::new(PostgresSubscriptionRepository::new(pool)))
}

fn email_sender(config: &EmailConfig) -> Arc<dyn EmailSender> {
    if config.is_enabled() {
        let resend = ResendConfig::new(
            SecretString::new(config.resend_api_key.clone()),
            config.from_header(),
        );
        Arc::new(ResendEmailSender::new(resend))
    } else {
        tracing::warn!("no Resend key configured; confirmation emails are logged only");
        Arc::new(TracingEmailSender::new())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
