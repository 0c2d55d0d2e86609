use std::sync::Arc;

use auth::AuthService;
use auth::Role;
use auth::SigningKey;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::AdminConfig;
use user_service::config::Config;
use user_service::domain::user::models::EmailAddress;
use user_service::domain::user::models::NewUser;
use user_service::domain::user::models::Password;
use user_service::domain::user::models::Username;
use user_service::domain::user::ports::UserStore;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserStore;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(http_port = config.server.http_port, "Configuration loaded");

    let signing_key = SigningKey::from_secret(&config.jwt.secret)?;
    let auth_service = Arc::new(AuthService::new(signing_key, config.jwt.token_ttl()?));
    tracing::info!(
        token_ttl_hours = auth_service.ttl().num_hours(),
        "Session tokens enabled"
    );

    let user_store = Arc::new(InMemoryUserStore::new());
    if let Some(admin) = &config.admin {
        seed_admin(user_store.as_ref(), admin).await?;
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_store, auth_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}

async fn seed_admin(store: &dyn UserStore, admin: &AdminConfig) -> Result<(), anyhow::Error> {
    let user = store
        .create(NewUser {
            username: Username::new(admin.username.clone())?,
            email: EmailAddress::new(admin.email.clone())?,
            password: Password::new(admin.password.clone())?,
            role: Role::Admin,
        })
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Admin account seeded");
    Ok(())
}
