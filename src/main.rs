use course_content_backend::{
    config::{get_config, init_config, LogFormat},
    router, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();
    init_tracing(config.log_format);

    info!(
        api_url = %config.groq_api_url,
        material_model = %config.material_model,
        mcq_model = %config.mcq_model,
        timeout_secs = config.upstream_timeout.as_secs(),
        mcq_item_policy = ?config.mcq_item_policy,
        "Configuration loaded"
    );

    let app_state = AppState::new(config)?;
    let app = router(app_state);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
