use mock_server::Seed;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;

    let seed = Seed::default();
    info!(
        %addr,
        email = %seed.email,
        api_key = %seed.api_key,
        zone = mock_server::DEFAULT_ZONE_NAME,
        "listening on http://{addr}/client/v4"
    );
    mock_server::run(listener, seed).await
}
