use petstore_mock_server::{seeded, Insurance};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;

    let db = seeded([(
        1,
        Insurance {
            provider: "Acme Mutual".to_string(),
            premium: 120,
            deductible: 500,
        },
    )]);
    tracing::info!(%addr, "listening");
    petstore_mock_server::run(listener, db).await
}
