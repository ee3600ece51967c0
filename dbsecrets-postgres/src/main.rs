use anyhow::Result;
use dbsecrets_domain::telemetry::{get_subscriber, init_subscriber};
use dbsecrets_postgres::{config::BackendConfig, server::Server};
use dotenvy::dotenv;
use envconfig::Envconfig;
use tracing::info;

fn main() -> Result<()> {
    dotenv().ok();
    let config = BackendConfig::init_from_env()?;

    let subscriber = get_subscriber("dbsecrets-postgres".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    info!("Starting database secrets backend with config:\n{config}");

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_threads.unwrap_or(num_cpus::get()))
        .enable_all()
        .build()?
        .block_on(async move {
            let server: Server = Server::init(config).await?;

            server.run().await
        })
}
