use std::sync::{Arc, Mutex};

use dish_catalog::{api, config::Config, store};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let conn = store::connect(&config.database_url)?;
    store::init_schema(&conn)?;
    info!("Catalog holds {} dishes", store::count_dishes(&conn)?);

    let app = api::router(Arc::new(Mutex::new(conn)));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    println!("Listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
