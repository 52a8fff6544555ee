mod cache;
mod handlers;
mod models;
mod routes;
mod services;
mod utils;
use std::error::Error;

use axum::serve;
use routes::make_app;
use tokio::net::TcpListener;
use tracing::info;
use utils::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    let config = Config::init();
    let bind_addr = config.bind_addr.clone();

    let app = make_app(config).await?;

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Listening on http://{}", bind_addr);

    serve(listener, app).await?;
    Ok(())
}
