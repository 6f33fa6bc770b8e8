use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use recipe_server::{
    routes::{app, AppState},
    store::{MongoStore, RecipeStore},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    /// The address and optionally port to bind to
    #[clap(long, default_value = "0.0.0.0:3000")]
    address: String,

    /// MongoDB connection string, including the database name
    #[clap(
        long,
        default_value = "mongodb://127.0.0.1:27017/express-mongoose-recipes-dev"
    )]
    mongodb_uri: String,

    /// Directory of static assets served at the root path space
    #[clap(long, default_value = "public")]
    public_dir: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let store = MongoStore::connect(&args.mongodb_uri)
        .await
        .context("Building MongoDB client")?;
    // The driver connects lazily; an unreachable server is logged here but
    // does not stop the HTTP layer from serving. /health stays degraded
    // until the store answers.
    match store.ping().await {
        Ok(()) => tracing::info!("Connected to MongoDB"),
        Err(err) => tracing::warn!(error = %err, "MongoDB not reachable yet, serving anyway"),
    }

    let state = AppState {
        store: Arc::new(store),
    };
    let router = app(state, &args.public_dir);

    let listener = tokio::net::TcpListener::bind(&args.address)
        .await
        .context("Binding listen address")?;
    tracing::info!("Listening on {}", args.address);
    axum::serve(listener, router).await?;
    Ok(())
}
