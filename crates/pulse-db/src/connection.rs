//! Document-store connection setup.
//!
//! The running server owns a single WebSocket handle to SurrealDB;
//! every repository clones it. Opening the store authenticates as
//! root, selects the configured namespace and database, and brings
//! the schema up to date, so a handle is never handed out against an
//! unmigrated database.

use pulse_core::error::PulseResult;
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

use crate::error;
use crate::schema;

/// Connection settings for the document store, filled from the
/// environment by the server's config loader.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket endpoint, host:port.
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "pulse".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

/// Open the store and return a ready-to-use handle.
pub async fn open(config: &DbConfig) -> PulseResult<Surreal<Client>> {
    info!(
        url = %config.url,
        namespace = %config.namespace,
        database = %config.database,
        "Opening document store"
    );

    let db = Surreal::new::<Ws>(&config.url)
        .await
        .map_err(error::storage)?;

    db.signin(Root {
        username: config.username.clone(),
        password: config.password.clone(),
    })
    .await
    .map_err(error::storage)?;

    db.use_ns(&config.namespace)
        .use_db(&config.database)
        .await
        .map_err(error::storage)?;

    schema::run_migrations(&db).await?;

    info!("Document store ready");

    Ok(db)
}
