//! # SQL Runner
//!
//! Applies a compiled script to a PostgreSQL server. The script carries its
//! own `BEGIN;`/`COMMIT;`, so it is sent as one raw, multi-statement query.

use crate::connection::Connection;
use migrator_core::{MigrateError, MigrateResult};
use sqlx::Connection as _;
use sqlx::PgConnection;
use std::future::Future;

/// Something that can run a SQL script against a connection
///
/// The future runs on the caller's task and need not be `Send`.
pub trait Executor {
    fn execute(&self, connection: &Connection, sql: &str) -> impl Future<Output = MigrateResult<()>>;
}

/// Executes against a live server through sqlx
#[derive(Debug, Clone, Copy, Default)]
pub struct PgExecutor;

impl Executor for PgExecutor {
    async fn execute(&self, connection: &Connection, sql: &str) -> MigrateResult<()> {
        let mut conn = PgConnection::connect(&connection.string)
            .await
            .map_err(|e| MigrateError::Connect(e.to_string()))?;
        tracing::info!("Database connected");

        let result = sqlx::raw_sql(sql)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| MigrateError::Execution(e.to_string()));

        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, "Failed to close database connection");
        }

        result
    }
}

/// Run `sql` on `connection`
///
/// # Errors
///
/// - `UnresolvedConnection` when there is no connection
/// - whatever the executor reports
pub async fn exec<E: Executor>(
    connection: Option<&Connection>,
    sql: &str,
    executor: &E,
) -> MigrateResult<()> {
    let connection = connection.ok_or(MigrateError::UnresolvedConnection)?;
    let object = &connection.object;

    tracing::info!(
        user = %object.user,
        password = %object.masked_password(),
        host = %object.host,
        port = object.port,
        database = %object.data,
        "Database connecting"
    );
    tracing::debug!("Ready to exec SQL:\n{}", sql);

    match executor.execute(connection, sql).await {
        Ok(()) => {
            tracing::info!("Migration exec successful");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Migration exec failed");
            Err(e)
        }
    }
}
