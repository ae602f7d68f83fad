// crates/rdm2geojson-core/src/source/mysql.rs

use super::{InstanceRow, InstanceSource};
use crate::category::Category;
use crate::config::DatabaseConfig;
use crate::error::{ExportError, Result};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::debug;

/// Live RDM database session: a single MySQL connection (no pool).
///
/// sqlx is async, the rest of the crate is not, so the source owns a
/// current-thread runtime and blocks on every call.
pub struct MySqlSource {
    runtime: Runtime,
    conn: MySqlConnection,
}

impl MySqlSource {
    /// Opens the connection, giving up after `connect_timeout` seconds.
    pub fn connect(config: &DatabaseConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ExportError::DatabaseConnection(format!("runtime: {e}")))?;

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);
        let timeout = Duration::from_secs(config.connect_timeout);

        debug!(host = %config.host, port = config.port, db = %config.name, "connecting");
        let conn = runtime
            .block_on(async {
                tokio::time::timeout(timeout, MySqlConnection::connect_with(&options)).await
            })
            .map_err(|_| {
                ExportError::DatabaseConnection(format!(
                    "timed out after {}s connecting to {}:{}",
                    config.connect_timeout, config.host, config.port
                ))
            })?
            .map_err(|e| ExportError::DatabaseConnection(e.to_string()))?;

        Ok(Self { runtime, conn })
    }
}

impl InstanceSource for MySqlSource {
    fn fetch(&mut self, category: Category, pattern: &str) -> Result<Vec<InstanceRow>> {
        let sql = format!(
            "SELECT `name`, CAST(`data` AS CHAR) FROM `instance` WHERE {} AND `name` LIKE ?",
            category.type_clause()
        );

        let rows: Vec<(String, Option<String>)> = self
            .runtime
            .block_on(
                sqlx::query_as(&sql)
                    .bind(pattern)
                    .fetch_all(&mut self.conn),
            )
            .map_err(|e| ExportError::Query {
                category,
                message: e.to_string(),
            })?;

        Ok(rows
            .into_iter()
            .map(|(name, data)| InstanceRow { name, data })
            .collect())
    }

    fn close(self) -> Result<()> {
        let MySqlSource { runtime, conn } = self;
        runtime
            .block_on(conn.close())
            .map_err(|e| ExportError::DatabaseConnection(format!("close: {e}")))
    }
}
