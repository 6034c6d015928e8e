use crate::config::Config;
use crate::error::ApplyError;
use log::debug;
use sqlx::mysql::MySqlConnection;
use sqlx::{ConnectOptions, Connection, Executor};

/// The database operations a schema run needs.
///
/// All SQL goes through as plain text; nothing is prepared or bound.
pub trait SchemaTarget {
    /// Keep everything up to the final COMMIT in one transaction.
    async fn disable_autocommit(&mut self) -> Result<(), sqlx::Error>;

    async fn create_database(&mut self, name: &str) -> Result<(), sqlx::Error>;

    async fn use_database(&mut self, name: &str) -> Result<(), sqlx::Error>;

    /// Returns the number of affected rows.
    async fn execute(&mut self, sql: &str) -> Result<u64, sqlx::Error>;

    async fn commit(&mut self) -> Result<(), sqlx::Error>;

    async fn close(self) -> Result<(), sqlx::Error>;
}

/// Backtick-quote an identifier, doubling any embedded backticks.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

pub struct MySqlTarget {
    conn: MySqlConnection,
}

impl MySqlTarget {
    pub async fn connect(cfg: &Config) -> Result<Self, ApplyError> {
        let conn = cfg
            .connect_options()
            .connect()
            .await
            .map_err(|source| ApplyError::Connect {
                host: cfg.host.clone(),
                port: cfg.port,
                source,
            })?;
        debug!("connected to {}:{} as {}", cfg.host, cfg.port, cfg.user);

        Ok(MySqlTarget { conn })
    }
}

impl SchemaTarget for MySqlTarget {
    async fn disable_autocommit(&mut self) -> Result<(), sqlx::Error> {
        self.conn.execute("SET autocommit = 0").await?;
        Ok(())
    }

    async fn create_database(&mut self, name: &str) -> Result<(), sqlx::Error> {
        let sql = format!("CREATE DATABASE IF NOT EXISTS {}", quote_identifier(name));
        self.conn.execute(sql.as_str()).await?;
        Ok(())
    }

    async fn use_database(&mut self, name: &str) -> Result<(), sqlx::Error> {
        let sql = format!("USE {}", quote_identifier(name));
        self.conn.execute(sql.as_str()).await?;
        Ok(())
    }

    async fn execute(&mut self, sql: &str) -> Result<u64, sqlx::Error> {
        let done = self.conn.execute(sql).await?;
        Ok(done.rows_affected())
    }

    async fn commit(&mut self) -> Result<(), sqlx::Error> {
        self.conn.execute("COMMIT").await?;
        Ok(())
    }

    async fn close(self) -> Result<(), sqlx::Error> {
        self.conn.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_are_wrapped_in_backticks() {
        assert_eq!(quote_identifier("attendance_system"), "`attendance_system`");
    }

    #[test]
    fn embedded_backticks_are_doubled() {
        assert_eq!(quote_identifier("we`ird"), "`we``ird`");
    }
}
