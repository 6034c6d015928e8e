use sqlx::mysql::MySqlConnectOptions;
use sqlx::ConnectOptions;
use std::fmt;
use std::path::PathBuf;

/// Connection parameters and the schema file to apply.
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub sql_file_path: PathBuf,
}

impl Config {
    /// Server-level options: no default database is selected on connect.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .log_statements(log::LevelFilter::Debug)
    }
}

// hand-written so the password never reaches a log line
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("sql_file_path", &self.sql_file_path)
            .finish()
    }
}
