use crate::config::Config;
use crate::db::{MySqlTarget, SchemaTarget};
use crate::error::ApplyError;
use crate::statements::{preview, split_statements};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct StatementFailure {
    /// Position of the segment in the split script.
    pub index: usize,
    pub statement: String,
    pub error: String,
}

/// Summary of one completed run.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    pub database: String,
    pub sql_file: PathBuf,
    pub segments: usize,
    pub skipped: usize,
    pub executed: usize,
    pub failed: Vec<StatementFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ApplyReport {
    pub fn attempted(&self) -> usize {
        self.executed + self.failed.len()
    }
}

pub struct SchemaApplier {
    cfg: Config,
}

impl SchemaApplier {
    pub fn new(cfg: Config) -> Self {
        SchemaApplier { cfg }
    }

    /// Connect to the configured server and apply the schema file.
    pub async fn run(&self) -> Result<ApplyReport, ApplyError> {
        let target = MySqlTarget::connect(&self.cfg).await?;
        self.apply(target).await
    }

    /// Apply the schema file through an already open target.
    ///
    /// The target is closed exactly once before returning, whether the run
    /// committed or stopped on a fatal error, including a failure to switch
    /// off autocommit on the fresh connection.
    pub async fn apply<T: SchemaTarget>(&self, mut target: T) -> Result<ApplyReport, ApplyError> {
        let outcome = self.apply_inner(&mut target).await;
        if let Err(e) = target.close().await {
            warn!("failed to close database connection: {}", e);
        }
        outcome
    }

    async fn apply_inner<T: SchemaTarget>(&self, target: &mut T) -> Result<ApplyReport, ApplyError> {
        let started_at = Utc::now();
        let database = self.cfg.database.as_str();
        target
            .disable_autocommit()
            .await
            .map_err(|source| ApplyError::Connect {
                host: self.cfg.host.clone(),
                port: self.cfg.port,
                source,
            })?;

        let prepare_err = |source| ApplyError::Prepare {
            database: database.to_string(),
            source,
        };

        target.create_database(database).await.map_err(prepare_err)?;
        println!("Database '{}' created or already exists.", database);
        target.use_database(database).await.map_err(prepare_err)?;

        let script = read_script(&self.cfg.sql_file_path).await?;
        let segments = split_statements(&script);
        info!(
            "{} segments read from {}",
            segments.len(),
            self.cfg.sql_file_path.display()
        );

        let mut executed = 0;
        let mut skipped = 0;
        let mut failed = Vec::new();

        for segment in &segments {
            let Some(statement) = segment.statement() else {
                skipped += 1;
                continue;
            };
            match target.execute(statement).await {
                Ok(rows) => {
                    executed += 1;
                    debug!("statement #{} affected {} rows", segment.index, rows);
                    println!("Executed: {}...", preview(statement, PREVIEW_CHARS));
                }
                Err(e) => {
                    warn!("statement #{} failed: {}", segment.index, e);
                    println!("Error executing statement: {}", e);
                    println!("Statement: {}", statement);
                    failed.push(StatementFailure {
                        index: segment.index,
                        statement: statement.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        target.commit().await.map_err(ApplyError::Commit)?;
        println!("Database schema setup completed successfully.");

        Ok(ApplyReport {
            database: database.to_string(),
            sql_file: self.cfg.sql_file_path.clone(),
            segments: segments.len(),
            skipped,
            executed,
            failed,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

async fn read_script(path: &Path) -> Result<String, ApplyError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ApplyError::FileAccess {
            path: path.to_path_buf(),
            source,
        })
}
