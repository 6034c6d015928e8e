mod applier;
mod config;
mod db;
mod error;
mod statements;

use anyhow::{Context, Result};
use log::{error, info};
use std::path::PathBuf;
use structopt::StructOpt;

use crate::applier::SchemaApplier;
use crate::config::Config;

#[derive(StructOpt, Debug)]
#[structopt(name = "schema_applier")]
struct Opt {
    /// database server address
    #[structopt(long, env = "DB_HOST", default_value = "localhost")]
    host: String,

    /// database server port
    #[structopt(long, env = "DB_PORT", default_value = "3306")]
    port: u16,

    /// database login
    #[structopt(long, env = "DB_USER", default_value = "root")]
    user: String,

    /// database credential
    #[structopt(long, env = "DB_PASSWORD", hide_env_values = true)]
    password: String,

    /// database to create and apply the schema to
    #[structopt(long, env = "DB_NAME")]
    database: String,

    /// schema file of `;`-separated statements
    #[structopt(long = "sql-file", env = "SCHEMA_FILE", parse(from_os_str))]
    sql_file: PathBuf,

    /// print the run report as JSON when done
    #[structopt(long)]
    report_json: bool,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Config {
            host: opt.host,
            port: opt.port,
            user: opt.user,
            password: opt.password,
            database: opt.database,
            sql_file_path: opt.sql_file,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opt = Opt::from_args();
    let report_json = opt.report_json;
    let cfg: Config = opt.into();
    info!(
        "applying {} to database '{}' on {}:{}",
        cfg.sql_file_path.display(),
        cfg.database,
        cfg.host,
        cfg.port
    );

    let report = match SchemaApplier::new(cfg).run().await {
        Ok(report) => report,
        Err(e) => {
            error!("schema setup aborted: {}", e);
            println!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if !report.failed.is_empty() {
        info!(
            "{} of {} statements failed",
            report.failed.len(),
            report.attempted()
        );
    }
    if report_json {
        let json = serde_json::to_string_pretty(&report).context("serializing run report")?;
        println!("{}", json);
    }

    Ok(())
}
