use std::time::Duration;

use clap::Parser;
use database::database::options::DatabaseOptions;

/// 📇 Phonebook Server, provides a small JSON API over an in-memory list of people
#[derive(Parser, Debug)]
pub struct Cli {
    /// Port the http server will run on
    #[clap(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Address the http server will run on
    #[clap(short, long, default_value = "0.0.0.0")]
    pub address: String,

    /// Logs an access line for every request once it has been answered
    #[clap(long)]
    pub log_http: bool,

    #[clap(long, default_value_t = 2)]
    pub http_workers: usize,

    /// Starts with an empty phonebook instead of the four seed records
    #[clap(long)]
    pub no_seed: bool,

    /// How long a request waits on the database before failing
    #[clap(long, default_value_t = 2000)]
    pub database_timeout_ms: u64,
}

impl Cli {
    pub fn database_options(&self) -> DatabaseOptions {
        DatabaseOptions::default()
            .set_seed(!self.no_seed)
            .set_request_timeout(Duration::from_millis(self.database_timeout_ms))
    }
}
