pub mod config;

pub mod server {
    pub mod error;
    pub mod logger;
    pub mod routes;
}
