use actix_web::{
    middleware::{self, Condition, NormalizePath},
    web::Data,
    App, HttpServer,
};
use actix_web_lab::middleware::from_fn;
use clap::Parser;
use database::database::database::Database;
use phonebook::{
    config::Cli,
    server::{
        logger::{request_logger, ACCESS_LOG_FORMAT},
        routes,
    },
};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    let request_manager = Database::new(args.database_options()).run();

    log::info!("starting HTTP server on port {}.", args.port);

    let server_request_manager = request_manager.clone();
    let log_http = args.log_http;

    // Start HTTP server, actix handles ctrl-c and lets in-flight requests finish before returning
    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(server_request_manager.clone()))
            .configure(routes::configure)
            .wrap(from_fn(request_logger))
            .wrap(NormalizePath::trim())
            .wrap(Condition::new(
                log_http,
                middleware::Logger::new(ACCESS_LOG_FORMAT),
            ))
    })
    .workers(args.http_workers)
    .bind((args.address, args.port))?
    .run()
    .await?;

    match request_manager.send_shutdown_request().await {
        Ok(message) => log::info!("Shutting down server: {}", message),
        Err(err) => log::error!("Database did not shut down cleanly: {}", err),
    }

    Ok(())
}
