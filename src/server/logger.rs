use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Bytes,
    Error,
};
use actix_web_lab::middleware::Next;

/// Access line written once a request is answered, only when `--log-http` is set
pub const ACCESS_LOG_FORMAT: &str = "%r %s %b - %D ms";

/// Logs method, path and body of every request before it reaches a handler
pub async fn request_logger(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let body = req.extract::<Bytes>().await?;

    log::info!("Method: {}", req.method());
    log::info!("Path:   {}", req.path());
    log::info!("Body:   {}", String::from_utf8_lossy(&body));
    log::info!("---");

    // Reading the body drains the payload, handlers get a fresh copy
    req.set_payload(body.into());

    next.call(req).await
}
