use actix_web::{
    delete, error, post, route,
    web::{self, Data},
    HttpRequest, HttpResponse, Responder,
};
use actix_web_lab::respond::Html;
use chrono::Local;
use database::{
    consts::consts::PersonId, database::request_manager::RequestManager,
    model::person::NewPerson,
};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// `{id}` segment of `/api/persons/{id}`, kept as text so that a bad segment is a miss rather than a 400
#[derive(Deserialize, Debug)]
pub struct PersonPath {
    pub id: String,
}

impl PersonPath {
    /// The GET route looks people up by their position in the phonebook
    pub fn position(&self) -> Option<usize> {
        self.id.parse().ok()
    }

    pub fn person_id(&self) -> Option<PersonId> {
        self.id.parse().ok()
    }
}

/// Body of `POST /api/notes`, both fields are required and must be non-empty
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct NewPersonRequest {
    pub name: Option<String>,
    pub number: Option<String>,
}

impl NewPersonRequest {
    pub fn validate(self) -> Result<NewPerson, ApiError> {
        match (self.name, self.number) {
            (Some(name), Some(number)) if !name.is_empty() && !number.is_empty() => {
                Ok(NewPerson { name, number })
            }
            _ => Err(ApiError::InfoMissing),
        }
    }
}

#[route("/", method = "GET", method = "HEAD")]
async fn root() -> impl Responder {
    Html("<h1>phonebook</h1>".to_string())
}

#[route("/api/persons", method = "GET", method = "HEAD")]
async fn list_persons(
    request_manager: Data<RequestManager>,
) -> Result<HttpResponse, ApiError> {
    let people = request_manager.send_list().await?;

    Ok(HttpResponse::Ok().json(people))
}

#[route("/api/persons/{id}", method = "GET", method = "HEAD")]
async fn get_person(
    request_manager: Data<RequestManager>,
    path: web::Path<PersonPath>,
) -> Result<HttpResponse, ApiError> {
    let position = path.position().ok_or(ApiError::PersonNotFound)?;

    match request_manager.send_get_index(position).await? {
        Some(person) => Ok(HttpResponse::Ok().json(person)),
        None => Err(ApiError::PersonNotFound),
    }
}

#[route("/info", method = "GET", method = "HEAD")]
async fn info(request_manager: Data<RequestManager>) -> Result<Html, ApiError> {
    let count = request_manager.send_count().await?;

    Ok(Html(info_page(count, &Local::now().to_rfc2822())))
}

/// The page reports one less than the number of stored people
pub fn info_page(count: usize, timestamp: &str) -> String {
    format!(
        "<h1>Phonebook as info for {} people <br> {}</h1>",
        count.saturating_sub(1),
        timestamp
    )
}

#[delete("/api/persons/{id}")]
async fn delete_person(
    request_manager: Data<RequestManager>,
    path: web::Path<PersonPath>,
) -> Result<HttpResponse, ApiError> {
    // An id that is not a number cannot match anyone, which is still a successful delete
    if let Some(id) = path.person_id() {
        if request_manager.send_remove(id).await?.is_none() {
            log::debug!("Delete matched nobody [id: {}]", id);
        }
    }

    Ok(HttpResponse::NoContent().finish())
}

#[post("/api/notes")]
async fn create_person(
    request_manager: Data<RequestManager>,
    body: web::Json<NewPersonRequest>,
) -> Result<HttpResponse, ApiError> {
    let new_person = body.into_inner().validate()?;

    let person = request_manager.send_add(new_person).await?;

    Ok(HttpResponse::Ok().json(person))
}

async fn unknown_endpoint() -> Result<HttpResponse, ApiError> {
    Err(ApiError::UnknownEndpoint)
}

/// A body that is not a JSON object of strings is treated the same as one with missing fields
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
        log::info!("Rejected body: {}", err);

        ApiError::InfoMissing.into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(root)
        .service(list_persons)
        .service(get_person)
        .service(info)
        .service(delete_person)
        .service(create_person)
        .default_service(web::to(unknown_endpoint));
}


// `actix_web::test` is both a module and an attribute, sync tests live in `info_page_tests`
#[cfg(test)]
mod tests {
    use actix_web::{
        http::{Method, StatusCode},
        middleware::NormalizePath,
        test, App,
    };
    use actix_web_lab::middleware::from_fn;
    use database::{
        database::{database::Database, options::DatabaseOptions},
        model::person::Person,
    };
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::server::{error::ErrorResponse, logger::request_logger};

    fn request_manager() -> RequestManager {
        Database::new(DatabaseOptions::default()).run()
    }

    macro_rules! init_app {
        ($request_manager:expr) => {
            test::init_service(
                App::new()
                    .app_data(Data::new($request_manager.clone()))
                    .configure(configure)
                    .wrap(from_fn(request_logger))
                    .wrap(NormalizePath::trim()),
            )
            .await
        };
    }

    mod pages {
        use super::*;

        #[actix_web::test]
        async fn root_serves_heading() {
            let app = init_app!(request_manager());

            let response =
                test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(test::read_body(response).await, "<h1>phonebook</h1>");
        }

        #[actix_web::test]
        async fn info_reports_one_less_than_stored() {
            let app = init_app!(request_manager());

            let response =
                test::call_service(&app, test::TestRequest::get().uri("/info").to_request())
                    .await;

            assert_eq!(response.status(), StatusCode::OK);

            let body = test::read_body(response).await;
            let body = std::str::from_utf8(&body).expect("should be utf8");

            assert!(
                body.starts_with("<h1>Phonebook as info for 3 people <br> "),
                "Unexpected body: {}",
                body
            );
        }
    }

    mod persons {
        use super::*;

        #[actix_web::test]
        async fn list_returns_seed_in_order() {
            let app = init_app!(request_manager());

            let people: Vec<Person> = test::call_and_read_body_json(
                &app,
                test::TestRequest::get().uri("/api/persons").to_request(),
            )
            .await;

            assert_eq!(people, Person::seed());
        }

        #[actix_web::test]
        async fn get_by_position() {
            let app = init_app!(request_manager());

            let person: Person = test::call_and_read_body_json(
                &app,
                test::TestRequest::get().uri("/api/persons/0").to_request(),
            )
            .await;

            assert_eq!(person, Person::new(1, "Arto Hellas", "040-123456"));
        }

        #[rstest]
        #[case("/api/persons/999")]
        #[case("/api/persons/4")]
        #[case("/api/persons/-1")]
        #[case("/api/persons/abc")]
        #[actix_web::test]
        async fn get_missing_position_is_empty_404(#[case] uri: &str) {
            let app = init_app!(request_manager());

            let response =
                test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert!(test::read_body(response).await.is_empty());
        }

        #[actix_web::test]
        async fn get_uses_position_not_id() {
            let request_manager = request_manager();
            let app = init_app!(request_manager);

            // Removing id 1 shifts everyone down one position
            test::call_service(
                &app,
                test::TestRequest::delete().uri("/api/persons/1").to_request(),
            )
            .await;

            let person: Person = test::call_and_read_body_json(
                &app,
                test::TestRequest::get().uri("/api/persons/0").to_request(),
            )
            .await;

            assert_eq!(person.id, PersonId(2));
        }

        #[actix_web::test]
        async fn delete_removes_matching_id() {
            let request_manager = request_manager();
            let app = init_app!(request_manager);

            let response = test::call_service(
                &app,
                test::TestRequest::delete().uri("/api/persons/2").to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::NO_CONTENT);
            assert!(test::read_body(response).await.is_empty());

            let ids: Vec<PersonId> = request_manager
                .send_list()
                .await
                .expect("Should not timeout")
                .into_iter()
                .map(|p| p.id)
                .collect();

            assert_eq!(ids, vec![PersonId(1), PersonId(3), PersonId(4)]);
        }

        #[rstest]
        #[case("/api/persons/42")]
        #[case("/api/persons/not-a-number")]
        #[actix_web::test]
        async fn delete_unknown_id_is_still_204(#[case] uri: &str) {
            let request_manager = request_manager();
            let app = init_app!(request_manager);

            let response =
                test::call_service(&app, test::TestRequest::delete().uri(uri).to_request()).await;

            assert_eq!(response.status(), StatusCode::NO_CONTENT);
            assert_eq!(request_manager.send_count().await, Ok(4));
        }
    }

    mod create {
        use super::*;

        #[actix_web::test]
        async fn create_assigns_next_id_and_appends() {
            let request_manager = request_manager();
            let app = init_app!(request_manager);

            let response = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/api/notes")
                    .set_json(json!({ "name": "X", "number": "1" }))
                    .to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::OK);

            let person: Person = test::read_body_json(response).await;

            assert_eq!(person, Person::new(5, "X", "1"));

            let people = request_manager.send_list().await.expect("Should not timeout");

            assert_eq!(people.len(), 5);
            assert_eq!(people.last(), Some(&person));
        }

        #[rstest]
        #[case(json!({ "name": "X" }))]
        #[case(json!({ "number": "1" }))]
        #[case(json!({ "name": "", "number": "1" }))]
        #[case(json!({ "name": "X", "number": "" }))]
        #[case(json!({ "name": "X", "number": 1 }))]
        #[case(json!({}))]
        #[actix_web::test]
        async fn missing_info_is_rejected(#[case] body: serde_json::Value) {
            let request_manager = request_manager();
            let app = init_app!(request_manager);

            let response = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/api/notes")
                    .set_json(body)
                    .to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let error: ErrorResponse = test::read_body_json(response).await;

            assert_eq!(
                error,
                ErrorResponse {
                    error: "info missing".to_string()
                }
            );
            assert_eq!(
                request_manager.send_count().await,
                Ok(4),
                "Rejected creates should not change the phonebook"
            );
        }

        #[actix_web::test]
        async fn non_json_body_is_info_missing() {
            let app = init_app!(request_manager());

            let response = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/api/notes")
                    .insert_header(("content-type", "text/plain"))
                    .set_payload("name=X")
                    .to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let error: ErrorResponse = test::read_body_json(response).await;

            assert_eq!(error.error, "info missing");
        }

        #[actix_web::test]
        async fn duplicate_name_is_rejected() {
            let request_manager = request_manager();
            let app = init_app!(request_manager);

            let response = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/api/notes")
                    .set_json(json!({ "name": "Ada Lovelace", "number": "1" }))
                    .to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let error: ErrorResponse = test::read_body_json(response).await;

            assert_eq!(error.error, "the name already exists in the phonebook");
            assert_eq!(request_manager.send_count().await, Ok(4));
        }

        #[actix_web::test]
        async fn sequential_creates_never_share_an_id() {
            let app = init_app!(request_manager());

            let first: Person = test::call_and_read_body_json(
                &app,
                test::TestRequest::post()
                    .uri("/api/notes")
                    .set_json(json!({ "name": "First", "number": "1" }))
                    .to_request(),
            )
            .await;

            // Remove the newest person so the highest stored id drops back down
            test::call_service(
                &app,
                test::TestRequest::delete()
                    .uri(&format!("/api/persons/{}", first.id))
                    .to_request(),
            )
            .await;

            let second: Person = test::call_and_read_body_json(
                &app,
                test::TestRequest::post()
                    .uri("/api/notes")
                    .set_json(json!({ "name": "Second", "number": "2" }))
                    .to_request(),
            )
            .await;

            assert_ne!(first.id, second.id);
            assert_eq!(second.id, PersonId(6));
        }
    }

    mod routing {
        use super::*;

        #[rstest]
        #[case("/api/persons/")]
        #[case("/info/")]
        #[case("/api/persons/0/")]
        #[actix_web::test]
        async fn trailing_slash_is_ignored(#[case] uri: &str) {
            let app = init_app!(request_manager());

            let response =
                test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

            assert_eq!(response.status(), StatusCode::OK);
        }

        #[rstest]
        #[case("/")]
        #[case("/api/persons")]
        #[case("/api/persons/0")]
        #[case("/info")]
        #[actix_web::test]
        async fn head_is_answered_like_get(#[case] uri: &str) {
            let app = init_app!(request_manager());

            let response = test::call_service(
                &app,
                test::TestRequest::default()
                    .method(Method::HEAD)
                    .uri(uri)
                    .to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::OK);
        }

        #[actix_web::test]
        async fn body_reaches_handler_after_request_logging() {
            // Given the request logger has already read the body
            let app = init_app!(request_manager());

            // When a person is created
            let person: Person = test::call_and_read_body_json(
                &app,
                test::TestRequest::post()
                    .uri("/api/notes")
                    .set_json(json!({ "name": "Logged", "number": "123" }))
                    .to_request(),
            )
            .await;

            // Then the handler still saw the whole body
            assert_eq!(person.name, "Logged");
            assert_eq!(person.number, "123");
        }
    }

    mod fallback {
        use super::*;

        #[rstest]
        #[case(Method::GET, "/no/such/route")]
        #[case(Method::GET, "/api/persons/1/extra")]
        #[case(Method::PUT, "/api/persons/1")]
        #[case(Method::POST, "/api/persons")]
        #[actix_web::test]
        async fn unknown_endpoint(#[case] method: Method, #[case] uri: &str) {
            let app = init_app!(request_manager());

            let response = test::call_service(
                &app,
                test::TestRequest::default()
                    .method(method)
                    .uri(uri)
                    .to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND);

            let error: ErrorResponse = test::read_body_json(response).await;

            assert_eq!(
                error,
                ErrorResponse {
                    error: "unknown endpoint".to_string()
                }
            );
        }
    }
}
