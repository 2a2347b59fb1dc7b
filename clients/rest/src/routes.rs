use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use actix_web_lab::respond::Html;
use database::{
    consts::consts::EntityId,
    database::{
        request_manager::RequestManager,
        table::row::{NewPersonData, UpdatePersonData, UpdateStatement},
    },
};
use serde::{Deserialize, Serialize};

use crate::error::{json_error_handler, path_error_handler, ApiError};

#[derive(Deserialize, Debug)]
pub struct CreatePersonRequest {
    nome: Option<String>,
    email: Option<String>,
}

/// Partial update, absent (or null) fields keep their stored value
#[derive(Deserialize, Debug)]
pub struct UpdatePersonRequest {
    nome: Option<String>,
    email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub mensagem: String,
}

/// Health check, the browser client is served from /app
#[get("/")]
async fn health() -> impl Responder {
    "API do CRUD de Pessoas está funcionando!"
}

#[get("/app")]
async fn app_page() -> impl Responder {
    Html(include_str!("../static/index.html").to_string())
}

#[get("/app/script.js")]
async fn app_script() -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(include_str!("../static/script.js"))
}

#[get("/app/styles.css")]
async fn app_styles() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(include_str!("../static/styles.css"))
}

#[get("/pessoas")]
async fn list_people(
    request_manager: web::Data<RequestManager>,
) -> Result<HttpResponse, ApiError> {
    let people = request_manager.send_list()?;

    Ok(HttpResponse::Ok().json(people))
}

#[post("/pessoas")]
async fn create_person(
    request_manager: web::Data<RequestManager>,
    body: web::Json<CreatePersonRequest>,
) -> Result<HttpResponse, ApiError> {
    let CreatePersonRequest { nome, email } = body.into_inner();

    let (nome, email) = match (nome, email) {
        (Some(nome), Some(email)) => (nome, email),
        _ => {
            return Err(ApiError::BadRequest(
                "Dados incompletos: nome e email são obrigatórios.".to_string(),
            ))
        }
    };

    let person = request_manager.send_add(NewPersonData::new(nome, email))?;

    Ok(HttpResponse::Created().json(person))
}

#[get("/pessoas/{id}")]
async fn get_person(
    request_manager: web::Data<RequestManager>,
    id: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let person = request_manager.send_get(EntityId(id.into_inner()))?;

    Ok(HttpResponse::Ok().json(person))
}

#[put("/pessoas/{id}")]
async fn update_person(
    request_manager: web::Data<RequestManager>,
    id: web::Path<u64>,
    body: web::Json<UpdatePersonRequest>,
) -> Result<HttpResponse, ApiError> {
    let UpdatePersonRequest { nome, email } = body.into_inner();

    let person_update = UpdatePersonData {
        nome: UpdateStatement::from(nome),
        email: UpdateStatement::from(email),
    };

    if person_update.is_empty() {
        return Err(ApiError::BadRequest(
            "Nenhum dado fornecido para atualização.".to_string(),
        ));
    }

    let person = request_manager.send_update(EntityId(id.into_inner()), person_update)?;

    Ok(HttpResponse::Ok().json(person))
}

#[delete("/pessoas/{id}")]
async fn delete_person(
    request_manager: web::Data<RequestManager>,
    id: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    request_manager.send_remove(EntityId(id.into_inner()))?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        mensagem: "Pessoa deletada com sucesso.".to_string(),
    }))
}

pub fn service_config(config: &mut web::ServiceConfig) {
    config
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(health)
        .service(app_page)
        .service(app_script)
        .service(app_styles)
        .service(list_people)
        .service(create_person)
        .service(get_person)
        .service(update_person)
        .service(delete_person);
}

#[cfg(test)]
mod tests {
    use actix_http::Request;
    use actix_web::{
        body::BoxBody,
        dev::{Service, ServiceResponse},
        http::StatusCode,
        test, App, Error,
    };
    use database::database::{database::Database, options::DatabaseOptions};
    use serde_json::{json, Value};

    use crate::error::ErrorBody;

    use super::*;

    async fn test_app() -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>
    {
        let request_manager = Database::new(DatabaseOptions::new_test())
            .start()
            .expect("Should be able to start an in-memory database");

        test::init_service(
            App::new()
                .app_data(web::Data::new(request_manager))
                .configure(service_config),
        )
        .await
    }

    async fn create_test_person(
        app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
        nome: &str,
        email: &str,
    ) -> Value {
        let response = test::call_service(
            app,
            test::TestRequest::post()
                .uri("/pessoas")
                .set_json(json!({ "nome": nome, "email": email }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);

        test::read_body_json(response).await
    }

    mod health {
        use super::*;

        #[actix_web::test]
        async fn root_returns_the_confirmation_string() {
            let app = test_app().await;

            let response =
                test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

            assert_eq!(response.status(), StatusCode::OK);

            let body = test::read_body(response).await;

            assert_eq!(body, "API do CRUD de Pessoas está funcionando!");
        }
    }

    mod create {
        use super::*;

        #[actix_web::test]
        async fn create_returns_201_with_the_assigned_id() {
            // Given an empty database
            let app = test_app().await;

            // When we create a person
            let created = create_test_person(&app, "Maria Silva", "maria@example.com").await;

            // Then the response carries the record with its storage assigned id
            assert_eq!(
                created,
                json!({ "id": 1, "nome": "Maria Silva", "email": "maria@example.com" })
            );
        }

        #[actix_web::test]
        async fn created_people_show_up_in_the_listing() {
            // Given two created people
            let app = test_app().await;

            create_test_person(&app, "Maria Silva", "maria@example.com").await;
            create_test_person(&app, "João Souza", "joao@example.com").await;

            // When we list
            let response =
                test::call_service(&app, test::TestRequest::get().uri("/pessoas").to_request())
                    .await;

            assert_eq!(response.status(), StatusCode::OK);

            let list: Value = test::read_body_json(response).await;

            // Then both people come back, ordered by id
            assert_eq!(
                list,
                json!([
                    { "id": 1, "nome": "Maria Silva", "email": "maria@example.com" },
                    { "id": 2, "nome": "João Souza", "email": "joao@example.com" },
                ])
            );
        }

        #[actix_web::test]
        async fn missing_fields_are_a_400() {
            let app = test_app().await;

            let response = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/pessoas")
                    .set_json(json!({ "nome": "Maria Silva" }))
                    .to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body: ErrorBody = test::read_body_json(response).await;

            assert_eq!(body.erro, "Dados incompletos: nome e email são obrigatórios.");
        }

        #[actix_web::test]
        async fn empty_nome_is_a_400() {
            let app = test_app().await;

            let response = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/pessoas")
                    .set_json(json!({ "nome": "", "email": "maria@example.com" }))
                    .to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body: ErrorBody = test::read_body_json(response).await;

            assert_eq!(body.erro, "O campo 'nome' não pode ser vazio.");
        }

        #[actix_web::test]
        async fn duplicate_email_is_a_409() {
            // Given a person with a registered email
            let app = test_app().await;

            create_test_person(&app, "Maria Silva", "maria@example.com").await;

            // When we create another person with the same email
            let response = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/pessoas")
                    .set_json(json!({ "nome": "Outra Maria", "email": "maria@example.com" }))
                    .to_request(),
            )
            .await;

            // Then the request conflicts
            assert_eq!(response.status(), StatusCode::CONFLICT);

            let body: ErrorBody = test::read_body_json(response).await;

            assert_eq!(body.erro, "Email 'maria@example.com' já cadastrado.");
        }

        #[actix_web::test]
        async fn deleted_ids_are_not_reused() {
            // Given two people where the first is deleted
            let app = test_app().await;

            create_test_person(&app, "Maria Silva", "maria@example.com").await;
            create_test_person(&app, "João Souza", "joao@example.com").await;

            let response = test::call_service(
                &app,
                test::TestRequest::delete().uri("/pessoas/1").to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::OK);

            // When we create a third person
            let created = create_test_person(&app, "Ana Lima", "ana@example.com").await;

            // Then the id sequence continues rather than filling the gap
            assert_eq!(created["id"], json!(3));
        }
    }

    mod read {
        use super::*;

        #[actix_web::test]
        async fn listing_starts_empty() {
            let app = test_app().await;

            let response =
                test::call_service(&app, test::TestRequest::get().uri("/pessoas").to_request())
                    .await;

            assert_eq!(response.status(), StatusCode::OK);

            let list: Value = test::read_body_json(response).await;

            assert_eq!(list, json!([]));
        }

        #[actix_web::test]
        async fn get_by_id_returns_the_person() {
            let app = test_app().await;

            create_test_person(&app, "Maria Silva", "maria@example.com").await;

            let response = test::call_service(
                &app,
                test::TestRequest::get().uri("/pessoas/1").to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::OK);

            let person: Value = test::read_body_json(response).await;

            assert_eq!(
                person,
                json!({ "id": 1, "nome": "Maria Silva", "email": "maria@example.com" })
            );
        }

        #[actix_web::test]
        async fn get_unknown_id_is_a_404() {
            let app = test_app().await;

            let response = test::call_service(
                &app,
                test::TestRequest::get().uri("/pessoas/10").to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND);

            let body: ErrorBody = test::read_body_json(response).await;

            assert_eq!(body.erro, "Pessoa não encontrada.");
        }
    }

    mod update {
        use super::*;

        #[actix_web::test]
        async fn updating_one_field_keeps_the_other() {
            // Given a person
            let app = test_app().await;

            create_test_person(&app, "Maria Silva", "maria@example.com").await;

            // When we update only the nome
            let response = test::call_service(
                &app,
                test::TestRequest::put()
                    .uri("/pessoas/1")
                    .set_json(json!({ "nome": "Maria Souza" }))
                    .to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::OK);

            // Then the nome changes and the email is untouched
            let person: Value = test::read_body_json(response).await;

            assert_eq!(
                person,
                json!({ "id": 1, "nome": "Maria Souza", "email": "maria@example.com" })
            );
        }

        #[actix_web::test]
        async fn a_null_field_keeps_its_stored_value() {
            let app = test_app().await;

            create_test_person(&app, "Maria Silva", "maria@example.com").await;

            let response = test::call_service(
                &app,
                test::TestRequest::put()
                    .uri("/pessoas/1")
                    .set_json(json!({ "nome": null, "email": "souza@example.com" }))
                    .to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::OK);

            let person: Value = test::read_body_json(response).await;

            assert_eq!(
                person,
                json!({ "id": 1, "nome": "Maria Silva", "email": "souza@example.com" })
            );
        }

        #[actix_web::test]
        async fn an_empty_body_is_a_400() {
            let app = test_app().await;

            create_test_person(&app, "Maria Silva", "maria@example.com").await;

            let response = test::call_service(
                &app,
                test::TestRequest::put()
                    .uri("/pessoas/1")
                    .set_json(json!({}))
                    .to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body: ErrorBody = test::read_body_json(response).await;

            assert_eq!(body.erro, "Nenhum dado fornecido para atualização.");
        }

        #[actix_web::test]
        async fn updating_an_unknown_id_is_a_404() {
            let app = test_app().await;

            let response = test::call_service(
                &app,
                test::TestRequest::put()
                    .uri("/pessoas/10")
                    .set_json(json!({ "nome": "Maria Souza" }))
                    .to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND);

            let body: ErrorBody = test::read_body_json(response).await;

            assert_eq!(body.erro, "Pessoa não encontrada.");
        }

        #[actix_web::test]
        async fn updating_to_another_persons_email_is_a_409() {
            // Given two people
            let app = test_app().await;

            create_test_person(&app, "Maria Silva", "maria@example.com").await;
            create_test_person(&app, "João Souza", "joao@example.com").await;

            // When we update the second person to the first person's email
            let response = test::call_service(
                &app,
                test::TestRequest::put()
                    .uri("/pessoas/2")
                    .set_json(json!({ "email": "maria@example.com" }))
                    .to_request(),
            )
            .await;

            // Then the request conflicts
            assert_eq!(response.status(), StatusCode::CONFLICT);

            let body: ErrorBody = test::read_body_json(response).await;

            assert_eq!(body.erro, "Email 'maria@example.com' já cadastrado.");
        }

        #[actix_web::test]
        async fn updating_a_person_to_their_own_email_succeeds() {
            let app = test_app().await;

            create_test_person(&app, "Maria Silva", "maria@example.com").await;

            let response = test::call_service(
                &app,
                test::TestRequest::put()
                    .uri("/pessoas/1")
                    .set_json(json!({ "nome": "Maria Souza", "email": "maria@example.com" }))
                    .to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    mod delete {
        use super::*;

        #[actix_web::test]
        async fn deleting_removes_the_person_from_the_listing() {
            // Given a person
            let app = test_app().await;

            create_test_person(&app, "Maria Silva", "maria@example.com").await;

            // When we delete them
            let response = test::call_service(
                &app,
                test::TestRequest::delete().uri("/pessoas/1").to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::OK);

            let body: MessageResponse = test::read_body_json(response).await;

            assert_eq!(body.mensagem, "Pessoa deletada com sucesso.");

            // Then the listing is empty again
            let response =
                test::call_service(&app, test::TestRequest::get().uri("/pessoas").to_request())
                    .await;

            let list: Value = test::read_body_json(response).await;

            assert_eq!(list, json!([]));
        }

        #[actix_web::test]
        async fn deleting_an_unknown_id_is_a_404() {
            let app = test_app().await;

            let response = test::call_service(
                &app,
                test::TestRequest::delete().uri("/pessoas/10").to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND);

            let body: ErrorBody = test::read_body_json(response).await;

            assert_eq!(body.erro, "Pessoa não encontrada.");
        }

        #[actix_web::test]
        async fn a_deleted_email_can_be_registered_again() {
            let app = test_app().await;

            create_test_person(&app, "Maria Silva", "maria@example.com").await;

            let response = test::call_service(
                &app,
                test::TestRequest::delete().uri("/pessoas/1").to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::OK);

            create_test_person(&app, "Nova Maria", "maria@example.com").await;
        }
    }

    mod request_parsing {
        use super::*;

        #[actix_web::test]
        async fn a_non_numeric_id_is_a_400_with_the_error_shape() {
            let app = test_app().await;

            let response = test::call_service(
                &app,
                test::TestRequest::delete().uri("/pessoas/abc").to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body: ErrorBody = test::read_body_json(response).await;

            assert_eq!(body.erro, "O id informado não é válido.");
        }

        #[actix_web::test]
        async fn a_malformed_json_body_is_a_400_with_the_error_shape() {
            let app = test_app().await;

            let response = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/pessoas")
                    .insert_header(("content-type", "application/json"))
                    .set_payload("{ not json")
                    .to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body: ErrorBody = test::read_body_json(response).await;

            assert_eq!(body.erro, "Corpo da requisição inválido.");
        }
    }
}
