use actix_web::{
    error::{InternalError, JsonPayloadError, PathError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use database::database::{
    commands::StatementError, request_manager::RequestManagerError, table::table::ApplyErrors,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body shape shared by every failure response, the browser client reads the `erro` field
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub erro: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            erro: self.to_string(),
        })
    }
}

/// Maps database failures onto the wire contract. Existence failures are 404s,
/// constraint failures are 400/409, everything else is a 500
impl From<RequestManagerError> for ApiError {
    fn from(error: RequestManagerError) -> Self {
        match error {
            RequestManagerError::Statement(StatementError::Apply(apply_error)) => {
                match apply_error {
                    ApplyErrors::CannotGetDoesNotExist(_)
                    | ApplyErrors::CannotUpdateDoesNotExist(_)
                    | ApplyErrors::CannotDeleteDoesNotExist(_) => {
                        ApiError::NotFound("Pessoa não encontrada.".to_string())
                    }
                    ApplyErrors::UniqueConstraintViolation(email) => {
                        ApiError::Conflict(format!("Email '{}' já cadastrado.", email))
                    }
                    ApplyErrors::NotNullConstraintViolation(field) => {
                        ApiError::BadRequest(format!("O campo '{}' não pode ser vazio.", field))
                    }
                }
            }
            RequestManagerError::Statement(StatementError::Persistence(_))
            | RequestManagerError::DatabaseTimeout => {
                ApiError::Internal("Erro interno ao acessar o banco de dados.".to_string())
            }
        }
    }
}

/// Rewrites actix's json payload failures into the `erro` body shape
pub fn json_error_handler(error: JsonPayloadError, _request: &HttpRequest) -> actix_web::Error {
    let response = ApiError::BadRequest("Corpo da requisição inválido.".to_string());

    InternalError::from_response(error, response.error_response()).into()
}

/// Rewrites path extraction failures (e.g. a non numeric id) into the `erro` body shape
pub fn path_error_handler(error: PathError, _request: &HttpRequest) -> actix_web::Error {
    let response = ApiError::BadRequest("O id informado não é válido.".to_string());

    InternalError::from_response(error, response.error_response()).into()
}
