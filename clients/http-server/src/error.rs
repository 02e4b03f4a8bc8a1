use actix_web::{
    error::BlockingError,
    http::{header::ContentType, StatusCode},
    HttpResponse, ResponseError,
};
use certificate::service::service::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("Certificate worker stopped before finishing: {0}")]
    Blocking(#[from] BlockingError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("Certificate request failed: {}", self);

        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body("Unable to generate the certificate, please try again later.")
    }
}
