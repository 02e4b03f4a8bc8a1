use actix_web::{
    get,
    http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType},
    post,
    web::{self, Data},
    HttpResponse, Responder,
};
use actix_web_lab::respond::Html;
use certificate::{
    consts::consts::{CERTIFICATE_FILE_NAME, CERTIFICATE_MIME_TYPE, STUDENT_NOT_FOUND_MESSAGE},
    model::certificate::CertificateRequest,
    service::service::{CertificateService, Issuance},
};

use crate::{error::AppError, page::form_page};

pub fn configure(config: &mut web::ServiceConfig) {
    config.service(index).service(generate_certificate);
}

/// Submission form
#[get("/")]
async fn index() -> impl Responder {
    Html(form_page(None))
}

/// Verifies the submitted name and email, answering with the certificate as a download or
/// the form again with a message
#[post("/generate_certificate")]
async fn generate_certificate(
    service_ref: Data<CertificateService>,
    form: web::Form<CertificateRequest>,
) -> Result<HttpResponse, AppError> {
    let request = form.into_inner();
    let service = service_ref.clone();

    // Rendering is CPU bound, keep it off the async workers
    let issuance = web::block(move || service.issue(&request)).await??;

    let response = match issuance {
        Issuance::Issued(certificate) => HttpResponse::Ok()
            .content_type(CERTIFICATE_MIME_TYPE)
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(
                    CERTIFICATE_FILE_NAME.to_string(),
                )],
            })
            .body(certificate.into_bytes()),
        Issuance::Rejected => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(form_page(Some(STUDENT_NOT_FOUND_MESSAGE))),
    };

    Ok(response)
}
