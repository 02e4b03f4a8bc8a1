use std::sync::Arc;

use num_format::{Locale, ToFormattedString};
use thiserror::Error;

use crate::{
    model::certificate::{CertificateImage, CertificateRequest},
    render::renderer::{CertificateRenderer, RenderError},
    roster::{lookup::find, roster::Roster},
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Unable to render certificate: {0}")]
    Render(#[from] RenderError),
}

/// Terminal states of a certificate request
#[derive(Debug, PartialEq)]
pub enum Issuance {
    /// The student was found and the certificate rendered
    Issued(CertificateImage),
    /// No roster entry matches the submitted name and email
    Rejected,
}

impl Issuance {
    pub fn is_issued(&self) -> bool {
        matches!(self, Issuance::Issued(_))
    }
}

/// Validates requests against the roster and renders certificates for matches.
///
/// Holds no mutable state, one instance is shared by every worker.
pub struct CertificateService {
    roster: Arc<Roster>,
    renderer: CertificateRenderer,
}

impl CertificateService {
    pub fn new(roster: Arc<Roster>, renderer: CertificateRenderer) -> Self {
        Self { roster, renderer }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn renderer(&self) -> &CertificateRenderer {
        &self.renderer
    }

    pub fn issue(&self, request: &CertificateRequest) -> Result<Issuance, ServiceError> {
        let student = match find(&self.roster, &request.name, &request.email) {
            Some(student) => student,
            None => {
                log::info!("Rejected certificate request, no matching student");
                return Ok(Issuance::Rejected);
            }
        };

        let course = student
            .course
            .as_deref()
            .filter(|_| self.renderer.options().includes_course());

        let certificate = self.renderer.render(&student.name, course)?;

        log::info!(
            "Issued certificate for {} ({} bytes)",
            student.name,
            certificate.len().to_formatted_string(&Locale::en)
        );

        Ok(Issuance::Issued(certificate))
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::*;
    use crate::{
        model::student::StudentRecord,
        render::options::{Layout, RenderOptions},
    };

    fn test_service(options: RenderOptions) -> CertificateService {
        let roster = Roster::from_records(vec![
            StudentRecord::new_test(),
            StudentRecord::new("Bob Jones".to_string(), "bob@example.com".to_string(), None),
        ]);

        let template = RgbImage::from_pixel(1000, 700, Rgb([0, 0, 0]));

        CertificateService::new(
            Arc::new(roster),
            CertificateRenderer::from_image(template, options),
        )
    }

    #[test_log::test]
    fn registered_student_is_issued_a_png() {
        let service = test_service(RenderOptions::name_and_course());

        let issuance = service
            .issue(&CertificateRequest::new("Alice Smith", "alice@example.com"))
            .expect("should not error");

        match issuance {
            Issuance::Issued(certificate) => {
                assert!(!certificate.is_empty());
                assert!(certificate.has_png_signature());
            }
            Issuance::Rejected => panic!("Alice should be issued a certificate"),
        }
    }

    #[test_log::test]
    fn wrong_email_is_rejected() {
        let service = test_service(RenderOptions::name_and_course());

        let issuance = service
            .issue(&CertificateRequest::new("Alice Smith", "wrong@example.com"))
            .expect("should not error");

        assert_eq!(issuance, Issuance::Rejected);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let service = test_service(RenderOptions::name_only());

        let issuance = service
            .issue(&CertificateRequest::default())
            .expect("should not error");

        assert!(!issuance.is_issued());
    }

    #[test_log::test]
    fn name_alone_is_rejected_when_roster_email_is_blank() {
        // Given a roster file where Bob's email cell is empty
        let roster = Roster::from_reader("name,email\nBob Jones,\n".as_bytes())
            .expect("should load roster");
        let template = RgbImage::from_pixel(1000, 700, Rgb([0, 0, 0]));
        let service = CertificateService::new(
            Arc::new(roster),
            CertificateRenderer::from_image(template, RenderOptions::name_only()),
        );

        // When the form is submitted without an email
        let issuance = service
            .issue(&CertificateRequest::new("Bob Jones", ""))
            .expect("should not error");

        // Then no certificate is issued
        assert!(!issuance.is_issued());
    }

    #[test]
    fn course_is_drawn_only_when_the_layout_includes_it() {
        let with_course = test_service(RenderOptions::name_and_course());
        let name_only = test_service(RenderOptions::name_and_course().set_layout(Layout::NameOnly));

        let request = CertificateRequest::new("Alice Smith", "alice@example.com");

        let expected_with_course = with_course
            .renderer()
            .render("Alice Smith", Some("Data Science"))
            .unwrap();
        let expected_name_only = name_only.renderer().render("Alice Smith", None).unwrap();

        assert_eq!(
            with_course.issue(&request).unwrap(),
            Issuance::Issued(expected_with_course)
        );
        assert_eq!(
            name_only.issue(&request).unwrap(),
            Issuance::Issued(expected_name_only)
        );
    }

    #[test]
    fn student_without_course_is_issued() {
        let service = test_service(RenderOptions::name_and_course());

        let issuance = service
            .issue(&CertificateRequest::new("Bob Jones", "bob@example.com"))
            .unwrap();

        assert!(issuance.is_issued());
    }

    #[test]
    fn unreadable_template_is_an_error() {
        let roster = Roster::from_records(vec![StudentRecord::new_test()]);
        let renderer = CertificateRenderer::new(
            "/tmp/certificate/does-not-exist/template.jpg".into(),
            RenderOptions::name_only(),
        );
        let service = CertificateService::new(Arc::new(roster), renderer);

        let result = service.issue(&CertificateRequest::new("Alice Smith", "alice@example.com"));

        assert!(matches!(result, Err(ServiceError::Render(_))));
    }

    #[test]
    fn rejection_does_not_touch_the_template() {
        let roster = Roster::from_records(vec![StudentRecord::new_test()]);
        let renderer = CertificateRenderer::new(
            "/tmp/certificate/does-not-exist/template.jpg".into(),
            RenderOptions::name_only(),
        );
        let service = CertificateService::new(Arc::new(roster), renderer);

        let result = service.issue(&CertificateRequest::new("Mallory", "alice@example.com"));

        assert_eq!(result.unwrap(), Issuance::Rejected);
    }
}
