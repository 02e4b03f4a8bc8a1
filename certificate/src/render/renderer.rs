use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use image::{codecs::png::PngEncoder, ColorType, ImageEncoder, ImageError, RgbImage};
use thiserror::Error;

use crate::model::certificate::CertificateImage;

use super::{
    options::RenderOptions,
    text::{self, TextSize},
};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cannot read certificate template {0}: {1}")]
    TemplateUnreadable(PathBuf, ImageError),

    #[error("Cannot encode certificate: {0}")]
    Encode(ImageError),
}

/// Where a line of text goes. `(x, y)` is the left end of its baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextPlacement {
    pub x: i32,
    pub y: i32,
    pub size: TextSize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub name: TextPlacement,
    pub course: Option<TextPlacement>,
}

/// Left edge that centers a box of `text_width` pixels. Negative when the text is wider
/// than the image.
pub fn center_x(image_width: u32, text_width: u32) -> i32 {
    (image_width as i32 - text_width as i32).div_euclid(2)
}

/// Computes where the name (and course, when the layout draws one) go on a template of the
/// given size.
pub fn compute_placement(
    (width, height): (u32, u32),
    name: &str,
    course: Option<&str>,
    options: &RenderOptions,
) -> Placement {
    let name_size = text::measure(name, &options.name_style());

    let name = TextPlacement {
        x: center_x(width, name_size.width),
        y: height as i32 / 2 + options.name_y_offset,
        size: name_size,
    };

    let course = course
        .filter(|_| options.includes_course())
        .map(|course| {
            let course_size = text::measure(course, &options.course_style());

            TextPlacement {
                x: center_x(width, course_size.width),
                y: name.y + name.size.height as i32 + options.course_gap,
                size: course_size,
            }
        });

    Placement { name, course }
}

enum TemplateSource {
    /// Read from disk on every render
    Path(PathBuf),
    /// Decoded once and reused
    Cached(RgbImage),
}

/// Draws names onto the certificate template and encodes the result as PNG
pub struct CertificateRenderer {
    template: TemplateSource,
    options: RenderOptions,
}

impl CertificateRenderer {
    pub fn new(template_path: PathBuf, options: RenderOptions) -> Self {
        Self {
            template: TemplateSource::Path(template_path),
            options,
        }
    }

    pub fn from_image(template: RgbImage, options: RenderOptions) -> Self {
        Self {
            template: TemplateSource::Cached(template),
            options,
        }
    }

    /// Decodes the template now and keeps it for every following render
    pub fn with_cached_template(self) -> Result<Self, RenderError> {
        let template = self.load_template()?.into_owned();

        Ok(Self {
            template: TemplateSource::Cached(template),
            options: self.options,
        })
    }

    /// Checks the template can be decoded, returning its dimensions
    pub fn validate_template(&self) -> Result<(u32, u32), RenderError> {
        Ok(self.load_template()?.dimensions())
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn is_cached(&self) -> bool {
        matches!(self.template, TemplateSource::Cached(_))
    }

    fn load_template(&self) -> Result<Cow<'_, RgbImage>, RenderError> {
        match &self.template {
            TemplateSource::Path(path) => Ok(Cow::Owned(read_template(path)?)),
            TemplateSource::Cached(template) => Ok(Cow::Borrowed(template)),
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn render(&self, name: &str, course: Option<&str>) -> Result<CertificateImage, RenderError> {
        let template = self.load_template()?.into_owned();

        render_onto(template, name, course, &self.options)
    }
}

fn read_template(path: &Path) -> Result<RgbImage, RenderError> {
    let template = image::open(path)
        .map_err(|e| RenderError::TemplateUnreadable(path.to_owned(), e))?
        .to_rgb8();

    Ok(template)
}

/// Draws the text onto `template` and encodes it
pub fn render_onto(
    mut template: RgbImage,
    name: &str,
    course: Option<&str>,
    options: &RenderOptions,
) -> Result<CertificateImage, RenderError> {
    let placement = compute_placement(template.dimensions(), name, course, options);

    text::draw(
        &mut template,
        name,
        (placement.name.x, placement.name.y),
        &options.name_style(),
    );

    if let (Some(course), Some(course_placement)) = (course, placement.course) {
        text::draw(
            &mut template,
            course,
            (course_placement.x, course_placement.y),
            &options.course_style(),
        );
    }

    let (width, height) = template.dimensions();

    Ok(CertificateImage::new(encode_png(&template)?, width, height))
}

fn encode_png(image: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();

    PngEncoder::new(&mut bytes)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)
        .map_err(RenderError::Encode)?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use image::Rgb;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::render::options::Layout;

    const BACKGROUND: Rgb<u8> = Rgb([30, 60, 90]);

    fn test_template() -> RgbImage {
        RgbImage::from_pixel(1200, 900, BACKGROUND)
    }

    fn test_directory() -> PathBuf {
        let directory: PathBuf = ["/", "tmp", "certificate", &Uuid::new_v4().to_string()]
            .iter()
            .collect();

        fs::create_dir_all(&directory).expect("should create test directory");

        directory
    }

    mod placement {
        use super::*;

        #[rstest]
        #[case("Alice Smith")]
        #[case("A")]
        #[case("Bartholomew Montgomery-Fitzwilliam III")]
        #[case("")]
        fn name_is_centered(#[case] name: &str) {
            let width = 1200;

            let placement =
                compute_placement((width, 900), name, None, &RenderOptions::name_only());

            let left_margin = placement.name.x;
            let right_margin = width as i32 - placement.name.x - placement.name.size.width as i32;

            assert!(
                (left_margin - right_margin).abs() <= 1,
                "{} is off center: {} vs {}",
                name,
                left_margin,
                right_margin
            );
        }

        #[test]
        fn center_rounds_down_like_floor_division() {
            assert_eq!(center_x(101, 50), 25);
            assert_eq!(center_x(100, 101), -1);
        }

        #[test]
        fn name_baseline_uses_layout_offset() {
            let name_only = compute_placement((1200, 900), "Alice", None, &RenderOptions::name_only());
            let with_course =
                compute_placement((1200, 900), "Alice", None, &RenderOptions::name_and_course());

            assert_eq!(name_only.name.y, 450 - 190);
            assert_eq!(with_course.name.y, 450 - 75);
        }

        #[test]
        fn course_sits_below_name_with_fixed_gap() {
            let placement = compute_placement(
                (1200, 900),
                "Alice Smith",
                Some("Data Science"),
                &RenderOptions::name_and_course(),
            );

            let course = placement.course.expect("should place the course");

            assert_eq!(
                course.y,
                placement.name.y + placement.name.size.height as i32 + 57
            );
            assert!(course.y - course.size.height as i32 > placement.name.y);
            assert!((course.x - (1200 - course.x - course.size.width as i32)).abs() <= 1);
        }

        #[test]
        fn name_only_layout_ignores_course() {
            let placement = compute_placement(
                (1200, 900),
                "Alice Smith",
                Some("Data Science"),
                &RenderOptions::name_only(),
            );

            assert_eq!(placement.course, None);
        }

        #[test]
        fn missing_course_places_nothing() {
            let placement = compute_placement(
                (1200, 900),
                "Alice Smith",
                None,
                &RenderOptions::name_and_course(),
            );

            assert_eq!(placement.course, None);
        }
    }

    mod render {
        use super::*;

        #[test]
        fn output_is_png_with_template_dimensions() {
            let certificate = render_onto(
                test_template(),
                "Alice Smith",
                None,
                &RenderOptions::name_only(),
            )
            .expect("should render");

            assert!(certificate.has_png_signature());
            assert_eq!((certificate.width(), certificate.height()), (1200, 900));

            let decoded = image::load_from_memory(certificate.bytes())
                .expect("should decode")
                .to_rgb8();

            assert_ne!(decoded, test_template(), "name should be drawn");
        }

        #[test]
        fn rendering_is_deterministic() {
            let renderer = CertificateRenderer::from_image(
                test_template(),
                RenderOptions::name_and_course(),
            );

            let first = renderer
                .render("Alice Smith", Some("Data Science"))
                .expect("should render");
            let second = renderer
                .render("Alice Smith", Some("Data Science"))
                .expect("should render");

            assert_eq!(first.bytes(), second.bytes());
        }

        #[test]
        fn course_changes_the_output() {
            let renderer = CertificateRenderer::from_image(
                test_template(),
                RenderOptions::name_and_course(),
            );

            let without = renderer.render("Alice Smith", None).unwrap();
            let with = renderer.render("Alice Smith", Some("Data Science")).unwrap();

            assert_ne!(without.bytes(), with.bytes());
        }

        #[test]
        fn empty_name_renders_the_bare_template() {
            let certificate =
                render_onto(test_template(), "", None, &RenderOptions::name_only())
                    .expect("should render");

            let decoded = image::load_from_memory(certificate.bytes())
                .unwrap()
                .to_rgb8();

            assert_eq!(decoded, test_template());
        }

        #[test]
        fn name_wider_than_template_is_clipped() {
            let small = RgbImage::from_pixel(60, 400, BACKGROUND);
            let options = RenderOptions::name_only().set_layout(Layout::NameOnly);

            let certificate =
                render_onto(small, "Alice Smith", None, &options).expect("should render");

            assert!(certificate.has_png_signature());
        }
    }

    mod template {
        use super::*;

        #[test]
        fn template_is_read_from_disk() {
            let path = test_directory().join("template.png");
            test_template().save(&path).expect("should save template");

            let renderer = CertificateRenderer::new(path, RenderOptions::name_only());

            assert_eq!(renderer.validate_template().unwrap(), (1200, 900));
            assert!(!renderer.is_cached());
            assert!(renderer.render("Alice Smith", None).unwrap().has_png_signature());
        }

        #[test]
        fn cached_template_survives_file_removal() {
            let directory = test_directory();
            let path = directory.join("template.png");
            test_template().save(&path).expect("should save template");

            let renderer = CertificateRenderer::new(path.clone(), RenderOptions::name_only())
                .with_cached_template()
                .expect("should cache template");

            fs::remove_file(&path).unwrap();

            assert!(renderer.is_cached());
            assert!(renderer.render("Alice Smith", None).is_ok());
        }

        #[test]
        fn missing_template_fails() {
            let path = test_directory().join("missing.jpg");

            let renderer = CertificateRenderer::new(path, RenderOptions::name_only());

            assert!(matches!(
                renderer.validate_template(),
                Err(RenderError::TemplateUnreadable(_, _))
            ));
            assert!(matches!(
                renderer.render("Alice Smith", None),
                Err(RenderError::TemplateUnreadable(_, _))
            ));
        }

        #[test]
        fn corrupt_template_fails() {
            let path = test_directory().join("template.png");
            fs::write(&path, b"not an image").unwrap();

            let renderer = CertificateRenderer::new(path, RenderOptions::name_only());

            assert!(matches!(
                renderer.render("Alice Smith", None),
                Err(RenderError::TemplateUnreadable(_, _))
            ));
        }
    }
}
