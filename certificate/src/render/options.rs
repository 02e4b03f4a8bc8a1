use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;

use super::text::TextStyle;

/// Which lines are drawn on the certificate
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Layout {
    NameOnly,
    NameAndCourse,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FontFamily {
    /// Single stroke per line
    Simplex,
    /// Every stroke is doubled with a one unit offset, giving a heavier face
    Duplex,
}

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Cannot read render options file {0}: {1}")]
    UnableToRead(PathBuf, std::io::Error),

    #[error("Malformed render options file {0}: {1}")]
    Malformed(PathBuf, serde_json::Error),

    #[error("Invalid render option: {0}")]
    Invalid(String),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderOptions {
    pub layout: Layout,
    pub font_family: FontFamily,
    pub name_scale: f32,
    pub course_scale: f32,
    pub thickness: u32,
    /// RGB
    pub color: [u8; 3],
    /// Baseline of the name, relative to the vertical center of the template
    pub name_y_offset: i32,
    /// Pixels between the bottom of the name box and the course baseline
    pub course_gap: i32,
}

/// Every field is optional so a file only has to name what it overrides
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct RenderOptionsFile {
    layout: Option<Layout>,
    font_family: Option<FontFamily>,
    name_scale: Option<f32>,
    course_scale: Option<f32>,
    thickness: Option<u32>,
    color: Option<[u8; 3]>,
    name_y_offset: Option<i32>,
    course_gap: Option<i32>,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl RenderOptions {
    pub fn name_only() -> Self {
        Self {
            layout: Layout::NameOnly,
            font_family: FontFamily::Duplex,
            name_scale: 2.5,
            course_scale: 1.5,
            thickness: 5,
            color: [255, 255, 255],
            name_y_offset: -190,
            course_gap: 57,
        }
    }

    pub fn name_and_course() -> Self {
        Self {
            layout: Layout::NameAndCourse,
            font_family: FontFamily::Simplex,
            name_y_offset: -75,
            ..Self::name_only()
        }
    }

    pub fn for_layout(layout: Layout) -> Self {
        match layout {
            Layout::NameOnly => Self::name_only(),
            Layout::NameAndCourse => Self::name_and_course(),
        }
    }

    /// Loads overrides from a JSON file. The file's `layout` (or `default_layout` when the
    /// file has none) picks the base defaults that the remaining fields are applied on top of.
    pub fn from_json_file(path: &Path, default_layout: Layout) -> Result<Self, OptionsError> {
        let contents =
            fs::read_to_string(path).map_err(|e| OptionsError::UnableToRead(path.to_owned(), e))?;

        Self::from_json_str(&contents, default_layout)
            .map_err(|e| OptionsError::Malformed(path.to_owned(), e))
    }

    fn from_json_str(contents: &str, default_layout: Layout) -> Result<Self, serde_json::Error> {
        let file: RenderOptionsFile = serde_json::from_str(contents)?;

        let defaults = Self::for_layout(file.layout.unwrap_or(default_layout));

        Ok(Self {
            layout: defaults.layout,
            font_family: file.font_family.unwrap_or(defaults.font_family),
            name_scale: file.name_scale.unwrap_or(defaults.name_scale),
            course_scale: file.course_scale.unwrap_or(defaults.course_scale),
            thickness: file.thickness.unwrap_or(defaults.thickness),
            color: file.color.unwrap_or(defaults.color),
            name_y_offset: file.name_y_offset.unwrap_or(defaults.name_y_offset),
            course_gap: file.course_gap.unwrap_or(defaults.course_gap),
        })
    }

    pub fn set_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn set_font_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }

    pub fn set_name_scale(mut self, name_scale: f32) -> Self {
        self.name_scale = name_scale;
        self
    }

    pub fn set_course_scale(mut self, course_scale: f32) -> Self {
        self.course_scale = course_scale;
        self
    }

    pub fn set_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn set_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn set_name_y_offset(mut self, name_y_offset: i32) -> Self {
        self.name_y_offset = name_y_offset;
        self
    }

    pub fn set_course_gap(mut self, course_gap: i32) -> Self {
        self.course_gap = course_gap;
        self
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        for (field, scale) in [("name_scale", self.name_scale), ("course_scale", self.course_scale)] {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(OptionsError::Invalid(format!(
                    "{} must be a positive number, got {}",
                    field, scale
                )));
            }
        }

        if self.thickness == 0 {
            return Err(OptionsError::Invalid(
                "thickness must be at least 1 pixel".to_string(),
            ));
        }

        Ok(())
    }

    pub fn includes_course(&self) -> bool {
        self.layout == Layout::NameAndCourse
    }

    pub fn name_style(&self) -> TextStyle {
        TextStyle {
            family: self.font_family,
            scale: self.name_scale,
            thickness: self.thickness,
            color: image::Rgb(self.color),
        }
    }

    pub fn course_style(&self) -> TextStyle {
        TextStyle {
            scale: self.course_scale,
            ..self.name_style()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::name_only()
    }
}
