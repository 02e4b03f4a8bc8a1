use image::{Rgb, RgbImage};

use super::{
    font::{glyph, Glyph, CAP_HEIGHT, LETTER_SPACING},
    options::FontFamily,
};

/// Horizontal offset, in font units, of the second stroke of a duplex face
const DUPLEX_OFFSET: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub family: FontFamily,
    pub scale: f32,
    /// Stroke width in pixels
    pub thickness: u32,
    pub color: Rgb<u8>,
}

/// Box the text ink fits in, in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
}

type Point = (f32, f32);

fn advance(glyph: &Glyph, family: FontFamily) -> f32 {
    let extra = match family {
        FontFamily::Simplex => 0.0,
        FontFamily::Duplex => DUPLEX_OFFSET,
    };

    f32::from(glyph.width) + extra + LETTER_SPACING
}

/// Measures `text` drawn with `style`. An empty string has zero width.
pub fn measure(text: &str, style: &TextStyle) -> TextSize {
    let height = (CAP_HEIGHT * style.scale).round() as u32 + (style.thickness + 1) / 2;

    if text.is_empty() {
        return TextSize { width: 0, height };
    }

    let units: f32 = text
        .chars()
        .map(|character| advance(glyph(character), style.family))
        .sum();

    TextSize {
        width: (units * style.scale).round() as u32 + style.thickness,
        height,
    }
}

/// Flattens the text into pixel-space line segments. `origin` is the left end of the baseline.
fn segments(text: &str, origin: (i32, i32), style: &TextStyle) -> Vec<(Point, Point)> {
    let half_thickness = style.thickness as f32 / 2.0;
    let left = origin.0 as f32 + half_thickness;
    let baseline = origin.1 as f32;

    let offsets: &[f32] = match style.family {
        FontFamily::Simplex => &[0.0],
        FontFamily::Duplex => &[0.0, DUPLEX_OFFSET],
    };

    let mut segments = Vec::new();
    let mut pen = 0.0;

    for character in text.chars() {
        let glyph = glyph(character);

        for stroke in glyph.strokes {
            let points = stroke.points();

            for offset in offsets {
                let to_pixels = |(x, y): Point| {
                    (
                        left + (pen + offset + x) * style.scale,
                        baseline - y * style.scale,
                    )
                };

                if points.len() == 1 {
                    let point = to_pixels(points[0]);
                    segments.push((point, point));
                }

                for pair in points.windows(2) {
                    segments.push((to_pixels(pair[0]), to_pixels(pair[1])));
                }
            }
        }

        pen += advance(glyph, style.family);
    }

    segments
}

fn distance_to_segment(point: Point, (start, end): (Point, Point)) -> f32 {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length_squared = dx * dx + dy * dy;

    let t = if length_squared == 0.0 {
        0.0
    } else {
        (((point.0 - start.0) * dx + (point.1 - start.1) * dy) / length_squared).clamp(0.0, 1.0)
    };

    let (closest_x, closest_y) = (start.0 + t * dx, start.1 + t * dy);

    ((point.0 - closest_x).powi(2) + (point.1 - closest_y).powi(2)).sqrt()
}

/// Draws anti-aliased `text` onto `image` with the baseline starting at `origin`.
///
/// Strokes are rasterized into a coverage mask first so overlapping strokes do not darken
/// each other, then the mask is blended onto the image. Ink outside the image is clipped.
pub fn draw(image: &mut RgbImage, text: &str, origin: (i32, i32), style: &TextStyle) {
    let segments = segments(text, origin, style);

    if segments.is_empty() {
        return;
    }

    let radius = (style.thickness as f32 / 2.0).max(0.5);
    let reach = radius + 1.0;

    let (image_width, image_height) = image.dimensions();

    let clip = |start: f32, end: f32, limit: u32| -> Option<(u32, u32)> {
        let low = (start - reach).floor().max(0.0);
        let high = (end + reach).ceil().min(limit as f32 - 1.0);

        if high < low {
            None
        } else {
            Some((low as u32, high as u32))
        }
    };

    let bounds = segments.iter().fold(
        (f32::MAX, f32::MAX, f32::MIN, f32::MIN),
        |(min_x, min_y, max_x, max_y), (start, end)| {
            (
                min_x.min(start.0).min(end.0),
                min_y.min(start.1).min(end.1),
                max_x.max(start.0).max(end.0),
                max_y.max(start.1).max(end.1),
            )
        },
    );

    let (Some((left, right)), Some((top, bottom))) = (
        clip(bounds.0, bounds.2, image_width),
        clip(bounds.1, bounds.3, image_height),
    ) else {
        return;
    };

    let mask_width = (right - left + 1) as usize;
    let mut mask = vec![0.0f32; mask_width * (bottom - top + 1) as usize];

    for segment in &segments {
        let (start, end) = *segment;

        let (Some((x0, x1)), Some((y0, y1))) = (
            clip(start.0.min(end.0), start.0.max(end.0), image_width),
            clip(start.1.min(end.1), start.1.max(end.1), image_height),
        ) else {
            continue;
        };

        for y in y0..=y1 {
            for x in x0..=x1 {
                let distance = distance_to_segment((x as f32, y as f32), *segment);
                let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);

                let cell = &mut mask[(y - top) as usize * mask_width + (x - left) as usize];
                *cell = cell.max(coverage);
            }
        }
    }

    for y in top..=bottom {
        for x in left..=right {
            let coverage = mask[(y - top) as usize * mask_width + (x - left) as usize];

            if coverage <= 0.0 {
                continue;
            }

            let pixel = image.get_pixel_mut(x, y);

            for channel in 0..3 {
                let blended = f32::from(pixel[channel]) * (1.0 - coverage)
                    + f32::from(style.color[channel]) * coverage;
                pixel[channel] = blended.round() as u8;
            }
        }
    }
}
