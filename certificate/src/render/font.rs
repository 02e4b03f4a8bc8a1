//! Built-in stroke font.
//!
//! Glyphs are drawn on a unit grid with the baseline at `y = 0` and `y` growing upwards.
//! Capitals are [`CAP_HEIGHT`] units tall, lowercase bodies 12 units, descenders reach
//! down to `-6`. One unit is one pixel at scale `1.0`.

pub const CAP_HEIGHT: f32 = 20.0;

/// Space added after every glyph
pub const LETTER_SPACING: f32 = 4.0;

const ARC_STEP_DEGREES: f32 = 15.0;

pub enum Stroke {
    /// Open polyline through the given points
    Line(&'static [(i8, i8)]),
    /// Elliptic arc, angles in degrees counterclockwise from the positive x axis.
    /// `to` may be smaller than `from` to walk clockwise.
    Arc {
        cx: i8,
        cy: i8,
        rx: i8,
        ry: i8,
        from: i16,
        to: i16,
    },
}

pub struct Glyph {
    pub width: i8,
    pub strokes: &'static [Stroke],
}

macro_rules! polyline {
    ($($point:expr),+ $(,)?) => {
        Stroke::Line(&[$($point),+])
    };
}

macro_rules! arc {
    ($cx:expr, $cy:expr, $rx:expr, $ry:expr, $from:expr, $to:expr) => {
        Stroke::Arc {
            cx: $cx,
            cy: $cy,
            rx: $rx,
            ry: $ry,
            from: $from,
            to: $to,
        }
    };
}

macro_rules! glyph {
    ($width:expr $(; $($stroke:expr),+)?) => {
        Glyph {
            width: $width,
            strokes: &[$($($stroke),+)?],
        }
    };
}

const QUESTION_MARK: Glyph =
    glyph!(10; arc!(5, 15, 5, 5, 160, -90), polyline!((5, 10), (5, 6)), polyline!((5, 1), (5, 0)));

static FALLBACK: Glyph = QUESTION_MARK;

static GLYPHS: &[(char, Glyph)] = &[
    (' ', glyph!(6)),
    ('!', glyph!(2; polyline!((1, 20), (1, 6)), polyline!((1, 1), (1, 0)))),
    ('"', glyph!(6; polyline!((1, 20), (1, 15)), polyline!((5, 20), (5, 15)))),
    ('\'', glyph!(2; polyline!((1, 20), (1, 15)))),
    ('(', glyph!(4; arc!(6, 10, 6, 13, 120, 240))),
    (')', glyph!(4; arc!(-2, 10, 6, 13, 60, -60))),
    (',', glyph!(2; polyline!((1, 1), (0, -3)))),
    ('-', glyph!(8; polyline!((0, 8), (8, 8)))),
    ('.', glyph!(2; polyline!((1, 1), (1, 0)))),
    ('/', glyph!(10; polyline!((0, -2), (10, 22)))),
    ('0', glyph!(10; arc!(5, 10, 5, 10, 0, 360))),
    ('1', glyph!(8; polyline!((2, 16), (5, 20), (5, 0)), polyline!((2, 0), (8, 0)))),
    ('2', glyph!(10; arc!(5, 15, 5, 5, 160, -30), polyline!((9, 12), (0, 0), (10, 0)))),
    ('3', glyph!(10; arc!(5, 15, 5, 5, 160, -90), arc!(5, 5, 5, 5, 90, -160))),
    ('4', glyph!(10; polyline!((8, 0), (8, 20), (0, 6), (10, 6)))),
    ('5', glyph!(10; polyline!((9, 20), (1, 20), (0, 11)), arc!(5, 6, 5, 6, 120, -150))),
    ('6', glyph!(10; arc!(5, 6, 5, 6, 0, 360), arc!(10, 6, 10, 14, 90, 180))),
    ('7', glyph!(10; polyline!((0, 20), (10, 20), (3, 0)))),
    ('8', glyph!(10; arc!(5, 15, 4, 5, 0, 360), arc!(5, 5, 5, 5, 0, 360))),
    ('9', glyph!(10; arc!(5, 14, 5, 6, 0, 360), arc!(0, 14, 10, 14, 0, -90))),
    (':', glyph!(2; polyline!((1, 12), (1, 11)), polyline!((1, 1), (1, 0)))),
    ('?', QUESTION_MARK),
    ('A', glyph!(14; polyline!((0, 0), (7, 20), (14, 0)), polyline!((3, 8), (11, 8)))),
    ('B', glyph!(13;
        polyline!((0, 0), (0, 20), (7, 20)),
        arc!(7, 15, 4, 5, 90, -90),
        polyline!((7, 10), (0, 10), (8, 10)),
        arc!(8, 5, 5, 5, 90, -90),
        polyline!((8, 0), (0, 0)))),
    ('C', glyph!(14; arc!(7, 10, 7, 10, 45, 315))),
    ('D', glyph!(13; polyline!((5, 0), (0, 0), (0, 20), (5, 20)), arc!(5, 10, 8, 10, 90, -90))),
    ('E', glyph!(11; polyline!((11, 20), (0, 20), (0, 0), (11, 0)), polyline!((0, 10), (8, 10)))),
    ('F', glyph!(11; polyline!((11, 20), (0, 20), (0, 0)), polyline!((0, 10), (8, 10)))),
    ('G', glyph!(14; arc!(7, 10, 7, 10, 45, 360), polyline!((14, 10), (8, 10)))),
    ('H', glyph!(13; polyline!((0, 0), (0, 20)), polyline!((13, 0), (13, 20)), polyline!((0, 10), (13, 10)))),
    ('I', glyph!(6; polyline!((3, 0), (3, 20)), polyline!((0, 20), (6, 20)), polyline!((0, 0), (6, 0)))),
    ('J', glyph!(10; polyline!((10, 20), (10, 5)), arc!(5, 5, 5, 5, 0, -180))),
    ('K', glyph!(12; polyline!((0, 0), (0, 20)), polyline!((12, 20), (0, 7)), polyline!((4, 11), (12, 0)))),
    ('L', glyph!(10; polyline!((0, 20), (0, 0), (10, 0)))),
    ('M', glyph!(16; polyline!((0, 0), (0, 20), (8, 4), (16, 20), (16, 0)))),
    ('N', glyph!(13; polyline!((0, 0), (0, 20), (13, 0), (13, 20)))),
    ('O', glyph!(14; arc!(7, 10, 7, 10, 0, 360))),
    ('P', glyph!(12; polyline!((0, 0), (0, 20), (7, 20)), arc!(7, 15, 5, 5, 90, -90), polyline!((7, 10), (0, 10)))),
    ('Q', glyph!(15; arc!(7, 10, 7, 10, 0, 360), polyline!((9, 4), (15, -2)))),
    ('R', glyph!(12;
        polyline!((0, 0), (0, 20), (7, 20)),
        arc!(7, 15, 5, 5, 90, -90),
        polyline!((7, 10), (0, 10)),
        polyline!((6, 10), (12, 0)))),
    ('S', glyph!(12; arc!(6, 15, 6, 5, 20, 270), arc!(6, 5, 6, 5, 90, -160))),
    ('T', glyph!(14; polyline!((0, 20), (14, 20)), polyline!((7, 20), (7, 0)))),
    ('U', glyph!(12; polyline!((0, 20), (0, 6)), arc!(6, 6, 6, 6, 180, 360), polyline!((12, 6), (12, 20)))),
    ('V', glyph!(14; polyline!((0, 20), (7, 0), (14, 20)))),
    ('W', glyph!(18; polyline!((0, 20), (4, 0), (9, 14), (14, 0), (18, 20)))),
    ('X', glyph!(13; polyline!((0, 20), (13, 0)), polyline!((0, 0), (13, 20)))),
    ('Y', glyph!(14; polyline!((0, 20), (7, 10), (14, 20)), polyline!((7, 10), (7, 0)))),
    ('Z', glyph!(12; polyline!((0, 20), (12, 20), (0, 0), (12, 0)))),
    ('_', glyph!(12; polyline!((0, -2), (12, -2)))),
    ('a', glyph!(10; arc!(5, 6, 5, 6, 0, 360), polyline!((10, 12), (10, 0)))),
    ('b', glyph!(10; polyline!((0, 20), (0, 0)), arc!(5, 6, 5, 6, 0, 360))),
    ('c', glyph!(10; arc!(5, 6, 5, 6, 45, 315))),
    ('d', glyph!(10; arc!(5, 6, 5, 6, 0, 360), polyline!((10, 20), (10, 0)))),
    ('e', glyph!(10; polyline!((0, 6), (10, 6)), arc!(5, 6, 5, 6, 0, 315))),
    ('f', glyph!(8; polyline!((3, 0), (3, 16)), arc!(6, 16, 3, 4, 180, 45), polyline!((0, 12), (7, 12)))),
    ('g', glyph!(10; arc!(5, 6, 5, 6, 0, 360), polyline!((10, 12), (10, -2)), arc!(5, -2, 5, 4, 0, -160))),
    ('h', glyph!(10; polyline!((0, 20), (0, 0)), arc!(5, 7, 5, 5, 180, 0), polyline!((10, 7), (10, 0)))),
    ('i', glyph!(2; polyline!((1, 0), (1, 12)), polyline!((1, 16), (1, 17)))),
    ('j', glyph!(5; polyline!((5, 12), (5, -3)), arc!(2, -3, 3, 3, 0, -180), polyline!((5, 16), (5, 17)))),
    ('k', glyph!(9; polyline!((0, 20), (0, 0)), polyline!((9, 12), (0, 4)), polyline!((3, 7), (9, 0)))),
    ('l', glyph!(2; polyline!((1, 20), (1, 0)))),
    ('m', glyph!(16;
        polyline!((0, 12), (0, 0)),
        arc!(4, 8, 4, 4, 180, 0),
        polyline!((8, 8), (8, 0)),
        arc!(12, 8, 4, 4, 180, 0),
        polyline!((16, 8), (16, 0)))),
    ('n', glyph!(10; polyline!((0, 12), (0, 0)), arc!(5, 7, 5, 5, 180, 0), polyline!((10, 7), (10, 0)))),
    ('o', glyph!(10; arc!(5, 6, 5, 6, 0, 360))),
    ('p', glyph!(10; polyline!((0, 12), (0, -6)), arc!(5, 6, 5, 6, 0, 360))),
    ('q', glyph!(10; polyline!((10, 12), (10, -6)), arc!(5, 6, 5, 6, 0, 360))),
    ('r', glyph!(8; polyline!((0, 12), (0, 0)), arc!(5, 7, 5, 5, 180, 45))),
    ('s', glyph!(10; arc!(5, 9, 5, 3, 20, 270), arc!(5, 3, 5, 3, 90, -160))),
    ('t', glyph!(7; polyline!((3, 17), (3, 0), (7, 0)), polyline!((0, 12), (7, 12)))),
    ('u', glyph!(10; polyline!((0, 12), (0, 5)), arc!(5, 5, 5, 5, 180, 360), polyline!((10, 12), (10, 0)))),
    ('v', glyph!(10; polyline!((0, 12), (5, 0), (10, 12)))),
    ('w', glyph!(14; polyline!((0, 12), (3, 0), (7, 9), (11, 0), (14, 12)))),
    ('x', glyph!(10; polyline!((0, 12), (10, 0)), polyline!((0, 0), (10, 12)))),
    ('y', glyph!(10; polyline!((0, 12), (5, 0)), polyline!((10, 12), (3, -6)))),
    ('z', glyph!(10; polyline!((0, 12), (10, 12), (0, 0), (10, 0)))),
];

/// Characters without a glyph are drawn as `?`
pub fn glyph(character: char) -> &'static Glyph {
    GLYPHS
        .iter()
        .find(|(c, _)| *c == character)
        .map(|(_, glyph)| glyph)
        .unwrap_or(&FALLBACK)
}

impl Stroke {
    /// Flattens the stroke into a polyline in font units
    pub fn points(&self) -> Vec<(f32, f32)> {
        match self {
            Stroke::Line(points) => points
                .iter()
                .map(|&(x, y)| (f32::from(x), f32::from(y)))
                .collect(),
            Stroke::Arc {
                cx,
                cy,
                rx,
                ry,
                from,
                to,
            } => {
                let sweep = f32::from(*to - *from);
                let steps = ((sweep.abs() / ARC_STEP_DEGREES).ceil() as usize).max(1);

                (0..=steps)
                    .map(|step| {
                        let degrees = f32::from(*from) + sweep * step as f32 / steps as f32;
                        let radians = degrees.to_radians();

                        (
                            f32::from(*cx) + f32::from(*rx) * radians.cos(),
                            f32::from(*cy) + f32::from(*ry) * radians.sin(),
                        )
                    })
                    .collect()
            }
        }
    }
}
