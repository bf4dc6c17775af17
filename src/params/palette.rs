use std::str::FromStr;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{StudioError, StudioResult};

const PASTEL: &[Rgb8] = &[
    Rgb8::new(255, 179, 186),
    Rgb8::new(255, 223, 186),
    Rgb8::new(255, 255, 186),
    Rgb8::new(186, 255, 201),
    Rgb8::new(186, 225, 255),
];
const NEON: &[Rgb8] = &[
    Rgb8::new(255, 0, 102),
    Rgb8::new(0, 204, 255),
    Rgb8::new(255, 204, 0),
    Rgb8::new(153, 0, 255),
    Rgb8::new(0, 255, 153),
];
const MUTED: &[Rgb8] = &[
    Rgb8::new(150, 120, 120),
    Rgb8::new(120, 140, 130),
    Rgb8::new(130, 120, 160),
    Rgb8::new(180, 170, 160),
];
const WARM: &[Rgb8] = &[
    Rgb8::new(255, 179, 102),
    Rgb8::new(255, 120, 60),
    Rgb8::new(220, 80, 40),
    Rgb8::new(180, 40, 20),
];
const COOL: &[Rgb8] = &[
    Rgb8::new(80, 160, 200),
    Rgb8::new(50, 100, 150),
    Rgb8::new(30, 60, 100),
    Rgb8::new(20, 40, 70),
];
const MONOCHROME: &[Rgb8] = &[
    Rgb8::new(30, 30, 40),
    Rgb8::new(70, 70, 90),
    Rgb8::new(110, 110, 130),
    Rgb8::new(160, 160, 180),
];

const NAMED: &[(&str, &[Rgb8])] = &[
    ("pastel", PASTEL),
    ("neon", NEON),
    ("muted", MUTED),
    ("warm", WARM),
    ("cool", COOL),
    ("monochrome", MONOCHROME),
];

/// Ordered, non-empty list of colors.
///
/// Deserializes from either a built-in palette name (`"neon"`) or an explicit list of
/// `[r, g, b]` triples. Both forms are validated on the way in.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "PaletteRepr", into = "Vec<Rgb8>")]
pub struct Palette {
    colors: Vec<Rgb8>,
}

/// Unvalidated wire form of a [`Palette`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum PaletteRepr {
    Named(String),
    Colors(Vec<Rgb8>),
}

impl TryFrom<PaletteRepr> for Palette {
    type Error = StudioError;

    fn try_from(repr: PaletteRepr) -> StudioResult<Self> {
        match repr {
            PaletteRepr::Named(name) => Self::named(&name),
            PaletteRepr::Colors(colors) => Self::new(colors),
        }
    }
}

impl From<Palette> for PaletteRepr {
    fn from(p: Palette) -> Self {
        PaletteRepr::Colors(p.colors)
    }
}

impl From<Palette> for Vec<Rgb8> {
    fn from(p: Palette) -> Self {
        p.colors
    }
}

impl Palette {
    pub fn new(colors: Vec<Rgb8>) -> StudioResult<Self> {
        if colors.is_empty() {
            return Err(StudioError::InvalidPalette);
        }
        Ok(Self { colors })
    }

    /// Case-insensitive lookup in the built-in table.
    pub fn named(name: &str) -> StudioResult<Self> {
        let key = name.trim().to_ascii_lowercase();
        NAMED
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, colors)| Self {
                colors: colors.to_vec(),
            })
            .ok_or_else(|| StudioError::UnknownPalette(name.to_string()))
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        NAMED.iter().map(|(n, _)| *n)
    }

    /// Built-in name of this palette, if its colors match a table entry exactly.
    pub fn name(&self) -> Option<&'static str> {
        NAMED
            .iter()
            .find(|(_, colors)| *colors == self.colors.as_slice())
            .map(|(n, _)| *n)
    }

    pub fn colors(&self) -> &[Rgb8] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn first(&self) -> Rgb8 {
        self.colors[0]
    }

    pub fn last(&self) -> Rgb8 {
        self.colors[self.colors.len() - 1]
    }

    /// Color at `idx`, wrapping around the palette length.
    pub fn pick(&self, idx: usize) -> Rgb8 {
        self.colors[idx % self.colors.len()]
    }
}

impl FromStr for Palette {
    type Err = StudioError;

    fn from_str(s: &str) -> StudioResult<Self> {
        Self::named(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/palette.rs"]
mod tests;
