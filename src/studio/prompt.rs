use std::{fmt, str::FromStr};

use crate::foundation::error::{StudioError, StudioResult};

/// Structured art prompt; its text becomes the image label.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Prompt {
    pub subject: String,
    pub style: String,
    pub mood: String,
    pub palette: String,
    pub composition: String,
    pub details: String,
}

impl Default for Prompt {
    fn default() -> Self {
        Self {
            subject: "A lone figure under a neon umbrella".to_string(),
            style: "photorealistic".to_string(),
            mood: "melancholy".to_string(),
            palette: "pastel".to_string(),
            composition: "close-up portrait".to_string(),
            details: "three-quarter view, cinematic lighting, shallow depth of field".to_string(),
        }
    }
}

impl Prompt {
    pub fn text(&self) -> String {
        format!(
            "{}, {}, mood: {}, colors: {}, composition: {}, {}",
            self.subject, self.style, self.mood, self.palette, self.composition, self.details
        )
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Output framing presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "4:5")]
    Portrait4x5,
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape16x9,
}

impl AspectRatio {
    fn ratio(self) -> (u32, u32) {
        match self {
            Self::Portrait4x5 => (4, 5),
            Self::Square => (1, 1),
            Self::Landscape16x9 => (16, 9),
        }
    }

    /// Canvas size whose longer side is `long_edge`; the short side rounds to nearest.
    pub fn dimensions(self, long_edge: u32) -> (u32, u32) {
        let (rw, rh) = self.ratio();
        let short = |num: u32, den: u32| -> u32 {
            ((u64::from(long_edge) * u64::from(num) + u64::from(den) / 2) / u64::from(den)).max(1)
                as u32
        };
        if rw >= rh {
            (long_edge, short(rh, rw))
        } else {
            (short(rw, rh), long_edge)
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.ratio();
        write!(f, "{w}:{h}")
    }
}

impl FromStr for AspectRatio {
    type Err = StudioError;

    fn from_str(s: &str) -> StudioResult<Self> {
        match s.trim() {
            "4:5" => Ok(Self::Portrait4x5),
            "1:1" => Ok(Self::Square),
            "16:9" => Ok(Self::Landscape16x9),
            other => Err(StudioError::validation(format!(
                "unknown aspect ratio '{other}' (expected 4:5, 1:1 or 16:9)"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/studio/prompt.rs"]
mod tests;
