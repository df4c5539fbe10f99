use std::fmt;
use std::str::FromStr;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{AvatarError, AvatarResult};

/// Maximum caption length, in characters.
pub const MAX_TEXT_CHARS: usize = 10;

/// Background pattern variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Design {
    /// Three-stop radial gradient.
    Gradient,
    /// Line grid over a flat fill with a darkening vignette.
    Geometric,
    /// Synthwave horizon: dark sky, wavy grid lines, sun with rings.
    Retro,
    /// Randomized translucent bars with scan-lines. Not deterministic.
    Glitch,
    /// Two concentric disks on white.
    Minimal,
}

impl Design {
    /// All variants, in picker order.
    pub const ALL: [Design; 5] = [
        Design::Gradient,
        Design::Geometric,
        Design::Retro,
        Design::Glitch,
        Design::Minimal,
    ];

    /// Stable lowercase id.
    pub fn id(self) -> &'static str {
        match self {
            Design::Gradient => "gradient",
            Design::Geometric => "geometric",
            Design::Retro => "retro",
            Design::Glitch => "glitch",
            Design::Minimal => "minimal",
        }
    }

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Design::Gradient => "Gradient",
            Design::Geometric => "Geometric",
            Design::Retro => "Retro Wave",
            Design::Glitch => "Glitch/Cyberpunk",
            Design::Minimal => "Minimal",
        }
    }

    /// Whether identical params always produce identical pixels.
    pub fn is_deterministic(self) -> bool {
        !matches!(self, Design::Glitch)
    }
}

impl fmt::Display for Design {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Design {
    type Err = AvatarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Design::ALL
            .into_iter()
            .find(|d| d.id() == key)
            .ok_or_else(|| AvatarError::invalid_design(s.trim()))
    }
}

/// Output silhouette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Background confined to the inscribed circle; corners stay transparent.
    #[default]
    Circle,
    /// Full-bleed square, no clip.
    Square,
}

impl Shape {
    /// Stable lowercase id.
    pub fn id(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
        }
    }
}

impl FromStr for Shape {
    type Err = AvatarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(Shape::Circle),
            "square" => Ok(Shape::Square),
            other => Err(AvatarError::validation(format!(
                "shape must be \"circle\" or \"square\" (got \"{other}\")"
            ))),
        }
    }
}

/// The three user colors, in slot order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    /// First color slot.
    pub color1: Rgb8,
    /// Second color slot.
    pub color2: Rgb8,
    /// Third color slot.
    pub color3: Rgb8,
}

/// Everything a single render depends on.
///
/// Constructed fresh from the collaborator's current state for every render and passed by value
/// or reference; nothing here is mutated by rendering.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RenderParams {
    /// Background variant.
    pub design: Design,
    /// First color slot.
    pub color1: Rgb8,
    /// Second color slot.
    pub color2: Rgb8,
    /// Third color slot.
    pub color3: Rgb8,
    /// Caption, at most [`MAX_TEXT_CHARS`] characters. Empty disables the text pass.
    pub text: String,
    /// Output silhouette.
    pub shape: Shape,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            design: Design::Gradient,
            color1: Rgb8::new(0xFF, 0x00, 0x6E),
            color2: Rgb8::new(0x83, 0x38, 0xEC),
            color3: Rgb8::new(0x3A, 0x86, 0xFF),
            text: "EDIT".to_owned(),
            shape: Shape::Circle,
        }
    }
}

impl RenderParams {
    /// Build and validate a parameter set.
    pub fn new(
        design: Design,
        colors: [Rgb8; 3],
        text: impl Into<String>,
        shape: Shape,
    ) -> AvatarResult<Self> {
        let [color1, color2, color3] = colors;
        let params = Self {
            design,
            color1,
            color2,
            color3,
            text: text.into(),
            shape,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check invariants the type system does not carry.
    pub fn validate(&self) -> AvatarResult<()> {
        let n = self.text.chars().count();
        if n > MAX_TEXT_CHARS {
            return Err(AvatarError::validation(format!(
                "text must be at most {MAX_TEXT_CHARS} characters (got {n})"
            )));
        }
        Ok(())
    }

    /// Colors in slot order.
    pub fn palette(&self) -> Palette {
        Palette {
            color1: self.color1,
            color2: self.color2,
            color3: self.color3,
        }
    }

    /// Whether the text pass runs.
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    /// Parse a JSON params document; missing fields take their defaults.
    pub fn from_json(json: &str) -> AvatarResult<Self> {
        let def: RenderParamsDef = serde_json::from_str(json)
            .map_err(|e| AvatarError::validation(format!("parse params JSON: {e}")))?;
        def.resolve()
    }
}

/// Loosely typed params as read from JSON or command-line flags.
///
/// Every field is optional; [`RenderParamsDef::resolve`] fills gaps from
/// [`RenderParams::default`] and reports bad values with their typed error variants.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderParamsDef {
    /// Design id.
    pub design: Option<String>,
    /// `#RRGGBB`.
    pub color1: Option<String>,
    /// `#RRGGBB`.
    pub color2: Option<String>,
    /// `#RRGGBB`.
    pub color3: Option<String>,
    /// Caption.
    pub text: Option<String>,
    /// Shape id.
    pub shape: Option<String>,
}

impl RenderParamsDef {
    /// Overlay `other`'s set fields on top of `self`.
    pub fn merged_with(self, other: RenderParamsDef) -> RenderParamsDef {
        RenderParamsDef {
            design: other.design.or(self.design),
            color1: other.color1.or(self.color1),
            color2: other.color2.or(self.color2),
            color3: other.color3.or(self.color3),
            text: other.text.or(self.text),
            shape: other.shape.or(self.shape),
        }
    }

    /// Turn into validated [`RenderParams`].
    pub fn resolve(self) -> AvatarResult<RenderParams> {
        let defaults = RenderParams::default();

        let design = match self.design {
            Some(s) => s.parse::<Design>()?,
            None => defaults.design,
        };
        let color = |v: Option<String>, fallback: Rgb8| -> AvatarResult<Rgb8> {
            v.map(|s| Rgb8::parse_hex(&s))
                .transpose()
                .map(|c| c.unwrap_or(fallback))
        };
        let shape = match self.shape {
            Some(s) => s.parse::<Shape>()?,
            None => defaults.shape,
        };

        RenderParams::new(
            design,
            [
                color(self.color1, defaults.color1)?,
                color(self.color2, defaults.color2)?,
                color(self.color3, defaults.color3)?,
            ],
            self.text.unwrap_or(defaults.text),
            shape,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/model.rs"]
mod tests;
