use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::TextureError;

/// 8-bit sRGB color.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Result<Self, TextureError> {
        let invalid = || TextureError::InvalidColor { value: hex.to_owned() };

        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }

    /// Channels in 0..=1.
    #[inline]
    pub fn to_linear_f32(&self) -> [f32; 3] {
        self.0.map(|c| c as f32 / 255.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = TextureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// Surface finish of an upholstery material.
#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Finish {
    Pebbled,
    Smooth,
    Leather,
    /// Unrecognized finish, rendered as a flat fill.
    Unknown(String),
}

impl Finish {
    pub fn parse(name: &str) -> Finish {
        match name.to_ascii_lowercase().as_str() {
            "pebbled" => Finish::Pebbled,
            "smooth" => Finish::Smooth,
            "leather" => Finish::Leather,
            _ => Finish::Unknown(name.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Finish::Pebbled => "pebbled",
            Finish::Smooth => "smooth",
            Finish::Leather => "leather",
            Finish::Unknown(name) => name,
        }
    }

    pub fn roughness(&self) -> f32 {
        match self {
            Finish::Leather => 0.3,
            Finish::Pebbled => 0.8,
            Finish::Smooth | Finish::Unknown(_) => 0.6,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Finish::Pebbled => "Pebbled-grain marine vinyl with subtle sheen",
            Finish::Smooth => "Premium smooth vinyl with outstanding performance",
            Finish::Leather => "High-performance faux leather with classic grain",
            Finish::Unknown(_) => "",
        }
    }
}

impl From<String> for Finish {
    fn from(value: String) -> Self {
        Finish::parse(&value)
    }
}

impl From<Finish> for String {
    fn from(value: Finish) -> Self {
        value.as_str().to_owned()
    }
}

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    #[default]
    None,
    Diamond,
    Quilted,
    Perforated,
}

impl FromStr for PatternKind {
    type Err = TextureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(PatternKind::None),
            "diamond" => Ok(PatternKind::Diamond),
            "quilted" => Ok(PatternKind::Quilted),
            "perforated" => Ok(PatternKind::Perforated),
            _ => Err(TextureError::UnknownPattern { name: s.to_owned() }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StitchKind {
    #[default]
    None,
    Straight,
    Cross,
    Zigzag,
}

impl FromStr for StitchKind {
    type Err = TextureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(StitchKind::None),
            "straight" => Ok(StitchKind::Straight),
            "cross" => Ok(StitchKind::Cross),
            "zigzag" => Ok(StitchKind::Zigzag),
            _ => Err(TextureError::UnknownStitching { name: s.to_owned() }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    pub name: String,
    pub base_color: Rgb,
    pub finish: Finish,
    #[serde(default)]
    pub metallic: bool,
}

impl MaterialDescriptor {
    pub fn new(name: impl Into<String>, base_color: Rgb, finish: Finish) -> Self {
        Self {
            name: name.into(),
            base_color,
            finish,
            metallic: false,
        }
    }

    pub fn metallic(mut self, metallic: bool) -> Self {
        self.metallic = metallic;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDescriptor {
    pub name: String,
    pub kind: PatternKind,
}

impl PatternDescriptor {
    pub fn new(name: impl Into<String>, kind: PatternKind) -> Self {
        Self { name: name.into(), kind }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StitchingDescriptor {
    pub name: String,
    pub kind: StitchKind,
}

impl StitchingDescriptor {
    pub fn new(name: impl Into<String>, kind: StitchKind) -> Self {
        Self { name: name.into(), kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_colors() {
        assert_eq!(Rgb::from_hex("#2c3e50").unwrap(), Rgb::new(0x2c, 0x3e, 0x50));
        assert_eq!(Rgb::from_hex("FEF3C7").unwrap(), Rgb::new(0xfe, 0xf3, 0xc7));
        assert_eq!(Rgb::new(0x7c, 0x2d, 0x12).to_hex(), "#7c2d12");

        assert!(Rgb::from_hex("#2c3e5").is_err());
        assert!(Rgb::from_hex("#zz3e50").is_err());
        assert!(Rgb::from_hex("#2c3é50").is_err());
        assert!(Rgb::from_hex("#+f+f+f").is_err());
        assert!(Rgb::from_hex("-1-1-1").is_err());
    }

    #[test]
    fn unknown_finish_is_kept() {
        assert_eq!(Finish::parse("Leather"), Finish::Leather);
        let velvet = Finish::parse("velvet");
        assert_eq!(velvet, Finish::Unknown("velvet".to_owned()));
        assert_eq!(velvet.as_str(), "velvet");
        assert_eq!(velvet.description(), "");
    }

    #[test]
    fn pattern_and_stitching_from_str() {
        assert_eq!("Quilted".parse::<PatternKind>().unwrap(), PatternKind::Quilted);
        assert_eq!("zigzag".parse::<StitchKind>().unwrap(), StitchKind::Zigzag);
        assert!("plaid".parse::<PatternKind>().is_err());
        assert!("blanket".parse::<StitchKind>().is_err());
    }
}
