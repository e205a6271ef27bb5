//! Style tags for highlights and whole-line decorations.
//!
//! A tag is supplied as a plain string. When the string is a recognizable
//! color it becomes [`StyleTag::Color`] and is painted as a background;
//! otherwise it is a class-name reference resolved by the host's stylesheet.
//! Parsing never fails.
//!
//! # Examples
//!
//! ```
//! use textarea_overlay::{Rgba, StyleTag};
//!
//! assert_eq!(StyleTag::parse("#ff0"), StyleTag::Color(Rgba::from_rgb_u8(255, 255, 0)));
//! assert_eq!(StyleTag::parse("spell-error"), StyleTag::Class("spell-error".into()));
//! ```

use crate::color::Rgba;
use std::fmt;

/// Visual treatment for a highlighted run or a highlighted line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleTag {
    /// Background color painted behind the run.
    Color(Rgba),
    /// Class-name reference.
    Class(String),
}

impl StyleTag {
    /// Interpret a raw tag. Anything that is not a color is a class name.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Rgba::from_css(raw).map_or_else(|_| Self::Class(raw.trim().to_string()), Self::Color)
    }

    /// Background color, when this tag is a color.
    #[must_use]
    pub fn color(&self) -> Option<Rgba> {
        match self {
            Self::Color(c) => Some(*c),
            Self::Class(_) => None,
        }
    }

    /// Class name, when this tag is a class reference.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::Color(_) => None,
            Self::Class(name) => Some(name),
        }
    }
}

impl From<&str> for StyleTag {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for StyleTag {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Rgba> for StyleTag {
    fn from(color: Rgba) -> Self {
        Self::Color(color)
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(c) => write!(f, "background:{c}"),
            Self::Class(name) => write!(f, ".{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_tags() {
        assert_eq!(StyleTag::parse("red"), StyleTag::Color(Rgba::from_rgb_u8(255, 0, 0)));
        assert!(StyleTag::parse("rgba(0,0,0,0.1)").color().is_some());
    }

    #[test]
    fn test_malformed_color_is_class() {
        let tag = StyleTag::parse("#12zz45");
        assert_eq!(tag.class_name(), Some("#12zz45"));
        assert_eq!(tag.color(), None);

        let tag = StyleTag::parse("rgb(1,2)");
        assert_eq!(tag, StyleTag::Class("rgb(1,2)".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(StyleTag::parse("#ffffff").to_string(), "background:#ffffff");
        assert_eq!(StyleTag::parse("mark").to_string(), ".mark");
    }
}
