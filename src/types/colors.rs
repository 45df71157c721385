use super::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Type-safe color enum instead of strings.
///
/// Covers the foreground palette and its `_background` variants. Colors the
/// API introduces later decode into `Unknown` rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Default,
    Gray,
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    GrayBackground,
    BrownBackground,
    RedBackground,
    OrangeBackground,
    YellowBackground,
    GreenBackground,
    BlueBackground,
    PurpleBackground,
    PinkBackground,
    Unknown(String),
}

impl std::str::FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Color::from_api(s) {
            Color::Unknown(_) => Err(ValidationError::InvalidColor(s.to_string())),
            color => Ok(color),
        }
    }
}

impl Color {
    /// Lenient conversion used when decoding responses.
    pub fn from_api(s: &str) -> Self {
        match s {
            "default" => Color::Default,
            "gray" => Color::Gray,
            "brown" => Color::Brown,
            "red" => Color::Red,
            "orange" => Color::Orange,
            "yellow" => Color::Yellow,
            "green" => Color::Green,
            "blue" => Color::Blue,
            "purple" => Color::Purple,
            "pink" => Color::Pink,
            "gray_background" => Color::GrayBackground,
            "brown_background" => Color::BrownBackground,
            "red_background" => Color::RedBackground,
            "orange_background" => Color::OrangeBackground,
            "yellow_background" => Color::YellowBackground,
            "green_background" => Color::GreenBackground,
            "blue_background" => Color::BlueBackground,
            "purple_background" => Color::PurpleBackground,
            "pink_background" => Color::PinkBackground,
            other => {
                log::warn!("Unknown color '{}', keeping it verbatim", other);
                Color::Unknown(other.to_string())
            }
        }
    }

    /// Convert to the API string representation
    pub fn as_str(&self) -> &str {
        match self {
            Color::Default => "default",
            Color::Gray => "gray",
            Color::Brown => "brown",
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::GrayBackground => "gray_background",
            Color::BrownBackground => "brown_background",
            Color::RedBackground => "red_background",
            Color::OrangeBackground => "orange_background",
            Color::YellowBackground => "yellow_background",
            Color::GreenBackground => "green_background",
            Color::BlueBackground => "blue_background",
            Color::PurpleBackground => "purple_background",
            Color::PinkBackground => "pink_background",
            Color::Unknown(raw) => raw,
        }
    }

    /// Check if this is a background color
    pub fn is_background(&self) -> bool {
        self.as_str().ends_with("_background")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Color::from_api(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_color_parsing() {
        assert_eq!(Color::from_str("red").unwrap(), Color::Red);
        assert_eq!(
            Color::from_str("red_background").unwrap(),
            Color::RedBackground
        );
        assert!(Color::from_str("invalid").is_err());
    }

    #[test]
    fn test_unknown_color_is_kept() {
        let color = Color::from_api("ultraviolet");
        assert_eq!(color, Color::Unknown("ultraviolet".to_string()));
        assert_eq!(color.as_str(), "ultraviolet");
    }

    #[test]
    fn test_serde_uses_api_names() {
        let color: Color = serde_json::from_str("\"purple_background\"").unwrap();
        assert_eq!(color, Color::PurpleBackground);
        assert_eq!(serde_json::to_string(&Color::Gray).unwrap(), "\"gray\"");

        let future: Color = serde_json::from_str("\"teal\"").unwrap();
        assert_eq!(future, Color::Unknown("teal".to_string()));
    }

    #[test]
    fn test_background_colors() {
        assert!(!Color::Red.is_background());
        assert!(Color::PinkBackground.is_background());
    }
}
