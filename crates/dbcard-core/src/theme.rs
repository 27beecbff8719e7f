//! Card theme and layout configuration.
//!
//! The data service stores theme and layout as free-form JSON columns. These
//! types recognize a fixed set of keys and coerce anything else to documented
//! defaults, so rendering code never touches raw JSON.
//!
//! | Key                 | Accepted values                         | Default    |
//! |---------------------|-----------------------------------------|------------|
//! | `theme.primary`     | `#` + 3, 4, 6 or 8 hex digits           | `#3B82F6`  |
//! | `theme.secondary`   | same                                    | `#1E40AF`  |
//! | `theme.background`  | same                                    | `#FFFFFF`  |
//! | `theme.text`        | same                                    | `#1F2937`  |
//! | `layout.style`      | `modern`, `classic`, `minimal`, `creative` | `modern` |
//! | `layout.alignment`  | `left`, `center`, `right`               | `center`   |
//! | `layout.font`       | letters, digits, spaces, hyphens (≤64)  | `Inter`    |
//! | `shape` (column)    | `rectangle`, `rounded`, `circle`, `hexagon` | `rectangle` |

use std::sync::LazyLock;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

static COLOR_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("valid color regex")
});

static FONT_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[A-Za-z0-9 \-]{1,64}$").expect("valid font regex"));

/// Card color palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardTheme {
    /// Accent color for icons, borders and buttons.
    pub primary: String,
    /// Secondary accent (position text, avatar ring).
    pub secondary: String,
    /// Card background.
    pub background: String,
    /// Body text color.
    pub text: String,
}

impl Default for CardTheme {
    fn default() -> Self {
        Self {
            primary: "#3B82F6".to_string(),
            secondary: "#1E40AF".to_string(),
            background: "#FFFFFF".to_string(),
            text: "#1F2937".to_string(),
        }
    }
}

impl CardTheme {
    /// Coerce an arbitrary JSON value into a theme.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        Self {
            primary: color_field(value, "primary").unwrap_or(defaults.primary),
            secondary: color_field(value, "secondary").unwrap_or(defaults.secondary),
            background: color_field(value, "background").unwrap_or(defaults.background),
            text: color_field(value, "text").unwrap_or(defaults.text),
        }
    }
}

fn color_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| COLOR_RE.is_match(s))
        .map(str::to_string)
}

/// Visual style preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStyle {
    #[default]
    Modern,
    Classic,
    Minimal,
    Creative,
}

impl LayoutStyle {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modern" => Some(Self::Modern),
            "classic" => Some(Self::Classic),
            "minimal" => Some(Self::Minimal),
            "creative" => Some(Self::Creative),
            _ => None,
        }
    }

    /// CSS class suffix for this style.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Classic => "classic",
            Self::Minimal => "minimal",
            Self::Creative => "creative",
        }
    }
}

/// Horizontal alignment, shared by card layout and product descriptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    /// Parse a case-insensitive alignment name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// CSS `text-align` value.
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Card layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardLayout {
    pub style: LayoutStyle,
    pub alignment: Alignment,
    /// Font family name, without quotes.
    pub font: String,
}

impl Default for CardLayout {
    fn default() -> Self {
        Self {
            style: LayoutStyle::Modern,
            alignment: Alignment::Center,
            font: "Inter".to_string(),
        }
    }
}

impl CardLayout {
    /// Coerce an arbitrary JSON value into a layout.
    pub fn from_value(value: &Value) -> Self {
        let str_field = |key: &str| value.get(key).and_then(Value::as_str);
        Self {
            style: str_field("style")
                .and_then(LayoutStyle::parse)
                .unwrap_or_default(),
            alignment: str_field("alignment")
                .and_then(Alignment::parse)
                .unwrap_or_default(),
            font: str_field("font")
                .map(str::trim)
                .filter(|f| FONT_RE.is_match(f))
                .map_or_else(|| "Inter".to_string(), str::to_string),
        }
    }
}

/// Outline of the profile card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardShape {
    #[default]
    Rectangle,
    Rounded,
    Circle,
    Hexagon,
}

impl CardShape {
    /// Parse a shape name, falling back to the default for unknown values.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "rounded" => Self::Rounded,
            "circle" => Self::Circle,
            "hexagon" => Self::Hexagon,
            _ => Self::Rectangle,
        }
    }

    /// CSS class suffix for this shape.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Rounded => "rounded",
            Self::Circle => "circle",
            Self::Hexagon => "hexagon",
        }
    }
}

/// Serde adapter: deserialize any JSON into a [`CardTheme`] without failing.
pub fn deserialize_theme<'de, D>(deserializer: D) -> Result<CardTheme, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(CardTheme::from_value(&value))
}

/// Serde adapter: deserialize any JSON into a [`CardLayout`] without failing.
pub fn deserialize_layout<'de, D>(deserializer: D) -> Result<CardLayout, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(CardLayout::from_value(&value))
}

/// Serde adapter: deserialize a nullable string column into a [`CardShape`].
pub fn deserialize_shape<'de, D>(deserializer: D) -> Result<CardShape, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(CardShape::parse).unwrap_or_default())
}
