//! Tags, as listed next to a calendar

use serde::Deserialize;

/// The color the server gives to tags created without one
pub const DEFAULT_COLOR: &str = "#e3f1ba";

/// A named color used to categorize tasks
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

impl Tag {
    pub fn new<S: ToString, T: ToString>(name: S, color: T) -> Self {
        Self { name: name.to_string(), color: color.to_string() }
    }

    /// The color of this tag, as a CSS hex string
    pub fn css_color(&self) -> String {
        css_color(&self.color)
    }
}

/// Normalize a server-provided color to a CSS hex string.
///
/// Unparseable colors fall back to [`DEFAULT_COLOR`], so that nothing but a color ends up in a `style` attribute.
pub fn css_color(raw: &str) -> String {
    match csscolorparser::parse(raw.trim()) {
        Ok(color) => color.to_hex_string(),
        Err(err) => {
            log::debug!("Invalid color {:?} ({}), using the default one", raw, err);
            DEFAULT_COLOR.to_string()
        }
    }
}
