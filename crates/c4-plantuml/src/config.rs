//! Configuration types for C4-PlantUML rendering.
//!
//! This module provides configuration structures that control the layout
//! directives and the C4-PlantUML library location written into every
//! diagram. All types implement [`serde::Deserialize`] for loading from
//! external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and library settings.
//! - [`LayoutConfig`] - Legend, sketch mode and [`LayoutDirection`] directives.
//! - [`LibraryConfig`] - Where the C4-PlantUML macro library is included from.
//!
//! # Example
//!
//! ```
//! # use c4_plantuml::config::{AppConfig, LayoutDirection};
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     sketch = true
//!     direction = "left-right"
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(config.layout().legend());
//! assert!(config.layout().sketch());
//! assert_eq!(config.layout().direction(), LayoutDirection::LeftRight);
//! assert!(config.validate().is_ok());
//! ```

use std::str::FromStr;

use serde::Deserialize;

use crate::C4Error;

/// Top-level configuration combining layout and library settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout directive section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Library location section.
    #[serde(default)]
    library: LibraryConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and library configurations.
    ///
    /// # Arguments
    ///
    /// * `layout` - Layout directives written into each diagram header.
    /// * `library` - C4-PlantUML library location.
    pub fn new(layout: LayoutConfig, library: LibraryConfig) -> Self {
        Self { layout, library }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns a mutable reference to the layout configuration.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    /// Returns the library configuration.
    pub fn library(&self) -> &LibraryConfig {
        &self.library
    }

    /// Checks the configuration before any output is written.
    ///
    /// # Errors
    ///
    /// Returns [`C4Error::InvalidConfiguration`] if the library base location
    /// contains whitespace, which would break the include directive.
    pub fn validate(&self) -> Result<(), C4Error> {
        match self.library.custom_base_url() {
            Some(base) if base.chars().any(char::is_whitespace) => {
                Err(C4Error::InvalidConfiguration(format!(
                    "library base location `{base}` must not contain whitespace"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Direction hint for the overall diagram layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutDirection {
    /// Let PlantUML decide.
    #[default]
    None,
    TopDown,
    LeftRight,
}

impl LayoutDirection {
    /// Returns the layout directive, or `None` when no directive is written.
    pub fn directive(&self) -> Option<&'static str> {
        match self {
            LayoutDirection::None => None,
            LayoutDirection::TopDown => Some("LAYOUT_TOP_DOWN"),
            LayoutDirection::LeftRight => Some("LAYOUT_LEFT_RIGHT"),
        }
    }
}

impl FromStr for LayoutDirection {
    type Err = C4Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "none" => Ok(LayoutDirection::None),
            "top-down" => Ok(LayoutDirection::TopDown),
            "left-right" => Ok(LayoutDirection::LeftRight),
            _ => Err(C4Error::InvalidConfiguration(format!(
                "unknown layout direction `{s}` (expected none, top-down or left-right)"
            ))),
        }
    }
}

/// Layout directives written after the diagram title.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Emit `LAYOUT_WITH_LEGEND()`.
    #[serde(default = "default_legend")]
    legend: bool,

    /// Emit `LAYOUT_AS_SKETCH()`.
    #[serde(default)]
    sketch: bool,

    /// Overall layout direction.
    #[serde(default)]
    direction: LayoutDirection,
}

fn default_legend() -> bool {
    true
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            legend: default_legend(),
            sketch: false,
            direction: LayoutDirection::None,
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `legend` - Whether the legend directive is written.
    /// * `sketch` - Whether the sketch directive is written.
    /// * `direction` - Overall layout direction.
    pub fn new(legend: bool, sketch: bool, direction: LayoutDirection) -> Self {
        Self {
            legend,
            sketch,
            direction,
        }
    }

    pub fn legend(&self) -> bool {
        self.legend
    }

    pub fn sketch(&self) -> bool {
        self.sketch
    }

    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    pub fn set_legend(&mut self, legend: bool) {
        self.legend = legend;
    }

    pub fn set_sketch(&mut self, sketch: bool) {
        self.sketch = sketch;
    }

    pub fn set_direction(&mut self, direction: LayoutDirection) {
        self.direction = direction;
    }
}

/// Location of the C4-PlantUML macro library.
///
/// Without a base URL the PlantUML standard library copy is included, and
/// deployment views inline the definitions that copy lacks.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LibraryConfig {
    #[serde(default)]
    base_url: String,
}

impl LibraryConfig {
    /// Creates a library configuration including from `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Returns the custom base URL, or `None` when the standard library is used.
    pub fn custom_base_url(&self) -> Option<&str> {
        Some(self.base_url.trim()).filter(|base| !base.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.layout().legend());
        assert!(!config.layout().sketch());
        assert_eq!(config.layout().direction(), LayoutDirection::None);
        assert_eq!(config.library().custom_base_url(), None);
    }

    #[test]
    fn test_empty_toml_matches_defaults() {
        let config: AppConfig = toml::from_str("").expect("empty config should parse");
        assert!(config.layout().legend());
        assert_eq!(config.library().custom_base_url(), None);
    }

    #[test]
    fn test_unknown_direction_in_toml_is_rejected() {
        let result = toml::from_str::<AppConfig>("[layout]\ndirection = \"diagonal\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!(
            "left_right".parse::<LayoutDirection>().ok(),
            Some(LayoutDirection::LeftRight)
        );
        assert_eq!(
            "Top-Down".parse::<LayoutDirection>().ok(),
            Some(LayoutDirection::TopDown)
        );

        let err = "diagonal".parse::<LayoutDirection>().unwrap_err();
        assert!(matches!(err, C4Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_direction_directive() {
        assert_eq!(LayoutDirection::None.directive(), None);
        assert_eq!(LayoutDirection::TopDown.directive(), Some("LAYOUT_TOP_DOWN"));
        assert_eq!(
            LayoutDirection::LeftRight.directive(),
            Some("LAYOUT_LEFT_RIGHT")
        );
    }

    #[test]
    fn test_blank_base_url_means_standard_library() {
        let library = LibraryConfig::new("   ");
        assert_eq!(library.custom_base_url(), None);

        let library = LibraryConfig::new(" https://example.com/c4/ ");
        assert_eq!(library.custom_base_url(), Some("https://example.com/c4/"));
    }

    #[test]
    fn test_validate_rejects_whitespace_in_base_url() {
        let config = AppConfig::new(
            LayoutConfig::default(),
            LibraryConfig::new("https://example.com/my c4/"),
        );
        assert!(matches!(
            config.validate(),
            Err(C4Error::InvalidConfiguration(_))
        ));
    }
}
