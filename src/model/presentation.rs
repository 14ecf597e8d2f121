//! Page-level settings for presentation decks.
//!
//! Every field is derived from the page's properties. Bad or missing values
//! fall back to the documented default and never fail the render.

use super::Page;
use crate::types::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual theme of a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Black,
    White,
    League,
    Beige,
    Sky,
    Night,
    Serif,
    Simple,
    Solarized,
    Moon,
    Dracula,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Black => "black",
            Theme::White => "white",
            Theme::League => "league",
            Theme::Beige => "beige",
            Theme::Sky => "sky",
            Theme::Night => "night",
            Theme::Serif => "serif",
            Theme::Simple => "simple",
            Theme::Solarized => "solarized",
            Theme::Moon => "moon",
            Theme::Dracula => "dracula",
        }
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(Theme::Black),
            "white" => Ok(Theme::White),
            "league" => Ok(Theme::League),
            "beige" => Ok(Theme::Beige),
            "sky" => Ok(Theme::Sky),
            "night" => Ok(Theme::Night),
            "serif" => Ok(Theme::Serif),
            "simple" => Ok(Theme::Simple),
            "solarized" => Ok(Theme::Solarized),
            "moon" => Ok(Theme::Moon),
            "dracula" => Ok(Theme::Dracula),
            _ => Err(ValidationError::UnknownName {
                kind: "theme",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Animation between slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    None,
    Fade,
    #[default]
    Slide,
    Convex,
    Concave,
    Zoom,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::None => "none",
            Transition::Fade => "fade",
            Transition::Slide => "slide",
            Transition::Convex => "convex",
            Transition::Concave => "concave",
            Transition::Zoom => "zoom",
        }
    }
}

impl FromStr for Transition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Transition::None),
            "fade" => Ok(Transition::Fade),
            "slide" => Ok(Transition::Slide),
            "convex" => Ok(Transition::Convex),
            "concave" => Ok(Transition::Concave),
            "zoom" => Ok(Transition::Zoom),
            _ => Err(ValidationError::UnknownName {
                kind: "transition",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated deck settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationProperties {
    pub theme: Theme,
    pub transition: Transition,
    pub controls: bool,
    pub progress: bool,
    pub slide_number: bool,
    pub center: bool,
}

impl Default for PresentationProperties {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            transition: Transition::default(),
            controls: true,
            progress: true,
            slide_number: false,
            center: true,
        }
    }
}

impl PresentationProperties {
    pub const THEME: &'static str = "Theme";
    pub const TRANSITION: &'static str = "Transition";
    pub const CONTROLS: &'static str = "Controls";
    pub const PROGRESS: &'static str = "Progress";
    pub const SLIDE_NUMBER: &'static str = "Slide Number";
    pub const CENTER: &'static str = "Center";

    pub fn from_page(page: &Page) -> Self {
        let defaults = Self::default();
        Self {
            theme: parse_or_default(page.select(Self::THEME), defaults.theme),
            transition: parse_or_default(page.select(Self::TRANSITION), defaults.transition),
            controls: page.checkbox(Self::CONTROLS).unwrap_or(defaults.controls),
            progress: page.checkbox(Self::PROGRESS).unwrap_or(defaults.progress),
            slide_number: page
                .checkbox(Self::SLIDE_NUMBER)
                .unwrap_or(defaults.slide_number),
            center: page.checkbox(Self::CENTER).unwrap_or(defaults.center),
        }
    }
}

fn parse_or_default<T>(value: Option<&str>, default: T) -> T
where
    T: FromStr<Err = ValidationError> + Copy,
{
    match value.map(str::parse::<T>) {
        Some(Ok(parsed)) => parsed,
        Some(Err(e)) => {
            log::warn!("{}; using default", e);
            default
        }
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyValue;
    use crate::types::PageId;

    fn deck_page() -> Page {
        Page::new(PageId::from_raw("deck"), "Talk")
    }

    #[test]
    fn missing_properties_use_defaults() {
        assert_eq!(
            PresentationProperties::from_page(&deck_page()),
            PresentationProperties::default()
        );
    }

    #[test]
    fn known_values_are_read() {
        let page = deck_page()
            .with_property("Theme", PropertyValue::Select(Some("Dracula".into())))
            .with_property("Transition", PropertyValue::Select(Some("zoom".into())))
            .with_property("Slide Number", PropertyValue::Checkbox(true));

        let props = PresentationProperties::from_page(&page);
        assert_eq!(props.theme, Theme::Dracula);
        assert_eq!(props.transition, Transition::Zoom);
        assert!(props.slide_number);
        assert!(props.controls);
    }

    #[test]
    fn unknown_enum_names_fall_back() {
        let page = deck_page()
            .with_property("Theme", PropertyValue::Select(Some("neon".into())))
            .with_property("Transition", PropertyValue::Select(Some("spin".into())));

        let props = PresentationProperties::from_page(&page);
        assert_eq!(props.theme, Theme::Black);
        assert_eq!(props.transition, Transition::Slide);
    }

    #[test]
    fn wrong_property_type_is_ignored() {
        let page = deck_page().with_property("Controls", PropertyValue::Number(Some(1.0)));
        assert!(PresentationProperties::from_page(&page).controls);
    }
}
