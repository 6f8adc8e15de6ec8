#![forbid(unsafe_code)]

//! Page configuration: the markup contract plus tuning constants.
//!
//! Every selector, id and class name the handlers rely on lives here, so the
//! same core can drive any page that follows the contract. [`PageConfig`]
//! defaults reproduce the stock portfolio markup; a host may override any
//! subset through JSON:
//!
//! ```json
//! { "scroll": { "lookahead": 80 }, "back_to_top": { "threshold": 300 } }
//! ```
//!
//! Missing keys fall back to their defaults (`#[serde(default)]` on every
//! group), and [`PageConfig::from_json`] validates the result before handing
//! it back.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// Mobile navigation toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Control that opens/closes the panel.
    pub button_selector: String,
    /// Navigation container that carries the open marker.
    pub panel_selector: String,
    /// Icon element, looked up inside the button.
    pub icon_selector: String,
    /// Class marking the panel open.
    pub open_class: String,
    /// Icon class while the menu is open.
    pub icon_open_class: String,
    /// Icon class while the menu is closed.
    pub icon_closed_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            button_selector: ".menu-btn".into(),
            panel_selector: ".nav-links".into(),
            icon_selector: "i".into(),
            open_class: "active".into(),
            icon_open_class: "fa-times".into(),
            icon_closed_class: "fa-bars".into(),
        }
    }
}

/// In-page anchor scrolling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    /// Anchors intercepted for smooth scrolling.
    pub anchor_selector: String,
    /// Fixed navigation bar whose height offsets the scroll target.
    pub navbar_selector: String,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            anchor_selector: "a[href^=\"#\"]".into(),
            navbar_selector: ".navbar".into(),
        }
    }
}

/// Contact form validation and error rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub form_id: String,
    pub name_id: String,
    pub email_id: String,
    pub message_id: String,
    /// Class of the inline error element created under a field's parent.
    pub error_class: String,
    /// Text color of the error element and border color of an invalid field.
    pub error_color: String,
    pub error_font_size: String,
    pub error_margin_top: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            form_id: "contactForm".into(),
            name_id: "name".into(),
            email_id: "email".into(),
            message_id: "message".into(),
            error_class: "error-message".into(),
            error_color: "#ff5252".into(),
            error_font_size: "0.9rem".into(),
            error_margin_top: "5px".into(),
        }
    }
}

/// Active-section detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub section_selector: String,
    /// Links whose `href` fragments name the sections.
    pub nav_link_selector: String,
    /// Class marking the link of the current section.
    pub active_class: String,
    /// Added to the scroll offset before the interval test.
    pub lookahead: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            section_selector: "section".into(),
            nav_link_selector: ".nav-links a".into(),
            active_class: "active".into(),
            lookahead: 100.0,
        }
    }
}

/// Reveal-on-scroll for cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub card_selector: String,
    /// A card is revealed once its viewport top is above `innerHeight / divisor`.
    pub divisor: f64,
    /// Downward offset of a hidden card, in pixels.
    pub offset_px: f64,
    pub transition: String,
    /// Transition applied when the pointer enters a card.
    pub hover_transition: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            card_selector: ".channel-card, .skill-card".into(),
            divisor: 1.2,
            offset_px: 20.0,
            transition: "opacity 0.5s ease, transform 0.5s ease".into(),
            hover_transition: "all 0.3s ease".into(),
        }
    }
}

/// Floating back-to-top control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackToTopConfig {
    pub selector: String,
    /// Scroll offset the page must exceed before the control shows.
    pub threshold: f64,
    pub transition: String,
}

impl Default for BackToTopConfig {
    fn default() -> Self {
        Self {
            selector: ".back-to-top".into(),
            threshold: 500.0,
            transition: "opacity 0.3s ease, visibility 0.3s ease".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// PageConfig
// ---------------------------------------------------------------------------

/// Complete page configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub menu: MenuConfig,
    pub anchor: AnchorConfig,
    pub form: FormConfig,
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub back_to_top: BackToTopConfig,
    /// Lines logged once when the page mounts.
    pub welcome: Vec<String>,
}

impl PageConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Stock configuration with the portfolio's welcome banner.
    #[must_use]
    pub fn portfolio() -> Self {
        Self {
            welcome: vec![
                "Welcome to Sheikh Maruf Hasan's Portfolio!".into(),
                "Hope you enjoy exploring my work as a YouTube content creator.".into(),
            ],
            ..Self::default()
        }
    }

    /// Reject values the handlers cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let selectors: [(&'static str, &str); 13] = [
            ("menu.button_selector", &self.menu.button_selector),
            ("menu.panel_selector", &self.menu.panel_selector),
            ("menu.icon_selector", &self.menu.icon_selector),
            ("anchor.anchor_selector", &self.anchor.anchor_selector),
            ("anchor.navbar_selector", &self.anchor.navbar_selector),
            ("form.form_id", &self.form.form_id),
            ("form.name_id", &self.form.name_id),
            ("form.email_id", &self.form.email_id),
            ("form.message_id", &self.form.message_id),
            ("scroll.section_selector", &self.scroll.section_selector),
            ("scroll.nav_link_selector", &self.scroll.nav_link_selector),
            ("reveal.card_selector", &self.reveal.card_selector),
            ("back_to_top.selector", &self.back_to_top.selector),
        ];
        for (field, value) in selectors {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must not be empty",
                });
            }
        }

        let classes: [(&'static str, &str); 5] = [
            ("menu.open_class", &self.menu.open_class),
            ("menu.icon_open_class", &self.menu.icon_open_class),
            ("menu.icon_closed_class", &self.menu.icon_closed_class),
            ("form.error_class", &self.form.error_class),
            ("scroll.active_class", &self.scroll.active_class),
        ];
        for (field, value) in classes {
            if value.is_empty() || value.contains(char::is_whitespace) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be a single class name",
                });
            }
        }
        if self.menu.icon_open_class == self.menu.icon_closed_class {
            return Err(ConfigError::Invalid {
                field: "menu.icon_open_class",
                reason: "must differ from icon_closed_class",
            });
        }

        if !self.scroll.lookahead.is_finite() {
            return Err(ConfigError::Invalid {
                field: "scroll.lookahead",
                reason: "must be finite",
            });
        }
        if !self.reveal.divisor.is_finite() || self.reveal.divisor <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "reveal.divisor",
                reason: "must be finite and positive",
            });
        }
        if !self.reveal.offset_px.is_finite() {
            return Err(ConfigError::Invalid {
                field: "reveal.offset_px",
                reason: "must be finite",
            });
        }
        if !self.back_to_top.threshold.is_finite() {
            return Err(ConfigError::Invalid {
                field: "back_to_top.threshold",
                reason: "must be finite",
            });
        }
        Ok(())
    }
}
