#![forbid(unsafe_code)]

//! Smooth scrolling for in-page anchors.
//!
//! Every intercepted anchor suppresses default navigation. The `href`
//! fragment is resolved to an element id; when one exists, the window
//! scrolls so the element's top sits just below the fixed navigation bar,
//! and an open mobile menu is closed.

use crate::config::MenuConfig;
use crate::menu::MenuState;
use crate::mutation::{Mutation, ScrollBehavior};

/// Parsed `href` of an intercepted anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// Exactly `#`.
    Bare,
    /// `#id`, without the marker.
    Id(&'a str),
}

impl<'a> Fragment<'a> {
    /// Parse an `href`. `None` when it is not an in-page fragment.
    #[must_use]
    pub fn parse(href: &'a str) -> Option<Self> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            Some(Self::Bare)
        } else {
            Some(Self::Id(id))
        }
    }

    #[must_use]
    pub const fn id(self) -> Option<&'a str> {
        match self {
            Self::Bare => None,
            Self::Id(id) => Some(id),
        }
    }
}

/// Document offset that puts an element's top just below the navbar.
#[must_use]
pub fn scroll_target(element_top: f64, navbar_height: f64) -> f64 {
    element_top - navbar_height
}

/// Plan the response to an anchor click.
///
/// `target_top` is the resolved element's document offset, or `None` when
/// the fragment is bare or names no element; in that case nothing happens.
pub fn plan_click(
    target_top: Option<f64>,
    navbar_height: f64,
    menu: &mut MenuState,
    menu_config: &MenuConfig,
) -> Vec<Mutation> {
    let Some(top) = target_top else {
        return Vec::new();
    };
    let mut mutations = vec![Mutation::ScrollTo {
        top: scroll_target(top, navbar_height),
        behavior: ScrollBehavior::Smooth,
    }];
    mutations.extend(menu.close(menu_config));
    mutations
}
