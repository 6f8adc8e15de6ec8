#![forbid(unsafe_code)]

//! Scroll-driven viewport tracking.
//!
//! Two independent trackers run on every scroll event:
//!
//! - [`ActiveSectionTracker`] finds the section under the (biased) scroll
//!   offset and moves the active marker to the navigation link that names it.
//! - [`RevealState`] fades cards in once their top crosses a fixed fraction
//!   of the viewport height. Reveals are one-way for the life of the page.
//!
//! Both consume a [`ScrollSnapshot`] measured fresh by the page for each
//! event. Neither debounces: the work is a linear scan over a handful of
//! sections, links and cards.

use crate::config::{RevealConfig, ScrollConfig};
use crate::mutation::{Mutation, Target};

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Measured layout of one page section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionGeometry {
    /// The section's `id`, if it has one.
    pub id: Option<String>,
    /// Document offset of the section's top.
    pub top: f64,
    pub height: f64,
}

impl SectionGeometry {
    #[must_use]
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: Some(id.into()),
            top,
            height,
        }
    }

    /// Half-open interval test: `top <= y < top + height`.
    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Everything the scroll handlers read for one event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollSnapshot {
    pub scroll_y: f64,
    pub viewport_height: f64,
    /// Sections in document order.
    pub sections: Vec<SectionGeometry>,
    /// `href` of each navigation link, in document order.
    pub nav_hrefs: Vec<Option<String>>,
    /// Viewport-relative top of each card, in document order.
    pub card_tops: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Active section
// ---------------------------------------------------------------------------

/// Index of the last section whose interval contains `y`.
///
/// Sections are expected not to overlap; when they do, the later one in
/// document order wins.
#[must_use]
pub fn detect_active_section(sections: &[SectionGeometry], y: f64) -> Option<usize> {
    sections.iter().rposition(|section| section.contains(y))
}

/// First link whose `href` is exactly `#id`.
#[must_use]
pub fn link_for_section(nav_hrefs: &[Option<String>], id: &str) -> Option<usize> {
    nav_hrefs.iter().position(|href| {
        href.as_deref()
            .and_then(|h| h.strip_prefix('#'))
            .is_some_and(|fragment| fragment == id)
    })
}

/// Which navigation link currently carries the active marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSectionTracker {
    section: Option<String>,
    link: Option<usize>,
}

impl ActiveSectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the section last detected as current.
    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    /// Index of the link last marked active.
    #[must_use]
    pub const fn active_link(&self) -> Option<usize> {
        self.link
    }

    /// Run one detection pass.
    ///
    /// When a section contains the biased offset, the marker is cleared from
    /// every link and set on that section's link; overlapping sections
    /// resolve to the last match in document order. With no match the
    /// previous marker is left as is and no mutations are returned.
    pub fn update(&mut self, snapshot: &ScrollSnapshot, config: &ScrollConfig) -> Vec<Mutation> {
        let y = snapshot.scroll_y + config.lookahead;
        let Some(current) = detect_active_section(&snapshot.sections, y) else {
            return Vec::new();
        };
        let section = &snapshot.sections[current];
        let mut mutations: Vec<Mutation> = (0..snapshot.nav_hrefs.len())
            .map(|idx| Mutation::remove_class(Target::NavLink(idx), &config.active_class))
            .collect();
        let link = section
            .id
            .as_deref()
            .and_then(|id| link_for_section(&snapshot.nav_hrefs, id));
        if let Some(idx) = link {
            mutations.push(Mutation::add_class(Target::NavLink(idx), &config.active_class));
        }
        self.section = section.id.clone();
        self.link = link;
        mutations
    }
}

// ---------------------------------------------------------------------------
// Reveal
// ---------------------------------------------------------------------------

/// Revealed flag per card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealState {
    revealed: Vec<bool>,
}

impl RevealState {
    #[must_use]
    pub fn new(cards: usize) -> Self {
        Self {
            revealed: vec![false; cards],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    #[must_use]
    pub fn is_revealed(&self, card: usize) -> bool {
        self.revealed.get(card).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }

    /// Hidden starting state for every card, transition declared up front.
    #[must_use]
    pub fn prepare(&self, config: &RevealConfig) -> Vec<Mutation> {
        let hidden = format!("translateY({}px)", config.offset_px);
        (0..self.revealed.len())
            .flat_map(|idx| {
                let card = Target::Card(idx);
                [
                    Mutation::style(card, "opacity", "0"),
                    Mutation::style(card, "transform", hidden.clone()),
                    Mutation::style(card, "transition", config.transition.clone()),
                ]
            })
            .collect()
    }

    /// Reveal every card whose viewport top is above the threshold.
    ///
    /// Only newly revealed cards produce mutations; a revealed card stays
    /// revealed whatever later snapshots say.
    pub fn update(&mut self, snapshot: &ScrollSnapshot, config: &RevealConfig) -> Vec<Mutation> {
        if snapshot.card_tops.len() > self.revealed.len() {
            self.revealed.resize(snapshot.card_tops.len(), false);
        }
        let threshold = snapshot.viewport_height / config.divisor;
        let mut mutations = Vec::new();
        for (idx, &top) in snapshot.card_tops.iter().enumerate() {
            if self.revealed[idx] || top >= threshold {
                continue;
            }
            self.revealed[idx] = true;
            let card = Target::Card(idx);
            mutations.push(Mutation::style(card, "opacity", "1"));
            mutations.push(Mutation::style(card, "transform", "translateY(0)"));
        }
        mutations
    }
}

/// Transition set on a card when the pointer enters it.
#[must_use]
pub fn hover_transition(card: usize, config: &RevealConfig) -> Mutation {
    Mutation::style(
        Target::Card(card),
        "transition",
        config.hover_transition.clone(),
    )
}
