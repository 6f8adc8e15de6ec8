//! Property-based invariant tests for the scroll handlers.
//!
//! 1. An offset strictly inside exactly one section marks exactly that link
//! 2. An offset outside every section changes nothing
//! 3. Reveal is monotone: a revealed card never hides again
//! 4. Back-to-top visibility is exactly `scroll_y > threshold`

use folio_core::back_to_top::BackToTop;
use folio_core::config::{BackToTopConfig, RevealConfig, ScrollConfig};
use folio_core::mutation::{Mutation, Target};
use folio_core::viewport::{ActiveSectionTracker, RevealState, ScrollSnapshot, SectionGeometry};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

/// Contiguous, non-overlapping sections starting at `start`.
fn sections_strategy() -> impl Strategy<Value = Vec<SectionGeometry>> {
    (
        0.0f64..500.0,
        prop::collection::vec(50.0f64..2000.0, 1..8),
    )
        .prop_map(|(start, heights)| {
            let mut top = start;
            heights
                .into_iter()
                .enumerate()
                .map(|(idx, height)| {
                    let section = SectionGeometry::new(format!("s{idx}"), top, height);
                    top += height;
                    section
                })
                .collect()
        })
}

fn snapshot(sections: &[SectionGeometry], scroll_y: f64) -> ScrollSnapshot {
    ScrollSnapshot {
        scroll_y,
        viewport_height: 800.0,
        nav_hrefs: sections
            .iter()
            .map(|s| s.id.as_ref().map(|id| format!("#{id}")))
            .collect(),
        sections: sections.to_vec(),
        card_tops: Vec::new(),
    }
}

/// Links left active after applying the class mutations in order.
fn active_after(links: usize, plan: &[Mutation]) -> Vec<usize> {
    let mut active = vec![false; links];
    for mutation in plan {
        match mutation {
            Mutation::AddClass {
                target: Target::NavLink(idx),
                ..
            } => active[*idx] = true,
            Mutation::RemoveClass {
                target: Target::NavLink(idx),
                ..
            } => active[*idx] = false,
            _ => {}
        }
    }
    active
        .iter()
        .enumerate()
        .filter_map(|(idx, on)| on.then_some(idx))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Interior offsets mark exactly one link
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn interior_offset_marks_exactly_its_section(
        sections in sections_strategy(),
        pick in any::<prop::sample::Index>(),
        frac in 0.01f64..0.99,
    ) {
        let config = ScrollConfig::default();
        let idx = pick.index(sections.len());
        let target = &sections[idx];
        let y = target.top + target.height * frac;
        let scroll_y = y - config.lookahead;

        let mut tracker = ActiveSectionTracker::new();
        let plan = tracker.update(&snapshot(&sections, scroll_y), &config);

        prop_assert_eq!(active_after(sections.len(), &plan), vec![idx]);
        prop_assert_eq!(tracker.active_link(), Some(idx));
        prop_assert_eq!(tracker.active_section(), target.id.as_deref());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Offsets outside every section are a no-op
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn offset_outside_all_sections_keeps_previous(
        sections in sections_strategy(),
        below in 1.0f64..10_000.0,
    ) {
        let config = ScrollConfig::default();
        let mut tracker = ActiveSectionTracker::new();
        tracker.update(&snapshot(&sections, sections[0].top - config.lookahead), &config);
        let before = tracker.clone();

        let end = sections.last().map_or(0.0, |s| s.top + s.height);
        let plan = tracker.update(&snapshot(&sections, end + below - config.lookahead), &config);

        prop_assert!(plan.is_empty());
        prop_assert_eq!(tracker, before);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Reveal monotonicity
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn revealed_cards_stay_revealed(
        frames in prop::collection::vec(prop::collection::vec(-500.0f64..3000.0, 4), 1..30),
    ) {
        let config = RevealConfig::default();
        let mut reveal = RevealState::new(4);
        let mut seen = [false; 4];
        for tops in frames {
            let threshold = 800.0 / config.divisor;
            let snap = ScrollSnapshot {
                viewport_height: 800.0,
                card_tops: tops.clone(),
                ..ScrollSnapshot::default()
            };
            let plan = reveal.update(&snap, &config);
            for (idx, top) in tops.iter().enumerate() {
                let newly = !seen[idx] && *top < threshold;
                prop_assert_eq!(
                    plan.contains(&Mutation::SetStyle {
                        target: Target::Card(idx),
                        property: "opacity",
                        value: "1".into(),
                    }),
                    newly
                );
                seen[idx] |= newly;
                prop_assert_eq!(reveal.is_revealed(idx), seen[idx]);
            }
            let rehidden = plan
                .iter()
                .any(|m| matches!(m, Mutation::SetStyle { value, .. } if value == "0"));
            prop_assert!(!rehidden, "a revealed card was hidden again");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Back-to-top visibility tracks the last offset
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn back_to_top_visible_iff_past_threshold(
        offsets in prop::collection::vec(0.0f64..2000.0, 1..50),
    ) {
        let config = BackToTopConfig::default();
        let mut control = BackToTop::default();
        for y in offsets {
            control.update(y, &config);
            prop_assert_eq!(control.is_visible(), y > config.threshold);
        }
    }
}
