#![forbid(unsafe_code)]

//! Visibility of the floating back-to-top control.
//!
//! The control itself is a plain anchor; only its visibility is managed here.

use crate::config::BackToTopConfig;
use crate::mutation::{Mutation, Target};

/// Shown/hidden state of the control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackToTop {
    visible: bool,
}

impl BackToTop {
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hidden starting state, transition declared up front.
    pub fn prepare(&mut self, config: &BackToTopConfig) -> Vec<Mutation> {
        self.visible = false;
        let mut mutations = Self::project(false);
        mutations.push(Mutation::style(
            Target::BackToTop,
            "transition",
            config.transition.clone(),
        ));
        mutations
    }

    /// Visible iff `scroll_y` exceeds the threshold. Mutations only on change.
    pub fn update(&mut self, scroll_y: f64, config: &BackToTopConfig) -> Vec<Mutation> {
        let visible = scroll_y > config.threshold;
        if visible == self.visible {
            return Vec::new();
        }
        self.visible = visible;
        Self::project(visible)
    }

    fn project(visible: bool) -> Vec<Mutation> {
        let (opacity, visibility) = if visible {
            ("1", "visible")
        } else {
            ("0", "hidden")
        };
        vec![
            Mutation::style(Target::BackToTop, "opacity", opacity),
            Mutation::style(Target::BackToTop, "visibility", visibility),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prepare_hides_with_transition() {
        let mut control = BackToTop::default();
        let plan = control.prepare(&BackToTopConfig::default());
        assert_eq!(
            plan,
            vec![
                Mutation::style(Target::BackToTop, "opacity", "0"),
                Mutation::style(Target::BackToTop, "visibility", "hidden"),
                Mutation::style(
                    Target::BackToTop,
                    "transition",
                    "opacity 0.3s ease, visibility 0.3s ease"
                ),
            ]
        );
        assert!(!control.is_visible());
    }

    #[test]
    fn boundary_at_threshold() {
        let config = BackToTopConfig::default();
        let mut control = BackToTop::default();

        assert!(control.update(499.0, &config).is_empty());
        assert!(!control.is_visible());
        assert!(control.update(500.0, &config).is_empty());
        assert!(!control.is_visible());

        let shown = control.update(501.0, &config);
        assert!(control.is_visible());
        assert_eq!(
            shown,
            vec![
                Mutation::style(Target::BackToTop, "opacity", "1"),
                Mutation::style(Target::BackToTop, "visibility", "visible"),
            ]
        );

        let hidden = control.update(499.0, &config);
        assert!(!control.is_visible());
        assert_eq!(hidden[0], Mutation::style(Target::BackToTop, "opacity", "0"));
    }

    #[test]
    fn repeated_offsets_do_not_rewrite() {
        let config = BackToTopConfig::default();
        let mut control = BackToTop::default();
        assert_eq!(control.update(900.0, &config).len(), 2);
        assert!(control.update(1200.0, &config).is_empty());
    }
}
