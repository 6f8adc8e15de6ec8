#![forbid(unsafe_code)]

//! Mobile navigation toggle.

use crate::config::MenuConfig;
use crate::mutation::{Mutation, Target};

/// Open/closed state of the mobile navigation panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    /// State read from the markup at mount.
    #[must_use]
    pub const fn new(open: bool) -> Self {
        Self { open }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Invert the state and project it onto the panel and icon.
    pub fn toggle(&mut self, config: &MenuConfig) -> Vec<Mutation> {
        self.open = !self.open;
        self.project(config)
    }

    /// Close the panel. No mutations when it is already closed.
    pub fn close(&mut self, config: &MenuConfig) -> Vec<Mutation> {
        if !self.open {
            return Vec::new();
        }
        self.open = false;
        self.project(config)
    }

    fn project(&self, config: &MenuConfig) -> Vec<Mutation> {
        if self.open {
            vec![
                Mutation::add_class(Target::NavPanel, &config.open_class),
                Mutation::remove_class(Target::MenuIcon, &config.icon_closed_class),
                Mutation::add_class(Target::MenuIcon, &config.icon_open_class),
            ]
        } else {
            vec![
                Mutation::remove_class(Target::NavPanel, &config.open_class),
                Mutation::remove_class(Target::MenuIcon, &config.icon_open_class),
                Mutation::add_class(Target::MenuIcon, &config.icon_closed_class),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn toggle_opens_then_closes() {
        let config = MenuConfig::default();
        let mut menu = MenuState::default();

        let opened = menu.toggle(&config);
        assert!(menu.is_open());
        assert_eq!(
            opened,
            vec![
                Mutation::add_class(Target::NavPanel, "active"),
                Mutation::remove_class(Target::MenuIcon, "fa-bars"),
                Mutation::add_class(Target::MenuIcon, "fa-times"),
            ]
        );

        let closed = menu.toggle(&config);
        assert!(!menu.is_open());
        assert_eq!(
            closed,
            vec![
                Mutation::remove_class(Target::NavPanel, "active"),
                Mutation::remove_class(Target::MenuIcon, "fa-times"),
                Mutation::add_class(Target::MenuIcon, "fa-bars"),
            ]
        );
    }

    #[test]
    fn close_when_closed_is_a_no_op() {
        let mut menu = MenuState::default();
        assert!(menu.close(&MenuConfig::default()).is_empty());
        assert!(!menu.is_open());
    }

    #[test]
    fn close_when_open_matches_toggle_close() {
        let config = MenuConfig::default();
        let mut a = MenuState::new(true);
        let mut b = MenuState::new(true);
        assert_eq!(a.close(&config), b.toggle(&config));
        assert_eq!(a, b);
    }
}
