#![forbid(unsafe_code)]

//! The boundary between component state and the document.
//!
//! Handlers never touch the DOM. They return a list of [`Mutation`]s naming a
//! semantic [`Target`]; [`Page`](crate::page::Page) resolves targets through
//! the configured selectors and applies them in order.

use crate::form::Field;

/// What a mutation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The navigation container toggled by the menu control.
    NavPanel,
    /// The icon inside the menu control.
    MenuIcon,
    /// A navigation link, by index in document order.
    NavLink(usize),
    /// A reveal card, by index in document order.
    Card(usize),
    BackToTop,
    Field(Field),
    ContactForm,
}

/// Scroll animation requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
}

/// One DOM change.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddClass {
        target: Target,
        class: String,
    },
    RemoveClass {
        target: Target,
        class: String,
    },
    /// Set an inline style property. An empty value removes the property.
    SetStyle {
        target: Target,
        property: &'static str,
        value: String,
    },
    /// Scroll the window to an absolute document offset.
    ScrollTo { top: f64, behavior: ScrollBehavior },
    /// Render (or update) the single inline error element under a field.
    ShowFieldError { field: Field, message: String },
    /// Remove the field's inline error element, if any, and reset its border.
    ClearFieldError { field: Field },
    /// Synchronous confirmation shown to the user.
    Notify(String),
    /// Clear every field of the contact form.
    ResetForm,
}

impl Mutation {
    pub(crate) fn add_class(target: Target, class: &str) -> Self {
        Self::AddClass {
            target,
            class: class.to_owned(),
        }
    }

    pub(crate) fn remove_class(target: Target, class: &str) -> Self {
        Self::RemoveClass {
            target,
            class: class.to_owned(),
        }
    }

    pub(crate) fn style(target: Target, property: &'static str, value: impl Into<String>) -> Self {
        Self::SetStyle {
            target,
            property,
            value: value.into(),
        }
    }

    /// The target this mutation touches, if it is element-scoped.
    #[must_use]
    pub fn target(&self) -> Option<Target> {
        match self {
            Self::AddClass { target, .. }
            | Self::RemoveClass { target, .. }
            | Self::SetStyle { target, .. } => Some(*target),
            Self::ShowFieldError { field, .. } | Self::ClearFieldError { field } => {
                Some(Target::Field(*field))
            }
            Self::ResetForm => Some(Target::ContactForm),
            Self::ScrollTo { .. } | Self::Notify(_) => None,
        }
    }
}
