#![forbid(unsafe_code)]

//! The document capability set the page is written against.
//!
//! [`Dom`] is deliberately small: lookup by id or selector, class and inline
//! style mutation, layout measurement, and the handful of window operations
//! the handlers need. The browser implementation lives in `folio-web`; tests
//! use [`FakeDom`](crate::testing::FakeDom).
//!
//! Measurements are read fresh on every call. Nothing here caches layout,
//! since content may reflow between events.

use crate::mutation::ScrollBehavior;

/// Document access for the page handlers.
pub trait Dom {
    /// Element handle. Cheap to clone.
    type Node: Clone + core::fmt::Debug;

    /// First element matching `selector` in document order.
    fn query(&self, selector: &str) -> Option<Self::Node>;

    /// Every element matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First descendant of `node` matching `selector`.
    fn query_within(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn by_id(&self, id: &str) -> Option<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&mut self, node: &Self::Node, class: &str);
    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Set an inline style property; an empty `value` removes it.
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);

    /// Current value of a form control. Non-controls read as empty.
    fn value(&self, node: &Self::Node) -> String;

    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// Append a new `<tag class="class">` as the last child of `parent`.
    /// `None` when the host cannot create the element.
    fn append_element(&mut self, parent: &Self::Node, tag: &str, class: &str)
    -> Option<Self::Node>;

    fn remove(&mut self, node: &Self::Node);

    /// Reset every control of a form to its default (empty) value.
    fn reset_form(&mut self, form: &Self::Node);

    /// Offset of the element's top from the document top.
    fn offset_top(&self, node: &Self::Node) -> f64;

    fn offset_height(&self, node: &Self::Node) -> f64;

    /// Top of the element's bounding box relative to the viewport.
    fn viewport_top(&self, node: &Self::Node) -> f64;

    /// Current vertical scroll offset of the window.
    fn scroll_y(&self) -> f64;

    /// Height of the window's layout viewport.
    fn viewport_height(&self) -> f64;

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    /// Show a blocking confirmation to the user.
    fn notify(&mut self, message: &str);
}
