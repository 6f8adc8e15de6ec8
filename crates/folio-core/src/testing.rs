#![forbid(unsafe_code)]

//! In-memory [`Dom`] for driving [`Page`](crate::page::Page) without a browser.
//!
//! [`FakeDom`] is an arena of elements with a fixed layout: each element has a
//! document `top` and a `height`, and viewport-relative positions are derived
//! from the current scroll offset. `scroll_to` jumps immediately and is
//! recorded, as are notifications.
//!
//! Selector support covers what the page configuration uses: type, `.class`,
//! `#id`, `[attr]`, `[attr="v"]` and `[attr^="v"]` compounds, joined by
//! descendant whitespace, in comma-separated groups.

use std::cell::Cell;
use std::collections::BTreeMap;

use crate::dom::Dom;
use crate::mutation::ScrollBehavior;

/// Handle into a [`FakeDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct FakeNode {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    top: f64,
    height: f64,
}

/// Arena-backed document with a scrollable window.
#[derive(Debug, Clone)]
pub struct FakeDom {
    nodes: Vec<FakeNode>,
    scroll_y: f64,
    viewport_height: f64,
    scroll_log: Vec<(f64, ScrollBehavior)>,
    notifications: Vec<String>,
    query_all_calls: Cell<usize>,
}

impl FakeDom {
    /// Empty document with a `<body>` root.
    #[must_use]
    pub fn new(viewport_height: f64) -> Self {
        Self {
            nodes: vec![FakeNode {
                tag: "body".into(),
                ..FakeNode::default()
            }],
            scroll_y: 0.0,
            viewport_height,
            scroll_log: Vec::new(),
            notifications: Vec::new(),
            query_all_calls: Cell::new(0),
        }
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append `<tag>` under `parent` and configure it through the builder.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> ElementBuilder<'_> {
        let id = self.insert(parent, tag);
        ElementBuilder { dom: self, id }
    }

    fn insert(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(FakeNode {
            tag: tag.to_ascii_lowercase(),
            parent: Some(parent),
            ..FakeNode::default()
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn node(&self, id: NodeId) -> &FakeNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut FakeNode {
        &mut self.nodes[id.0]
    }

    // -- Test controls --

    /// Move the window without recording a scroll request.
    pub fn set_scroll(&mut self, y: f64) {
        self.scroll_y = y;
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Type into a form control.
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        self.node_mut(node).value = value.to_owned();
    }

    pub fn set_layout(&mut self, node: NodeId, top: f64, height: f64) {
        let n = self.node_mut(node);
        n.top = top;
        n.height = height;
    }

    // -- Inspection --

    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node).styles.get(property).map(String::as_str)
    }

    #[must_use]
    pub fn classes(&self, node: NodeId) -> &[String] {
        &self.node(node).classes
    }

    #[must_use]
    pub fn text(&self, node: NodeId) -> &str {
        &self.node(node).text
    }

    #[must_use]
    pub fn value_of(&self, node: NodeId) -> &str {
        &self.node(node).value
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    /// Scroll requests issued through [`Dom::scroll_to`].
    #[must_use]
    pub fn scroll_log(&self) -> &[(f64, ScrollBehavior)] {
        &self.scroll_log
    }

    #[must_use]
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    /// Number of `query_all` calls so far.
    #[must_use]
    pub fn query_all_calls(&self) -> usize {
        self.query_all_calls.get()
    }

    /// Descendants of `node` in document order, excluding `node`.
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(node).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    fn select(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        let groups = parse_selector(selector);
        self.descendants(scope)
            .into_iter()
            .filter(|&id| groups.iter().any(|complex| self.matches_complex(id, complex)))
            .collect()
    }

    fn matches_complex(&self, id: NodeId, complex: &[Compound]) -> bool {
        let Some((last, ancestors)) = complex.split_last() else {
            return false;
        };
        if !self.matches_compound(id, last) {
            return false;
        }
        let mut cursor = self.node(id).parent;
        for compound in ancestors.iter().rev() {
            loop {
                let Some(ancestor) = cursor else {
                    return false;
                };
                cursor = self.node(ancestor).parent;
                if self.matches_compound(ancestor, compound) {
                    break;
                }
            }
        }
        true
    }

    fn matches_compound(&self, id: NodeId, compound: &Compound) -> bool {
        let node = self.node(id);
        if let Some(tag) = &compound.tag {
            if *tag != node.tag {
                return false;
            }
        }
        if let Some(want) = &compound.id {
            if node.attrs.get("id") != Some(want) {
                return false;
            }
        }
        if !compound.classes.iter().all(|c| node.classes.contains(c)) {
            return false;
        }
        compound.attrs.iter().all(|test| {
            let Some(actual) = node.attrs.get(&test.name) else {
                return false;
            };
            match &test.op {
                AttrOp::Exists => true,
                AttrOp::Equals(v) => actual == v,
                AttrOp::Prefix(v) => actual.starts_with(v.as_str()),
            }
        })
    }
}

/// Fluent configuration of a freshly appended element.
pub struct ElementBuilder<'a> {
    dom: &'a mut FakeDom,
    id: NodeId,
}

impl ElementBuilder<'_> {
    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    #[must_use]
    pub fn class(self, class: &str) -> Self {
        let node = self.dom.node_mut(self.id);
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_owned());
        }
        self
    }

    #[must_use]
    pub fn attr(self, name: &str, value: &str) -> Self {
        self.dom
            .node_mut(self.id)
            .attrs
            .insert(name.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn layout(self, top: f64, height: f64) -> Self {
        self.dom.set_layout(self.id, top, height);
        self
    }

    #[must_use]
    pub fn value(self, value: &str) -> Self {
        self.dom.set_value(self.id, value);
        self
    }

    #[must_use]
    pub fn text(self, text: &str) -> Self {
        self.dom.node_mut(self.id).text = text.to_owned();
        self
    }

    pub fn build(self) -> NodeId {
        self.id
    }
}

impl Dom for FakeDom {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.select(self.root(), selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_all_calls.set(self.query_all_calls.get() + 1);
        self.select(self.root(), selector)
    }

    fn query_within(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        self.select(*node, selector).into_iter().next()
    }

    fn by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&n| self.node(n).attrs.get("id").is_some_and(|v| v == id))
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.node(*node).parent
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let node = self.node(*node);
        if name == "class" {
            return (!node.classes.is_empty()).then(|| node.classes.join(" "));
        }
        node.attrs.get(name).cloned()
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.node(*node).classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        let node = self.node_mut(*node);
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_owned());
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        self.node_mut(*node).classes.retain(|c| c != class);
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) {
        let styles = &mut self.node_mut(*node).styles;
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn value(&self, node: &NodeId) -> String {
        self.node(*node).value.clone()
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        self.node_mut(*node).text = text.to_owned();
    }

    fn append_element(&mut self, parent: &NodeId, tag: &str, class: &str) -> Option<NodeId> {
        let id = self.insert(*parent, tag);
        self.add_class(&id, class);
        Some(id)
    }

    fn remove(&mut self, node: &NodeId) {
        let Some(parent) = self.node_mut(*node).parent.take() else {
            return;
        };
        self.node_mut(parent).children.retain(|c| c != node);
    }

    fn reset_form(&mut self, form: &NodeId) {
        for id in self.descendants(*form) {
            let node = self.node_mut(id);
            if matches!(node.tag.as_str(), "input" | "textarea" | "select") {
                node.value.clear();
            }
        }
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.node(*node).top
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.node(*node).height
    }

    fn viewport_top(&self, node: &NodeId) -> f64 {
        self.node(*node).top - self.scroll_y
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_log.push((top, behavior));
        self.scroll_y = top.max(0.0);
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_owned());
    }
}

// ---------------------------------------------------------------------------
// Stock portfolio document
// ---------------------------------------------------------------------------

/// Handles into [`FakeDom::portfolio`].
#[derive(Debug, Clone)]
pub struct PortfolioNodes {
    pub navbar: NodeId,
    pub menu_button: NodeId,
    pub menu_icon: NodeId,
    pub nav_panel: NodeId,
    /// `#home`, `#about`, `#skills`, `#contact`.
    pub nav_links: Vec<NodeId>,
    pub sections: Vec<NodeId>,
    /// Two channel cards in `#about`, then three skill cards in `#skills`.
    pub cards: Vec<NodeId>,
    pub form: NodeId,
    pub name: NodeId,
    pub email: NodeId,
    pub message: NodeId,
    pub back_to_top: NodeId,
}

impl FakeDom {
    /// The stock portfolio layout: a 70px navbar and four sections.
    ///
    /// | section   | top  | height |
    /// |-----------|------|--------|
    /// | `home`    | 0    | 700    |
    /// | `about`   | 700  | 600    |
    /// | `skills`  | 1300 | 800    |
    /// | `contact` | 2100 | 900    |
    #[must_use]
    pub fn portfolio(viewport_height: f64) -> (Self, PortfolioNodes) {
        let mut dom = Self::new(viewport_height);
        let root = dom.root();

        let navbar = dom.append(root, "nav").class("navbar").layout(0.0, 70.0).build();
        let menu_button = dom.append(navbar, "div").class("menu-btn").build();
        let menu_icon = dom
            .append(menu_button, "i")
            .class("fas")
            .class("fa-bars")
            .build();
        let nav_panel = dom.append(navbar, "ul").class("nav-links").build();
        let nav_links: Vec<NodeId> = ["home", "about", "skills", "contact"]
            .iter()
            .map(|id| {
                let item = dom.append(nav_panel, "li").build();
                dom.append(item, "a").attr("href", &format!("#{id}")).build()
            })
            .collect();

        let layout = [
            ("home", 0.0, 700.0),
            ("about", 700.0, 600.0),
            ("skills", 1300.0, 800.0),
            ("contact", 2100.0, 900.0),
        ];
        let sections: Vec<NodeId> = layout
            .iter()
            .map(|(id, top, height)| {
                dom.append(root, "section")
                    .id(id)
                    .layout(*top, *height)
                    .build()
            })
            .collect();

        let mut cards = Vec::new();
        for top in [800.0, 950.0] {
            cards.push(
                dom.append(sections[1], "div")
                    .class("channel-card")
                    .layout(top, 120.0)
                    .build(),
            );
        }
        for top in [1400.0, 1600.0, 1800.0] {
            cards.push(
                dom.append(sections[2], "div")
                    .class("skill-card")
                    .layout(top, 150.0)
                    .build(),
            );
        }

        let form = dom.append(sections[3], "form").id("contactForm").build();
        let mut field = |tag: &str, id: &str| {
            let group = dom.append(form, "div").class("form-group").build();
            dom.append(group, tag).id(id).build()
        };
        let name = field("input", "name");
        let email = field("input", "email");
        let message = field("textarea", "message");

        let back_to_top = dom
            .append(root, "a")
            .class("back-to-top")
            .attr("href", "#home")
            .build();

        let nodes = PortfolioNodes {
            navbar,
            menu_button,
            menu_icon,
            nav_panel,
            nav_links,
            sections,
            cards,
            form,
            name,
            email,
            message,
            back_to_top,
        };
        (dom, nodes)
    }
}

// ---------------------------------------------------------------------------
// Selector parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrTest {
    name: String,
    op: AttrOp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

fn parse_selector(selector: &str) -> Vec<Vec<Compound>> {
    selector
        .split(',')
        .map(|complex| complex.split_whitespace().map(parse_compound).collect::<Vec<_>>())
        .filter(|complex| !complex.is_empty())
        .collect()
}

fn is_ident(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(src: &str) -> Compound {
    let mut compound = Compound::default();
    let mut rest = src;

    let tag_len = rest.find(|c: char| !is_ident(c) && c != '*').unwrap_or(rest.len());
    let tag = &rest[..tag_len];
    if !tag.is_empty() && tag != "*" {
        compound.tag = Some(tag.to_ascii_lowercase());
    }
    rest = &rest[tag_len..];

    while let Some(marker) = rest.chars().next() {
        rest = &rest[marker.len_utf8()..];
        match marker {
            '.' | '#' => {
                let len = rest.find(|c: char| !is_ident(c)).unwrap_or(rest.len());
                let name = rest[..len].to_owned();
                rest = &rest[len..];
                if marker == '.' {
                    compound.classes.push(name);
                } else {
                    compound.id = Some(name);
                }
            }
            '[' => {
                let end = rest.find(']').unwrap_or(rest.len());
                compound.attrs.push(parse_attr(&rest[..end]));
                rest = rest.get(end + 1..).unwrap_or("");
            }
            _ => {}
        }
    }
    compound
}

fn parse_attr(body: &str) -> AttrTest {
    let unquote = |v: &str| v.trim().trim_matches(|c| c == '"' || c == '\'').to_owned();
    if let Some((name, value)) = body.split_once("^=") {
        AttrTest {
            name: name.trim().to_owned(),
            op: AttrOp::Prefix(unquote(value)),
        }
    } else if let Some((name, value)) = body.split_once('=') {
        AttrTest {
            name: name.trim().to_owned(),
            op: AttrOp::Equals(unquote(value)),
        }
    } else {
        AttrTest {
            name: body.trim().to_owned(),
            op: AttrOp::Exists,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_compound_selectors() {
        assert_eq!(
            parse_compound("a.nav.main[href^=\"#\"]"),
            Compound {
                tag: Some("a".into()),
                id: None,
                classes: vec!["nav".into(), "main".into()],
                attrs: vec![AttrTest {
                    name: "href".into(),
                    op: AttrOp::Prefix("#".into()),
                }],
            }
        );
        assert_eq!(parse_compound("#contactForm").id.as_deref(), Some("contactForm"));
        assert_eq!(parse_selector(".a, .b c").len(), 2);
    }

    #[test]
    fn queries_follow_document_order() {
        let (dom, nodes) = FakeDom::portfolio(600.0);
        assert_eq!(dom.query_all(".channel-card, .skill-card"), nodes.cards);
        assert_eq!(dom.query_all(".nav-links a"), nodes.nav_links);
        assert_eq!(dom.query("section"), Some(nodes.sections[0]));
        assert_eq!(dom.by_id("email"), Some(nodes.email));
    }

    #[test]
    fn attribute_selectors() {
        let (dom, nodes) = FakeDom::portfolio(600.0);
        let anchors = dom.query_all("a[href^=\"#\"]");
        assert_eq!(anchors.len(), nodes.nav_links.len() + 1);
        assert_eq!(
            dom.query(".nav-links a[href=\"#skills\"]"),
            Some(nodes.nav_links[2])
        );
        assert_eq!(dom.query("a[target]"), None);
    }

    #[test]
    fn query_within_scopes_to_descendants() {
        let (dom, nodes) = FakeDom::portfolio(600.0);
        assert_eq!(dom.query_within(&nodes.menu_button, "i"), Some(nodes.menu_icon));
        assert_eq!(dom.query_within(&nodes.form, "section"), None);
    }

    #[test]
    fn removed_nodes_leave_the_tree() {
        let (mut dom, nodes) = FakeDom::portfolio(600.0);
        let group = dom.parent(&nodes.name).expect("name has a parent");
        let slot = dom
            .append_element(&group, "div", "error-message")
            .expect("fake dom always creates");
        assert_eq!(dom.query_within(&group, ".error-message"), Some(slot));
        dom.remove(&slot);
        assert_eq!(dom.query_within(&group, ".error-message"), None);
        assert_eq!(dom.children(group), &[nodes.name]);
    }

    #[test]
    fn viewport_top_tracks_scroll() {
        let (mut dom, nodes) = FakeDom::portfolio(600.0);
        assert_eq!(dom.viewport_top(&nodes.cards[0]), 800.0);
        dom.scroll_to(500.0, ScrollBehavior::Smooth);
        assert_eq!(dom.viewport_top(&nodes.cards[0]), 300.0);
        assert_eq!(dom.scroll_log(), &[(500.0, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn reset_form_clears_controls() {
        let (mut dom, nodes) = FakeDom::portfolio(600.0);
        dom.set_value(nodes.name, "Ada");
        dom.set_value(nodes.message, "Hello");
        dom.reset_form(&nodes.form);
        assert_eq!(dom.value_of(nodes.name), "");
        assert_eq!(dom.value_of(nodes.message), "");
    }

    #[test]
    fn empty_style_value_removes_property() {
        let (mut dom, nodes) = FakeDom::portfolio(600.0);
        dom.set_style(&nodes.email, "border-color", "#ff5252");
        assert_eq!(dom.style(nodes.email, "border-color"), Some("#ff5252"));
        dom.set_style(&nodes.email, "border-color", "");
        assert_eq!(dom.style(nodes.email, "border-color"), None);
    }
}
