#![forbid(unsafe_code)]

//! The page driver: one [`Dom`], one configuration, all component state.
//!
//! [`Page`] is the only type that talks to the document. For each
//! [`PageEvent`] it measures what the handler needs, lets the component plan
//! its [`Mutation`]s, then resolves each mutation's [`Target`] through the
//! configured selectors and applies it. Planning happens before application,
//! so a handler that fails while reading leaves the document untouched.
//!
//! # Lifecycle
//!
//! 1. [`Page::mount`] validates the configuration, detects which optional
//!    features the markup provides, hides the reveal cards and the
//!    back-to-top control, runs one eager reveal pass and logs the welcome
//!    banner.
//! 2. The host attaches a listener for every entry of
//!    [`Page::subscriptions`] and forwards each DOM event to
//!    [`Page::handle`].
//!
//! Scroll events run three handlers in registration order: active section,
//! reveal, back-to-top. They write disjoint classes and style properties.

use tracing::{debug, info, trace};

use crate::anchor::{self, Fragment};
use crate::back_to_top::BackToTop;
use crate::config::PageConfig;
use crate::dom::Dom;
use crate::error::PageError;
use crate::form::{self, ContactSubmission, Field};
use crate::menu::MenuState;
use crate::mutation::{Mutation, Target};
use crate::viewport::{
    ActiveSectionTracker, RevealState, ScrollSnapshot, SectionGeometry, hover_transition,
};

/// A DOM event forwarded by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// Click on the menu control.
    MenuClick,
    /// Click on an intercepted anchor, with its `href` attribute.
    AnchorClick { href: String },
    /// Contact form submit.
    Submit,
    /// Window scroll.
    Scroll,
    /// Pointer entered the card at this index.
    CardEnter(usize),
}

/// A listener the host must attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subscription {
    /// `click` on the menu control → [`PageEvent::MenuClick`].
    MenuButtonClick,
    /// `click` on every element matching the anchor selector, default
    /// prevented → [`PageEvent::AnchorClick`].
    AnchorClick,
    /// `submit` on the contact form, default prevented → [`PageEvent::Submit`].
    FormSubmit,
    /// `scroll` on the window → [`PageEvent::Scroll`].
    WindowScroll,
    /// `mouseenter` on every card → [`PageEvent::CardEnter`].
    CardEnter,
}

/// Optional markup detected at mount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    pub menu: bool,
    pub contact_form: bool,
    pub back_to_top: bool,
    pub cards: usize,
}

/// Interactive page bound to a document.
#[derive(Debug)]
pub struct Page<D: Dom> {
    dom: D,
    config: PageConfig,
    features: Features,
    menu: MenuState,
    sections: ActiveSectionTracker,
    reveal: RevealState,
    back_to_top: BackToTop,
}

impl<D: Dom> Page<D> {
    /// Bind to `dom` and apply the initial state.
    pub fn mount(dom: D, config: PageConfig) -> Result<Self, PageError> {
        config.validate()?;

        let features = Features {
            menu: dom.query(&config.menu.button_selector).is_some(),
            contact_form: dom.by_id(&config.form.form_id).is_some(),
            back_to_top: dom.query(&config.back_to_top.selector).is_some(),
            cards: dom.query_all(&config.reveal.card_selector).len(),
        };
        if !features.menu {
            debug!(selector = %config.menu.button_selector, "menu control absent; toggle disabled");
        }
        if !features.contact_form {
            debug!(id = %config.form.form_id, "contact form absent; validation disabled");
        }
        if !features.back_to_top {
            debug!(selector = %config.back_to_top.selector, "back-to-top control absent");
        }

        let menu_open = dom
            .query(&config.menu.panel_selector)
            .is_some_and(|panel| dom.has_class(&panel, &config.menu.open_class));

        let mut page = Self {
            dom,
            features,
            menu: MenuState::new(menu_open),
            sections: ActiveSectionTracker::new(),
            reveal: RevealState::new(features.cards),
            back_to_top: BackToTop::default(),
            config,
        };

        let hidden = page.reveal.prepare(&page.config.reveal);
        page.apply(&hidden)?;
        page.reveal_pass()?;

        if page.features.back_to_top {
            let hidden = page.back_to_top.prepare(&page.config.back_to_top);
            page.apply(&hidden)?;
        }

        for line in &page.config.welcome {
            info!(target: "folio::welcome", "{line}");
        }
        debug!(?features, "page mounted");
        Ok(page)
    }

    /// Listeners to attach, in registration order.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<Subscription> {
        let mut subs = Vec::with_capacity(5);
        if self.features.menu {
            subs.push(Subscription::MenuButtonClick);
        }
        subs.push(Subscription::AnchorClick);
        if self.features.contact_form {
            subs.push(Subscription::FormSubmit);
        }
        subs.push(Subscription::WindowScroll);
        if self.features.cards > 0 {
            subs.push(Subscription::CardEnter);
        }
        subs
    }

    /// Dispatch one event.
    pub fn handle(&mut self, event: PageEvent) -> Result<(), PageError> {
        trace!(?event, "page event");
        match event {
            PageEvent::MenuClick => {
                if !self.features.menu {
                    return Ok(());
                }
                let plan = self.menu.toggle(&self.config.menu);
                debug!(open = self.menu.is_open(), "menu toggled");
                self.apply(&plan)
            }
            PageEvent::AnchorClick { href } => self.anchor_click(&href),
            PageEvent::Submit => {
                if !self.features.contact_form {
                    return Ok(());
                }
                self.submit()
            }
            PageEvent::Scroll => self.scroll(),
            PageEvent::CardEnter(card) => {
                let plan = [hover_transition(card, &self.config.reveal)];
                self.apply(&plan)
            }
        }
    }

    // -- Accessors --

    #[must_use]
    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    #[must_use]
    pub const fn features(&self) -> Features {
        self.features
    }

    #[must_use]
    pub const fn is_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.sections.active_section()
    }

    #[must_use]
    pub fn reveal(&self) -> &RevealState {
        &self.reveal
    }

    #[must_use]
    pub const fn is_back_to_top_visible(&self) -> bool {
        self.back_to_top.is_visible()
    }

    // -- Handlers --

    fn anchor_click(&mut self, href: &str) -> Result<(), PageError> {
        let Some(Fragment::Id(id)) = Fragment::parse(href) else {
            trace!(href, "anchor without target id");
            return Ok(());
        };
        let target_top = self.dom.by_id(id).map(|node| self.dom.offset_top(&node));
        if target_top.is_none() {
            debug!(id, "anchor target not found");
        }
        let navbar_height = self
            .dom
            .query(&self.config.anchor.navbar_selector)
            .map_or(0.0, |navbar| self.dom.offset_height(&navbar));
        let plan = anchor::plan_click(
            target_top,
            navbar_height,
            &mut self.menu,
            &self.config.menu,
        );
        self.apply(&plan)
    }

    fn submit(&mut self) -> Result<(), PageError> {
        let mut values: [String; 3] = Default::default();
        for (slot, field) in values.iter_mut().zip(Field::ALL) {
            let node = self.require_field(field)?;
            *slot = self.dom.value(&node);
        }
        let [name, email, message] = &values;
        let submission = ContactSubmission::new(name, email, message);
        let (report, plan) = form::plan_submit(&submission);
        debug!(
            valid = report.is_valid(),
            errors = report.errors().count(),
            "contact form submitted"
        );
        self.apply(&plan)
    }

    fn scroll(&mut self) -> Result<(), PageError> {
        let snapshot = self.measure();
        trace!(
            scroll_y = snapshot.scroll_y,
            sections = snapshot.sections.len(),
            cards = snapshot.card_tops.len(),
            "scroll snapshot"
        );

        let mut plan = self.sections.update(&snapshot, &self.config.scroll);
        plan.extend(self.reveal.update(&snapshot, &self.config.reveal));
        if self.features.back_to_top {
            plan.extend(
                self.back_to_top
                    .update(snapshot.scroll_y, &self.config.back_to_top),
            );
        }
        self.apply(&plan)
    }

    fn reveal_pass(&mut self) -> Result<(), PageError> {
        let snapshot = ScrollSnapshot {
            scroll_y: self.dom.scroll_y(),
            viewport_height: self.dom.viewport_height(),
            card_tops: self.card_tops(),
            ..ScrollSnapshot::default()
        };
        let revealed = self.reveal.update(&snapshot, &self.config.reveal);
        self.apply(&revealed)
    }

    // -- Measurement --

    /// Read everything the scroll handlers need, fresh.
    #[must_use]
    pub fn measure(&self) -> ScrollSnapshot {
        let dom = &self.dom;
        let sections = dom
            .query_all(&self.config.scroll.section_selector)
            .iter()
            .map(|node| SectionGeometry {
                id: dom.attribute(node, "id").filter(|id| !id.is_empty()),
                top: dom.offset_top(node),
                height: dom.offset_height(node),
            })
            .collect();
        let nav_hrefs = dom
            .query_all(&self.config.scroll.nav_link_selector)
            .iter()
            .map(|node| dom.attribute(node, "href"))
            .collect();
        ScrollSnapshot {
            scroll_y: dom.scroll_y(),
            viewport_height: dom.viewport_height(),
            sections,
            nav_hrefs,
            card_tops: self.card_tops(),
        }
    }

    fn card_tops(&self) -> Vec<f64> {
        self.dom
            .query_all(&self.config.reveal.card_selector)
            .iter()
            .map(|node| self.dom.viewport_top(node))
            .collect()
    }

    // -- Application --

    fn apply(&mut self, mutations: &[Mutation]) -> Result<(), PageError> {
        let mut lists = NodeLists::default();
        for mutation in mutations {
            self.apply_one(mutation, &mut lists)?;
        }
        Ok(())
    }

    fn apply_one(
        &mut self,
        mutation: &Mutation,
        lists: &mut NodeLists<D::Node>,
    ) -> Result<(), PageError> {
        match mutation {
            Mutation::AddClass { target, class } => {
                if let Some(node) = self.resolve(*target, lists)? {
                    self.dom.add_class(&node, class);
                }
            }
            Mutation::RemoveClass { target, class } => {
                if let Some(node) = self.resolve(*target, lists)? {
                    self.dom.remove_class(&node, class);
                }
            }
            Mutation::SetStyle {
                target,
                property,
                value,
            } => {
                if let Some(node) = self.resolve(*target, lists)? {
                    self.dom.set_style(&node, property, value);
                }
            }
            Mutation::ScrollTo { top, behavior } => self.dom.scroll_to(*top, *behavior),
            Mutation::ShowFieldError { field, message } => self.show_field_error(*field, message)?,
            Mutation::ClearFieldError { field } => self.clear_field_error(*field)?,
            Mutation::Notify(message) => self.dom.notify(message),
            Mutation::ResetForm => {
                let form = self
                    .dom
                    .by_id(&self.config.form.form_id)
                    .ok_or_else(|| PageError::missing(format!("#{}", self.config.form.form_id)))?;
                self.dom.reset_form(&form);
            }
        }
        Ok(())
    }

    /// Resolve a target. Fields and the form are required; everything else
    /// is skipped when absent.
    fn resolve(
        &self,
        target: Target,
        lists: &mut NodeLists<D::Node>,
    ) -> Result<Option<D::Node>, PageError> {
        let dom = &self.dom;
        let node = match target {
            Target::NavPanel => dom.query(&self.config.menu.panel_selector),
            Target::MenuIcon => dom
                .query(&self.config.menu.button_selector)
                .and_then(|button| dom.query_within(&button, &self.config.menu.icon_selector)),
            Target::NavLink(idx) => lists
                .nav_links
                .get_or_insert_with(|| dom.query_all(&self.config.scroll.nav_link_selector))
                .get(idx)
                .cloned(),
            Target::Card(idx) => lists
                .cards
                .get_or_insert_with(|| dom.query_all(&self.config.reveal.card_selector))
                .get(idx)
                .cloned(),
            Target::BackToTop => dom.query(&self.config.back_to_top.selector),
            Target::Field(field) => return self.require_field(field).map(Some),
            Target::ContactForm => {
                let id = &self.config.form.form_id;
                return dom
                    .by_id(id)
                    .map(Some)
                    .ok_or_else(|| PageError::missing(format!("#{id}")));
            }
        };
        if node.is_none() {
            trace!(?target, "mutation target absent; skipped");
        }
        Ok(node)
    }

    fn field_id(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.config.form.name_id,
            Field::Email => &self.config.form.email_id,
            Field::Message => &self.config.form.message_id,
        }
    }

    fn require_field(&self, field: Field) -> Result<D::Node, PageError> {
        let id = self.field_id(field);
        self.dom
            .by_id(id)
            .ok_or_else(|| PageError::missing(format!("#{id}")))
    }

    fn error_selector(&self) -> String {
        format!(".{}", self.config.form.error_class)
    }

    fn show_field_error(&mut self, field: Field, message: &str) -> Result<(), PageError> {
        let input = self.require_field(field)?;
        let group = self
            .dom
            .parent(&input)
            .ok_or_else(|| PageError::missing(format!("parent of #{}", self.field_id(field))))?;
        let selector = self.error_selector();
        let slot = match self.dom.query_within(&group, &selector) {
            Some(slot) => slot,
            None => self
                .dom
                .append_element(&group, "div", &self.config.form.error_class)
                .ok_or_else(|| PageError::Host(format!("create <div{selector}>")))?,
        };
        let form = &self.config.form;
        self.dom.set_text(&slot, message);
        self.dom.set_style(&slot, "color", &form.error_color);
        self.dom.set_style(&slot, "font-size", &form.error_font_size);
        self.dom.set_style(&slot, "margin-top", &form.error_margin_top);
        self.dom.set_style(&input, "border-color", &form.error_color);
        Ok(())
    }

    fn clear_field_error(&mut self, field: Field) -> Result<(), PageError> {
        let input = self.require_field(field)?;
        if let Some(group) = self.dom.parent(&input) {
            let selector = self.error_selector();
            if let Some(slot) = self.dom.query_within(&group, &selector) {
                self.dom.remove(&slot);
            }
        }
        self.dom.set_style(&input, "border-color", "");
        Ok(())
    }
}

/// Indexed node lists, queried at most once per mutation batch.
struct NodeLists<N> {
    nav_links: Option<Vec<N>>,
    cards: Option<Vec<N>>,
}

impl<N> Default for NodeLists<N> {
    fn default() -> Self {
        Self {
            nav_links: None,
            cards: None,
        }
    }
}
