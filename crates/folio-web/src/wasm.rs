#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the portfolio page.
//!
//! [`PortfolioPage`] mounts a [`Page`] over the live document and attaches
//! one listener per [`Subscription`]. All listeners share the page through an
//! `Rc<RefCell<..>>`; each borrows it for exactly one handler run. Only
//! compiled on `wasm32` targets.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::dom::Dom;
use folio_core::{Page, PageConfig, PageEvent, Subscription};
use tracing::{Level, debug, warn};
use tracing_subscriber::Layer as _;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

use crate::console_layer::{ConsoleLayer, ConsoleSink};
use crate::dom::WebDom;

type SharedPage = Rc<RefCell<Page<WebDom>>>;

// ---------------------------------------------------------------------------
// Console plumbing
// ---------------------------------------------------------------------------

/// Devtools console, picking the method by level.
#[derive(Debug, Clone, Copy, Default)]
struct BrowserConsole;

impl ConsoleSink for BrowserConsole {
    fn write(&self, level: Level, line: &str) {
        let line = JsValue::from_str(line);
        match level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            web_sys::console::error_1(&JsValue::from_str(&msg));
        }));
    });
}

fn install_tracing() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let max_level = if cfg!(debug_assertions) {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        };
        let subscriber = tracing_subscriber::registry()
            .with(ConsoleLayer::new(BrowserConsole).with_filter(max_level));
        // Another subscriber may already be installed by the embedding app.
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Surface a Rust error to JS as a thrown `Error`.
fn js_error(err: impl core::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

// ---------------------------------------------------------------------------
// Listeners
// ---------------------------------------------------------------------------

/// An attached DOM listener. The closure must outlive its registration.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Run one event through the page, logging handler failures.
fn dispatch(page: &SharedPage, event: PageEvent) {
    let Ok(mut page) = page.try_borrow_mut() else {
        warn!(?event, "re-entrant page event dropped");
        return;
    };
    if let Err(err) = page.handle(event) {
        warn!(%err, "page handler failed");
    }
}

fn listen<F>(
    page: &SharedPage,
    target: EventTarget,
    event: &'static str,
    prevent_default: bool,
    to_event: F,
) -> Result<Listener, JsValue>
where
    F: Fn() -> Option<PageEvent> + 'static,
{
    let page = Rc::clone(page);
    let closure = Closure::<dyn FnMut(Event)>::new(move |dom_event: Event| {
        if prevent_default {
            dom_event.prevent_default();
        }
        if let Some(event) = to_event() {
            dispatch(&page, event);
        }
    });
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok(Listener {
        target,
        event,
        closure,
    })
}

fn attach(page: &SharedPage, sub: Subscription) -> Result<Vec<Listener>, JsValue> {
    let (dom, config) = {
        let page = page.borrow();
        (page.dom().clone(), page.config().clone())
    };
    let mut listeners = Vec::new();
    match sub {
        Subscription::MenuButtonClick => {
            if let Some(button) = dom.query(&config.menu.button_selector) {
                listeners.push(listen(page, button.into(), "click", false, || {
                    Some(PageEvent::MenuClick)
                })?);
            }
        }
        Subscription::AnchorClick => {
            for anchor in dom.query_all(&config.anchor.anchor_selector) {
                let source = anchor.clone();
                listeners.push(listen(page, anchor.into(), "click", true, move || {
                    source
                        .get_attribute("href")
                        .map(|href| PageEvent::AnchorClick { href })
                })?);
            }
        }
        Subscription::FormSubmit => {
            if let Some(form) = dom.by_id(&config.form.form_id) {
                listeners.push(listen(page, form.into(), "submit", true, || {
                    Some(PageEvent::Submit)
                })?);
            }
        }
        Subscription::WindowScroll => {
            let window: EventTarget = dom.window().clone().into();
            listeners.push(listen(page, window, "scroll", false, || {
                Some(PageEvent::Scroll)
            })?);
        }
        Subscription::CardEnter => {
            for (idx, card) in dom
                .query_all(&config.reveal.card_selector)
                .into_iter()
                .enumerate()
            {
                listeners.push(listen(page, card.into(), "mouseenter", false, move || {
                    Some(PageEvent::CardEnter(idx))
                })?);
            }
        }
    }
    debug!(?sub, count = listeners.len(), "listeners attached");
    Ok(listeners)
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Interactive portfolio page bound to the current document.
///
/// Construct once the DOM is ready (e.g. from a `DOMContentLoaded`
/// handler). Dropping or calling [`destroy`](Self::destroy) detaches every
/// listener.
#[wasm_bindgen]
pub struct PortfolioPage {
    page: SharedPage,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl PortfolioPage {
    /// Mount with the stock portfolio configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<PortfolioPage, JsValue> {
        Self::mount(PageConfig::portfolio())
    }

    /// Mount with a JSON configuration; missing keys keep their defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<PortfolioPage, JsValue> {
        let config = PageConfig::from_json(json).map_err(js_error)?;
        Self::mount(config)
    }

    /// Run the scroll handlers now, e.g. after the host changed layout.
    #[wasm_bindgen(js_name = handleScroll)]
    pub fn handle_scroll(&self) {
        dispatch(&self.page, PageEvent::Scroll);
    }

    /// Id of the section last detected under the viewport.
    #[wasm_bindgen(js_name = activeSection)]
    pub fn active_section(&self) -> Option<String> {
        self.page.borrow().active_section().map(str::to_owned)
    }

    #[wasm_bindgen(js_name = isMenuOpen)]
    pub fn is_menu_open(&self) -> bool {
        self.page.borrow().is_menu_open()
    }

    #[wasm_bindgen(js_name = isBackToTopVisible)]
    pub fn is_back_to_top_visible(&self) -> bool {
        self.page.borrow().is_back_to_top_visible()
    }

    /// Number of attached DOM listeners.
    #[wasm_bindgen(js_name = listenerCount)]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Detach every listener. The page stops reacting to events.
    pub fn destroy(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
    }
}

impl PortfolioPage {
    fn mount(config: PageConfig) -> Result<Self, JsValue> {
        install_panic_hook();
        install_tracing();

        let dom = WebDom::from_global().ok_or_else(|| js_error("no window or document"))?;
        let page = Page::mount(dom, config).map_err(js_error)?;
        let subscriptions = page.subscriptions();
        let page = Rc::new(RefCell::new(page));

        let mut listeners = Vec::new();
        for sub in subscriptions {
            listeners.extend(attach(&page, sub)?);
        }
        Ok(Self { page, listeners })
    }
}

impl Drop for PortfolioPage {
    fn drop(&mut self) {
        self.destroy();
    }
}
