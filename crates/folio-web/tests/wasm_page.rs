#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use folio_core::dom::Dom;
use folio_core::{Page, PageConfig, PageEvent};
use folio_web::{PortfolioPage, WebDom};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{HtmlElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

const MARKUP: &str = r##"
<nav class="navbar" style="position:fixed;top:0;height:70px">
  <div class="menu-btn"><i class="fas fa-bars"></i></div>
  <ul class="nav-links">
    <li><a href="#home">Home</a></li>
    <li><a href="#contact">Contact</a></li>
  </ul>
</nav>
<section id="home" style="height:1200px"><div class="skill-card">card</div></section>
<section id="contact" style="height:1200px">
  <form id="contactForm">
    <div class="form-group"><input id="name"></div>
    <div class="form-group"><input id="email"></div>
    <div class="form-group"><textarea id="message"></textarea></div>
  </form>
</section>
<a href="#home" class="back-to-top">top</a>
"##;

fn install_markup() -> web_sys::Document {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .expect("browser document");
    document
        .body()
        .expect("body")
        .set_inner_html(MARKUP);
    document
}

fn html(document: &web_sys::Document, selector: &str) -> HtmlElement {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        .expect("element present")
}

#[wasm_bindgen_test]
fn mount_attaches_listeners_and_hides_back_to_top() {
    let document = install_markup();
    let page = PortfolioPage::new().expect("mounts");

    // menu + 3 anchors + form + window scroll + 1 card
    assert_eq!(page.listener_count(), 7);
    let back = html(&document, ".back-to-top");
    assert_eq!(
        back.style().get_property_value("visibility").unwrap_or_default(),
        "hidden"
    );
}

#[wasm_bindgen_test]
fn menu_click_toggles_icon() {
    let document = install_markup();
    let page = PortfolioPage::new().expect("mounts");

    html(&document, ".menu-btn").click();
    assert!(page.is_menu_open());
    let icon = html(&document, ".menu-btn i");
    assert!(icon.class_list().contains("fa-times"));

    html(&document, ".menu-btn").click();
    assert!(!page.is_menu_open());
    assert!(icon.class_list().contains("fa-bars"));
}

#[wasm_bindgen_test]
fn destroy_detaches_listeners() {
    let document = install_markup();
    let mut page = PortfolioPage::new().expect("mounts");
    page.destroy();
    assert_eq!(page.listener_count(), 0);

    html(&document, ".menu-btn").click();
    assert!(!page.is_menu_open());
}

#[wasm_bindgen_test]
fn invalid_config_is_reported() {
    install_markup();
    assert!(PortfolioPage::with_config(r#"{ "reveal": { "divisor": 0 } }"#).is_err());
}

#[wasm_bindgen_test]
fn submit_over_web_dom_renders_inline_error() {
    let document = install_markup();
    let dom = WebDom::from_global().expect("web dom");
    let mut page = Page::mount(dom, PageConfig::default()).expect("mounts");

    let email = document
        .get_element_by_id("email")
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        .expect("email input");
    email.set_value("not-an-email");

    page.handle(PageEvent::Submit).expect("submit");

    let errors = document
        .query_selector_all(".error-message")
        .expect("query");
    // name and message are empty, email is malformed
    assert_eq!(errors.length(), 3);
    let group = page
        .dom()
        .parent(&email.into())
        .expect("email group");
    let slot = page
        .dom()
        .query_within(&group, ".error-message")
        .expect("email error");
    assert_eq!(
        slot.text_content().unwrap_or_default(),
        "Please enter a valid email address"
    );
}
