//! Structured logging emitted by `Page`.

use std::sync::{Arc, Mutex};

use folio_core::config::PageConfig;
use folio_core::testing::FakeDom;
use folio_core::{Page, PageEvent};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    message: String,
    fields: Vec<(String, String)>,
}

struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }
    }
}

#[derive(Clone, Default)]
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor {
            message: String::new(),
            fields: Vec::new(),
        };
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

fn with_captured_tracing<F, R>(f: F) -> (R, Vec<CapturedEvent>)
where
    F: FnOnce() -> R,
{
    let capture = EventCapture::default();
    let events = Arc::clone(&capture.events);
    let subscriber = tracing_subscriber::registry().with(capture);
    let result = tracing::subscriber::with_default(subscriber, f);
    let events = events.lock().unwrap().clone();
    (result, events)
}

#[test]
fn mount_logs_welcome_banner_at_info() {
    let (_page, events) = with_captured_tracing(|| {
        let (dom, _) = FakeDom::portfolio(600.0);
        Page::mount(dom, PageConfig::portfolio()).expect("mounts")
    });

    let welcome: Vec<&str> = events
        .iter()
        .filter(|e| e.target == "folio::welcome")
        .map(|e| {
            assert_eq!(e.level, tracing::Level::INFO);
            e.message.as_str()
        })
        .collect();
    assert_eq!(
        welcome,
        vec![
            "Welcome to Sheikh Maruf Hasan's Portfolio!",
            "Hope you enjoy exploring my work as a YouTube content creator.",
        ]
    );
}

#[test]
fn missing_features_are_reported_at_debug() {
    let (_page, events) = with_captured_tracing(|| {
        Page::mount(FakeDom::new(600.0), PageConfig::default()).expect("mounts")
    });
    let debug: Vec<&CapturedEvent> = events
        .iter()
        .filter(|e| e.level == tracing::Level::DEBUG)
        .collect();
    assert!(
        debug
            .iter()
            .any(|e| e.message.contains("menu control absent"))
    );
    assert!(
        debug
            .iter()
            .any(|e| e.message.contains("contact form absent")
                && e.fields.iter().any(|(k, v)| k == "id" && v == "contactForm"))
    );
}

#[test]
fn submit_reports_validation_outcome() {
    let (dom, nodes) = FakeDom::portfolio(600.0);
    let mut page = Page::mount(dom, PageConfig::default()).expect("mounts");
    page.dom_mut().set_value(nodes.email, "bad");

    let ((), events) = with_captured_tracing(|| {
        page.handle(PageEvent::Submit).expect("submit");
    });
    let submitted = events
        .iter()
        .find(|e| e.message == "contact form submitted")
        .expect("submit event logged");
    assert!(submitted.fields.contains(&("valid".into(), "false".into())));
    assert!(submitted.fields.contains(&("errors".into(), "3".into())));
}
