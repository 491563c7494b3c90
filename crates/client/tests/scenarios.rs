//! End-to-end invocation scenarios through resolve → engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use richlinker_client::{HtmlPage, LinkEngine, Resolution, resolve};
use richlinker_core::cache::{CacheDb, ManualClock, MemoryStore, ScratchStore};
use richlinker_core::link::ClipboardPayload;
use richlinker_core::notify::{Notification, Notifier};
use richlinker_core::{AppConfig, ClipboardWriter, Error, Format};

const T0: i64 = 1_700_000_000_000;

#[derive(Default)]
struct FakeClipboard {
    writes: Mutex<Vec<ClipboardPayload>>,
    fail: AtomicBool,
}

#[async_trait]
impl ClipboardWriter for FakeClipboard {
    async fn write(&self, payload: &ClipboardPayload) -> Result<(), Error> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::ClipboardFailed("clipboard busy".into()));
        }
        self.writes.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

#[derive(Default)]
struct FakeNotifier(Mutex<Vec<Notification>>);

impl Notifier for FakeNotifier {
    fn notify(&self, notification: &Notification) {
        self.0.lock().unwrap().push(notification.clone());
    }
}

struct Host<S> {
    engine: LinkEngine<S, Arc<FakeClipboard>, Arc<FakeNotifier>, ManualClock>,
    clock: ManualClock,
    clipboard: Arc<FakeClipboard>,
    notifier: Arc<FakeNotifier>,
}

fn host<S: ScratchStore>(store: S) -> Host<S> {
    let clock = ManualClock::at(T0);
    let clipboard = Arc::new(FakeClipboard::default());
    let notifier = Arc::new(FakeNotifier::default());
    let engine =
        LinkEngine::with_clock(&AppConfig::default(), store, clipboard.clone(), notifier.clone(), clock.clone());
    Host { engine, clock, clipboard, notifier }
}

fn google_doc(heading: &str) -> Resolution {
    let html = format!(
        r#"<html><head><title>Team Handbook - Google Docs</title></head><body>
            <div class="navigation-item location-indicator-highlight">
              <div class="navigation-item-content" data-tooltip="{heading}">{heading}</div>
            </div>
        </body></html>"#
    );
    resolve(&HtmlPage::new("https://docs.google.com/document/d/1AbC/edit#heading=h.x", &html).unwrap())
}

#[tokio::test]
async fn github_pr_resolves_to_title_and_raw_url() {
    let url = "https://github.com/acme/widget/pull/42";
    let html = r#"<h1 class="gh-header-title"><bdi>Fix crash on startup</bdi></h1>"#;
    let resolution = resolve(&HtmlPage::new(url, html).unwrap());

    assert_eq!(
        resolution.formats,
        vec![Format::new("PR Title", "Fix crash on startup", url), Format::new("Raw URL", url, url)]
    );
}

#[tokio::test]
async fn spacelift_run_resolves_to_exactly_two_formats() {
    let url = "https://spacelift.shadowbox.cloud/stack/svc-prod/run/01J8ZK";
    let resolution = resolve(&HtmlPage::new(url, "<title>bump image tag · svc-prod | Spacelift</title>").unwrap());

    let labels: Vec<_> = resolution.formats.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, vec!["spacelift stack with PR", "stack"]);
}

#[tokio::test]
async fn unmatched_page_resolves_to_page_title_and_raw_url() {
    let url = "https://example.org/page";
    let resolution = resolve(&HtmlPage::new(url, "<title>Hello World</title>").unwrap());

    assert_eq!(
        resolution.formats,
        vec![Format::new("Page Title", "Hello World", url), Format::new("Raw URL", url, url)]
    );
}

#[tokio::test]
async fn n_plus_one_invocations_wrap_around() {
    let h = host(Arc::new(MemoryStore::new()));
    let n = google_doc("Onboarding").len();
    assert_eq!(n, 4);

    let mut indices = Vec::new();
    for _ in 0..=n {
        indices.push(h.engine.execute(google_doc("Onboarding")).await.unwrap().index);
        h.clock.advance(300);
    }

    assert_eq!(indices, vec![0, 1, 2, 3, 0]);

    let messages: Vec<_> = h.notifier.0.lock().unwrap().iter().map(|n| n.message.clone()).collect();
    assert_eq!(messages[0], "Copied to clipboard [1/4]\nDoc Title");
    assert_eq!(messages[1], "Copied to clipboard [2/4]\nHeader: Onboarding");
    assert_eq!(messages[3], "Copied to clipboard [4/4]\nRaw URL");
}

#[tokio::test]
async fn ttl_boundary_is_inclusive() {
    let h = host(Arc::new(MemoryStore::new()));

    h.engine.execute(google_doc("Onboarding")).await.unwrap();
    h.clock.advance(1_000);
    assert_eq!(h.engine.execute(google_doc("Onboarding")).await.unwrap().index, 1);

    h.clock.advance(1_001);
    assert_eq!(h.engine.execute(google_doc("Onboarding")).await.unwrap().index, 0);
}

#[tokio::test]
async fn header_change_resets_cycle() {
    let h = host(Arc::new(MemoryStore::new()));

    assert_eq!(h.engine.execute(google_doc("Onboarding")).await.unwrap().index, 0);
    assert_eq!(h.engine.execute(google_doc("Onboarding")).await.unwrap().index, 1);
    assert_eq!(h.engine.execute(google_doc("Benefits")).await.unwrap().index, 0);
}

#[tokio::test]
async fn clipboard_failure_does_not_advance_cycle() {
    let h = host(Arc::new(MemoryStore::new()));

    assert_eq!(h.engine.execute(google_doc("Onboarding")).await.unwrap().index, 0);

    h.clipboard.fail.store(true, Ordering::SeqCst);
    assert!(h.engine.execute(google_doc("Onboarding")).await.is_err());

    h.clipboard.fail.store(false, Ordering::SeqCst);
    assert_eq!(h.engine.execute(google_doc("Onboarding")).await.unwrap().index, 1);

    let notices = h.notifier.0.lock().unwrap();
    assert_eq!(notices.len(), 3);
    assert!(notices[0].is_success());
    assert!(!notices[1].is_success());
    assert!(notices[2].is_success());
}

#[tokio::test]
async fn sqlite_store_cycles_like_memory() {
    let db = Arc::new(CacheDb::open_in_memory().await.unwrap());
    let h = host(db);

    let indices = [
        h.engine.execute(google_doc("Onboarding")).await.unwrap().index,
        h.engine.execute(google_doc("Onboarding")).await.unwrap().index,
    ];
    assert_eq!(indices, [0, 1]);
    assert_eq!(h.clipboard.writes.lock().unwrap().len(), 2);
}
