//! Invocation entry points: list formats, cycle-copy, copy a chosen format.
//!
//! Every copying invocation runs pick → write → record to completion and
//! emits exactly one notification. A failed clipboard write never touches
//! the cycle entry.

use std::time::Duration;

use richlinker_core::cache::{Clock, CycleCache, ScratchStore, SystemClock};
use richlinker_core::notify::{COPY_FAILED_MESSAGE, Notification, Notifier};
use richlinker_core::{AppConfig, ClipboardWriter, Error, Format};

use crate::resolve::Resolution;

/// Result of a successful copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    /// 0-based index of the copied format.
    pub index: usize,
    /// Number of candidate formats.
    pub total: usize,
    pub format: Format,
    pub notification: Notification,
}

/// Drives the cycle cache, clipboard and notifier for resolved pages.
pub struct LinkEngine<S, W, N, C = SystemClock> {
    cache: CycleCache<S, C>,
    clipboard: W,
    notifier: N,
    notice: Duration,
}

impl<S, W, N> LinkEngine<S, W, N, SystemClock>
where
    S: ScratchStore,
    W: ClipboardWriter,
    N: Notifier,
{
    pub fn new(config: &AppConfig, store: S, clipboard: W, notifier: N) -> Self {
        Self::with_clock(config, store, clipboard, notifier, SystemClock)
    }
}

impl<S, W, N, C> LinkEngine<S, W, N, C>
where
    S: ScratchStore,
    W: ClipboardWriter,
    N: Notifier,
    C: Clock,
{
    pub fn with_clock(config: &AppConfig, store: S, clipboard: W, notifier: N, clock: C) -> Self {
        let ttl_ms = i64::try_from(config.cycle_ttl_ms).unwrap_or(i64::MAX);
        let cache = CycleCache::with_clock(store, clock).key(config.cache_key.clone()).ttl_ms(ttl_ms);
        Self { cache, clipboard, notifier, notice: config.notice_duration() }
    }

    /// Candidate formats, without side effects.
    pub fn formats<'a>(&self, resolution: &'a Resolution) -> &'a [Format] {
        &resolution.formats
    }

    /// Copy the next format in the cycle for this page.
    ///
    /// # Errors
    ///
    /// Returns `Error::ClipboardFailed` when the write fails; the cycle entry is
    /// left as it was and a failure notification is sent.
    pub async fn execute(&self, resolution: Resolution) -> Result<CopyOutcome, Error> {
        let index = self.cache.pick_index(&resolution.page_info, resolution.len()).await;
        tracing::debug!(index, total = resolution.len(), "picked format");
        self.copy_format(resolution, index).await
    }

    /// Copy the format at `index`, chosen by the caller, and make it the cycle position.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` when `index` is out of range and
    /// `Error::ClipboardFailed` when the write fails. Both send the failure
    /// notification and leave the cycle entry untouched.
    pub async fn copy_format(&self, resolution: Resolution, index: usize) -> Result<CopyOutcome, Error> {
        let total = resolution.len();
        let Resolution { page_info, mut formats, .. } = resolution;
        if index >= total {
            self.notify_failure();
            return Err(Error::InvalidInput(format!("format index {index} out of range ({total} formats)")));
        }
        let format = formats.swap_remove(index);

        if let Err(e) = self.clipboard.write(&format.payload()).await {
            tracing::warn!(error = %e, label = %format.label, "clipboard write failed");
            self.notify_failure();
            return Err(e);
        }

        // The copy already happened; a lost entry only restarts the cycle.
        if let Err(e) = self.cache.record(&page_info, index).await {
            tracing::warn!(error = %e, "failed to record cycle entry");
        }

        let notification = Notification::copied(&format.label, index, total, self.notice);
        self.notifier.notify(&notification);
        tracing::debug!(index, total, label = %format.label, "copied format");

        Ok(CopyOutcome { index, total, format, notification })
    }

    fn notify_failure(&self) {
        self.notifier.notify(&Notification::failure(COPY_FAILED_MESSAGE, self.notice));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HtmlPage;
    use crate::resolve::resolve;
    use async_trait::async_trait;
    use richlinker_core::cache::{ManualClock, MemoryStore};
    use richlinker_core::link::ClipboardPayload;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingClipboard {
        writes: Mutex<Vec<ClipboardPayload>>,
        fail: AtomicBool,
    }

    #[async_trait]
    impl ClipboardWriter for RecordingClipboard {
        async fn write(&self, payload: &ClipboardPayload) -> Result<(), Error> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(Error::ClipboardFailed("denied".into()));
            }
            self.writes.lock().unwrap().push(payload.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier(Mutex<Vec<Notification>>);

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: &Notification) {
            self.0.lock().unwrap().push(notification.clone());
        }
    }

    type TestEngine = LinkEngine<Arc<MemoryStore>, Arc<RecordingClipboard>, Arc<RecordingNotifier>, ManualClock>;

    struct Harness {
        engine: TestEngine,
        store: Arc<MemoryStore>,
        clipboard: Arc<RecordingClipboard>,
        notifier: Arc<RecordingNotifier>,
    }

    fn harness() -> Harness {
        let store = Arc::new(MemoryStore::new());
        let clipboard = Arc::new(RecordingClipboard::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let engine = LinkEngine::with_clock(
            &AppConfig::default(),
            store.clone(),
            clipboard.clone(),
            notifier.clone(),
            ManualClock::at(1_700_000_000_000),
        );
        Harness { engine, store, clipboard, notifier }
    }

    fn hello() -> Resolution {
        resolve(&HtmlPage::new("https://example.org/page", "<title>Hello World</title>").unwrap())
    }

    #[tokio::test]
    async fn test_execute_copies_first_format() {
        let h = harness();
        let outcome = h.engine.execute(hello()).await.unwrap();

        assert_eq!(outcome.index, 0);
        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.format.label, "Page Title");
        assert_eq!(outcome.notification.message, "Copied to clipboard [1/2]\nPage Title");

        let writes = h.clipboard.writes.lock().unwrap();
        assert_eq!(writes[0].html, r#"<a href="https://example.org/page">Hello World</a>"#);
        assert_eq!(writes[0].text, "Hello World (https://example.org/page)");
    }

    #[tokio::test]
    async fn test_execute_cycles() {
        let h = harness();
        assert_eq!(h.engine.execute(hello()).await.unwrap().index, 0);
        let second = h.engine.execute(hello()).await.unwrap();
        assert_eq!(second.index, 1);
        assert!(second.format.is_raw_url());
        assert_eq!(h.clipboard.writes.lock().unwrap()[1].html, "https://example.org/page");
    }

    #[tokio::test]
    async fn test_clipboard_failure_leaves_cache_untouched() {
        let h = harness();
        h.clipboard.fail.store(true, Ordering::SeqCst);

        let err = h.engine.execute(hello()).await.unwrap_err();
        assert!(matches!(err, Error::ClipboardFailed(_)));
        assert!(h.store.get(&AppConfig::default().cache_key).await.unwrap().is_none());

        let notices = h.notifier.0.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert!(!notices[0].is_success());
        assert_eq!(notices[0].message, COPY_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_copy_format_sets_cycle_position() {
        let h = harness();
        let outcome = h.engine.copy_format(hello(), 1).await.unwrap();
        assert_eq!(outcome.index, 1);

        // The next cycle step wraps from the chosen index.
        assert_eq!(h.engine.execute(hello()).await.unwrap().index, 0);
    }

    #[tokio::test]
    async fn test_copy_format_out_of_range() {
        let h = harness();
        let err = h.engine.copy_format(hello(), 2).await.unwrap_err();
        assert!(err.to_string().starts_with("INVALID_INPUT"));
        assert!(h.clipboard.writes.lock().unwrap().is_empty());
        assert!(h.store.get(&AppConfig::default().cache_key).await.unwrap().is_none());
        assert_eq!(h.notifier.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_formats_has_no_side_effects() {
        let h = harness();
        let resolution = hello();
        assert_eq!(h.engine.formats(&resolution).len(), 2);
        assert!(h.notifier.0.lock().unwrap().is_empty());
        assert!(h.clipboard.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_single_format_omits_position() {
        let h = harness();
        let url = "https://spacelift.shadowbox.cloud/stack/svc-prod/run/01J";
        let mut resolution =
            resolve(&HtmlPage::new(url, "<title>refactor config · svc-prod | Spacelift</title>").unwrap());
        resolution.formats.truncate(1);

        let outcome = h.engine.execute(resolution).await.unwrap();
        assert_eq!(outcome.notification.message, "Copied to clipboard\nspacelift stack with PR");
    }
}
