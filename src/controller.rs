//! Upload flow controller.
//!
//! Holds at most one staged file, validates candidates, drives a submission
//! (request, progress ticker and deadline joined in one future) and
//! publishes an [`UploadSnapshot`] to attached views after every
//! transition. It never touches the DOM.
//!
//! # States
//! - `Idle`: nothing staged
//! - `FileSelected`: a validated file is staged
//! - `Submitting`: request in flight, progress animating
//! - `Completed`: backend accepted the file; staged file cleared
//! - `Failed`: error shown; staged file kept so the user can retry

use crate::config::Config;
use crate::error::{TransportError, UploadError, ValidationError};
use crate::notify::{NotificationSink, Severity};
use crate::options::{ProcessingOption, ProcessingOptions};
use crate::progress::Progress;
use crate::stats::{interpret_response, UploadSummary};
use crate::transport::{HttpTransport, StagedFile, UploadForm, UploadTransport};
use crate::validation::{validate, FileInfo};
use futures::future::{AbortHandle, Abortable, Aborted};
use futures::{select, FutureExt, Stream, StreamExt};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    Idle,
    FileSelected,
    Submitting { progress: f64 },
    Completed(UploadSummary),
    Failed(String),
}

impl UploadState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, UploadState::Submitting { .. })
    }
}

/// What a view needs to render the upload panel.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSnapshot {
    pub state: UploadState,
    pub staged: Option<FileInfo>,
    pub options: ProcessingOptions,
    pub submit_enabled: bool,
}

/// Result of [`UploadController::select_file`] for a file that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Staged,
    /// A submission is in flight; the candidate was not staged.
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Completed(UploadSummary),
    Failed(UploadError),
    /// Another submission was already in flight.
    Ignored,
    NothingStaged,
    /// Torn down before a response arrived.
    Cancelled,
}

type View = Rc<dyn Fn(&UploadSnapshot)>;

struct Inner {
    state: UploadState,
    staged: Option<StagedFile>,
    options: ProcessingOptions,
    progress: Progress,
    rng: StdRng,
    views: Vec<(u64, View)>,
    next_view_id: u64,
    in_flight: Option<AbortHandle>,
}

impl Inner {
    fn snapshot(&self) -> UploadSnapshot {
        UploadSnapshot {
            state: self.state.clone(),
            staged: self.staged.as_ref().map(|file| file.info.clone()),
            options: self.options,
            submit_enabled: self.staged.is_some() && !self.state.is_submitting(),
        }
    }
}

pub struct UploadController<N: NotificationSink> {
    inner: Rc<RefCell<Inner>>,
    notifier: Rc<N>,
    config: Rc<Config>,
}

impl<N: NotificationSink> Clone for UploadController<N> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            notifier: self.notifier.clone(),
            config: self.config.clone(),
        }
    }
}

impl<N: NotificationSink + 'static> UploadController<N> {
    pub fn new(config: Config, notifier: N) -> Self {
        let inner = Inner {
            state: UploadState::Idle,
            staged: None,
            options: ProcessingOptions::default(),
            progress: Progress::default(),
            rng: StdRng::from_rng(&mut rand::rng()),
            views: Vec::new(),
            next_view_id: 0,
            in_flight: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
            notifier: Rc::new(notifier),
            config: Rc::new(config),
        }
    }

    /// Replace the random source driving the progress animation.
    pub fn with_rng(self, rng: StdRng) -> Self {
        self.inner.borrow_mut().rng = rng;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn snapshot(&self) -> UploadSnapshot {
        self.inner.borrow().snapshot()
    }

    pub fn state(&self) -> UploadState {
        self.inner.borrow().state.clone()
    }

    /// Register a view. It is called right away and after every transition
    /// until the returned [`Subscription`] is dropped.
    pub fn attach(&self, view: impl Fn(&UploadSnapshot) + 'static) -> Subscription {
        let view: View = Rc::new(view);
        let (id, snapshot) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_view_id;
            inner.next_view_id += 1;
            inner.views.push((id, view.clone()));
            (id, inner.snapshot())
        };
        view(&snapshot);
        Subscription {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }

    fn emit(&self) {
        let (snapshot, views) = {
            let inner = self.inner.borrow();
            let views: Vec<View> = inner.views.iter().map(|(_, view)| view.clone()).collect();
            (inner.snapshot(), views)
        };
        for view in views {
            view(&snapshot);
        }
    }

    pub fn set_option(&self, option: ProcessingOption, enabled: bool) {
        self.inner.borrow_mut().options.set(option, enabled);
        self.emit();
    }

    /// Validate `file` and stage it, replacing any previously staged file.
    ///
    /// A rejected candidate is discarded and leaves the controller untouched.
    pub fn select_file(&self, file: StagedFile) -> Result<Selection, ValidationError> {
        if let Err(err) = validate(&file.info) {
            warn!("Rejected {}: {:?}", file.info.name, err);
            self.notifier.notify(&err.to_string(), Severity::Warning);
            return Err(err);
        }

        {
            let mut inner = self.inner.borrow_mut();
            if inner.state.is_submitting() {
                drop(inner);
                self.notifier
                    .notify("Please wait for the current upload to finish", Severity::Warning);
                return Ok(Selection::Ignored);
            }
            debug!("Staging {} ({} bytes)", file.info.name, file.info.size);
            inner.staged = Some(file);
            inner.progress = Progress::default();
            inner.state = UploadState::FileSelected;
        }
        self.emit();
        Ok(Selection::Staged)
    }

    /// Drop the staged file and any shown result. Refused mid-submission.
    pub fn reset(&self) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state.is_submitting() {
                debug!("Reset ignored while submitting");
                return false;
            }
            inner.staged = None;
            inner.progress = Progress::default();
            inner.state = UploadState::Idle;
        }
        self.emit();
        true
    }

    /// Submit through `HttpTransport` with browser timers for the progress
    /// ticker and the request deadline.
    pub async fn submit_to_backend(&self) -> SubmitOutcome {
        let transport = HttpTransport::new(self.config.upload_url());
        let ticks = gloo_timers::future::IntervalStream::new(self.config.progress_tick_ms);
        let deadline = gloo_timers::future::TimeoutFuture::new(self.config.request_timeout_ms);
        self.submit(&transport, ticks, deadline).await
    }

    /// Submit the staged file.
    ///
    /// Every item from `ticks` advances the cosmetic progress; `deadline`
    /// resolving first fails the upload as timed out. Both are dropped as
    /// soon as the exchange ends.
    pub async fn submit<T, S, D>(&self, transport: &T, ticks: S, deadline: D) -> SubmitOutcome
    where
        T: UploadTransport + ?Sized,
        S: Stream<Item = ()>,
        D: Future<Output = ()>,
    {
        let (form, registration) = {
            let mut inner = self.inner.borrow_mut();
            if inner.state.is_submitting() {
                debug!("Submit ignored: upload already in flight");
                return SubmitOutcome::Ignored;
            }
            let Some(file) = inner.staged.clone() else {
                drop(inner);
                self.notifier
                    .notify("Please select a file first", Severity::Warning);
                return SubmitOutcome::NothingStaged;
            };
            let (handle, registration) = AbortHandle::new_pair();
            inner.in_flight = Some(handle);
            inner.progress = Progress::default();
            inner.state = UploadState::Submitting { progress: 0.0 };
            let form = UploadForm {
                file,
                options: inner.options,
            };
            (form, registration)
        };
        info!(
            "Uploading {} with {:?}",
            form.file.info.name, form.options
        );
        self.emit();

        let exchange = Abortable::new(self.exchange(transport, form, ticks, deadline), registration);
        match exchange.await {
            Ok(Ok(summary)) => self.finish_completed(summary),
            Ok(Err(err)) => self.finish_failed(err),
            Err(Aborted) => self.finish_cancelled(),
        }
    }

    async fn exchange<T, S, D>(
        &self,
        transport: &T,
        form: UploadForm,
        ticks: S,
        deadline: D,
    ) -> Result<UploadSummary, UploadError>
    where
        T: UploadTransport + ?Sized,
        S: Stream<Item = ()>,
        D: Future<Output = ()>,
    {
        let request = transport.send(form).fuse();
        let deadline = deadline.fuse();
        let ticks = ticks.fuse();
        futures::pin_mut!(request, deadline, ticks);

        let response = loop {
            select! {
                response = request => break response?,
                () = deadline => {
                    return Err(TransportError::TimedOut(self.config.request_timeout_ms).into())
                }
                () = ticks.select_next_some() => self.tick(),
            }
        };
        interpret_response(response)
    }

    fn tick(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if !inner.state.is_submitting() {
                return;
            }
            let Inner { progress, rng, .. } = &mut *inner;
            progress.advance_random(rng);
            let progress = progress.percent();
            inner.state = UploadState::Submitting { progress };
        }
        self.emit();
    }

    fn finish_completed(&self, summary: UploadSummary) -> SubmitOutcome {
        info!(
            "Upload completed: {} processed{}",
            summary.processed,
            if summary.estimated { " (estimated figures)" } else { "" }
        );
        {
            let mut inner = self.inner.borrow_mut();
            inner.in_flight = None;
            inner.staged = None;
            inner.state = UploadState::Completed(summary.clone());
        }
        self.emit();
        self.notifier.notify(&summary.message, Severity::Success);
        SubmitOutcome::Completed(summary)
    }

    fn finish_failed(&self, err: UploadError) -> SubmitOutcome {
        warn!("Upload failed: {}", err);
        let message = err.user_message();
        {
            let mut inner = self.inner.borrow_mut();
            inner.in_flight = None;
            inner.state = UploadState::Failed(message.clone());
        }
        self.emit();
        self.notifier.notify(&message, Severity::Error);
        SubmitOutcome::Failed(err)
    }

    fn finish_cancelled(&self) -> SubmitOutcome {
        info!("Upload cancelled before a response arrived");
        {
            let mut inner = self.inner.borrow_mut();
            inner.in_flight = None;
            inner.progress = Progress::default();
            inner.state = if inner.staged.is_some() {
                UploadState::FileSelected
            } else {
                UploadState::Idle
            };
        }
        self.emit();
        self.notifier.notify("Upload cancelled", Severity::Info);
        SubmitOutcome::Cancelled
    }
}

/// Handle returned by [`UploadController::attach`].
///
/// Dropping it detaches the view. When the last view goes away an in-flight
/// submission is aborted so its request and ticker are released.
#[must_use = "dropping the subscription detaches the view immediately"]
pub struct Subscription {
    inner: Weak<RefCell<Inner>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let Ok(mut inner) = inner.try_borrow_mut() else {
            warn!("Subscription dropped while controller was busy; view {} left attached", self.id);
            return;
        };
        inner.views.retain(|(id, _)| *id != self.id);
        if inner.views.is_empty() {
            if let Some(handle) = inner.in_flight.take() {
                debug!("Last view detached; aborting in-flight upload");
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PROGRESS_CAP;
    use crate::notify::RecordingSink;
    use crate::stats::UploadResponse;
    use futures::channel::{mpsc, oneshot};
    use futures::executor::block_on;
    use futures::future::{pending, LocalBoxFuture};
    use futures::stream;
    use std::cell::Cell;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    type Reply = Result<UploadResponse, TransportError>;

    /// Transport answering from a channel so tests control when the response lands.
    struct ChannelTransport {
        reply: RefCell<Option<oneshot::Receiver<Reply>>>,
        forms: RefCell<Vec<UploadForm>>,
    }

    impl ChannelTransport {
        fn new() -> (Self, oneshot::Sender<Reply>) {
            let (tx, rx) = oneshot::channel();
            let transport = Self {
                reply: RefCell::new(Some(rx)),
                forms: RefCell::new(Vec::new()),
            };
            (transport, tx)
        }
    }

    impl UploadTransport for ChannelTransport {
        fn send(&self, form: UploadForm) -> LocalBoxFuture<'_, Reply> {
            self.forms.borrow_mut().push(form);
            let rx = self.reply.borrow_mut().take();
            async move {
                match rx {
                    Some(rx) => rx
                        .await
                        .unwrap_or_else(|_| Err(TransportError::Network("reply dropped".into()))),
                    None => Err(TransportError::Network("no reply configured".into())),
                }
            }
            .boxed_local()
        }
    }

    struct ImmediateTransport {
        reply: Reply,
        calls: Cell<usize>,
    }

    impl ImmediateTransport {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: Cell::new(0),
            }
        }
    }

    impl UploadTransport for ImmediateTransport {
        fn send(&self, _form: UploadForm) -> LocalBoxFuture<'_, Reply> {
            self.calls.set(self.calls.get() + 1);
            futures::future::ready(self.reply.clone()).boxed_local()
        }
    }

    struct YieldNow(bool);

    impl Future for YieldNow {
        type Output = ();
        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    fn yield_now() -> YieldNow {
        YieldNow(false)
    }

    fn controller() -> (UploadController<Rc<RecordingSink>>, Rc<RecordingSink>) {
        let sink = Rc::new(RecordingSink::default());
        let controller = UploadController::new(Config::default(), sink.clone())
            .with_rng(StdRng::seed_from_u64(42));
        (controller, sink)
    }

    fn csv(name: &str) -> StagedFile {
        StagedFile::in_memory(name, "text/csv", b"date,amount\n2024-01-01,12.50\n".to_vec())
    }

    fn record(controller: &UploadController<Rc<RecordingSink>>) -> (Subscription, Rc<RefCell<Vec<UploadSnapshot>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let subscription = controller.attach(move |snapshot| sink.borrow_mut().push(snapshot.clone()));
        (subscription, seen)
    }

    #[test]
    fn rejected_candidate_leaves_staged_file_untouched() {
        let (controller, sink) = controller();
        controller.select_file(csv("january.csv")).unwrap();

        let err = controller
            .select_file(StagedFile::in_memory("photo.png", "image/png", vec![0; 8]))
            .unwrap_err();

        assert!(matches!(err, ValidationError::UnsupportedType { .. }));
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.state, UploadState::FileSelected);
        assert_eq!(snapshot.staged.unwrap().name, "january.csv");
        assert_eq!(sink.last().unwrap().1, Severity::Warning);
    }

    #[test]
    fn rejected_candidate_in_idle_stays_idle() {
        let (controller, _sink) = controller();
        assert!(controller
            .select_file(StagedFile::in_memory("run.exe", "", vec![1]))
            .is_err());
        assert_eq!(controller.state(), UploadState::Idle);
        assert!(!controller.snapshot().submit_enabled);
    }

    #[test]
    fn second_selection_replaces_the_first() {
        let (controller, _sink) = controller();
        controller.select_file(csv("january.csv")).unwrap();
        controller.select_file(csv("february.csv")).unwrap();

        let (transport, tx) = ChannelTransport::new();
        tx.send(Ok(UploadResponse::success("1 transactions"))).unwrap();
        block_on(controller.submit(&transport, stream::empty(), pending()));

        let forms = transport.forms.borrow();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].file.info.name, "february.csv");
    }

    #[test]
    fn submit_without_file_warns_and_sends_nothing() {
        let (controller, sink) = controller();
        let transport = ImmediateTransport::new(Ok(UploadResponse::success("1 transactions")));
        let outcome = block_on(controller.submit(&transport, stream::empty(), pending()));
        assert_eq!(outcome, SubmitOutcome::NothingStaged);
        assert_eq!(transport.calls.get(), 0);
        assert_eq!(sink.last().unwrap(), ("Please select a file first".into(), Severity::Warning));
    }

    #[test]
    fn reentrant_submit_is_ignored() {
        let (controller, _sink) = controller();
        controller.select_file(csv("january.csv")).unwrap();
        let (first, tx) = ChannelTransport::new();
        let second = ImmediateTransport::new(Ok(UploadResponse::success("9 transactions")));

        let (first_outcome, second_outcome) = block_on(async {
            futures::join!(
                controller.submit(&first, stream::pending(), pending()),
                async {
                    yield_now().await;
                    let outcome = controller.submit(&second, stream::empty(), pending()).await;
                    tx.send(Ok(UploadResponse::success("2 transactions"))).unwrap();
                    outcome
                }
            )
        });

        assert_eq!(second_outcome, SubmitOutcome::Ignored);
        assert_eq!(second.calls.get(), 0);
        assert!(matches!(first_outcome, SubmitOutcome::Completed(_)));
        assert_eq!(first.forms.borrow().len(), 1);
    }

    #[test]
    fn selection_during_submission_is_refused() {
        let (controller, sink) = controller();
        controller.select_file(csv("january.csv")).unwrap();
        let (transport, tx) = ChannelTransport::new();

        let (_, selection) = block_on(async {
            futures::join!(
                controller.submit(&transport, stream::pending(), pending()),
                async {
                    yield_now().await;
                    let selection = controller.select_file(csv("february.csv"));
                    tx.send(Ok(UploadResponse::error("bad format"))).unwrap();
                    selection
                }
            )
        });

        assert_eq!(selection, Ok(Selection::Ignored));
        assert_eq!(controller.snapshot().staged.unwrap().name, "january.csv");
        assert_eq!(sink.entries()[0].1, Severity::Warning);
    }

    #[test]
    fn success_renders_estimated_stats_and_clears_staged_file() {
        let (controller, sink) = controller();
        controller.select_file(csv("january.csv")).unwrap();
        let transport = ImmediateTransport::new(Ok(UploadResponse::success("42 transactions processed")));

        let outcome = block_on(controller.submit(&transport, stream::empty(), pending()));

        let SubmitOutcome::Completed(summary) = outcome else {
            panic!("expected completion, got {:?}", outcome);
        };
        assert_eq!(
            (summary.processed, summary.categorized, summary.merchants),
            (42, 33, 25)
        );
        assert_eq!(summary.confidence, "85%");
        assert!(summary.estimated);

        let snapshot = controller.snapshot();
        assert!(matches!(snapshot.state, UploadState::Completed(_)));
        assert!(snapshot.staged.is_none());
        assert!(!snapshot.submit_enabled);
        assert_eq!(sink.last().unwrap().1, Severity::Success);
    }

    #[test]
    fn backend_error_fails_and_stays_resubmittable() {
        let (controller, sink) = controller();
        controller.select_file(csv("january.csv")).unwrap();
        let transport = ImmediateTransport::new(Ok(UploadResponse::error("bad format")));

        let outcome = block_on(controller.submit(&transport, stream::empty(), pending()));

        assert_eq!(outcome, SubmitOutcome::Failed(UploadError::Backend("bad format".into())));
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.state, UploadState::Failed("bad format".into()));
        assert!(snapshot.submit_enabled);
        assert_eq!(snapshot.staged.unwrap().name, "january.csv");
        assert_eq!(sink.last().unwrap(), ("bad format".into(), Severity::Error));

        let retry = ImmediateTransport::new(Ok(UploadResponse::success("3 transactions")));
        let outcome = block_on(controller.submit(&retry, stream::empty(), pending()));
        assert!(matches!(outcome, SubmitOutcome::Completed(_)));
    }

    #[test]
    fn network_rejection_stops_the_ticker() {
        let (controller, sink) = controller();
        controller.select_file(csv("january.csv")).unwrap();
        let (transport, reply) = ChannelTransport::new();
        let (tick_tx, tick_rx) = mpsc::unbounded::<()>();

        let outcome = block_on(async {
            let driver = async {
                for _ in 0..3 {
                    tick_tx.unbounded_send(()).unwrap();
                    yield_now().await;
                }
                let _ = reply.send(Err(TransportError::Network("connection reset".into())));
            };
            futures::join!(controller.submit(&transport, tick_rx, pending()), driver).0
        });

        assert!(matches!(outcome, SubmitOutcome::Failed(UploadError::Transport(_))));
        assert!(tick_tx.is_closed());
        assert!(tick_tx.unbounded_send(()).is_err());
        assert_eq!(
            controller.state(),
            UploadState::Failed(crate::error::GENERIC_UPLOAD_FAILURE.into())
        );
        assert!(controller.snapshot().submit_enabled);
        assert_eq!(sink.last().unwrap().1, Severity::Error);
    }

    #[test]
    fn progress_stays_below_cap_until_response() {
        let (controller, _sink) = controller();
        controller.select_file(csv("january.csv")).unwrap();
        let (_view, seen) = record(&controller);
        let (transport, reply) = ChannelTransport::new();
        let (tick_tx, tick_rx) = mpsc::unbounded::<()>();

        block_on(async {
            let driver = async {
                for _ in 0..40 {
                    tick_tx.unbounded_send(()).unwrap();
                    yield_now().await;
                }
                let _ = reply.send(Ok(UploadResponse::success("5 transactions")));
            };
            futures::join!(controller.submit(&transport, tick_rx, pending()), driver)
        });

        let progress: Vec<f64> = seen
            .borrow()
            .iter()
            .filter_map(|snapshot| match snapshot.state {
                UploadState::Submitting { progress } => Some(progress),
                _ => None,
            })
            .collect();
        assert!(progress.len() > 1);
        assert!(progress.iter().all(|&p| p <= PROGRESS_CAP));
        assert!(progress.iter().any(|&p| p > 0.0));
        assert!(matches!(controller.state(), UploadState::Completed(_)));
    }

    #[test]
    fn deadline_fails_the_upload_as_timed_out() {
        let (controller, _sink) = controller();
        controller.select_file(csv("january.csv")).unwrap();
        let (transport, _reply) = ChannelTransport::new();

        let outcome = block_on(controller.submit(&transport, stream::pending(), async {}));

        assert_eq!(
            outcome,
            SubmitOutcome::Failed(UploadError::Transport(TransportError::TimedOut(
                controller.config().request_timeout_ms
            )))
        );
        assert!(controller.snapshot().submit_enabled);
    }

    #[test]
    fn dropping_last_view_cancels_in_flight_upload() {
        let (controller, _sink) = controller();
        controller.select_file(csv("january.csv")).unwrap();
        let view = controller.attach(|_| {});
        let (transport, _reply) = ChannelTransport::new();

        let outcome = block_on(async {
            futures::join!(
                controller.submit(&transport, stream::pending(), pending()),
                async move {
                    yield_now().await;
                    drop(view);
                }
            )
            .0
        });

        assert_eq!(outcome, SubmitOutcome::Cancelled);
        assert_eq!(controller.state(), UploadState::FileSelected);
        assert!(controller.snapshot().submit_enabled);
    }

    #[test]
    fn attach_publishes_current_state_then_transitions() {
        let (controller, _sink) = controller();
        let (view, seen) = record(&controller);
        controller.select_file(csv("january.csv")).unwrap();
        controller.set_option(ProcessingOption::ExtractDates, false);
        assert!(controller.reset());
        drop(view);
        controller.select_file(csv("march.csv")).unwrap();

        let states: Vec<UploadState> = seen.borrow().iter().map(|s| s.state.clone()).collect();
        assert_eq!(
            states,
            vec![
                UploadState::Idle,
                UploadState::FileSelected,
                UploadState::FileSelected,
                UploadState::Idle,
            ]
        );
        assert!(!seen.borrow()[2].options.extract_dates);
    }

    #[test]
    fn options_are_read_at_submission_time() {
        let (controller, _sink) = controller();
        controller.select_file(csv("january.csv")).unwrap();
        controller.set_option(ProcessingOption::DetectMerchants, false);
        let (transport, tx) = ChannelTransport::new();
        tx.send(Ok(UploadResponse::success("1 transactions"))).unwrap();

        block_on(controller.submit(&transport, stream::empty(), pending()));

        assert!(!transport.forms.borrow()[0].options.detect_merchants);
        assert!(transport.forms.borrow()[0].options.auto_categorize);
    }
}
