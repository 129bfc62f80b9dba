//! Background work for the UI loop.
//!
//! Network calls and camera capture run on the tokio runtime. Each spawned
//! [`Task`] reports back once through a oneshot channel; the UI polls the
//! [`TaskHandle`] every tick and never blocks on it. Tasks are not
//! cancellable.

use super::auth_service::{AuthService, Registration};
use super::listing_service::ListingService;
use crate::api::MarketplaceApi;
use crate::flow::{FlowError, Navigation, Notice};
use crate::forms::ListingDraft;
use crate::location::LocationProvider;
use crate::media::{MediaAsset, MediaSource};
use crate::session::SessionStore;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, error};

/// Work a screen can hand off
#[derive(Debug, Clone)]
pub enum Task {
    RequestOtp { phone: String },
    RegisterAndVerify { phone: String, registration: Registration },
    VerifyOtp { phone: String, code: String },
    SubmitListing { draft: ListingDraft },
    CapturePhoto,
}

impl Task {
    pub fn name(&self) -> &'static str {
        match self {
            Task::RequestOtp { .. } => "request_otp",
            Task::RegisterAndVerify { .. } => "register_and_verify",
            Task::VerifyOtp { .. } => "verify_otp",
            Task::SubmitListing { .. } => "submit_listing",
            Task::CapturePhoto => "capture_photo",
        }
    }
}

/// What a finished task reports
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// A sign-in step finished
    Navigated(Result<Navigation, FlowError>),
    /// A listing was posted (or not)
    Posted(Result<Notice, FlowError>),
    /// The camera returned; `None` means the capture was cancelled
    Captured(Result<Option<MediaAsset>, FlowError>),
    /// The task ended without reporting
    Interrupted,
}

/// Handle for polling task completion
pub struct TaskHandle {
    name: &'static str,
    receiver: oneshot::Receiver<TaskOutcome>,
}

impl TaskHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Try to receive the outcome without blocking
    pub fn try_recv(&mut self) -> Option<TaskOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                error!("Task {} channel closed unexpectedly", self.name);
                Some(TaskOutcome::Interrupted)
            }
        }
    }

    /// Wait for the outcome
    pub async fn outcome(self) -> TaskOutcome {
        self.receiver.await.unwrap_or(TaskOutcome::Interrupted)
    }
}

/// Everything a task needs, shared with the spawned futures
#[derive(Clone)]
pub struct TaskRunner {
    api: Arc<dyn MarketplaceApi>,
    store: Arc<dyn SessionStore>,
    media: Arc<dyn MediaSource>,
    location: Arc<dyn LocationProvider>,
    country_code: String,
}

impl TaskRunner {
    pub fn new(
        api: Arc<dyn MarketplaceApi>,
        store: Arc<dyn SessionStore>,
        media: Arc<dyn MediaSource>,
        location: Arc<dyn LocationProvider>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            api,
            store,
            media,
            location,
            country_code: country_code.into(),
        }
    }

    pub fn media(&self) -> &dyn MediaSource {
        self.media.as_ref()
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    /// Start `task` on `runtime` and return a handle to poll
    pub fn spawn(&self, runtime: &Handle, task: Task) -> TaskHandle {
        let (sender, receiver) = oneshot::channel();
        let name = task.name();
        let runner = self.clone();

        debug!("Spawning task {}", name);
        runtime.spawn(async move {
            let outcome = runner.run(task).await;
            let _ = sender.send(outcome);
        });

        TaskHandle { name, receiver }
    }

    /// Run `task` to completion
    pub async fn run(&self, task: Task) -> TaskOutcome {
        let api = self.api.as_ref();
        let store = self.store.as_ref();

        match task {
            Task::RequestOtp { phone } => TaskOutcome::Navigated(
                AuthService::request_otp(api, &phone, &self.country_code).await,
            ),
            Task::RegisterAndVerify {
                phone,
                registration,
            } => TaskOutcome::Navigated(
                AuthService::register_and_verify(api, store, &phone, &registration).await,
            ),
            Task::VerifyOtp { phone, code } => {
                TaskOutcome::Navigated(AuthService::verify_otp(api, store, &phone, &code).await)
            }
            Task::SubmitListing { draft } => TaskOutcome::Posted(
                ListingService::submit(api, store, self.location.as_ref(), &draft).await,
            ),
            Task::CapturePhoto => TaskOutcome::Captured(self.media.capture().await.map_err(|e| {
                error!("Camera capture failed: {:#}", e);
                FlowError::local("Error", format!("Could not use camera: {e}"))
            })),
        }
    }
}
