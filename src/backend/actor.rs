use super::messages::{ControllerCommand, ControllerEvent, RequestOutcome};
use crate::banner::BannerSlot;
use crate::canonical::is_supported_link;
use crate::normalize::VideoResult;
use crate::resolver::ResolveService;
use crate::utils::clipboard;
use crate::utils::config::AppSettings;
use crate::utils::error::ResolveError;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};

/// Controller state machine phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Pending,
    Success,
    Failure,
}

/// Client request controller.
///
/// Owns the fetch/retry state machine: validates submissions, keeps at most
/// one resolution in flight, and fires the banner fallback after success.
/// The resolve runs in a spawned task so the actor keeps servicing commands
/// while a resolution is pending.
pub struct ControllerActor {
    receiver: mpsc::Receiver<ControllerCommand>,
    sender: mpsc::Sender<ControllerEvent>,

    service: Arc<ResolveService>,
    banner: Option<Arc<Mutex<BannerSlot>>>,
    canonical_token: String,
    alternate_token: String,

    phase: Phase,
    tracked_input: String,
    outcome: Option<RequestOutcome>,
}

impl ControllerActor {
    pub fn new(
        service: Arc<ResolveService>,
        banner: Option<Arc<Mutex<BannerSlot>>>,
        settings: &AppSettings,
        receiver: mpsc::Receiver<ControllerCommand>,
        sender: mpsc::Sender<ControllerEvent>,
    ) -> Self {
        Self {
            receiver,
            sender,
            service,
            banner,
            canonical_token: settings.canonical_token.clone(),
            alternate_token: settings.alternate_token.clone(),
            phase: Phase::Idle,
            tracked_input: String::new(),
            outcome: None,
        }
    }

    /// Spawn the actor and hand back its command/event channels
    pub fn spawn(
        service: Arc<ResolveService>,
        banner: Option<Arc<Mutex<BannerSlot>>>,
        settings: &AppSettings,
    ) -> (
        mpsc::Sender<ControllerCommand>,
        mpsc::Receiver<ControllerEvent>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let (evt_tx, evt_rx) = mpsc::channel(32);
        let actor = Self::new(service, banner, settings, cmd_rx, evt_tx);
        tokio::spawn(actor.run());
        (cmd_tx, evt_rx)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<&RequestOutcome> {
        self.outcome.as_ref()
    }

    pub async fn run(mut self) {
        info!("ControllerActor started");

        let (done_tx, mut done_rx) = mpsc::channel::<Result<VideoResult, ResolveError>>(1);

        loop {
            tokio::select! {
                cmd = self.receiver.recv() => {
                    match cmd {
                        Some(ControllerCommand::InputChanged(value)) => {
                            self.tracked_input = value;
                        }
                        Some(ControllerCommand::Submit { element_value }) => {
                            self.handle_submit(element_value, &done_tx).await;
                        }
                        Some(ControllerCommand::PasteFromClipboard) => {
                            self.handle_paste().await;
                        }
                        Some(ControllerCommand::Shutdown) | None => {
                            info!("ControllerActor shutting down");
                            break;
                        }
                    }
                }
                Some(result) = done_rx.recv() => {
                    self.handle_completed(result).await;
                }
            }
        }
    }

    async fn handle_submit(
        &mut self,
        element_value: String,
        done_tx: &mpsc::Sender<Result<VideoResult, ResolveError>>,
    ) {
        if self.phase == Phase::Pending {
            // Single-flight: a resolution is in flight, the submission is
            // dropped rather than queued.
            warn!("Submission ignored while a resolution is pending");
            return;
        }

        self.phase = Phase::Validating;

        // The tracked value and the element value can desynchronize; the
        // tracked value wins when non-empty.
        let input = if self.tracked_input.trim().is_empty() {
            element_value
        } else {
            self.tracked_input.clone()
        };

        if !is_supported_link(&input, &self.canonical_token, &self.alternate_token) {
            let message = "Please enter a valid video link".to_string();
            self.phase = Phase::Failure;
            self.outcome = Some(RequestOutcome::Failure(message.clone()));
            let _ = self
                .sender
                .send(ControllerEvent::SubmissionRejected(message))
                .await;
            return;
        }

        self.phase = Phase::Pending;
        self.outcome = Some(RequestOutcome::Pending);
        let _ = self.sender.send(ControllerEvent::ResolutionStarted).await;

        let service = self.service.clone();
        let done = done_tx.clone();
        tokio::spawn(async move {
            let result = service.resolve(&input).await;
            let _ = done.send(result).await;
        });
    }

    async fn handle_completed(&mut self, result: Result<VideoResult, ResolveError>) {
        match result {
            Ok(video) => {
                self.phase = Phase::Success;
                self.outcome = Some(RequestOutcome::Success(video.clone()));
                let _ = self
                    .sender
                    .send(ControllerEvent::ResolutionCompleted(Ok(video)))
                    .await;

                // Best-effort side effect, once per successful resolution;
                // never allowed to touch primary state.
                self.trigger_banner();
            }
            Err(e) => {
                let message = e.to_string();
                self.phase = Phase::Failure;
                self.outcome = Some(RequestOutcome::Failure(message.clone()));
                let _ = self
                    .sender
                    .send(ControllerEvent::ResolutionCompleted(Err(message)))
                    .await;
            }
        }
    }

    fn trigger_banner(&self) {
        if let Some(slot) = &self.banner {
            let slot = slot.clone();
            tokio::spawn(async move {
                slot.lock().await.try_load().await;
            });
        }
    }

    async fn handle_paste(&mut self) {
        match clipboard::get_clipboard_content() {
            Ok(content) => {
                self.tracked_input = content.clone();
                let _ = self.sender.send(ControllerEvent::InputUpdated(content)).await;
            }
            Err(e) => {
                let _ = self.sender.send(ControllerEvent::Error(e)).await;
            }
        }
    }
}
