//! The single owner of selection, operation and display state.
//!
//! Every user gesture arrives as a [`Command`]. Network work is spawned onto
//! the tokio runtime holding only a clone of the [`PetApi`]; results come back
//! as [`Completion`]s tagged with the operation token that was current when
//! the work started. A completion whose token is no longer the latest for its
//! [`Domain`] is dropped without touching any state.

use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::api::{HealthStatus, PetApi};
use crate::category::Category;
use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::error::ServiceError;
use crate::feedback::{Feedback, NotificationDurations, NotificationId, Severity};
use crate::http::HttpClient;
use crate::reconciler::{Reconciler, CATEGORY_FACT_FALLBACK, GLOBAL_FACT_FALLBACK};
use crate::selection::{CountDirection, Selection};
use crate::transport::{Transport, TransportSignal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectCategory(Category),
    SetCount(i64),
    AdjustCount(CountDirection),
    GenerateNames,
    RandomName,
    LoadGlobalFact,
    CheckHealth,
    CopyResults,
    CopyName(usize),
    Dismiss(NotificationId),
    DismissErrors,
}

/// Triggers that write the same visible state share a domain and a token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Names,
    Facts,
    Health,
}

pub type OperationToken = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug, Default)]
struct OperationTracker {
    latest: OperationToken,
    state: OperationState,
}

impl OperationTracker {
    fn begin(&mut self) -> OperationToken {
        self.latest += 1;
        self.state = OperationState::InFlight;
        self.latest
    }

    fn is_latest(&self, token: OperationToken) -> bool {
        token == self.latest
    }

    fn finish(&mut self, succeeded: bool) {
        self.state = if succeeded {
            OperationState::Succeeded
        } else {
            OperationState::Failed
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameTrigger {
    Generate,
    Random,
}

impl NameTrigger {
    fn action(self) -> &'static str {
        match self {
            NameTrigger::Generate => "generate_names",
            NameTrigger::Random => "random_name",
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Names {
        trigger: NameTrigger,
        category: Category,
        count: u8,
        result: Result<Vec<String>, ServiceError>,
    },
    Fact {
        fallback: &'static str,
        result: Result<Option<String>, ServiceError>,
    },
    Health(Result<HealthStatus, ServiceError>),
}

#[derive(Debug)]
pub struct Completion {
    pub domain: Domain,
    pub token: OperationToken,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Failed,
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    #[default]
    Unknown,
    Online,
    Offline(String),
}

#[derive(Debug, Clone)]
pub struct CoordinatorSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub initial_count: i64,
    pub durations: NotificationDurations,
}

impl CoordinatorSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.server.base_url(),
            timeout: config.server.timeout(),
            initial_count: config.initial_count().get() as i64,
            durations: config.notifications.durations(),
        }
    }
}

pub struct Coordinator<C: HttpClient> {
    api: PetApi<C>,
    selection: Selection,
    names_op: OperationTracker,
    facts_op: OperationTracker,
    health_op: OperationTracker,
    reconciler: Reconciler,
    feedback: Feedback,
    clipboard: Clipboard,
    service_status: ServiceStatus,
    active_requests: usize,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    signals_rx: mpsc::UnboundedReceiver<TransportSignal>,
}

impl<C: HttpClient> Coordinator<C> {
    pub fn new(client: C, settings: CoordinatorSettings, clipboard: Clipboard) -> Self {
        let (signals_tx, signals_rx) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let transport =
            Transport::new(client, settings.base_url, settings.timeout).with_signals(signals_tx);

        Self {
            api: PetApi::new(transport),
            selection: Selection::with_count(settings.initial_count),
            names_op: OperationTracker::default(),
            facts_op: OperationTracker::default(),
            health_op: OperationTracker::default(),
            reconciler: Reconciler::new(),
            feedback: Feedback::new(settings.durations),
            clipboard,
            service_status: ServiceStatus::Unknown,
            active_requests: 0,
            completions_tx,
            completions_rx,
            signals_rx,
        }
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::SelectCategory(category) => {
                self.selection.select_category(category);
                self.fetch_category_fact(category);
            }
            Command::SetCount(n) => self.selection.set_count(n),
            Command::AdjustCount(direction) => self.selection.adjust_count(direction),
            Command::GenerateNames => self.generate_names(),
            Command::RandomName => self.random_name(),
            Command::LoadGlobalFact => self.load_global_fact(),
            Command::CheckHealth => self.check_health(),
            Command::CopyResults => {
                if let Some(text) = self.reconciler.copy_text() {
                    self.copy(&text, "Names copied to clipboard! 🎉".to_string());
                }
            }
            Command::CopyName(index) => {
                if let Some(name) = self.reconciler.names().get(index).cloned() {
                    self.copy(&name, format!("Copied \"{}\" to clipboard!", name));
                }
            }
            Command::Dismiss(id) => {
                self.feedback.dismiss(id);
            }
            Command::DismissErrors => self.feedback.dismiss_errors(),
        }
    }

    fn generate_names(&mut self) {
        let Some(category) = self.selection.category() else {
            return;
        };
        let count = self.selection.count();
        let token = self.names_op.begin();
        let api = self.api.clone();
        self.spawn(Domain::Names, token, async move {
            let result = api.names(category, count).await;
            Outcome::Names {
                trigger: NameTrigger::Generate,
                category,
                count: count.get(),
                result,
            }
        });
    }

    fn random_name(&mut self) {
        let Some(category) = self.selection.category() else {
            return;
        };
        let token = self.names_op.begin();
        let api = self.api.clone();
        self.spawn(Domain::Names, token, async move {
            let result = api.random_name(category).await.map(|name| vec![name]);
            Outcome::Names {
                trigger: NameTrigger::Random,
                category,
                count: 1,
                result,
            }
        });
    }

    fn fetch_category_fact(&mut self, category: Category) {
        let token = self.facts_op.begin();
        let api = self.api.clone();
        self.spawn(Domain::Facts, token, async move {
            Outcome::Fact {
                fallback: CATEGORY_FACT_FALLBACK,
                result: api.category_fact(category).await,
            }
        });
    }

    fn load_global_fact(&mut self) {
        let token = self.facts_op.begin();
        let api = self.api.clone();
        self.spawn(Domain::Facts, token, async move {
            Outcome::Fact {
                fallback: GLOBAL_FACT_FALLBACK,
                result: api.random_fact().await,
            }
        });
    }

    fn check_health(&mut self) {
        let token = self.health_op.begin();
        let api = self.api.clone();
        self.spawn(Domain::Health, token, async move {
            Outcome::Health(api.health().await)
        });
    }

    fn spawn<F>(&self, domain: Domain, token: OperationToken, work: F)
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let outcome = work.await;
            let _ = tx.send(Completion {
                domain,
                token,
                outcome,
            });
        });
    }

    fn copy(&mut self, text: &str, success_message: String) {
        match self.clipboard.copy(text) {
            Ok(mechanism) => {
                tracing::debug!(?mechanism, chars = text.chars().count(), "copied to clipboard");
            }
            Err(e) => {
                tracing::warn!(error = %e, "clipboard copy failed");
            }
        }
        self.feedback.notify(success_message, Severity::Success);
    }

    /// Commits a finished operation if it is still the latest of its domain.
    pub fn resolve(&mut self, completion: Completion) -> Resolution {
        let Completion {
            domain,
            token,
            outcome,
        } = completion;

        if !self.tracker(domain).is_latest(token) {
            tracing::debug!(?domain, token, latest = self.tracker(domain).latest, "discarding stale response");
            return Resolution::Stale;
        }

        match outcome {
            Outcome::Names {
                trigger,
                category,
                count,
                result,
            } => match result {
                Ok(names) => {
                    self.names_op.finish(true);
                    self.mark_online();
                    tracing::info!(action = trigger.action(), pet = %category, count, "Event");
                    self.reconciler.apply_names(names);
                    Resolution::Applied
                }
                Err(e) => {
                    self.names_op.finish(false);
                    self.note_failure(&e);
                    self.feedback.notify(e.to_string(), Severity::Error);
                    Resolution::Failed
                }
            },
            Outcome::Fact { fallback, result } => match result {
                Ok(text) => {
                    self.facts_op.finish(true);
                    self.mark_online();
                    self.reconciler.apply_fact(text.as_deref(), fallback);
                    Resolution::Applied
                }
                Err(e) => {
                    self.facts_op.finish(false);
                    tracing::warn!(error = %e, "Error loading pet fact, using fallback");
                    self.note_failure(&e);
                    self.reconciler.apply_fact(None, fallback);
                    Resolution::Failed
                }
            },
            Outcome::Health(result) => match result {
                Ok(status) => {
                    self.health_op.finish(true);
                    tracing::info!(status = %status.status, message = %status.message, "service health");
                    self.mark_online();
                    Resolution::Applied
                }
                Err(e) => {
                    self.health_op.finish(false);
                    self.note_failure(&e);
                    self.feedback.notify(
                        format!(
                            "Service unreachable at {}. Some features may not work. ({})",
                            self.api.transport().base_url(),
                            e
                        ),
                        Severity::Error,
                    );
                    Resolution::Failed
                }
            },
        }
    }

    fn tracker(&self, domain: Domain) -> &OperationTracker {
        match domain {
            Domain::Names => &self.names_op,
            Domain::Facts => &self.facts_op,
            Domain::Health => &self.health_op,
        }
    }

    fn mark_online(&mut self) {
        if matches!(self.service_status, ServiceStatus::Offline(_)) {
            self.feedback.dismiss_errors();
            self.feedback.notify("Back online! 🌐", Severity::Success);
        }
        self.service_status = ServiceStatus::Online;
    }

    fn note_failure(&mut self, err: &ServiceError) {
        if err.is_connectivity() {
            self.service_status = ServiceStatus::Offline(err.to_string());
        }
    }

    /// Drains transport signals and finished operations, and expires
    /// notifications. Never blocks. Returns true if anything changed.
    pub fn pump(&mut self, now: Instant) -> bool {
        let mut changed = false;

        while let Ok(signal) = self.signals_rx.try_recv() {
            self.apply_signal(signal);
            changed = true;
        }

        while let Ok(completion) = self.completions_rx.try_recv() {
            self.resolve(completion);
            changed = true;
        }

        if self.feedback.prune_expired(now) {
            changed = true;
        }
        changed
    }

    /// Waits for the next finished operation without resolving it.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        let completion = self.completions_rx.recv().await;
        while let Ok(signal) = self.signals_rx.try_recv() {
            self.apply_signal(signal);
        }
        completion
    }

    /// Waits for the next finished operation and resolves it.
    pub async fn settle_next(&mut self) -> Option<Resolution> {
        let completion = self.next_completion().await?;
        Some(self.resolve(completion))
    }

    fn apply_signal(&mut self, signal: TransportSignal) {
        match signal {
            TransportSignal::RequestStarted => self.active_requests += 1,
            TransportSignal::RequestEnded => {
                self.active_requests = self.active_requests.saturating_sub(1)
            }
        }
    }

    /// Generate/random are usable only with a category and no names request pending.
    pub fn controls_enabled(&self) -> bool {
        self.selection.category().is_some() && self.names_op.state != OperationState::InFlight
    }

    pub fn is_loading(&self) -> bool {
        self.active_requests > 0
    }

    pub fn names_state(&self) -> OperationState {
        self.names_op.state
    }

    pub fn facts_state(&self) -> OperationState {
        self.facts_op.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn service_status(&self) -> &ServiceStatus {
        &self.service_status
    }

    pub fn base_url(&self) -> &str {
        self.api.transport().base_url()
    }
}
