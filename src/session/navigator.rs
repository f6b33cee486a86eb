//! Single-flight navigation over the registry
//!
//! Every request aborts the one still in flight and bumps a generation
//! counter. A finished task publishes its outcome only if its generation is
//! still the latest, so observers see results in issue order and never a
//! superseded one.

use super::registry::FeedRegistry;
use crate::error::Result;
use crate::feed::{Category, Item};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// What the presentation layer should currently display
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// An item is shown
    Showing { item: Item, can_go_back: bool },
    /// The latest request failed
    Failed {
        message: String,
        retryable: bool,
        can_go_back: bool,
    },
}

impl ViewState {
    pub fn item(&self) -> Option<&Item> {
        match self {
            ViewState::Showing { item, .. } => Some(item),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ViewState::Failed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Current,
    Advance,
    Back,
    Reload,
}

/// Drives the cursor of the selected category on behalf of a UI
#[derive(Debug)]
pub struct Navigator {
    registry: FeedRegistry,
    category: Category,
    generation: Arc<AtomicU64>,
    view: Arc<watch::Sender<ViewState>>,
    /// Last state published before the current `Loading`
    settled: ViewState,
    in_flight: Option<JoinHandle<()>>,
}

impl Navigator {
    /// Create a navigator positioned on `category`; nothing is requested
    /// until the first call
    pub fn new(registry: FeedRegistry, category: Category) -> Self {
        let (view, _) = watch::channel(ViewState::Idle);
        Self {
            registry,
            category,
            generation: Arc::new(AtomicU64::new(0)),
            view: Arc::new(view),
            settled: ViewState::Idle,
            in_flight: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn registry(&self) -> &FeedRegistry {
        &self.registry
    }

    /// Receive every published view state
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.subscribe()
    }

    /// Latest published view state
    pub fn view(&self) -> ViewState {
        self.view.borrow().clone()
    }

    /// Whether the back affordance should be enabled. Reports `false` while
    /// the selected cursor is busy.
    pub fn can_go_back(&self) -> bool {
        self.registry
            .cursor(self.category)
            .try_lock()
            .is_ok_and(|cursor| cursor.can_go_back())
    }

    /// Switch to `category` and show its current item
    pub fn select(&mut self, category: Category) {
        self.category = category;
        self.dispatch(Operation::Current);
    }

    /// Show the current item of the selected category
    pub fn show_current(&mut self) {
        self.dispatch(Operation::Current);
    }

    pub fn forward(&mut self) {
        self.dispatch(Operation::Advance);
    }

    pub fn back(&mut self) {
        self.dispatch(Operation::Back);
    }

    pub fn reload(&mut self) {
        self.dispatch(Operation::Reload);
    }

    /// Wait for the in-flight request, if any, to finish
    pub async fn settle(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!(error = %e, "Navigation task panicked");
                }
            }
        }
    }

    /// Abort the in-flight request without issuing a new one.
    ///
    /// A pending `Loading` is replaced by the state shown before it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }

        let settled = &self.settled;
        let restored = self.view.send_if_modified(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            if *state != ViewState::Loading {
                return false;
            }
            *state = settled.clone();
            true
        });
        if restored {
            debug!(category = %self.category, "Navigation cancelled");
        }
    }

    fn dispatch(&mut self, operation: Operation) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }

        let mut generation = 0;
        self.view.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let previous = std::mem::replace(state, ViewState::Loading);
            if previous != ViewState::Loading {
                self.settled = previous;
            }
        });

        let category = self.category;
        let cursor = self.registry.cursor(category);
        let latest = Arc::clone(&self.generation);
        let view = Arc::clone(&self.view);
        debug!(%category, ?operation, generation, "Dispatching navigation");

        self.in_flight = Some(tokio::spawn(async move {
            let mut cursor = cursor.lock().await;
            let outcome: Result<Item> = match operation {
                Operation::Current => cursor.current().await,
                Operation::Advance => cursor.advance().await,
                Operation::Back => cursor.go_back(),
                Operation::Reload => cursor.reload().await,
            };
            let can_go_back = cursor.can_go_back();
            drop(cursor);

            let next = match outcome {
                Ok(item) => ViewState::Showing { item, can_go_back },
                Err(e) => {
                    warn!(%category, ?operation, error = %e, "Navigation failed");
                    ViewState::Failed {
                        message: e.to_string(),
                        retryable: e.is_retryable(),
                        can_go_back,
                    }
                }
            };

            let published = view.send_if_modified(|state| {
                if latest.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *state = next;
                true
            });
            if !published {
                debug!(%category, ?operation, generation, "Dropping superseded result");
            }
        }));
    }
}

impl Drop for Navigator {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
