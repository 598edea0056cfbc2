//! Reactive binding between the selection controls and the chart slots.
//!
//! A [`Binding`] is an explicit subscription list: every slot owns one
//! builder, and a selection change re-runs all of them. The runs are
//! independent, so they are spread over tokio's blocking pool and gathered
//! back in subscription order.

use model::{Dataset, Selection};
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{debug, error, info, instrument, warn};

use crate::chart::{builder_for, BuilderError, ChartBuilder, ChartKind, ChartSpec};
use crate::error::{ComputeError, Result};
use crate::filter::{select_rows, Subset};

/// Whether any recomputation is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Idle,
    Recomputing,
}

impl BindingState {
    pub fn as_str(self) -> &'static str {
        match self {
            BindingState::Idle => "idle",
            BindingState::Recomputing => "recomputing",
        }
    }
}

/// One slot registered on the binding.
#[derive(Clone)]
pub struct Subscription {
    pub slot: String,
    pub builder: Arc<dyn ChartBuilder>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("slot", &self.slot)
            .field("kind", &self.builder.kind())
            .finish()
    }
}

/// Result of re-running a single slot.
#[derive(Debug, Clone)]
pub struct SlotOutcome {
    pub slot: String,
    pub kind: ChartKind,
    pub result: std::result::Result<ChartSpec, BuilderError>,
}

/// Every slot's outcome for one selection, in subscription order.
#[derive(Debug, Clone)]
pub struct Recomputation {
    pub selection: Selection,
    pub outcomes: Vec<SlotOutcome>,
}

impl Recomputation {
    pub fn get(&self, slot: &str) -> Option<&SlotOutcome> {
        self.outcomes.iter().find(|outcome| outcome.slot == slot)
    }

    pub fn failures(&self) -> impl Iterator<Item = &SlotOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_err())
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Decrements the in-flight counter when a recomputation finishes, however
/// it finishes.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Subscription list of chart slots driven by the current selection.
#[derive(Debug, Default)]
pub struct Binding {
    subscriptions: Vec<Subscription>,
    in_flight: Arc<AtomicUsize>,
}

impl Binding {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard layout: one slot per chart kind, in page order.
    pub fn standard() -> Self {
        let mut binding = Self::new();
        for kind in ChartKind::ALL {
            binding.subscribe(kind.slot_id(), builder_for(kind));
        }
        binding
    }

    /// Registers a builder for a slot. Slots are recomputed in the order they
    /// were subscribed.
    pub fn subscribe(&mut self, slot: impl Into<String>, builder: Arc<dyn ChartBuilder>) -> &mut Self {
        let slot = slot.into();
        debug!("Subscribing {} builder to slot {}", builder.kind(), slot);
        self.subscriptions.push(Subscription { slot, builder });
        self
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.subscriptions.iter().map(|s| s.slot.as_str())
    }

    pub fn state(&self) -> BindingState {
        if self.in_flight.load(Ordering::SeqCst) == 0 {
            BindingState::Idle
        } else {
            BindingState::Recomputing
        }
    }

    /// Re-runs every subscribed builder for `selection`.
    ///
    /// A builder that fails or panics only fails its own slot; the other
    /// outcomes are unaffected.
    #[instrument(skip(self, dataset), fields(slots = self.subscriptions.len()))]
    pub async fn recompute(&self, dataset: &Dataset, selection: &Selection) -> Recomputation {
        let _in_flight = InFlight::enter(&self.in_flight);
        if !selection.region.is_global() && !dataset.has_region(selection.region.as_str()) {
            warn!(
                "Region '{}' has no rows; charts will be empty",
                selection.region
            );
        }

        let rows: Arc<[usize]> = select_rows(dataset, &selection.region).into();

        let handles: Vec<_> = self
            .subscriptions
            .iter()
            .map(|subscription| {
                let dataset = dataset.clone();
                let rows = rows.clone();
                let selection = selection.clone();
                let builder = subscription.builder.clone();
                let handle = tokio::task::spawn_blocking(move || {
                    let subset = Subset::from_positions(&dataset, &rows);
                    builder.build(&subset, &selection)
                });
                (subscription, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (subscription, handle) in handles {
            let kind = subscription.builder.kind();
            let result = handle
                .await
                .unwrap_or_else(|join_error| Err(join_failure(kind, join_error)));
            if let Err(e) = &result {
                error!("Slot {} failed: {}", subscription.slot, e);
            }
            outcomes.push(SlotOutcome {
                slot: subscription.slot.clone(),
                kind,
                result,
            });
        }

        info!(
            "Recomputed {} slots for {} in {}",
            outcomes.len(),
            selection.metric,
            selection.region
        );
        Recomputation {
            selection: selection.clone(),
            outcomes,
        }
    }

    /// Re-runs the builder of a single slot.
    #[instrument(skip(self, dataset))]
    pub async fn recompute_slot(
        &self,
        dataset: &Dataset,
        selection: &Selection,
        slot: &str,
    ) -> Result<ChartSpec> {
        let subscription = self
            .subscriptions
            .iter()
            .find(|s| s.slot == slot)
            .ok_or_else(|| ComputeError::UnknownSlot(slot.to_string()))?;

        let _in_flight = InFlight::enter(&self.in_flight);
        let kind = subscription.builder.kind();
        let dataset = dataset.clone();
        let selection = selection.clone();
        let builder = subscription.builder.clone();
        let rows = select_rows(&dataset, &selection.region);

        let spec = tokio::task::spawn_blocking(move || {
            let subset = Subset::from_positions(&dataset, &rows);
            builder.build(&subset, &selection)
        })
        .await
        .map_err(|join_error| join_failure(kind, join_error))??;

        Ok(spec)
    }
}

fn join_failure(kind: ChartKind, join_error: JoinError) -> BuilderError {
    if join_error.is_panic() {
        BuilderError::new(
            kind,
            format!("builder panicked: {}", panic_message(join_error.into_panic())),
        )
    } else {
        BuilderError::new(kind, join_error.to_string())
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
