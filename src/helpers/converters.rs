use chrono::{DateTime, Utc};
use common::{ChartSlot, DashboardPanel, SelectionOptions, SummaryCard, SummaryCards};
use compute::{format_thousands, ChartSpec, Recomputation, SlotOutcome, Summary};
use model::{Dataset, Metric, Selection, GLOBAL_REGION};

/// Convert a builder's spec into the transport shape of a slot
pub fn slot_from_spec(slot: &str, spec: &ChartSpec) -> ChartSlot {
    ChartSlot {
        slot: slot.to_string(),
        kind: spec.kind.to_string(),
        figure: Some(spec.figure.clone()),
        error: None,
    }
}

pub fn slot_from_outcome(outcome: &SlotOutcome) -> ChartSlot {
    match &outcome.result {
        Ok(spec) => slot_from_spec(&outcome.slot, spec),
        Err(e) => ChartSlot {
            slot: outcome.slot.clone(),
            kind: outcome.kind.to_string(),
            figure: None,
            error: Some(e.to_string()),
        },
    }
}

/// Helper function to convert a recomputation into the dashboard panel
pub fn panel_from_recomputation(recomputation: &Recomputation) -> DashboardPanel {
    DashboardPanel {
        metric: recomputation.selection.metric.to_string(),
        region: recomputation.selection.region.to_string(),
        charts: recomputation.outcomes.iter().map(slot_from_outcome).collect(),
    }
}

pub fn summary_cards(summary: &Summary, as_of: DateTime<Utc>) -> SummaryCards {
    let card = |name: &str, value: i64| SummaryCard {
        label: format!("{} {}", summary.region, name),
        value,
        display: format_thousands(value),
    };

    SummaryCards {
        region: summary.region.to_string(),
        countries: summary.countries,
        cards: vec![
            card("Confirmed", summary.confirmed),
            card("Deaths", summary.deaths),
            card("Recovered", summary.recovered),
        ],
        as_of,
    }
}

pub fn selection_options(dataset: &Dataset, defaults: &Selection) -> SelectionOptions {
    let mut regions = vec![GLOBAL_REGION.to_string()];
    regions.extend(dataset.regions());

    SelectionOptions {
        metrics: Metric::ALL.iter().map(|m| m.to_string()).collect(),
        regions,
        default_metric: defaults.metric.to_string(),
        default_region: defaults.region.to_string(),
    }
}
