pub mod binding;
pub mod chart;
pub mod error;
pub mod filter;
pub mod summary;

pub use binding::{Binding, BindingState, Recomputation, SlotOutcome};
pub use chart::{BuilderError, ChartBuilder, ChartKind, ChartSpec};
pub use error::{ComputeError, Result};
pub use filter::{filter, select_rows, top_n, Subset};
pub use summary::{format_thousands, summarize, Summary};

/// Returns the binding used by the dashboard: the seven standard chart slots
/// in page layout order.
pub fn default_binding() -> Binding {
    Binding::standard()
}
