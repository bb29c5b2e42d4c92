// Check pipeline: metrics, contexts, results and plugin output

pub mod bounds;
pub mod check;
pub mod config;
pub mod context;
pub mod delta_store;
pub mod metric;
pub mod perfdata;
pub mod resource;
pub mod result;
pub mod runtime;
pub mod state;
pub mod summarizer;
pub mod warning;

// Re-export commonly used items
pub use bounds::Bounds;
pub use check::Check;
pub use config::{Config, ThresholdConfig};
pub use context::{
    BaseContext, Context, DeltaContext, PreviousValue, ScalarContext, SharedPrevious, StringInfoContext,
    StringMatchContext,
};
pub use delta_store::DeltaStore;
pub use metric::{Metric, MetricValue};
pub use perfdata::PerfData;
pub use resource::{Resource, StaticResource};
pub use result::{EvalResult, ResultCollection};
pub use runtime::{Report, Runtime};
pub use state::State;
pub use summarizer::{BasicSummarizer, Summarizer};
pub use warning::WarningCollection;
