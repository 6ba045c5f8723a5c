// Domain models: raw telemetry in, chart points out

mod mode;
mod point;
mod sample;

pub use mode::{ChartMode, Granularity, HostSelector, ModeConfig};
pub use point::{AggregatedPoint, ChartView};
pub use sample::{RawSample, Sample};
