pub use crate::chart::{Segment, StackedColumn};
pub use crate::error::OutbreakError;
pub use crate::geometry::{Bounds, Vector};
pub use crate::history::{HistoryRecorder, HistorySample};
pub use crate::individual::{HealthStatus, Individual, IndividualId};
pub use crate::log::{debug, error, info, trace, warn};
pub use crate::parameters::{Constants, Parameters};
pub use crate::population::{Population, StateCounts, TickSummary};
pub use crate::random::RandomSource;
pub use crate::report::ReportOptions;
pub use crate::simulation::Simulation;
pub use crate::{define_report, define_rng};
