mod kpi_record;
mod offset;
mod outage;
mod reading;
mod scope;

pub use kpi_record::{KpiKind, KpiRecord};
pub use offset::{KpiOffset, PeriodType};
pub use outage::{OutageInterval, OutageType};
pub use reading::{TotalizerBaseline, TotalizerReading};
pub use scope::Scope;
