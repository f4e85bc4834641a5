pub mod attendance;
pub mod attendance_service;
pub mod promotion_ledger;
pub mod promotion_validator;
pub mod schedule;
pub mod taxonomy;

pub use attendance::AttendanceAggregator;
pub use attendance_service::{AttendanceBasis, AttendanceService};
pub use promotion_ledger::{PromotionCommand, PromotionLedger};
pub use promotion_validator::PromotionValidator;
pub use schedule::ScheduleProjector;
pub use taxonomy::BeltTaxonomy;
