pub mod clock;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AcademyError, Result};
pub use services::{
    AttendanceAggregator, AttendanceBasis, AttendanceService, BeltTaxonomy, PromotionCommand,
    PromotionLedger, PromotionValidator, ScheduleProjector,
};
