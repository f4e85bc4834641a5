pub mod belt;
pub mod checkin;
pub mod class_definition;
pub mod class_instance;
pub mod promotion;
pub mod student;

pub use belt::{AgeGroup, Belt, Graduation, ProposedGraduation};
pub use checkin::{CheckinMethod, CheckinRecord};
pub use class_definition::{ClassDefinition, ClassStatus};
pub use class_instance::{Attendance, InstanceStatus, ScheduledInstance};
pub use promotion::{PromotionRecord, PromotionType, RequirementsMet, sort_chronologically};
pub use student::Student;
