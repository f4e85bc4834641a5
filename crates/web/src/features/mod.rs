pub mod attendance;
pub mod graduation;
