pub mod actions;
pub mod chart;
pub mod status;
