pub mod app;
pub mod config;
pub mod effects;
pub mod logging;
pub mod ui;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_TRANSPORT_FAILURE: u8 = 1;
pub const EXIT_VALIDATION: u8 = 2;
