pub mod app;
pub mod config_helpers;
pub mod error;
pub mod handlers;
pub mod state;
pub mod validation;

pub use app::build_router;
