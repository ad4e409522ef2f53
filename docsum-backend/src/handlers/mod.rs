pub mod health;
pub mod jobs;
pub mod models;
pub mod status;

pub mod utils;
