pub mod dto;
pub mod get;
pub mod list;
pub mod submit;
