//! Business logic services for the application layer.

pub mod click_processor;
pub mod link_service;
pub mod stats_service;

pub use click_processor::ClickProcessor;
pub use link_service::LinkService;
pub use stats_service::StatsService;
