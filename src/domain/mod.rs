pub mod clock_registry;
pub mod clock_service;
pub mod dag;
pub mod snapshot_store;
pub mod utils;
