pub mod container;
pub mod database;
pub mod external_services;
pub mod file_system;
pub mod memory;

pub use container::AppContainer;
