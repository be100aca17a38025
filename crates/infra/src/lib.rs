//! Infrastructure layer: stores, employee directory, config, error mapping,
//! and the back-office composition root.

pub mod backoffice;
pub mod config;
pub mod employees;
pub mod errors;
pub mod store;


pub use backoffice::Backoffice;
pub use config::AppConfig;
pub use employees::InMemoryEmployeeDirectory;
pub use errors::{UserError, user_error};
pub use store::InMemoryStore;
