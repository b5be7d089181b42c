pub mod error;
pub mod event;
pub mod feedback;
pub mod query_resource;
pub mod save_resource;
pub mod visitor;

pub use error::ServiceError;
