pub mod event;
pub mod feedback;
pub mod health;
pub mod resource;
pub mod root;
pub mod upload;
pub mod visitor;
