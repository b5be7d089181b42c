pub mod event;
pub mod event_date;
pub mod resource;
