pub mod branches;
pub mod chapters;
pub mod events;
pub mod feedback;
pub mod resources;
pub mod semesters;
pub mod subjects;
pub mod visitors;
