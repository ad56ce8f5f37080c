pub mod admin;
pub mod board;
pub mod events;
pub mod feedback;
pub mod meta;
pub mod session;
