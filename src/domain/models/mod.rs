pub mod admission;
pub mod booking;
pub mod role;
pub mod settings;
pub mod slot;
