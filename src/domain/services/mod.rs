pub mod admission;
pub mod availability;
pub mod slots;
