pub mod planning;
pub mod shared;
