pub mod forms;
pub mod movements;
