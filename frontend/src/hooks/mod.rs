pub mod use_movement_form;
pub mod use_movements;
