pub mod filter_form;
pub mod movement_entry_form;
