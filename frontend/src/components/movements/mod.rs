pub mod movement_table;
