pub mod banner;
pub mod detail_table;
pub mod header;
pub mod input;
pub mod metrics;
pub mod statusbar;
pub mod trends;
