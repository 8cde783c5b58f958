pub mod weekly;

pub use weekly::score;
