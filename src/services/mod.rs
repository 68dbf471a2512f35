pub mod catalog;
pub mod images;
pub mod recommendations;

pub use catalog::Catalog;
