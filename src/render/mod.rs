pub mod constellation;
pub mod reveal;
pub mod sky;
