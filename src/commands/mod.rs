pub mod catalog;
pub mod parse;
