pub mod category;
pub mod schema;
pub mod stats;
pub mod table;

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
