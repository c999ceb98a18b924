//! Document model: rows and the row store.

pub mod document;
pub mod row;

pub use document::Document;
pub use row::Row;
