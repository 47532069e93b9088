// src/store/writer/mod.rs
// Write path - cell upserts and scoped deletions

mod deletions;
mod upserts;

pub use deletions::delete_for_items;
pub use upserts::{write_for_language, WriteSummary};
