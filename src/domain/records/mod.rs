//! Records consumed from the external document store

mod entity;
mod repository;

pub use entity::{ApiKeyRecord, LlmRecord};
pub use repository::RecordStore;

#[cfg(test)]
pub use repository::MockRecordStore;
