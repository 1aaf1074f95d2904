#![forbid(unsafe_code)]

pub mod repository;

pub use repository::{
    BadgeRepository, HistoryRepository, InMemoryRepository, Storage, StorageError,
};
