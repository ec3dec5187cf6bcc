//! Entropy adapters.

mod os_random_source;

pub use os_random_source::OsRandomSource;
