//! The managed file store: record lookups plus two-phase deletion.

mod managed;

pub use managed::ManagedFileStore;
