//! Repository layer for visit records

mod row;
pub mod visit_store;

pub use visit_store::VisitStore;
