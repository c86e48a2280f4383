//! The transaction database read by the search.
pub(crate) mod store;

pub use store::TransactionStore;
