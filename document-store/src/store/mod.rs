pub mod actions;
pub mod mutation;
pub mod state;

pub use actions::{DeleteBatch, DeleteOutcome, DocumentStore};
pub use mutation::Mutation;
pub use state::StoreState;
