//! Client-side store for the documents of an annotation project.
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use error::{Result, StoreError};
pub use services::{DocumentApi, HttpDocumentApi};
pub use store::{DeleteBatch, DeleteOutcome, DocumentStore, Mutation, StoreState};
