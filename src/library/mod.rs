//! Books API client module

pub mod book;
pub mod client;
pub mod transport;

pub use book::Book;
pub use client::{LibraryClient, LibraryState, RequestState, SEARCH_RESULT_LIMIT};
pub use transport::{ApiRequest, ApiResponse, Method, Transport, UreqTransport};
