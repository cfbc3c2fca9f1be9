//! bookshelf - personal book library client
//!
//! Session handling, a books API store and a route guard, plus the CLI
//! that drives them.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod guard;
pub mod library;
pub mod session;
pub mod storage;
pub mod ui;

pub use error::{BookshelfError, BookshelfResult};
