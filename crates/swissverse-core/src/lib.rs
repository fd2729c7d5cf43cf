pub mod collection;
pub mod config;
pub mod content;
pub mod editor;
pub mod error;
pub mod io;
pub mod memory;
pub mod order;
pub mod presenter;
pub mod rest;
pub mod slug;
pub mod table;
pub mod types;

pub use error::{Result, SwissverseError};
