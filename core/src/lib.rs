//! Domain model for the todo service.
//!
//! # Overview
//! Storage records, wire DTOs, request payload validation and the error
//! taxonomy shared by the server and its tests. Nothing here performs I/O.
//!
//! # Design
//! - `TodoRecord` is the storage form, `TodoDto` the wire form; `mapper`
//!   converts one into the other.
//! - `TodoId` wraps the store's `ObjectId` and owns identifier parsing.
//! - Payloads validate themselves (`CreateTodo::into_record`,
//!   `UpdateTodo::into_changes`) so handlers stay thin.

pub mod error;
pub mod id;
pub mod mapper;
pub mod types;

pub use error::{ErrorBody, ErrorKind, TodoError};
pub use id::TodoId;
pub use types::{
    require_title, CreateTodo, Created, Message, TodoChanges, TodoDto, TodoList, TodoRecord,
    UpdateTodo,
};
