//! A generic LIFO stack over a buffer that doubles its capacity when full.

pub mod demo;
pub mod error;
pub mod stack;

pub use error::{Result, StackError};
pub use stack::Stack;
