//! DDL Parser
//!
//! A hand-written recursive descent parser that turns the token stream of
//! one schema into a [`Schema`](crate::schema::Schema).

mod error;
#[allow(clippy::module_inception)]
mod parser;

pub use error::ParseError;
pub use parser::Parser;
