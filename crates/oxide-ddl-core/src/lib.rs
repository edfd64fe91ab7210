//! # oxide-ddl-core
//!
//! Structural diffing of MySQL schemas written as `CREATE TABLE`
//! statements.
//!
//! This crate provides:
//! - A hand-written lexer and recursive descent parser for the MySQL DDL
//!   subset used by schema dumps
//! - An order-preserving schema model compared by value, not by text
//! - A diff engine producing `DROP TABLE`, `CREATE TABLE` and
//!   `ALTER TABLE` changes in a fixed, deterministic order
//! - A MySQL dialect rendering those changes byte-for-byte
//!
//! ## Diffing two schemas
//!
//! ```rust
//! use oxide_ddl_core::{diff_strings, DiffOptions};
//!
//! let before = "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL );";
//! let after = "CREATE TABLE `fuga` ( `id` BIGINT NOT NULL );";
//!
//! let mut out = Vec::new();
//! diff_strings(&mut out, before, after, &DiffOptions::default()).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "ALTER TABLE `fuga` CHANGE COLUMN `id` `id` BIGINT NOT NULL;"
//! );
//! ```
//!
//! Schemas that differ only in formatting, quoting or keyword case diff to
//! nothing:
//!
//! ```rust
//! use oxide_ddl_core::{diff, parse_schema};
//!
//! let a = "CREATE TABLE t (id INT NOT NULL DEFAULT '0') ENGINE=InnoDB;";
//! let b = "create table `t` (\n  `id` int default \"0\" not null\n) engine = InnoDB";
//! assert!(diff(a, b).unwrap().is_empty());
//! assert_eq!(parse_schema(a).unwrap(), parse_schema(b).unwrap());
//! ```

pub mod dialect;
pub mod diff;
pub mod error;
mod generate;
pub mod lexer;
pub mod parser;
pub mod schema;

pub use dialect::{Dialect, MysqlDialect};
pub use diff::{AlterAction, AlterTable, Change, apply_changes, diff_schemas};
pub use error::{Error, Input, Result};
pub use generate::{DiffOptions, diff, diff_strings, format_schema, parse_schema};
pub use lexer::{LexError, Span};
pub use parser::{ParseError, Parser};
pub use schema::{Column, Index, PrimaryKey, Schema, SchemaError, Table};
