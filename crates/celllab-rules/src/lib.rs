//! Transition rule tables for celllab.
//!
//! A [`RuleTable`] maps an oriented pair state `(tail, head, orientation)`
//! to at most one [`Rule`]: the pair state it becomes, the rate at which
//! that happens, and a process label. Tables are validated once at
//! construction and are immutable afterwards.
//!
//! Tables can be written in Rust as a list of [`RuleSpec`] records or
//! loaded from TOML with [`RuleTable::from_toml_str`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod loader;
pub mod rule;
pub mod table;

pub use rule::{Rule, RuleSpec};
pub use table::RuleTable;
