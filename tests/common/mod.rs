#![allow(dead_code)]

use widecol::{Client, ClientConfig, MemoryAdapter};

pub const PROJECT: &str = "proj";
pub const INSTANCE: &str = "inst";

/// Rows, in key order:
///
/// ```text
/// a       f:q1 @1 "x", @2 "y"
/// b       f:q1 @3 "z"            g:q2 @4 "w"
/// user#1  profile:email @10 "old@example.com", @20 "ada@example.com"
///         profile:name  @20 "Ada"
///         stats:visits  @5  "3"
/// user#2  profile:email @15 "bob@example.com"
///         profile:name  @15 "Bob"
/// user#3  stats:visits  @7  "9"
/// ```
pub fn store() -> MemoryAdapter {
    MemoryAdapter::new()
        .with_cell("a", "f", "q1", 1, "x")
        .with_cell("a", "f", "q1", 2, "y")
        .with_cell("b", "f", "q1", 3, "z")
        .with_cell("b", "g", "q2", 4, "w")
        .with_cell("user#1", "profile", "email", 10, "old@example.com")
        .with_cell("user#1", "profile", "email", 20, "ada@example.com")
        .with_cell("user#1", "profile", "name", 20, "Ada")
        .with_cell("user#1", "stats", "visits", 5, "3")
        .with_cell("user#2", "profile", "email", 15, "bob@example.com")
        .with_cell("user#2", "profile", "name", 15, "Bob")
        .with_cell("user#3", "stats", "visits", 7, "9")
}

pub fn config() -> ClientConfig {
    ClientConfig::new(PROJECT, INSTANCE)
}

pub fn client() -> Client<MemoryAdapter> {
    Client::new(config(), store())
}

pub fn client_with(store: MemoryAdapter) -> Client<MemoryAdapter> {
    Client::new(config(), store)
}

/// `projects/proj/instances/inst/tables/{table}`
pub fn table_path(table: &str) -> String {
    format!("projects/{PROJECT}/instances/{INSTANCE}/tables/{table}")
}
