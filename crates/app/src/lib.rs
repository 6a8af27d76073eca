//! Inventory domain, persistence and spreadsheet modules shared by the CLI and
//! the JSON server.

pub mod context;
pub mod database;
pub mod domain;
pub mod spreadsheet;

#[cfg(test)]
mod test;

mod uuids;
