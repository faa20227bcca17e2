pub mod colors;
pub mod config;
pub mod dataset;
pub mod dedupe;
pub mod expand;
pub mod filter;
pub mod paths;
pub mod record;
pub mod roles;
pub mod span;
pub mod table;
pub mod tags;
pub mod warn;
