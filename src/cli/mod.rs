//! CLI command implementations
//!
//! - `generate`: test class generation from a contract descriptor
//! - `wrapper`: ABI type and tuple boilerplate
//! - `schema`: JSON schemas for input files

pub mod generate;
pub mod schema;
pub mod wrapper;

pub use generate::{cmd_generate, GenerateArgs};
pub use schema::cmd_schema;
pub use wrapper::{cmd_abi_types, cmd_tuples};
