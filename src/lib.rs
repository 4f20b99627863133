// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # unitgen: unit test generation for smart-contract wrappers
//!
//! Generates JUnit 5 test classes (Java or Kotlin) for web3j contract
//! wrappers, plus the Java boilerplate those wrappers depend on (sized ABI
//! types and tuple classes).
//!
//! ## Core Concept
//!
//! A **contract descriptor** lists the methods a wrapper exposes. Every
//! method is classified by its parameter types:
//!
//! - A method taking the whole **fixture triad** (`Web3j`,
//!   `TransactionManager`, `ContractGasProvider`) deploys the contract. It
//!   becomes a static `@BeforeAll` fixture that assigns the holder field.
//! - Every other method becomes an `@Test` that invokes it with placeholder
//!   arguments and asserts on the result.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use unitgen::{generate_test_class, ContractDescriptor, GenerationOptions, JavaEmitter};
//!
//! let contract = ContractDescriptor::from_yaml(r#"
//! name: Greeter
//! methods:
//!   - name: deploy
//!     params: [Web3j, TransactionManager, ContractGasProvider, String]
//!     returns: Greeter
//!   - name: greet
//!     returns: String
//! "#)?;
//!
//! let options = GenerationOptions {
//!     package: "org.example".into(),
//!     output_dir: "src/test/java".into(),
//!     ..Default::default()
//! };
//! let path = generate_test_class(&contract, &options, &JavaEmitter)?;
//! println!("wrote {}", path.display());
//! # Ok::<(), unitgen::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! descriptor (YAML / JSON / ABI)
//!      │
//!      ├──► select_methods ──► classify ──► StatementTemplateBuilder
//!      │                                          │
//!      │                              assemble_method
//!      │                                          │
//!      └──────────────────────────► ClassAssembler ──► SourceEmitter ──► write_source
//! ```
//!
//! Output is deterministic: the same descriptor and options always produce
//! byte-identical files.

pub mod abi;
pub mod class;
pub mod classify;
pub mod config;
pub mod contract;
pub mod emit;
pub mod error;
pub mod filter;
pub mod method;
pub mod statement;
pub mod util;
pub mod wrapper;
pub mod writer;

// Re-exports
pub use abi::contract_from_abi;
pub use class::{
    generate_test_class, ClassAssembler, GeneratedClassDecl, GenerationOptions, HolderField,
    NodeType, RunnerAnnotation,
};
pub use classify::{classify, MethodCategory, FIXTURE_TRIAD};
pub use config::{MergedConfig, Overrides, UnitgenConfig};
pub use contract::{ContractDescriptor, MethodDescriptor, TypeRef};
pub use emit::{emitter_for, JavaEmitter, KotlinEmitter, Language, SourceEmitter};
pub use error::{Error, Result};
pub use filter::{select_methods, SelectedMethod};
pub use method::{assemble_method, GeneratedMethodDecl, MethodAnnotation, Modifier, Parameter};
pub use statement::{
    argument_value, build_statements, DefaultValue, StatementKind, StatementTemplate,
    StatementTemplateBuilder, TemplateArg,
};
pub use wrapper::{generate_abi_types, generate_tuples};
pub use writer::write_source;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
