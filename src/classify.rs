//! Method classification
//!
//! A method whose parameters include the whole fixture triad (client handle,
//! transaction manager, gas provider) sets up the contract under test; every
//! other method is a test case whose result gets asserted.

use crate::contract::{MethodDescriptor, TypeRef};
use serde::Serialize;
use std::collections::HashSet;

/// The three parameter types whose joint presence marks a fixture method
pub const FIXTURE_TRIAD: [TypeRef; 3] = [
    TypeRef::Web3j,
    TypeRef::TransactionManager,
    TypeRef::ContractGasProvider,
];

/// What a contract method becomes in the generated test class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MethodCategory {
    /// Runs once before all tests, with the triad injected by the test runner
    FixtureInjection,
    /// A normal test that invokes the method and asserts on its result
    RegularAssertion,
}

impl MethodCategory {
    /// Assertions are emitted exactly when no fixture is injected
    pub fn needs_assertion(self) -> bool {
        !matches!(self, MethodCategory::FixtureInjection)
    }
}

/// Classify a method by its parameter-type set
///
/// Superset test: extra parameters beyond the triad do not matter, and a
/// partial triad classifies as a regular assertion.
pub fn classify(method: &MethodDescriptor) -> MethodCategory {
    let params: HashSet<&TypeRef> = method.params.iter().collect();
    if FIXTURE_TRIAD.iter().all(|t| params.contains(t)) {
        MethodCategory::FixtureInjection
    } else {
        MethodCategory::RegularAssertion
    }
}
