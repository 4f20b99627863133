//! Method selection for test generation
//!
//! Wrapper classes carry helpers that are not worth testing (event
//! accessors, `load`, `kill`, address getters) and legacy `deploy`
//! overloads. The remaining methods each get a test-method name that is
//! unique within the generated class.

use crate::classify::{classify, MethodCategory};
use crate::contract::{ContractDescriptor, MethodDescriptor};
use std::collections::HashMap;

/// Wrapper helpers that never get a test
const EXCLUDED_METHODS: &[&str] = &[
    "load",
    "kill",
    "linkLibraries",
    "setContractAddress",
    "getContractAddress",
    "getDeployedAddress",
    "isValid",
];

/// A method selected for testing, with its unique test-method name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedMethod<'a> {
    pub unique_name: String,
    pub method: &'a MethodDescriptor,
}

/// Whether a method gets a generated test
pub fn is_testable(method: &MethodDescriptor) -> bool {
    if method.name.to_lowercase().contains("event") {
        return false;
    }
    if EXCLUDED_METHODS.contains(&method.name.as_str()) {
        return false;
    }
    if method.name == "deploy" {
        return classify(method) == MethodCategory::FixtureInjection;
    }
    true
}

/// Testable methods of a contract in declaration order, uniquely named
///
/// The first occurrence keeps the method's name; later overloads get a
/// counter suffix (`deploy`, `deploy1`, `deploy2`).
pub fn select_methods(contract: &ContractDescriptor) -> Vec<SelectedMethod<'_>> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut taken: Vec<String> = Vec::new();
    let mut selected = Vec::new();

    for method in contract.methods.iter().filter(|m| is_testable(m)) {
        let count = seen.entry(method.name.as_str()).or_insert(0);
        let mut unique_name = if *count == 0 {
            method.name.clone()
        } else {
            format!("{}{}", method.name, count)
        };
        *count += 1;

        // `foo1` may already be a declared method name
        while taken.contains(&unique_name) {
            unique_name = format!("{}{}", method.name, count);
            *count += 1;
        }
        taken.push(unique_name.clone());

        selected.push(SelectedMethod {
            unique_name,
            method,
        });
    }

    selected
}
