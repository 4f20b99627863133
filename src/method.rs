//! Generated method declarations
//!
//! Wraps a statement sequence into a named method: fixture methods run once
//! before all tests and take the injected triad, regular methods are plain
//! instance tests without parameters.

use crate::classify::{MethodCategory, FIXTURE_TRIAD};
use crate::contract::TypeRef;
use crate::statement::{fixture_param_name, StatementTemplate};
use serde::Serialize;

/// JUnit 5 annotation placed on a generated method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MethodAnnotation {
    /// `org.junit.jupiter.api.Test`
    Test,
    /// `org.junit.jupiter.api.BeforeAll`
    BeforeAll,
}

impl MethodAnnotation {
    pub fn package(self) -> &'static str {
        "org.junit.jupiter.api"
    }

    pub fn simple_name(self) -> &'static str {
        match self {
            MethodAnnotation::Test => "Test",
            MethodAnnotation::BeforeAll => "BeforeAll",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Modifier {
    Public,
    Static,
}

impl Modifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Static => "static",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub ty: TypeRef,
    pub name: String,
}

/// A test or fixture method ready for emission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedMethodDecl {
    pub name: String,
    pub category: MethodCategory,
    pub annotation: MethodAnnotation,
    pub modifiers: Vec<Modifier>,
    pub params: Vec<Parameter>,
    pub body: Vec<StatementTemplate>,
}

impl GeneratedMethodDecl {
    /// Belongs to the type rather than to instances
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }
}

/// Fixture parameters in canonical order: client, transaction manager, gas provider
pub fn fixture_parameters() -> Vec<Parameter> {
    FIXTURE_TRIAD
        .iter()
        .map(|ty| Parameter {
            ty: ty.clone(),
            name: fixture_param_name(ty).unwrap_or_default().to_string(),
        })
        .collect()
}

/// Assemble a method declaration from its name, category and body
pub fn assemble_method(
    name: impl Into<String>,
    category: MethodCategory,
    body: Vec<StatementTemplate>,
) -> GeneratedMethodDecl {
    let name = name.into();
    match category {
        MethodCategory::FixtureInjection => GeneratedMethodDecl {
            name,
            category,
            annotation: MethodAnnotation::BeforeAll,
            modifiers: vec![Modifier::Static],
            params: fixture_parameters(),
            body,
        },
        MethodCategory::RegularAssertion => GeneratedMethodDecl {
            name,
            category,
            annotation: MethodAnnotation::Test,
            modifiers: vec![Modifier::Public],
            params: Vec::new(),
            body,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_method_shape() {
        let m = assemble_method("deploy", MethodCategory::FixtureInjection, vec![]);

        assert_eq!(m.annotation, MethodAnnotation::BeforeAll);
        assert!(m.is_static());
        let names: Vec<&str> = m.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["web3j", "transactionManager", "contractGasProvider"]);
        assert_eq!(m.params[2].ty, TypeRef::ContractGasProvider);
    }

    #[test]
    fn test_regular_method_shape() {
        let m = assemble_method("greet", MethodCategory::RegularAssertion, vec![]);

        assert_eq!(m.annotation, MethodAnnotation::Test);
        assert!(!m.is_static());
        assert_eq!(m.modifiers, vec![Modifier::Public]);
        assert!(m.params.is_empty());
    }
}
