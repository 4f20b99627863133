//! Statement templates for generated test bodies
//!
//! Each contract method becomes one invocation statement and, for regular
//! test methods, one assertion statement on the invocation's result. A
//! statement is a template text with placeholder markers plus the ordered
//! values substituted into it:
//!
//! | Marker | Value                          | Example output          |
//! |--------|--------------------------------|-------------------------|
//! | `$T`   | [`TemplateArg::Type`]          | `Assertions`            |
//! | `$N`   | [`TemplateArg::Name`]          | `greeter`               |
//! | `$L`   | [`TemplateArg::Value`]         | `BigInteger.ONE`        |
//! | `$S`   | [`TemplateArg::Str`]           | `"REPLACE_ME"`          |
//! | `$D`   | [`TemplateArg::Local`]         | `String stringVar`      |
//! | `$$`   | (none)                         | `$`                     |
//!
//! Templates are language neutral; the emitters decide how each value is
//! spelled in Java or Kotlin.

use crate::classify::{classify, MethodCategory};
use crate::contract::{ContractDescriptor, MethodDescriptor, TypeRef};
use crate::error::{Error, Result};
use crate::util::identifier_for;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Placeholder for values a developer is expected to fill in
pub const REPLACE_ME: &str = "REPLACE_ME";

/// Byte length of the placeholder `byte[]` value
pub const DEFAULT_BYTES_LEN: usize = 32;

/// JUnit assertions class used by every assertion statement
pub const ASSERTIONS_CLASS: &str = "org.junit.jupiter.api.Assertions";

/// Role of a statement within a test method body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatementKind {
    Invocation,
    Assertion,
}

/// A language-neutral placeholder value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DefaultValue {
    /// A string literal
    Str(String),
    /// `BigInteger.ONE`
    BigIntegerOne,
    Bool(bool),
    /// A zero-filled byte array of the given length
    ZeroBytes(usize),
    /// An empty list of the element type
    EmptyList(TypeRef),
    /// A tuple built from component values
    Tuple(Vec<TypeRef>, Vec<DefaultValue>),
    Null,
    /// A reference to an in-scope variable or parameter
    Ident(String),
}

/// A value substituted into a template marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TemplateArg {
    Type(TypeRef),
    Name(String),
    Value(DefaultValue),
    Str(String),
    Local { ty: TypeRef, name: String },
}

/// One statement of a generated method body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementTemplate {
    pub kind: StatementKind,
    pub format: String,
    pub args: Vec<TemplateArg>,
}

/// A template segment with its value bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Piece<'a> {
    Text(&'a str),
    Type(&'a TypeRef),
    Name(&'a str),
    Value(&'a DefaultValue),
    Str(&'a str),
    Local(&'a TypeRef, &'a str),
}

static MARKER: OnceLock<Regex> = OnceLock::new();

fn marker_regex() -> &'static Regex {
    MARKER.get_or_init(|| Regex::new(r"\$([\s\S]?)").expect("marker regex is valid"))
}

impl StatementTemplate {
    pub fn new(kind: StatementKind, format: impl Into<String>, args: Vec<TemplateArg>) -> Self {
        Self {
            kind,
            format: format.into(),
            args,
        }
    }

    /// Pair every marker with its value
    ///
    /// Fails when the marker count differs from the value count, when a
    /// marker's kind does not match its value, or on an unknown marker.
    pub fn pieces(&self) -> Result<Vec<Piece<'_>>> {
        let mut pieces = Vec::new();
        let mut args = self.args.iter();
        let mut last = 0;

        for caps in marker_regex().captures_iter(&self.format) {
            let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
            if whole.start > last {
                pieces.push(Piece::Text(&self.format[last..whole.start]));
            }
            last = whole.end;

            let marker = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            if marker == "$" {
                pieces.push(Piece::Text("$"));
                continue;
            }

            let arg = args.next().ok_or_else(|| {
                Error::Template(format!(
                    "'{}' has more markers than values ({})",
                    self.format,
                    self.args.len()
                ))
            })?;

            let piece = match (marker, arg) {
                ("T", TemplateArg::Type(ty)) => Piece::Type(ty),
                ("N", TemplateArg::Name(name)) => Piece::Name(name),
                ("L", TemplateArg::Value(value)) => Piece::Value(value),
                ("S", TemplateArg::Str(s)) => Piece::Str(s),
                ("D", TemplateArg::Local { ty, name }) => Piece::Local(ty, name),
                ("T" | "N" | "L" | "S" | "D", other) => {
                    return Err(Error::Template(format!(
                        "marker ${} in '{}' cannot take {:?}",
                        marker, self.format, other
                    )))
                }
                (m, _) => {
                    return Err(Error::Template(format!(
                        "unknown marker '${}' in '{}'",
                        m, self.format
                    )))
                }
            };
            pieces.push(piece);
        }

        if last < self.format.len() {
            pieces.push(Piece::Text(&self.format[last..]));
        }
        if args.next().is_some() {
            return Err(Error::Template(format!(
                "'{}' has fewer markers than values ({})",
                self.format,
                self.args.len()
            )));
        }
        Ok(pieces)
    }
}

/// Placeholder value for a parameter or expected result of type `ty`
pub fn default_value(ty: &TypeRef) -> DefaultValue {
    match ty {
        TypeRef::String => DefaultValue::Str(REPLACE_ME.to_string()),
        TypeRef::BigInteger => DefaultValue::BigIntegerOne,
        TypeRef::Boolean => DefaultValue::Bool(true),
        TypeRef::Bytes => DefaultValue::ZeroBytes(DEFAULT_BYTES_LEN),
        TypeRef::List(elem) => DefaultValue::EmptyList((**elem).clone()),
        TypeRef::Tuple(items) => {
            DefaultValue::Tuple(items.clone(), items.iter().map(default_value).collect())
        }
        _ => DefaultValue::Null,
    }
}

/// Argument passed for a parameter of `ty`
///
/// Fixture methods receive the triad as parameters and forward it by name.
/// Test methods have no such parameters in scope, so the triad types get
/// their placeholder like any other type.
pub fn argument_value(ty: &TypeRef, category: MethodCategory) -> DefaultValue {
    match (category, fixture_param_name(ty)) {
        (MethodCategory::FixtureInjection, Some(name)) => DefaultValue::Ident(name.to_string()),
        _ => default_value(ty),
    }
}

/// Parameter name the fixture method declares for a triad type
pub fn fixture_param_name(ty: &TypeRef) -> Option<&'static str> {
    match ty {
        TypeRef::Web3j => Some("web3j"),
        TypeRef::TransactionManager => Some("transactionManager"),
        TypeRef::ContractGasProvider => Some("contractGasProvider"),
        _ => None,
    }
}

/// Name of the holder field for a contract
pub fn holder_name(contract: &ContractDescriptor) -> String {
    identifier_for(&contract.name)
}

/// Local variable receiving a method's result
pub fn result_var(method: &MethodDescriptor) -> String {
    format!("{}Var", method.returns.var_stem())
}

fn assertions() -> TypeRef {
    TypeRef::Named(ASSERTIONS_CLASS.to_string())
}

/// Builds the body statements for one contract method
pub struct StatementTemplateBuilder<'a> {
    contract: &'a ContractDescriptor,
    holder: String,
}

impl<'a> StatementTemplateBuilder<'a> {
    pub fn new(contract: &'a ContractDescriptor) -> Self {
        Self {
            contract,
            holder: holder_name(contract),
        }
    }

    /// Invocation template, followed by an assertion for regular methods
    pub fn build(&self, method: &MethodDescriptor) -> Vec<StatementTemplate> {
        self.build_for(method, classify(method))
    }

    /// Same as [`build`](Self::build) with the category already known
    pub fn build_for(
        &self,
        method: &MethodDescriptor,
        category: MethodCategory,
    ) -> Vec<StatementTemplate> {
        let mut body = vec![self.invocation(method)];
        if category.needs_assertion() {
            body.push(self.assertion(method));
        }
        body
    }

    /// The call into the contract, ending in `.send()`
    pub fn invocation(&self, method: &MethodDescriptor) -> StatementTemplate {
        let markers = vec!["$L"; method.params.len()].join(", ");
        let category = classify(method);
        let values = method
            .params
            .iter()
            .map(|p| TemplateArg::Value(argument_value(p, category)));

        if self.contract.is_contract_type(&method.returns) {
            let mut args = vec![
                TemplateArg::Name(self.holder.clone()),
                TemplateArg::Type(self.contract.as_type()),
                TemplateArg::Name(method.name.clone()),
            ];
            args.extend(values);
            StatementTemplate::new(
                StatementKind::Invocation,
                format!("$N = $T.$N({}).send()", markers),
                args,
            )
        } else {
            let mut args = vec![
                TemplateArg::Local {
                    ty: method.returns.clone(),
                    name: result_var(method),
                },
                TemplateArg::Name(self.holder.clone()),
                TemplateArg::Name(method.name.clone()),
            ];
            args.extend(values);
            StatementTemplate::new(
                StatementKind::Invocation,
                format!("$D = $N.$N({}).send()", markers),
                args,
            )
        }
    }

    /// The assertion on the invocation's result
    pub fn assertion(&self, method: &MethodDescriptor) -> StatementTemplate {
        if self.contract.is_contract_type(&method.returns) {
            return StatementTemplate::new(
                StatementKind::Assertion,
                "$T.assertNotNull($N)",
                vec![
                    TemplateArg::Type(assertions()),
                    TemplateArg::Name(self.holder.clone()),
                ],
            );
        }

        let var = result_var(method);
        let (format, expected) = match &method.returns {
            TypeRef::TransactionReceipt => ("$T.assertTrue($N.isStatusOK())", None),
            TypeRef::Void => ("$T.assertNull($N)", None),
            TypeRef::Bytes => (
                "$T.assertArrayEquals($L, $N)",
                Some(default_value(&TypeRef::Bytes)),
            ),
            other => ("$T.assertEquals($L, $N)", Some(default_value(other))),
        };

        let mut args = vec![TemplateArg::Type(assertions())];
        if let Some(expected) = expected {
            args.push(TemplateArg::Value(expected));
        }
        args.push(TemplateArg::Name(var));
        StatementTemplate::new(StatementKind::Assertion, format, args)
    }
}

/// Statement templates for `method` on `contract`
pub fn build_statements(
    method: &MethodDescriptor,
    contract: &ContractDescriptor,
) -> Vec<StatementTemplate> {
    StatementTemplateBuilder::new(contract).build(method)
}
