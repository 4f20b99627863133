//! Contract descriptors: the statically typed input model
//!
//! A `ContractDescriptor` enumerates the methods a compiled contract wrapper
//! exposes: each method's name, its ordered parameter types and its return
//! type. Descriptors are written by hand (YAML/JSON) or derived from a
//! Solidity ABI (see [`crate::abi`]).
//!
//! ## Example Descriptor
//!
//! ```yaml
//! name: Greeter
//! package: org.example.contracts
//! methods:
//!   - name: deploy
//!     params: [Web3j, TransactionManager, ContractGasProvider, String]
//!     returns: Greeter
//!   - name: greet
//!     returns: String
//!   - name: newGreeting
//!     params: [String]
//!     returns: TransactionReceipt
//! ```

use crate::error::{Error, Result};
use crate::util::{lower_first, simple_name, to_pascal_case};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A type tag for a parameter or return value
///
/// Spelled the way a Java signature spells it: `String`, `BigInteger`,
/// `List<BigInteger>`, `Tuple<String, Boolean>`, `byte[]`, `void`, or any
/// other (optionally qualified) class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    Web3j,
    TransactionManager,
    ContractGasProvider,
    Credentials,
    TransactionReceipt,
    String,
    BigInteger,
    Boolean,
    /// `byte[]`
    Bytes,
    Void,
    List(Box<TypeRef>),
    Tuple(Vec<TypeRef>),
    /// Any other class, simple (`Greeter`) or qualified (`org.example.Greeter`)
    Named(String),
}

impl TypeRef {
    /// Parse a Java-like type spelling
    pub fn parse(s: &str) -> Result<TypeRef> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::ContractParse("empty type name".into()));
        }

        if let Some(inner) = s.strip_suffix("[]") {
            return match inner.trim() {
                "byte" => Ok(TypeRef::Bytes),
                other => Ok(TypeRef::List(Box::new(TypeRef::parse(other)?))),
            };
        }

        if let Some((head, rest)) = s.split_once('<') {
            let args = rest
                .strip_suffix('>')
                .ok_or_else(|| Error::ContractParse(format!("unbalanced generic type: {}", s)))?;
            let args = split_type_args(args)?
                .into_iter()
                .map(TypeRef::parse)
                .collect::<Result<Vec<_>>>()?;
            let head = simple_name(head.trim());

            return match head {
                "List" => match <[TypeRef; 1]>::try_from(args) {
                    Ok([elem]) => Ok(TypeRef::List(Box::new(elem))),
                    Err(_) => Err(Error::ContractParse(format!(
                        "List takes exactly one type argument: {}",
                        s
                    ))),
                },
                h if is_tuple_name(h) => {
                    if args.is_empty() {
                        return Err(Error::ContractParse(format!("empty tuple: {}", s)));
                    }
                    Ok(TypeRef::Tuple(args))
                }
                other => Err(Error::ContractParse(format!(
                    "unsupported generic type '{}' in {}",
                    other, s
                ))),
            };
        }

        let parsed = match s {
            "Web3j" | "org.web3j.protocol.Web3j" => TypeRef::Web3j,
            "TransactionManager" | "org.web3j.tx.TransactionManager" => {
                TypeRef::TransactionManager
            }
            "ContractGasProvider" | "org.web3j.tx.gas.ContractGasProvider" => {
                TypeRef::ContractGasProvider
            }
            "Credentials" | "org.web3j.crypto.Credentials" => TypeRef::Credentials,
            "TransactionReceipt" | "org.web3j.protocol.core.methods.response.TransactionReceipt" => {
                TypeRef::TransactionReceipt
            }
            "String" | "java.lang.String" => TypeRef::String,
            "BigInteger" | "java.math.BigInteger" => TypeRef::BigInteger,
            "Boolean" | "boolean" | "java.lang.Boolean" => TypeRef::Boolean,
            "void" | "Void" | "java.lang.Void" => TypeRef::Void,
            other => {
                if !other
                    .split('.')
                    .all(|seg| is_identifier(seg))
                {
                    return Err(Error::ContractParse(format!("invalid type name: {}", other)));
                }
                TypeRef::Named(other.to_string())
            }
        };
        Ok(parsed)
    }

    /// Stem used for local variable names (`stringVar`, `tuple2Var`, ...)
    pub fn var_stem(&self) -> String {
        match self {
            TypeRef::Web3j => "web3j".into(),
            TypeRef::TransactionManager => "transactionManager".into(),
            TypeRef::ContractGasProvider => "contractGasProvider".into(),
            TypeRef::Credentials => "credentials".into(),
            TypeRef::TransactionReceipt => "transactionReceipt".into(),
            TypeRef::String => "string".into(),
            TypeRef::BigInteger => "bigInteger".into(),
            TypeRef::Boolean => "boolean".into(),
            TypeRef::Bytes => "bytes".into(),
            TypeRef::Void => "void".into(),
            TypeRef::List(_) => "list".into(),
            TypeRef::Tuple(items) => format!("tuple{}", items.len()),
            TypeRef::Named(name) => lower_first(simple_name(name)),
        }
    }

    /// Package and simple name of the fixed library classes
    ///
    /// Returns `None` for language built-ins, collections, tuples and
    /// `Named` types, which the emitters resolve themselves.
    pub fn library_class(&self) -> Option<(&'static str, &'static str)> {
        match self {
            TypeRef::Web3j => Some(("org.web3j.protocol", "Web3j")),
            TypeRef::TransactionManager => Some(("org.web3j.tx", "TransactionManager")),
            TypeRef::ContractGasProvider => Some(("org.web3j.tx.gas", "ContractGasProvider")),
            TypeRef::Credentials => Some(("org.web3j.crypto", "Credentials")),
            TypeRef::TransactionReceipt => Some((
                "org.web3j.protocol.core.methods.response",
                "TransactionReceipt",
            )),
            TypeRef::BigInteger => Some(("java.math", "BigInteger")),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Web3j => write!(f, "Web3j"),
            TypeRef::TransactionManager => write!(f, "TransactionManager"),
            TypeRef::ContractGasProvider => write!(f, "ContractGasProvider"),
            TypeRef::Credentials => write!(f, "Credentials"),
            TypeRef::TransactionReceipt => write!(f, "TransactionReceipt"),
            TypeRef::String => write!(f, "String"),
            TypeRef::BigInteger => write!(f, "BigInteger"),
            TypeRef::Boolean => write!(f, "Boolean"),
            TypeRef::Bytes => write!(f, "byte[]"),
            TypeRef::Void => write!(f, "void"),
            TypeRef::List(elem) => write!(f, "List<{}>", elem),
            TypeRef::Tuple(items) => {
                let items: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "Tuple<{}>", items.join(", "))
            }
            TypeRef::Named(name) => write!(f, "{}", name),
        }
    }
}

impl TryFrom<String> for TypeRef {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        TypeRef::parse(&s)
    }
}

impl From<TypeRef> for String {
    fn from(t: TypeRef) -> Self {
        t.to_string()
    }
}

fn is_tuple_name(name: &str) -> bool {
    name.strip_prefix("Tuple")
        .is_some_and(|n| n.chars().all(|c| c.is_ascii_digit()))
}

fn is_identifier(seg: &str) -> bool {
    let mut chars = seg.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Split generic arguments on top-level commas
fn split_type_args(args: &str) -> Result<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        if depth < 0 {
            return Err(Error::ContractParse(format!("unbalanced generic arguments: {}", args)));
        }
    }
    if depth != 0 {
        return Err(Error::ContractParse(format!("unbalanced generic arguments: {}", args)));
    }
    let last = args[start..].trim();
    if !last.is_empty() {
        parts.push(last);
    }
    Ok(parts)
}

fn void_type() -> TypeRef {
    TypeRef::Void
}

/// A method signature taken from a compiled contract wrapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MethodDescriptor {
    /// Method name as declared on the wrapper
    pub name: String,

    /// Ordered parameter types
    #[serde(default)]
    #[schemars(with = "Vec<String>")]
    pub params: Vec<TypeRef>,

    /// Return type (`void` when omitted)
    #[serde(default = "void_type")]
    #[schemars(with = "String")]
    pub returns: TypeRef,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>, params: Vec<TypeRef>, returns: TypeRef) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
        }
    }
}

/// A compiled contract wrapper, described ahead of time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(
    title = "unitgen contract",
    description = "Method signatures of a smart-contract wrapper class"
)]
pub struct ContractDescriptor {
    /// Simple class name of the wrapper (e.g. `Greeter`)
    pub name: String,

    /// Package of the wrapper class; defaults to the test package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    /// Declared methods, in declaration order
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

impl ContractDescriptor {
    /// Parse a descriptor from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let contract: ContractDescriptor =
            serde_norway::from_str(yaml).map_err(|e| Error::ContractParse(e.to_string()))?;
        contract.validate()?;
        Ok(contract)
    }

    /// Parse a descriptor from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let contract: ContractDescriptor =
            serde_json::from_str(json).map_err(|e| Error::ContractParse(e.to_string()))?;
        contract.validate()?;
        Ok(contract)
    }

    /// Derive a descriptor from Solidity ABI JSON
    pub fn from_abi_json(name: &str, package: Option<&str>, json: &str) -> Result<Self> {
        crate::abi::contract_from_abi(name, package, json)
    }

    /// Load a descriptor file, accepting YAML/JSON descriptors and ABI files
    ///
    /// A JSON file holding an array (raw ABI) or an object with an `abi`
    /// member (build artifact) is read as an ABI. `name` and `package`
    /// override whatever the file provides; an ABI without a contract name
    /// takes its name from the file stem.
    pub fn from_path(path: &Path, name: Option<&str>, package: Option<&str>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let mut contract = match ext.as_deref() {
            Some("json") | Some("abi") => {
                let value: serde_json::Value = serde_json::from_str(&content)
                    .map_err(|e| Error::ContractParse(e.to_string()))?;
                let stem_name = || {
                    path.file_stem()
                        .and_then(|s| s.to_str())
                        .map(to_pascal_case)
                        .unwrap_or_default()
                };
                match &value {
                    serde_json::Value::Array(_) => {
                        let name = name.map(String::from).unwrap_or_else(stem_name);
                        crate::abi::contract_from_abi_value(&name, package, &value)?
                    }
                    serde_json::Value::Object(map) if map.contains_key("abi") => {
                        let name = name
                            .map(String::from)
                            .or_else(|| {
                                map.get("contractName")
                                    .and_then(|v| v.as_str())
                                    .map(String::from)
                            })
                            .unwrap_or_else(stem_name);
                        crate::abi::contract_from_abi_value(&name, package, &map["abi"])?
                    }
                    _ => Self::from_json(&content)?,
                }
            }
            _ => Self::from_yaml(&content)?,
        };

        if let Some(name) = name {
            contract.name = name.to_string();
        }
        if let Some(package) = package {
            contract.package = Some(package.to_string());
        }
        contract.validate()?;
        Ok(contract)
    }

    /// Check names are usable as Java/Kotlin identifiers
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.name) {
            return Err(Error::ContractParse(format!(
                "contract name '{}' is not a valid class name",
                self.name
            )));
        }
        if let Some(package) = &self.package {
            if !package.split('.').all(is_identifier) {
                return Err(Error::ContractParse(format!(
                    "contract package '{}' is not a valid package name",
                    package
                )));
            }
        }
        for method in &self.methods {
            if !is_identifier(&method.name) {
                return Err(Error::ContractParse(format!(
                    "method name '{}' on {} is not a valid identifier",
                    method.name, self.name
                )));
            }
        }
        Ok(())
    }

    /// Whether `ty` names this contract's own wrapper class
    pub fn is_contract_type(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Named(name) => match name.rsplit_once('.') {
                Some((pkg, simple)) => {
                    simple == self.name && self.package.as_deref().is_none_or(|p| p == pkg)
                }
                None => name == &self.name,
            },
            _ => false,
        }
    }

    /// The contract's own class as a type tag
    pub fn as_type(&self) -> TypeRef {
        TypeRef::Named(self.name.clone())
    }
}
