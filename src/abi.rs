//! Solidity ABI front end
//!
//! Derives a [`ContractDescriptor`] from a contract's ABI JSON, producing the
//! method signatures a generated web3j wrapper exposes: a gas-provider
//! `deploy` built from the constructor, read-only calls returning their
//! mapped output type, and transactions returning a `TransactionReceipt`.

use crate::contract::{ContractDescriptor, MethodDescriptor, TypeRef};
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// One entry of the ABI array
#[derive(Debug, Clone, Deserialize)]
struct AbiEntry {
    #[serde(rename = "type", default = "default_entry_type")]
    entry_type: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<AbiParameter>,
    #[serde(default)]
    outputs: Vec<AbiParameter>,
    #[serde(rename = "stateMutability", default)]
    state_mutability: Option<String>,
    /// Pre-0.4.16 compilers
    #[serde(default)]
    constant: Option<bool>,
    #[serde(default)]
    payable: Option<bool>,
}

/// ABI parameter definition
#[derive(Debug, Clone, Deserialize)]
struct AbiParameter {
    #[serde(rename = "type")]
    param_type: String,
    #[serde(rename = "internalType", default)]
    internal_type: Option<String>,
}

fn default_entry_type() -> String {
    "function".to_string()
}

impl AbiEntry {
    fn is_read_only(&self) -> bool {
        match self.state_mutability.as_deref() {
            Some("view") | Some("pure") => true,
            Some(_) => false,
            None => self.constant.unwrap_or(false),
        }
    }

    fn is_payable(&self) -> bool {
        match self.state_mutability.as_deref() {
            Some(m) => m == "payable",
            None => self.payable.unwrap_or(false),
        }
    }
}

/// Build a descriptor from ABI JSON text
pub fn contract_from_abi(name: &str, package: Option<&str>, json: &str) -> Result<ContractDescriptor> {
    let value: Value = serde_json::from_str(json).map_err(|e| Error::ContractParse(e.to_string()))?;
    contract_from_abi_value(name, package, &value)
}

/// Build a descriptor from an already parsed ABI array
pub fn contract_from_abi_value(
    name: &str,
    package: Option<&str>,
    value: &Value,
) -> Result<ContractDescriptor> {
    if !value.is_array() {
        return Err(Error::ContractParse("ABI must be an array".into()));
    }
    let entries: Vec<AbiEntry> =
        serde_json::from_value(value.clone()).map_err(|e| Error::ContractParse(e.to_string()))?;

    let mut methods = Vec::new();

    // Every wrapper has a deploy, even without an explicit constructor
    let constructor = entries.iter().find(|e| e.entry_type == "constructor");
    let mut deploy_params = vec![
        TypeRef::Web3j,
        TypeRef::TransactionManager,
        TypeRef::ContractGasProvider,
    ];
    if let Some(ctor) = constructor {
        for input in &ctor.inputs {
            deploy_params.push(solidity_type(input)?);
        }
        if ctor.is_payable() {
            // initialWeiValue
            deploy_params.push(TypeRef::BigInteger);
        }
    }
    methods.push(MethodDescriptor::new(
        "deploy",
        deploy_params,
        TypeRef::Named(name.to_string()),
    ));

    for entry in entries.iter().filter(|e| e.entry_type == "function") {
        if entry.name.is_empty() {
            return Err(Error::ContractParse("ABI function without a name".into()));
        }
        let params = entry
            .inputs
            .iter()
            .map(solidity_type)
            .collect::<Result<Vec<_>>>()?;

        let returns = if entry.is_read_only() {
            let mut outputs = entry
                .outputs
                .iter()
                .map(solidity_type)
                .collect::<Result<Vec<_>>>()?;
            match outputs.len() {
                0 => TypeRef::Void,
                1 => outputs.remove(0),
                _ => TypeRef::Tuple(outputs),
            }
        } else {
            TypeRef::TransactionReceipt
        };

        let mut params = params;
        if !entry.is_read_only() && entry.is_payable() {
            // weiValue
            params.push(TypeRef::BigInteger);
        }
        methods.push(MethodDescriptor::new(entry.name.clone(), params, returns));
    }

    let contract = ContractDescriptor {
        name: name.to_string(),
        package: package.map(String::from),
        methods,
    };
    contract.validate()?;
    Ok(contract)
}

/// Map a Solidity ABI type onto the wrapper's Java type
fn solidity_type(param: &AbiParameter) -> Result<TypeRef> {
    map_solidity(&param.param_type, param.internal_type.as_deref())
}

fn map_solidity(ty: &str, internal_type: Option<&str>) -> Result<TypeRef> {
    if let Some(open) = ty.rfind('[') {
        if ty.ends_with(']') {
            let inner_internal = internal_type.and_then(|it| it.rfind('[').map(|i| &it[..i]));
            let elem = map_solidity(&ty[..open], inner_internal)?;
            return Ok(TypeRef::List(Box::new(elem)));
        }
    }

    let mapped = match ty {
        "address" | "string" => TypeRef::String,
        "bool" => TypeRef::Boolean,
        "function" => TypeRef::Bytes,
        "tuple" => TypeRef::Named(struct_name(internal_type)),
        t if is_sized(t, "uint") || is_sized(t, "int") => TypeRef::BigInteger,
        t if is_sized(t, "bytes") => TypeRef::Bytes,
        other => {
            return Err(Error::ContractParse(format!(
                "unsupported Solidity type: {}",
                other
            )))
        }
    };
    Ok(mapped)
}

fn is_sized(ty: &str, prefix: &str) -> bool {
    ty.strip_prefix(prefix)
        .is_some_and(|size| size.chars().all(|c| c.is_ascii_digit()))
}

/// `struct Registry.Entry` → `Entry`
fn struct_name(internal_type: Option<&str>) -> String {
    internal_type
        .and_then(|it| it.strip_prefix("struct "))
        .map(|it| it.rsplit('.').next().unwrap_or(it).to_string())
        .unwrap_or_else(|| "DynamicStruct".to_string())
}
