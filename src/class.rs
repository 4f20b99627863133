//! Test class assembly and writing
//!
//! Collects the generated methods of one contract into a `<Contract>Test`
//! type with a single holder field and the `@EVMTest` runner annotation,
//! then hands it to a [`SourceEmitter`] and the [`writer`](crate::writer).

use crate::classify::{classify, MethodCategory};
use crate::contract::{ContractDescriptor, TypeRef};
use crate::emit::SourceEmitter;
use crate::error::{Error, Result};
use crate::filter::select_methods;
use crate::method::{assemble_method, GeneratedMethodDecl};
use crate::statement::{holder_name, StatementTemplateBuilder};
use crate::writer::write_source;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// Runtimes older than this cannot run the runner's default node
pub const GETH_FALLBACK_BELOW: u32 = 11;

/// Suffix appended to the contract name for the test class
pub const TEST_CLASS_SUFFIX: &str = "Test";

/// Node implementation selectable on the `@EVMTest` annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum NodeType {
    Geth,
    Besu,
    OpenEthereum,
    Embedded,
}

impl NodeType {
    /// Enum constant name on `org.web3j.NodeType`
    pub fn constant(self) -> &'static str {
        match self {
            NodeType::Geth => "GETH",
            NodeType::Besu => "BESU",
            NodeType::OpenEthereum => "OPEN_ETHEREUM",
            NodeType::Embedded => "EMBEDDED",
        }
    }
}

impl FromStr for NodeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "geth" => Ok(NodeType::Geth),
            "besu" => Ok(NodeType::Besu),
            "open-ethereum" | "openethereum" => Ok(NodeType::OpenEthereum),
            "embedded" => Ok(NodeType::Embedded),
            other => Err(Error::Config(format!("unknown node type: {}", other))),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.constant())
    }
}

/// Inputs to one generation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Package of the generated test class
    pub package: String,
    /// Existing directory the package path is created under
    pub output_dir: PathBuf,
    /// Major version of the runtime the tests will run on
    pub target_runtime_version: u32,
    /// Forces the annotation's node type regardless of runtime version
    pub node_type: Option<NodeType>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            package: crate::config::DEFAULT_PACKAGE.to_string(),
            output_dir: PathBuf::from("."),
            target_runtime_version: crate::config::DEFAULT_RUNTIME_VERSION,
            node_type: None,
        }
    }
}

/// The `@org.web3j.EVMTest` annotation on the test class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunnerAnnotation {
    /// `type = NodeType.X` member; `None` keeps the annotation's default
    pub node_type: Option<NodeType>,
}

impl RunnerAnnotation {
    pub const PACKAGE: &'static str = "org.web3j";
    pub const NAME: &'static str = "EVMTest";
    pub const NODE_TYPE_CLASS: &'static str = "NodeType";

    /// Pick the node-type member for a target runtime
    pub fn for_runtime(target_runtime_version: u32, forced: Option<NodeType>) -> Self {
        let node_type = forced.or_else(|| {
            (target_runtime_version < GETH_FALLBACK_BELOW).then_some(NodeType::Geth)
        });
        Self { node_type }
    }
}

/// The single field referencing the contract under test
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolderField {
    pub ty: TypeRef,
    pub name: String,
}

/// A complete test class, created and written once per contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedClassDecl {
    pub package: String,
    pub name: String,
    pub contract_name: String,
    /// Package of the contract wrapper when it differs from `package`
    pub contract_package: Option<String>,
    pub annotation: RunnerAnnotation,
    pub holder: HolderField,
    pub methods: Vec<GeneratedMethodDecl>,
}

impl GeneratedClassDecl {
    /// Methods that run once before all tests
    pub fn fixtures(&self) -> impl Iterator<Item = &GeneratedMethodDecl> {
        self.methods
            .iter()
            .filter(|m| m.category == MethodCategory::FixtureInjection)
    }

    /// Instance test methods
    pub fn tests(&self) -> impl Iterator<Item = &GeneratedMethodDecl> {
        self.methods
            .iter()
            .filter(|m| m.category == MethodCategory::RegularAssertion)
    }

    /// File name for a given source extension
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.name, extension)
    }
}

/// Builds the test class for one contract
pub struct ClassAssembler<'a> {
    contract: &'a ContractDescriptor,
    options: &'a GenerationOptions,
}

impl<'a> ClassAssembler<'a> {
    pub fn new(contract: &'a ContractDescriptor, options: &'a GenerationOptions) -> Self {
        Self { contract, options }
    }

    /// Classify every selected method and assemble the class declaration
    pub fn assemble(&self) -> GeneratedClassDecl {
        let builder = StatementTemplateBuilder::new(self.contract);

        let methods = select_methods(self.contract)
            .into_iter()
            .map(|selected| {
                let category = classify(selected.method);
                debug!(
                    contract = %self.contract.name,
                    method = %selected.unique_name,
                    ?category,
                    "classified method"
                );
                let body = builder.build_for(selected.method, category);
                assemble_method(selected.unique_name, category, body)
            })
            .collect();

        let contract_package = self
            .contract
            .package
            .clone()
            .filter(|p| p != &self.options.package);

        GeneratedClassDecl {
            package: self.options.package.clone(),
            name: format!("{}{}", self.contract.name, TEST_CLASS_SUFFIX),
            contract_name: self.contract.name.clone(),
            contract_package,
            annotation: RunnerAnnotation::for_runtime(
                self.options.target_runtime_version,
                self.options.node_type,
            ),
            holder: HolderField {
                ty: self.contract.as_type(),
                name: holder_name(self.contract),
            },
            methods,
        }
    }

    /// Assemble, emit and write the class; returns the written path
    pub fn assemble_and_write(&self, emitter: &dyn SourceEmitter) -> Result<PathBuf> {
        let class = self.assemble();
        let source = emitter.emit(&class)?;
        let file_name = class.file_name(emitter.language().extension());
        write_source(&self.options.output_dir, &class.package, &file_name, &source)
    }
}

/// Generate and write the test class for `contract`
pub fn generate_test_class(
    contract: &ContractDescriptor,
    options: &GenerationOptions,
    emitter: &dyn SourceEmitter,
) -> Result<PathBuf> {
    ClassAssembler::new(contract, options).assemble_and_write(emitter)
}
