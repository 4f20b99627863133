//! Source emitters
//!
//! A [`SourceEmitter`] turns an assembled [`GeneratedClassDecl`] into the
//! text of one source file. Java output is built from genco token streams;
//! Kotlin output is rendered from a MiniJinja template.

pub mod java;
pub mod kotlin;

pub use java::JavaEmitter;
pub use kotlin::KotlinEmitter;

use crate::class::GeneratedClassDecl;
use crate::error::{Error, Result};
use crate::util::simple_name;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Target language of the generated test class
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Java,
    #[serde(alias = "kt")]
    Kotlin,
}

impl Language {
    /// Source file extension
    pub fn extension(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Kotlin => "kt",
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "java" => Ok(Language::Java),
            "kotlin" | "kt" => Ok(Language::Kotlin),
            other => Err(Error::Config(format!("unknown language: {}", other))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Java => write!(f, "java"),
            Language::Kotlin => write!(f, "kotlin"),
        }
    }
}

/// Renders a class declaration as source text
pub trait SourceEmitter {
    fn language(&self) -> Language;

    fn emit(&self, class: &GeneratedClassDecl) -> Result<String>;
}

/// Emitter for `language`, with Kotlin templates optionally overridden
/// from `template_dir`
pub fn emitter_for(
    language: Language,
    template_dir: Option<&Path>,
) -> Result<Box<dyn SourceEmitter>> {
    match language {
        Language::Java => Ok(Box::new(JavaEmitter)),
        Language::Kotlin => {
            let emitter = match template_dir {
                Some(dir) => KotlinEmitter::with_template_dir(dir)?,
                None => KotlinEmitter::new(),
            };
            Ok(Box::new(emitter))
        }
    }
}

/// Package and simple name of a `Named` type as seen from `class`
///
/// Qualified names carry their own package. The contract's simple name
/// resolves to the contract package; any other simple name is assumed to
/// live in the test class's package and needs no import.
pub(crate) fn resolve_named(class: &GeneratedClassDecl, name: &str) -> (Option<String>, String) {
    match name.rsplit_once('.') {
        Some((package, simple)) => (Some(package.to_string()), simple.to_string()),
        None if name == class.contract_name => (class.contract_package.clone(), name.to_string()),
        None => (None, simple_name(name).to_string()),
    }
}

/// Tuple class name for an arity
pub(crate) fn tuple_class(arity: usize) -> String {
    format!("Tuple{}", arity)
}

/// Package of the generated tuple classes
pub(crate) const TUPLES_PACKAGE: &str = "org.web3j.tuples.generated";
