//! Kotlin test class generation using MiniJinja
//!
//! The class layout lives in an embedded template, `kotlin/test_class.kt`.
//! A template directory containing `kotlin/test_class.kt.jinja` replaces
//! it. Statement lines, parameter lists and imports are spelled here and
//! handed to the template as plain strings.

use super::{resolve_named, tuple_class, Language, SourceEmitter, TUPLES_PACKAGE};
use crate::class::{GeneratedClassDecl, RunnerAnnotation};
use crate::contract::TypeRef;
use crate::error::{Error, Result};
use crate::method::GeneratedMethodDecl;
use crate::statement::{DefaultValue, Piece, StatementTemplate};
use crate::util::is_kotlin_keyword;
use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Name the test class template is registered under
pub const TEST_CLASS_TEMPLATE: &str = "kotlin/test_class.kt";

const TEST_CLASS_SOURCE: &str = include_str!("../../templates/kotlin/test_class.kt.jinja");

static ENGINE: OnceLock<Environment<'static>> = OnceLock::new();

fn init_engine() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template(TEST_CLASS_TEMPLATE, TEST_CLASS_SOURCE)
        .expect("Failed to load kotlin test class template");
    env
}

/// Shared engine with the embedded templates
fn engine() -> &'static Environment<'static> {
    ENGINE.get_or_init(init_engine)
}

/// Engine whose templates are overridden by files under `dir`
fn engine_with_override(dir: &Path) -> Result<Environment<'static>> {
    let mut env = init_engine();
    let path = dir.join(format!("{}.jinja", TEST_CLASS_TEMPLATE));
    if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        env.add_template_owned(TEST_CLASS_TEMPLATE, content)
            .map_err(|e| Error::Template(format!("{}: {}", path.display(), e)))?;
        debug!(template = %path.display(), "loaded template override");
    }
    Ok(env)
}

/// Emits JUnit 5 test classes as Kotlin source
#[derive(Debug, Clone, Default)]
pub struct KotlinEmitter {
    custom: Option<Environment<'static>>,
}

impl KotlinEmitter {
    /// Emitter using the embedded template
    pub fn new() -> Self {
        Self::default()
    }

    /// Emitter preferring templates found under `dir`
    pub fn with_template_dir(dir: &Path) -> Result<Self> {
        Ok(Self {
            custom: Some(engine_with_override(dir)?),
        })
    }

    fn env(&self) -> &Environment<'static> {
        self.custom.as_ref().unwrap_or_else(|| engine())
    }
}

impl SourceEmitter for KotlinEmitter {
    fn language(&self) -> Language {
        Language::Kotlin
    }

    fn emit(&self, class: &GeneratedClassDecl) -> Result<String> {
        let ctx = KotlinSpeller::new(class).class_context()?;
        let template = self
            .env()
            .get_template(TEST_CLASS_TEMPLATE)
            .map_err(|e| Error::Render(e.to_string()))?;
        template
            .render(&ctx)
            .map_err(|e| Error::Render(format!("{}: {}", TEST_CLASS_TEMPLATE, e)))
    }
}

/// Template context for one class
#[derive(Debug, Serialize)]
struct ClassContext {
    package: String,
    imports: Vec<String>,
    annotation: String,
    name: String,
    holder: HolderContext,
    fixtures: Vec<MethodContext>,
    tests: Vec<MethodContext>,
}

#[derive(Debug, Serialize)]
struct HolderContext {
    name: String,
    ty: String,
}

#[derive(Debug, Serialize)]
struct MethodContext {
    annotation: String,
    name: String,
    params: Vec<String>,
    body: Vec<String>,
}

/// Spells types and values in Kotlin, collecting imports on the way
struct KotlinSpeller<'a> {
    class: &'a GeneratedClassDecl,
    imports: BTreeSet<String>,
}

impl<'a> KotlinSpeller<'a> {
    fn new(class: &'a GeneratedClassDecl) -> Self {
        Self {
            class,
            imports: BTreeSet::new(),
        }
    }

    fn class_context(mut self) -> Result<ClassContext> {
        let class = self.class;

        let evm_test = self.import(RunnerAnnotation::PACKAGE, RunnerAnnotation::NAME);
        let annotation = match class.annotation.node_type {
            Some(node_type) => format!(
                "@{}(type = {}.{})",
                evm_test,
                self.import(RunnerAnnotation::PACKAGE, RunnerAnnotation::NODE_TYPE_CLASS),
                node_type.constant()
            ),
            None => format!("@{}", evm_test),
        };

        let holder = HolderContext {
            name: class.holder.name.clone(),
            ty: self.type_name(&class.holder.ty),
        };
        let fixtures = class
            .fixtures()
            .map(|m| self.method(m))
            .collect::<Result<Vec<_>>>()?;
        let tests = class
            .tests()
            .map(|m| self.method(m))
            .collect::<Result<Vec<_>>>()?;

        Ok(ClassContext {
            package: class.package.clone(),
            imports: self.imports.into_iter().collect(),
            annotation,
            name: class.name.clone(),
            holder,
            fixtures,
            tests,
        })
    }

    fn method(&mut self, method: &GeneratedMethodDecl) -> Result<MethodContext> {
        let annotation = self.import(method.annotation.package(), method.annotation.simple_name());
        let params = method
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, self.type_name(&p.ty)))
            .collect();
        let body = method
            .body
            .iter()
            .map(|s| self.statement(s))
            .collect::<Result<Vec<_>>>()?;

        Ok(MethodContext {
            annotation,
            name: kotlin_name(&method.name),
            params,
            body,
        })
    }

    fn statement(&mut self, stmt: &StatementTemplate) -> Result<String> {
        let mut line = String::new();
        for piece in stmt.pieces()? {
            match piece {
                Piece::Text(text) => line.push_str(text),
                Piece::Type(ty) => line.push_str(&self.type_name(ty)),
                Piece::Name(name) => line.push_str(&kotlin_name(name)),
                Piece::Value(value) => line.push_str(&self.value(value)),
                Piece::Str(s) => line.push_str(&string_literal(s)),
                Piece::Local(_, name) => {
                    line.push_str("val ");
                    line.push_str(name);
                }
            }
        }
        Ok(line)
    }

    /// Record an import unless it is in the class's own package
    fn import(&mut self, package: &str, name: &str) -> String {
        if package != self.class.package {
            self.imports.insert(format!("{}.{}", package, name));
        }
        name.to_string()
    }

    fn type_name(&mut self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::String => "String".into(),
            TypeRef::Boolean => "Boolean".into(),
            TypeRef::Bytes => "ByteArray".into(),
            TypeRef::Void => "Unit".into(),
            TypeRef::List(elem) => format!("List<{}>", self.type_name(elem)),
            TypeRef::Tuple(items) => {
                let tuple = self.import(TUPLES_PACKAGE, &tuple_class(items.len()));
                let items: Vec<String> = items.iter().map(|t| self.type_name(t)).collect();
                format!("{}<{}>", tuple, items.join(", "))
            }
            TypeRef::Named(name) => match resolve_named(self.class, name) {
                (Some(package), simple) => self.import(&package, &simple),
                (None, simple) => simple,
            },
            other => match other.library_class() {
                Some((package, name)) => self.import(package, name),
                None => other.to_string(),
            },
        }
    }

    fn value(&mut self, value: &DefaultValue) -> String {
        match value {
            DefaultValue::Str(s) => string_literal(s),
            DefaultValue::BigIntegerOne => format!("{}.ONE", self.import("java.math", "BigInteger")),
            DefaultValue::Bool(b) => b.to_string(),
            DefaultValue::ZeroBytes(len) => format!("ByteArray({})", len),
            DefaultValue::EmptyList(elem) => format!("emptyList<{}>()", self.type_name(elem)),
            DefaultValue::Tuple(types, values) => {
                let tuple = self.import(TUPLES_PACKAGE, &tuple_class(types.len()));
                let values: Vec<String> = values.iter().map(|v| self.value(v)).collect();
                format!("{}({})", tuple, values.join(", "))
            }
            DefaultValue::Null => "null".into(),
            DefaultValue::Ident(name) => name.clone(),
        }
    }
}

/// Identifier as written in Kotlin source, backticked if it is a keyword
fn kotlin_name(name: &str) -> String {
    if is_kotlin_keyword(name) {
        format!("`{}`", name)
    } else {
        name.to_string()
    }
}

/// Kotlin string literal; `$` is escaped so it is never a template
fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
