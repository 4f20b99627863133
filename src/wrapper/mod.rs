//! Wrapper boilerplate generators
//!
//! Java support classes used by generated contract wrappers: sized ABI
//! types ([`abi_types`]) and tuple classes ([`tuples`]). Every file opens
//! with a Javadoc warning naming the command that regenerates it.

pub mod abi_types;
pub mod tuples;

pub use abi_types::generate_abi_types;
pub use tuples::generate_tuples;

use crate::emit::java::format_java_file;
use crate::error::Result;
use crate::writer::write_source;
use genco::prelude::*;
use std::path::{Path, PathBuf};

/// One top-level Java type, ready to be written
pub struct GeneratedType {
    pub name: String,
    pub tokens: java::Tokens,
}

impl GeneratedType {
    pub fn new(name: impl Into<String>, tokens: java::Tokens) -> Self {
        Self {
            name: name.into(),
            tokens,
        }
    }

    /// Complete file contents in `package`
    pub fn to_source(&self, package: &str) -> Result<String> {
        format_java_file(&self.tokens, package)
    }
}

/// Javadoc block from plain lines
pub(crate) fn javadoc<I, S>(lines: I) -> java::Tokens
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens = java::Tokens::new();
    tokens.append("/**");
    for line in lines {
        tokens.push();
        match line.as_ref() {
            "" => tokens.append(" *"),
            line => tokens.append(format!(" * {}", line)),
        }
    }
    tokens.push();
    tokens.append(" */");
    tokens
}

/// "Do not modify" header naming the regenerating command
pub(crate) fn warning(command: &str) -> java::Tokens {
    javadoc([
        "Auto generated code.".to_string(),
        "<p><strong>Do not modify!</strong>".to_string(),
        format!("<p>Please use <code>{}</code> to update.", command),
    ])
}

/// Write every type into `package` below `output_dir`
pub(crate) fn write_types(
    output_dir: &Path,
    package: &str,
    types: impl IntoIterator<Item = GeneratedType>,
) -> Result<Vec<PathBuf>> {
    types
        .into_iter()
        .map(|ty| {
            let source = ty.to_source(package)?;
            write_source(output_dir, package, &format!("{}.java", ty.name), &source)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_header() {
        let ty = GeneratedType::new("X", warning("unitgen tuples"));
        let source = ty.to_source("org.example").unwrap();

        assert!(source.contains("/**\n * Auto generated code.\n"));
        assert!(source.contains(" * <p><strong>Do not modify!</strong>\n"));
        assert!(source.contains(" * <p>Please use <code>unitgen tuples</code> to update.\n */"));
    }
}
