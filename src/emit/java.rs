//! Java test class generation using genco

use super::{resolve_named, tuple_class, Language, SourceEmitter, TUPLES_PACKAGE};
use crate::class::{GeneratedClassDecl, RunnerAnnotation};
use crate::contract::TypeRef;
use crate::error::{Error, Result};
use crate::method::GeneratedMethodDecl;
use crate::statement::{DefaultValue, Piece, StatementTemplate};
use genco::fmt;
use genco::lang::Java;
use genco::prelude::*;

/// Emits JUnit 5 test classes as Java source
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaEmitter;

impl SourceEmitter for JavaEmitter {
    fn language(&self) -> Language {
        Language::Java
    }

    fn emit(&self, class: &GeneratedClassDecl) -> Result<String> {
        let tokens = JavaRenderer { class }.render()?;
        format_java_file(&tokens, &class.package)
    }
}

/// Format a token stream as a complete Java file in `package`
///
/// Adds the package declaration and the import block, four-space indented.
pub(crate) fn format_java_file(tokens: &java::Tokens, package: &str) -> Result<String> {
    let mut w = fmt::FmtWriter::new(String::new());
    let fmt = fmt::Config::from_lang::<Java>().with_indentation(fmt::Indentation::Space(4));
    let config = java::Config::default().with_package(package.to_string());

    tokens
        .format_file(&mut w.as_formatter(&fmt), &config)
        .map_err(|e| Error::Render(format!("java formatting failed: {}", e)))?;
    Ok(w.into_inner())
}

struct JavaRenderer<'a> {
    class: &'a GeneratedClassDecl,
}

impl<'a> JavaRenderer<'a> {
    fn render(&self) -> Result<java::Tokens> {
        let class = self.class;
        let holder_ty = self.render_type(&class.holder.ty);
        let methods = class
            .fixtures()
            .chain(class.tests())
            .map(|m| self.render_method(m))
            .collect::<Result<Vec<_>>>()?;

        Ok(quote! {
            $(self.render_annotation())
            public class $(&class.name) {
                private static $holder_ty $(&class.holder.name);
                $['\n']
                $(for method in methods join ($['\n']) => $method)
            }
        })
    }

    fn render_annotation(&self) -> java::Tokens {
        let mut tokens = java::Tokens::new();
        tokens.append("@");
        tokens.append(java::import(RunnerAnnotation::PACKAGE, RunnerAnnotation::NAME));

        if let Some(node_type) = self.class.annotation.node_type {
            tokens.append("(type = ");
            tokens.append(java::import(
                RunnerAnnotation::PACKAGE,
                RunnerAnnotation::NODE_TYPE_CLASS,
            ));
            tokens.append(".");
            tokens.append(node_type.constant());
            tokens.append(")");
        }
        tokens
    }

    fn render_method(&self, method: &GeneratedMethodDecl) -> Result<java::Tokens> {
        let annotation = java::import(method.annotation.package(), method.annotation.simple_name());
        let modifiers = method
            .modifiers
            .iter()
            .map(|m| m.keyword())
            .collect::<Vec<_>>()
            .join(" ");
        let params: Vec<java::Tokens> = method
            .params
            .iter()
            .map(|p| {
                let ty = self.render_type(&p.ty);
                quote!($ty $(&p.name))
            })
            .collect();
        let body = method
            .body
            .iter()
            .map(|s| self.render_statement(s))
            .collect::<Result<Vec<_>>>()?;

        Ok(quote! {
            @$annotation
            $modifiers void $(&method.name)($(for p in params join (, ) => $p)) throws Exception {
                $(for stmt in body join ($['\r']) => $stmt)
            }
        })
    }

    fn render_statement(&self, stmt: &StatementTemplate) -> Result<java::Tokens> {
        let mut tokens = java::Tokens::new();
        for piece in stmt.pieces()? {
            match piece {
                Piece::Text(text) => tokens.append(text.to_string()),
                Piece::Type(ty) => tokens.append(self.render_type(ty)),
                Piece::Name(name) => tokens.append(name.to_string()),
                Piece::Value(value) => tokens.append(self.render_value(value)),
                Piece::Str(s) => tokens.append(quoted(s.to_string())),
                Piece::Local(ty, name) => {
                    tokens.append(self.render_type(ty));
                    tokens.space();
                    tokens.append(name.to_string());
                }
            }
        }
        tokens.append(";");
        Ok(tokens)
    }

    fn render_type(&self, ty: &TypeRef) -> java::Tokens {
        let mut tokens = java::Tokens::new();
        match ty {
            TypeRef::String => tokens.append("String"),
            TypeRef::Boolean => tokens.append("Boolean"),
            TypeRef::Bytes => tokens.append("byte[]"),
            // boxed, so it can be declared as a local
            TypeRef::Void => tokens.append("Void"),
            TypeRef::List(elem) => {
                tokens.append(java::import("java.util", "List"));
                tokens.append("<");
                tokens.append(self.render_type(elem));
                tokens.append(">");
            }
            TypeRef::Tuple(items) => {
                tokens.append(java::import(TUPLES_PACKAGE, tuple_class(items.len())));
                tokens.append("<");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        tokens.append(", ");
                    }
                    tokens.append(self.render_type(item));
                }
                tokens.append(">");
            }
            TypeRef::Named(name) => match resolve_named(self.class, name) {
                (Some(package), simple) => tokens.append(java::import(package, simple)),
                (None, simple) => tokens.append(simple),
            },
            other => match other.library_class() {
                Some((package, name)) => tokens.append(java::import(package, name)),
                None => tokens.append(other.to_string()),
            },
        }
        tokens
    }

    fn render_value(&self, value: &DefaultValue) -> java::Tokens {
        let mut tokens = java::Tokens::new();
        match value {
            DefaultValue::Str(s) => tokens.append(quoted(s.clone())),
            DefaultValue::BigIntegerOne => {
                tokens.append(java::import("java.math", "BigInteger"));
                tokens.append(".ONE");
            }
            DefaultValue::Bool(b) => tokens.append(b.to_string()),
            DefaultValue::ZeroBytes(len) => tokens.append(format!("new byte[{}]", len)),
            DefaultValue::EmptyList(_) => {
                tokens.append("new ");
                tokens.append(java::import("java.util", "ArrayList"));
                tokens.append("<>()");
            }
            DefaultValue::Tuple(types, values) => {
                tokens.append("new ");
                tokens.append(java::import(TUPLES_PACKAGE, tuple_class(types.len())));
                tokens.append("<>(");
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        tokens.append(", ");
                    }
                    tokens.append(self.render_value(v));
                }
                tokens.append(")");
            }
            DefaultValue::Null => tokens.append("null"),
            DefaultValue::Ident(name) => tokens.append(name.clone()),
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::{ClassAssembler, GenerationOptions, NodeType};
    use crate::contract::{ContractDescriptor, MethodDescriptor};

    fn token() -> ContractDescriptor {
        ContractDescriptor {
            name: "Token".into(),
            package: Some("org.example.contracts".into()),
            methods: vec![
                MethodDescriptor::new(
                    "deploy",
                    vec![
                        TypeRef::Web3j,
                        TypeRef::TransactionManager,
                        TypeRef::ContractGasProvider,
                        TypeRef::BigInteger,
                    ],
                    TypeRef::Named("Token".into()),
                ),
                MethodDescriptor::new("balanceOf", vec![TypeRef::String], TypeRef::BigInteger),
                MethodDescriptor::new("hash", vec![], TypeRef::Bytes),
                MethodDescriptor::new(
                    "holders",
                    vec![],
                    TypeRef::List(Box::new(TypeRef::String)),
                ),
                MethodDescriptor::new(
                    "info",
                    vec![],
                    TypeRef::Tuple(vec![TypeRef::String, TypeRef::Boolean]),
                ),
                MethodDescriptor::new(
                    "transfer",
                    vec![TypeRef::String, TypeRef::BigInteger],
                    TypeRef::TransactionReceipt,
                ),
            ],
        }
    }

    fn emit(options: &GenerationOptions) -> String {
        let class = ClassAssembler::new(&token(), options).assemble();
        JavaEmitter.emit(&class).unwrap()
    }

    #[test]
    fn test_package_and_imports() {
        let code = emit(&GenerationOptions {
            package: "org.example.tests".into(),
            ..Default::default()
        });

        assert!(code.starts_with("package org.example.tests;"));
        for import in [
            "import java.math.BigInteger;",
            "import java.util.List;",
            "import org.example.contracts.Token;",
            "import org.junit.jupiter.api.Assertions;",
            "import org.junit.jupiter.api.BeforeAll;",
            "import org.junit.jupiter.api.Test;",
            "import org.web3j.EVMTest;",
            "import org.web3j.protocol.Web3j;",
            "import org.web3j.tuples.generated.Tuple2;",
            "import org.web3j.tx.gas.ContractGasProvider;",
        ] {
            assert!(code.contains(import), "missing {}\n{}", import, code);
        }
        assert!(!code.contains("import org.web3j.NodeType;"));
    }

    #[test]
    fn test_statements() {
        let code = emit(&GenerationOptions::default());

        for line in [
            "token = Token.deploy(web3j, transactionManager, contractGasProvider, BigInteger.ONE).send();",
            "BigInteger bigIntegerVar = token.balanceOf(\"REPLACE_ME\").send();",
            "Assertions.assertEquals(BigInteger.ONE, bigIntegerVar);",
            "byte[] bytesVar = token.hash().send();",
            "Assertions.assertArrayEquals(new byte[32], bytesVar);",
            "List<String> listVar = token.holders().send();",
            "Assertions.assertEquals(new ArrayList<>(), listVar);",
            "Tuple2<String, Boolean> tuple2Var = token.info().send();",
            "Assertions.assertEquals(new Tuple2<>(\"REPLACE_ME\", true), tuple2Var);",
            "TransactionReceipt transactionReceiptVar = token.transfer(\"REPLACE_ME\", BigInteger.ONE).send();",
            "Assertions.assertTrue(transactionReceiptVar.isStatusOK());",
        ] {
            assert!(code.contains(line), "missing {}\n{}", line, code);
        }
    }

    #[test]
    fn test_node_type_member() {
        let code = emit(&GenerationOptions {
            target_runtime_version: 8,
            ..Default::default()
        });
        assert!(code.contains("@EVMTest(type = NodeType.GETH)"));
        assert!(code.contains("import org.web3j.NodeType;"));

        let code = emit(&GenerationOptions {
            node_type: Some(NodeType::Besu),
            ..Default::default()
        });
        assert!(code.contains("@EVMTest(type = NodeType.BESU)"));
    }

    #[test]
    fn test_bad_template_is_an_error() {
        let mut class = ClassAssembler::new(&token(), &GenerationOptions::default()).assemble();
        class.methods[1].body[0].args.pop();
        assert!(matches!(JavaEmitter.emit(&class), Err(Error::Template(_))));
    }
}
