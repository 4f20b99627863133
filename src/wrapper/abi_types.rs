//! Sized ABI types
//!
//! `Int8`..`Int256` and `Uint8`..`Uint256` in steps of 8 bits, `Bytes1`..
//! `Bytes32`, and `StaticArray0`..`StaticArray32`. Fixed-point types are
//! left out until Solidity supports them.

use super::{warning, write_types, GeneratedType};
use crate::error::Result;
use genco::prelude::*;
use std::path::{Path, PathBuf};

/// Package of the generated types
pub const ABI_TYPES_PACKAGE: &str = "org.web3j.abi.datatypes.generated";

const DATATYPES_PACKAGE: &str = "org.web3j.abi.datatypes";
const COMMAND: &str = "unitgen abi-types";

pub const MAX_BIT_LENGTH: usize = 256;
pub const MAX_BYTE_LENGTH: usize = 32;
pub const MAX_STATIC_ARRAY_SIZE: usize = 32;

/// Signedness of a sized integer type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntKind {
    Int,
    Uint,
}

impl IntKind {
    fn superclass(self) -> &'static str {
        match self {
            IntKind::Int => "Int",
            IntKind::Uint => "Uint",
        }
    }
}

/// `Int<bits>` / `Uint<bits>`
pub fn int_type(kind: IntKind, bits: usize) -> GeneratedType {
    let name = format!("{}{}", kind.superclass(), bits);
    let superclass = java::import(DATATYPES_PACKAGE, kind.superclass());
    let big_integer = &java::import("java.math", "BigInteger");
    let bits = bits.to_string();

    let tokens = quote! {
        $(warning(COMMAND))
        public class $(&name) extends $superclass {
            public static final $(&name) DEFAULT = new $(&name)($(big_integer).ZERO);
            $['\n']
            public $(&name)($big_integer value) {
                super($(&bits), value);
            }
            $['\n']
            public $(&name)(long value) {
                this($(big_integer).valueOf(value));
            }
        }
    };
    GeneratedType::new(name, tokens)
}

/// `Bytes<len>`
pub fn bytes_type(len: usize) -> GeneratedType {
    let name = format!("Bytes{}", len);
    let bytes = java::import(DATATYPES_PACKAGE, "Bytes");
    let len = len.to_string();

    let tokens = quote! {
        $(warning(COMMAND))
        public class $(&name) extends $bytes {
            public static final $(&name) DEFAULT = new $(&name)($(format!("new byte[{}]", len)));
            $['\n']
            public $(&name)($("byte[]") value) {
                super($(&len), value);
            }
        }
    };
    GeneratedType::new(name, tokens)
}

/// `StaticArray<len>`, generic over its element type
pub fn static_array_type(len: usize) -> GeneratedType {
    let name = format!("StaticArray{}", len);
    let ty = &java::import(DATATYPES_PACKAGE, "Type");
    let static_array = &java::import(DATATYPES_PACKAGE, "StaticArray");
    let list = &java::import("java.util", "List");
    let len = len.to_string();

    let tokens = quote! {
        $(warning(COMMAND))
        public class $(&name)<T extends $ty> extends $static_array<T> {
            @Deprecated
            public $(&name)($list<T> values) {
                super($(&len), values);
            }
            $['\n']
            @Deprecated
            @SafeVarargs
            public $(&name)($("T...") values) {
                super($(&len), values);
            }
            $['\n']
            public $(&name)(Class<T> type, $list<T> values) {
                super(type, $(&len), values);
            }
            $['\n']
            @SafeVarargs
            public $(&name)(Class<T> type, $("T...") values) {
                super(type, $(&len), values);
            }
        }
    };
    GeneratedType::new(name, tokens)
}

/// Every sized ABI type, in generation order
pub fn abi_types() -> Vec<GeneratedType> {
    let mut types = Vec::new();
    for kind in [IntKind::Int, IntKind::Uint] {
        types.extend((8..=MAX_BIT_LENGTH).step_by(8).map(|bits| int_type(kind, bits)));
    }
    types.extend((1..=MAX_BYTE_LENGTH).map(bytes_type));
    types.extend((0..=MAX_STATIC_ARRAY_SIZE).map(static_array_type));
    types
}

/// Write all sized ABI types below `output_dir`
pub fn generate_abi_types(output_dir: &Path) -> Result<Vec<PathBuf>> {
    write_types(output_dir, ABI_TYPES_PACKAGE, abi_types())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(ty: GeneratedType) -> String {
        ty.to_source(ABI_TYPES_PACKAGE).unwrap()
    }

    #[test]
    fn test_type_counts() {
        let names: Vec<String> = abi_types().into_iter().map(|t| t.name).collect();
        assert_eq!(names.len(), 32 + 32 + 32 + 33);
        assert_eq!(names[0], "Int8");
        assert_eq!(names[31], "Int256");
        assert_eq!(names[32], "Uint8");
        assert!(names.contains(&"Bytes32".to_string()));
        assert!(names.contains(&"StaticArray0".to_string()));
        assert!(!names.iter().any(|n| n.starts_with("Fixed") || n.starts_with("Ufixed")));
    }

    #[test]
    fn test_uint_type() {
        let code = source(int_type(IntKind::Uint, 64));

        assert!(code.starts_with("package org.web3j.abi.datatypes.generated;"));
        assert!(code.contains("import java.math.BigInteger;"));
        assert!(code.contains("import org.web3j.abi.datatypes.Uint;"));
        assert!(code.contains("public static final Uint64 DEFAULT = new Uint64(BigInteger.ZERO);"));
        assert!(code.contains("super(64, value);"));
        assert!(code.contains("this(BigInteger.valueOf(value));"));
    }

    #[test]
    fn test_bytes_type() {
        let code = source(bytes_type(20));

        assert!(code.contains("import org.web3j.abi.datatypes.Bytes;"));
        assert!(code.contains("public static final Bytes20 DEFAULT = new Bytes20(new byte[20]);"));
        assert!(code.contains("super(20, value);"));
    }

    #[test]
    fn test_static_array_type() {
        let code = source(static_array_type(3));

        assert!(code.contains("import org.web3j.abi.datatypes.StaticArray;"));
        assert!(code.contains("import org.web3j.abi.datatypes.Type;"));
        assert!(code.contains("import java.util.List;"));
        assert_eq!(code.matches("@Deprecated").count(), 2);
        assert_eq!(code.matches("@SafeVarargs").count(), 2);
        assert_eq!(code.matches("super(type, 3, values);").count(), 2);
        assert_eq!(code.matches("super(3, values);").count(), 2);
    }

    #[test]
    fn test_generate_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = generate_abi_types(dir.path()).unwrap();

        assert_eq!(paths.len(), 129);
        let bytes20 = dir.path().join("org/web3j/abi/datatypes/generated/Bytes20.java");
        assert!(paths.contains(&bytes20));
        assert!(std::fs::read_to_string(bytes20).unwrap().contains("Do not modify!"));
    }
}
