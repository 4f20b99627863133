//! Tuple classes `Tuple1`..`Tuple20`

use super::{javadoc, warning, write_types, GeneratedType};
use crate::emit::TUPLES_PACKAGE;
use crate::error::Result;
use genco::prelude::*;
use std::path::{Path, PathBuf};

/// Largest generated tuple arity
pub const TUPLE_LIMIT: usize = 20;

const COMMAND: &str = "unitgen tuples";

/// `Tuple<size>` implementing `org.web3j.tuples.Tuple`
pub fn tuple_type(size: usize) -> GeneratedType {
    let name = format!("Tuple{}", size);
    let tuple = java::import("org.web3j.tuples", "Tuple");
    let type_params = (1..=size).map(|i| format!("T{}", i)).collect::<Vec<_>>().join(", ");

    let fields: Vec<java::Tokens> = (1..=size)
        .map(|i| quote!(private final $(format!("T{}", i)) $(format!("value{}", i));))
        .collect();

    let params = (1..=size)
        .map(|i| format!("T{} value{}", i, i))
        .collect::<Vec<_>>()
        .join(", ");
    let assignments: Vec<String> = (1..=size)
        .map(|i| format!("this.value{} = value{};", i, i))
        .collect();

    let accessors: Vec<java::Tokens> = (1..=size).map(accessor_methods).collect();

    let tokens = quote! {
        $(warning(COMMAND))
        public final class $(&name)<$(&type_params)> implements $tuple {
            private static final int SIZE = $(size.to_string());
            $['\n']
            $(for field in fields join ($['\n']) => $field)
            $['\n']
            public $(&name)($(&params)) {
                $(for line in assignments join ($['\r']) => $line)
            }
            $['\n']
            $(for accessor in accessors join ($['\n']) => $accessor)
            $['\n']
            @Override
            public int getSize() {
                return SIZE;
            }
            $['\n']
            $(equals_method(&name, size))
            $['\n']
            $(hash_code_method(size))
            $['\n']
            $(to_string_method(&name, size))
        }
    };
    GeneratedType::new(name, tokens)
}

/// Deprecated `getValueN` and its replacement `componentN`
fn accessor_methods(i: usize) -> java::Tokens {
    let ty = format!("T{}", i);
    let value = format!("value{}", i);

    quote! {
        $(javadoc([
            format!("@deprecated use 'component{}' method instead", i),
            "@return returns a value".to_string(),
        ]))
        @Deprecated
        public $(&ty) $(format!("getValue{}", i))() {
            return $(&value);
        }
        $['\n']
        public $(&ty) $(format!("component{}", i))() {
            return $(&value);
        }
    }
}

fn equals_method(name: &str, size: usize) -> java::Tokens {
    let wildcard = format!("{}<{}>", name, vec!["?"; size].join(", "));
    let other = format!("tuple{}", size);

    let checks: Vec<java::Tokens> = (1..size)
        .map(|i| {
            let v = format!("value{}", i);
            let cond = format!("{v} != null ? !{v}.equals({o}.{v}) : {o}.{v} != null", v = v, o = other);
            quote! {
                if ($cond) {
                    return false;
                }
            }
        })
        .collect();

    let last = format!("value{}", size);
    let result = format!(
        "return {v} != null ? {v}.equals({o}.{v}) : {o}.{v} == null;",
        v = last,
        o = other
    );

    quote! {
        @Override
        public boolean equals(Object o) {
            if (this == o) {
                return true;
            }
            if (o == null || getClass() != o.getClass()) {
                return false;
            }
            $['\n']
            $(format!("{w} {o} = ({w}) o;", w = wildcard, o = other))
            $(for check in checks join ($['\r']) => $check)
            $result
        }
    }
}

fn hash_code_method(size: usize) -> java::Tokens {
    let lines: Vec<String> = (2..=size)
        .map(|i| format!("result = 31 * result + (value{i} != null ? value{i}.hashCode() : 0);", i = i))
        .collect();

    quote! {
        @Override
        public int hashCode() {
            int result = value1.hashCode();
            $(for line in lines join ($['\r']) => $line)
            return result;
        }
    }
}

fn to_string_method(name: &str, size: usize) -> java::Tokens {
    let mut lines = vec![format!("return \"{}{{\" +", name)];
    lines.push("        \"value1=\" + value1 +".to_string());
    lines.extend((2..=size).map(|i| format!("        \", value{i}=\" + value{i} +", i = i)));
    lines.push("        \"}\";".to_string());

    quote! {
        @Override
        public String toString() {
            $(for line in lines join ($['\r']) => $line)
        }
    }
}

/// Every tuple class, smallest first
pub fn tuple_types() -> Vec<GeneratedType> {
    (1..=TUPLE_LIMIT).map(tuple_type).collect()
}

/// Write `Tuple1`..`Tuple20` below `output_dir`
pub fn generate_tuples(output_dir: &Path) -> Result<Vec<PathBuf>> {
    write_types(output_dir, TUPLES_PACKAGE, tuple_types())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(size: usize) -> String {
        tuple_type(size).to_source(TUPLES_PACKAGE).unwrap()
    }

    #[test]
    fn test_tuple2() {
        let code = source(2);

        assert!(code.starts_with("package org.web3j.tuples.generated;"));
        assert!(code.contains("import org.web3j.tuples.Tuple;"));
        assert!(code.contains("private static final int SIZE = 2;"));
        assert!(code.contains("private final T1 value1;"));
        assert!(code.contains("private final T2 value2;"));
        assert!(code.contains("this.value2 = value2;"));
        assert!(code.contains("@deprecated use 'component1' method instead"));
        assert_eq!(code.matches("@Deprecated").count(), 2);
        assert!(code.contains("Tuple2<?, ?> tuple2 = (Tuple2<?, ?>) o;"));
        assert!(code.contains(
            "if (value1 != null ? !value1.equals(tuple2.value1) : tuple2.value1 != null)"
        ));
        assert!(code.contains("return value2 != null ? value2.equals(tuple2.value2) : tuple2.value2 == null;"));
        assert!(code.contains("result = 31 * result + (value2 != null ? value2.hashCode() : 0);"));
        assert!(code.contains("return \"Tuple2{\" +"));
        assert!(code.contains("\", value2=\" + value2 +"));
    }

    #[test]
    fn test_tuple1_has_no_field_checks() {
        let code = source(1);

        assert!(!code.contains("if (value1 != null"));
        assert!(code.contains("return value1 != null ? value1.equals(tuple1.value1) : tuple1.value1 == null;"));
        assert!(!code.contains("31 * result"));
    }

    #[test]
    fn test_generate_writes_all_arities() {
        let dir = tempfile::tempdir().unwrap();
        let paths = generate_tuples(dir.path()).unwrap();

        assert_eq!(paths.len(), TUPLE_LIMIT);
        assert_eq!(paths[0], dir.path().join("org/web3j/tuples/generated/Tuple1.java"));
        let tuple20 = std::fs::read_to_string(&paths[19]).unwrap();
        assert!(tuple20.contains("public T20 component20()"));
    }
}
