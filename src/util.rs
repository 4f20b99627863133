//! Shared naming utilities
//!
//! Identifier conversions used when turning contract and type names into
//! field, parameter and local-variable names in generated sources.

/// Convert snake_case to PascalCase
///
/// # Examples
/// ```
/// use unitgen::util::to_pascal_case;
/// assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
/// assert_eq!(to_pascal_case("foo"), "Foo");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert snake_case to camelCase
///
/// # Examples
/// ```
/// use unitgen::util::to_camel_case;
/// assert_eq!(to_camel_case("hello_world"), "helloWorld");
/// assert_eq!(to_camel_case("foo"), "foo");
/// ```
pub fn to_camel_case(s: &str) -> String {
    lower_first(&to_pascal_case(s))
}

/// Lower-case the first character, leaving the rest untouched
///
/// This is how a class name becomes a field or parameter name:
/// `TransactionManager` → `transactionManager`, `Web3j` → `web3j`.
///
/// # Examples
/// ```
/// use unitgen::util::lower_first;
/// assert_eq!(lower_first("ContractGasProvider"), "contractGasProvider");
/// ```
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Last segment of a possibly qualified class name (`org.example.Foo` → `Foo`)
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Convert a type name into an identifier that is safe in both Java and Kotlin
///
/// Non-identifier characters are dropped, the result is lower-first, and a
/// reserved word gets a trailing underscore.
///
/// # Examples
/// ```
/// use unitgen::util::identifier_for;
/// assert_eq!(identifier_for("Greeter"), "greeter");
/// assert_eq!(identifier_for("Package"), "package_");
/// ```
pub fn identifier_for(type_name: &str) -> String {
    let cleaned: String = simple_name(type_name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    let mut ident = lower_first(&cleaned);
    if ident.is_empty() {
        ident.push_str("value");
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if is_reserved_word(&ident) {
        ident.push('_');
    }
    ident
}

/// Java package or Kotlin package as a relative directory path
///
/// # Examples
/// ```
/// use unitgen::util::package_to_path;
/// assert_eq!(package_to_path("org.web3j.generated"), std::path::PathBuf::from("org/web3j/generated"));
/// ```
pub fn package_to_path(package: &str) -> std::path::PathBuf {
    package.split('.').filter(|s| !s.is_empty()).collect()
}

/// Reserved in Java or a hard keyword in Kotlin
pub fn is_reserved_word(word: &str) -> bool {
    is_java_reserved(word) || is_kotlin_keyword(word)
}

fn is_java_reserved(word: &str) -> bool {
    matches!(
        word,
        "abstract"
            | "assert"
            | "boolean"
            | "break"
            | "byte"
            | "case"
            | "catch"
            | "char"
            | "class"
            | "const"
            | "continue"
            | "default"
            | "do"
            | "double"
            | "else"
            | "enum"
            | "extends"
            | "final"
            | "finally"
            | "float"
            | "for"
            | "goto"
            | "if"
            | "implements"
            | "import"
            | "instanceof"
            | "int"
            | "interface"
            | "long"
            | "native"
            | "new"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "return"
            | "short"
            | "static"
            | "strictfp"
            | "super"
            | "switch"
            | "synchronized"
            | "this"
            | "throw"
            | "throws"
            | "transient"
            | "try"
            | "void"
            | "volatile"
            | "while"
            | "true"
            | "false"
            | "null"
            | "var"
            | "record"
            | "yield"
    )
}

/// Hard keyword in Kotlin; such names need backticks
pub fn is_kotlin_keyword(word: &str) -> bool {
    matches!(
        word,
        "as" | "break"
            | "class"
            | "continue"
            | "do"
            | "else"
            | "false"
            | "for"
            | "fun"
            | "if"
            | "in"
            | "interface"
            | "is"
            | "null"
            | "object"
            | "package"
            | "return"
            | "super"
            | "this"
            | "throw"
            | "true"
            | "try"
            | "typealias"
            | "typeof"
            | "val"
            | "var"
            | "when"
            | "while"
    )
}
