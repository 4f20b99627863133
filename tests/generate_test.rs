//! End-to-end test class generation

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use std::path::Path;
use unitgen::*;

const GREETER: &str = r#"
name: Greeter
package: org.example.contracts
methods:
  - name: deploy
    params: [Web3j, TransactionManager, ContractGasProvider, String]
    returns: Greeter
  - name: deploy
    params: [Web3j, Credentials, ContractGasProvider, String]
    returns: Greeter
  - name: deploy
    params: [Web3j, Credentials, BigInteger, BigInteger, String]
    returns: Greeter
  - name: load
    params: [String, Web3j, TransactionManager, ContractGasProvider]
    returns: Greeter
  - name: getModifiedEvents
    params: [TransactionReceipt]
    returns: List<String>
  - name: greet
    returns: String
"#;

fn greeter() -> ContractDescriptor {
    ContractDescriptor::from_yaml(GREETER).unwrap()
}

fn options(output_dir: &Path, runtime: u32) -> GenerationOptions {
    GenerationOptions {
        package: "org.example.tests".into(),
        output_dir: output_dir.to_path_buf(),
        target_runtime_version: runtime,
        node_type: None,
    }
}

fn position(code: &str, needle: &str) -> usize {
    code.find(needle)
        .unwrap_or_else(|| panic!("missing {}\n{}", needle, code))
}

#[test]
fn test_greeter_java() {
    let dir = tempfile::tempdir().unwrap();
    let path = generate_test_class(&greeter(), &options(dir.path(), 17), &JavaEmitter).unwrap();

    assert_eq!(path, dir.path().join("org/example/tests/GreeterTest.java"));
    let code = fs::read_to_string(&path).unwrap();

    assert!(code.starts_with("package org.example.tests;"));
    assert!(code.contains("import org.example.contracts.Greeter;"));
    assert!(code.contains("public class GreeterTest {"));
    assert!(code.contains("private static Greeter greeter;"));
    assert!(!code.contains("NodeType"));

    let fixture = position(
        &code,
        "static void deploy(Web3j web3j, TransactionManager transactionManager, ContractGasProvider contractGasProvider) throws Exception {",
    );
    let deploy = position(
        &code,
        "greeter = Greeter.deploy(web3j, transactionManager, contractGasProvider, \"REPLACE_ME\").send();",
    );
    let test = position(&code, "public void greet() throws Exception {");
    let invocation = position(&code, "String stringVar = greeter.greet().send();");
    let assertion = position(&code, "Assertions.assertEquals(\"REPLACE_ME\", stringVar);");

    assert!(fixture < deploy && deploy < test);
    assert!(test < invocation && invocation < assertion);

    // Legacy deploy, load and event accessors are not tested
    assert_eq!(code.matches("void deploy").count(), 1);
    assert!(!code.contains("deploy1"));
    assert!(!code.contains("void load"));
    assert!(!code.contains("Events"));
    assert_eq!(code.matches("@BeforeAll").count(), 1);
    assert_eq!(code.matches("@Test").count(), 1);
}

#[test]
fn test_greeter_kotlin() {
    let dir = tempfile::tempdir().unwrap();
    let path =
        generate_test_class(&greeter(), &options(dir.path(), 17), &KotlinEmitter::new()).unwrap();

    assert_eq!(path, dir.path().join("org/example/tests/GreeterTest.kt"));
    let code = fs::read_to_string(&path).unwrap();

    assert!(code.starts_with("package org.example.tests\n"));
    assert!(code.contains("import org.example.contracts.Greeter\n"));
    assert!(code.contains("private lateinit var greeter: Greeter"));
    assert!(code.contains("@JvmStatic"));
    assert!(code.contains(
        "greeter = Greeter.deploy(web3j, transactionManager, contractGasProvider, \"REPLACE_ME\").send()"
    ));
    assert!(code.contains("val stringVar = greeter.greet().send()"));
    assert!(code.contains("Assertions.assertEquals(\"REPLACE_ME\", stringVar)"));
}

#[rstest]
#[case::java(Language::Java)]
#[case::kotlin(Language::Kotlin)]
fn test_output_is_idempotent(#[case] language: Language) {
    let dir = tempfile::tempdir().unwrap();
    let emitter = emitter_for(language, None).unwrap();
    let options = options(dir.path(), 8);

    let first_path = generate_test_class(&greeter(), &options, emitter.as_ref()).unwrap();
    let first = fs::read(&first_path).unwrap();
    let second_path = generate_test_class(&greeter(), &options, emitter.as_ref()).unwrap();
    let second = fs::read(&second_path).unwrap();

    assert_eq!(first_path, second_path);
    assert_eq!(first, second);

    let entries = fs::read_dir(dir.path().join("org/example/tests")).unwrap().count();
    assert_eq!(entries, 1);
}

#[rstest]
#[case(8, true)]
#[case(10, true)]
#[case(11, false)]
#[case(17, false)]
fn test_runner_node_type_follows_runtime(#[case] runtime: u32, #[case] geth: bool) {
    let dir = tempfile::tempdir().unwrap();
    let path = generate_test_class(&greeter(), &options(dir.path(), runtime), &JavaEmitter).unwrap();
    let code = fs::read_to_string(path).unwrap();

    assert_eq!(code.contains("@EVMTest(type = NodeType.GETH)"), geth);
    assert_eq!(code.contains("@EVMTest\n"), !geth);
}

#[test]
fn test_forced_node_type_wins() {
    let dir = tempfile::tempdir().unwrap();
    let options = GenerationOptions {
        node_type: Some(NodeType::Besu),
        ..options(dir.path(), 8)
    };
    let path = generate_test_class(&greeter(), &options, &KotlinEmitter::new()).unwrap();
    let code = fs::read_to_string(path).unwrap();

    assert!(code.contains("@EVMTest(type = NodeType.BESU)"));
    assert!(code.contains("import org.web3j.NodeType"));
}

#[test]
fn test_missing_output_dir_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = generate_test_class(&greeter(), &options(&missing, 17), &JavaEmitter).unwrap_err();

    match err {
        Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected IO error, got {:?}", other),
    }
    assert!(!missing.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_contract_without_fixture_method() {
    let contract = ContractDescriptor::from_yaml(
        r#"
name: Counter
methods:
  - name: increment
    returns: TransactionReceipt
  - name: count
    returns: BigInteger
"#,
    )
    .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = generate_test_class(&contract, &options(dir.path(), 17), &JavaEmitter).unwrap();
    let code = fs::read_to_string(path).unwrap();

    assert!(!code.contains("@BeforeAll"));
    assert!(code.contains("private static Counter counter;"));
    assert!(code.contains("TransactionReceipt transactionReceiptVar = counter.increment().send();"));
    assert!(code.contains("Assertions.assertTrue(transactionReceiptVar.isStatusOK());"));
    assert!(code.contains("BigInteger bigIntegerVar = counter.count().send();"));
    assert!(code.contains("Assertions.assertEquals(BigInteger.ONE, bigIntegerVar);"));
}

#[test]
fn test_abi_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let abi = dir.path().join("simple_storage.abi");
    fs::write(
        &abi,
        r#"[
            {"type": "constructor", "inputs": [], "stateMutability": "nonpayable"},
            {"type": "function", "name": "get", "inputs": [], "outputs": [{"name": "", "type": "uint256"}], "stateMutability": "view"},
            {"type": "function", "name": "set", "inputs": [{"name": "x", "type": "uint256"}], "outputs": [], "stateMutability": "nonpayable"}
        ]"#,
    )
    .unwrap();

    let contract = ContractDescriptor::from_path(&abi, None, Some("org.example.tests")).unwrap();
    assert_eq!(contract.name, "SimpleStorage");

    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();
    let path = generate_test_class(&contract, &options(&out, 17), &JavaEmitter).unwrap();
    let code = fs::read_to_string(path).unwrap();

    // Same package as the test class: no import
    assert!(!code.contains("import org.example.tests.SimpleStorage;"));
    assert!(code.contains(
        "simpleStorage = SimpleStorage.deploy(web3j, transactionManager, contractGasProvider).send();"
    ));
    assert!(code.contains("BigInteger bigIntegerVar = simpleStorage.get().send();"));
    assert!(code.contains(
        "TransactionReceipt transactionReceiptVar = simpleStorage.set(BigInteger.ONE).send();"
    ));
}

#[test]
fn test_config_drives_generation() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(config::CONFIG_FILE),
        "version: 1\npackage: org.example.tests\nlanguage: kotlin\ntarget_runtime_version: 8\n",
    )
    .unwrap();

    let config = UnitgenConfig::load_from_dir(dir.path()).unwrap().unwrap();
    let merged = config.merge(&Overrides {
        output_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    });
    let emitter = emitter_for(merged.language, merged.template_dir.as_deref()).unwrap();
    let path = generate_test_class(&greeter(), &merged.generation_options(), emitter.as_ref()).unwrap();

    assert_eq!(path, dir.path().join("org/example/tests/GreeterTest.kt"));
    let code = fs::read_to_string(path).unwrap();
    assert!(code.contains("@EVMTest(type = NodeType.GETH)"));
}
