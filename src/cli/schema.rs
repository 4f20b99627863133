//! Schema CLI command

use unitgen::*;

pub fn cmd_schema(name: Option<&str>) -> Result<()> {
    match name.unwrap_or("contract") {
        "list" => {
            println!("Available schemas: contract, config");
            Ok(())
        }
        "contract" => print_schema::<ContractDescriptor>(),
        "config" => print_schema::<UnitgenConfig>(),
        other => Err(format!("Unknown schema: {}. Use 'contract' or 'config'.", other).into()),
    }
}

fn print_schema<T: schemars::JsonSchema>() -> Result<()> {
    let schema = schemars::schema_for!(T);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
