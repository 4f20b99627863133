//! `unitgen generate`

use clap::Args;
use std::path::PathBuf;
use tracing::debug;
use unitgen::*;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Contract descriptor (YAML, JSON, raw ABI or build artifact)
    pub descriptor: PathBuf,

    /// Target language: java or kotlin
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Package of the generated test class
    #[arg(short, long)]
    pub package: Option<String>,

    /// Existing directory the package path is created under
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Major version of the runtime the tests will run on
    #[arg(long)]
    pub runtime_version: Option<u32>,

    /// Force the runner's node type: geth, besu, open-ethereum or embedded
    #[arg(long)]
    pub node_type: Option<String>,

    /// Contract class name (defaults to the descriptor's name)
    #[arg(long)]
    pub contract_name: Option<String>,

    /// Package of the contract wrapper class
    #[arg(long)]
    pub contract_package: Option<String>,

    /// Directory with template overrides
    #[arg(long)]
    pub template_dir: Option<PathBuf>,
}

impl GenerateArgs {
    fn overrides(&self) -> Result<Overrides> {
        Ok(Overrides {
            package: self.package.clone(),
            output_dir: self.output.clone(),
            language: self.lang.as_deref().map(str::parse::<Language>).transpose()?,
            target_runtime_version: self.runtime_version,
            node_type: self
                .node_type
                .as_deref()
                .map(str::parse::<NodeType>)
                .transpose()?,
            template_dir: self.template_dir.clone(),
        })
    }
}

pub fn cmd_generate(args: &GenerateArgs) -> Result<()> {
    let current_dir = std::env::current_dir().map_err(Error::Io)?;
    let config = match UnitgenConfig::load_from_dir(&current_dir)? {
        Some(config) => {
            debug!(dir = %current_dir.display(), "loaded {}", config::CONFIG_FILE);
            config
        }
        None => UnitgenConfig::default(),
    };
    let merged = config.merge(&args.overrides()?);

    let contract = ContractDescriptor::from_path(
        &args.descriptor,
        args.contract_name.as_deref(),
        args.contract_package.as_deref(),
    )?;

    let emitter = emitter_for(merged.language, merged.template_dir.as_deref())?;
    let path = generate_test_class(&contract, &merged.generation_options(), emitter.as_ref())?;

    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> GenerateArgs {
        GenerateArgs {
            descriptor: PathBuf::from("Greeter.yaml"),
            lang: None,
            package: None,
            output: None,
            runtime_version: None,
            node_type: None,
            contract_name: None,
            contract_package: None,
            template_dir: None,
        }
    }

    #[test]
    fn test_overrides_parse_flags() {
        let args = GenerateArgs {
            lang: Some("kt".into()),
            node_type: Some("open_ethereum".into()),
            runtime_version: Some(8),
            ..args()
        };
        let overrides = args.overrides().unwrap();

        assert_eq!(overrides.language, Some(Language::Kotlin));
        assert_eq!(overrides.node_type, Some(NodeType::OpenEthereum));
        assert_eq!(overrides.target_runtime_version, Some(8));
        assert_eq!(overrides.package, None);
    }

    #[test]
    fn test_overrides_reject_unknown_language() {
        let args = GenerateArgs {
            lang: Some("scala".into()),
            ..args()
        };
        assert!(matches!(args.overrides(), Err(Error::Config(_))));
    }
}
