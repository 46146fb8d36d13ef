use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sdkgen", bin_name = "sdkgen")]
#[command(about = "Generate typed Rust clients from GraphQL schemas and operations")]
pub struct Cli {
    /// Log progress to stderr (`SDKGEN_LOG` overrides)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the client package described by a config file
    #[command(after_help = r#"EXAMPLES:
  sdkgen generate
  sdkgen generate --config api/sdkgen.toml
  sdkgen generate --check
  sdkgen generate --out target/generated"#)]
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the config file
    #[arg(long, short = 'c', default_value = "sdkgen.toml", value_name = "FILE")]
    pub config: PathBuf,

    /// Directory to write the package into (overrides `target_package_path`)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Run generation without writing any files
    #[arg(long)]
    pub check: bool,
}

impl From<GenerateArgs> for crate::commands::generate::GenerateOptions {
    fn from(args: GenerateArgs) -> Self {
        Self {
            config_path: args.config,
            out_dir: args.out,
            check: args.check,
        }
    }
}
