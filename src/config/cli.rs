use crate::config::toml_config::ProviderSettings;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "config-authz")]
#[command(about = "Manage AWS Config aggregation authorizations")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// AWS region to call AWS Config in
    #[arg(long, global = true)]
    pub aws_region: Option<String>,

    /// Named AWS profile
    #[arg(long, global = true)]
    pub aws_profile: Option<String>,

    /// Custom AWS Config endpoint, e.g. a local emulator
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// Use an in-process AWS Config stand-in instead of AWS
    #[arg(long, global = true)]
    pub offline: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the resource schema as JSON
    Schema,
    /// Authorize an account/region to aggregate from this account
    Create {
        #[arg(long)]
        account_id: String,
        #[arg(long)]
        region: String,
    },
    /// Refresh an authorization by ID (account_id:region)
    Read { id: String },
    /// Revoke an authorization by ID (account_id:region)
    Delete { id: String },
    /// Import an existing authorization by ID (account_id:region)
    Import { id: String },
}

impl CliConfig {
    pub fn provider_overrides(&self) -> ProviderSettings {
        ProviderSettings {
            region: self.aws_region.clone(),
            profile: self.aws_profile.clone(),
            endpoint_url: self.endpoint_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_with_global_flags() {
        let cli = CliConfig::try_parse_from([
            "config-authz",
            "create",
            "--account-id",
            "123456789012",
            "--region",
            "us-west-2",
            "--aws-region",
            "us-east-1",
            "--offline",
        ])
        .unwrap();

        assert!(cli.offline);
        assert_eq!(cli.provider_overrides().region.as_deref(), Some("us-east-1"));
        match cli.command {
            Command::Create { account_id, region } => {
                assert_eq!(account_id, "123456789012");
                assert_eq!(region, "us-west-2");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_import_id_verbatim() {
        let cli = CliConfig::try_parse_from(["config-authz", "import", "123456789012:us-east-1"])
            .unwrap();
        assert!(matches!(cli.command, Command::Import { ref id } if id == "123456789012:us-east-1"));
    }

    #[test]
    fn create_requires_both_attributes() {
        assert!(CliConfig::try_parse_from(["config-authz", "create", "--region", "us-west-2"]).is_err());
    }
}
