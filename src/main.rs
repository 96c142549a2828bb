use clap::Parser;
use config_authz::config::{Command, FileConfig, ProviderSettings};
use config_authz::utils::{logger, validation::Validate};
use config_authz::{
    AggregationAuthorizationResource, AuthzError, CliConfig, ConfigService,
    InMemoryConfigService, ResourceLifecycle, ResourceState,
};

const OFFLINE_ACCOUNT_ID: &str = "000000000000";
const OFFLINE_REGION: &str = "us-east-1";

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    if cli.json_logs || file_config.logging.json.unwrap_or(false) {
        logger::init_json_logger(file_config.logging.level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, file_config.logging.level.as_deref());
    }

    if let Err(e) = run(&cli, file_config).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.severity().exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig, file_config: FileConfig) -> Result<(), AuthzError> {
    file_config.validate()?;
    let settings = file_config.provider.merge(cli.provider_overrides());
    settings.validate()?;
    tracing::debug!("Provider settings: {:?}", settings);

    let client = build_client(cli.offline, &settings).await?;
    let resource = AggregationAuthorizationResource::new(client);

    match &cli.command {
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(resource.schema())?);
        }
        Command::Create { account_id, region } => {
            let mut state = config_authz::core::resource::planned_state(account_id, region);
            resource.create(&mut state).await?;
            print_state(&state)?;
        }
        Command::Read { id } => {
            let mut state = ResourceState::with_id(id.as_str());
            resource.read(&mut state).await?;
            if !state.is_present() {
                tracing::warn!("Authorization {} no longer exists", id);
            }
            print_state(&state)?;
        }
        Command::Delete { id } => {
            let mut state = ResourceState::with_id(id.as_str());
            resource.delete(&mut state).await?;
            print_state(&state)?;
        }
        Command::Import { id } => {
            let state = resource.import(id).await?;
            if !state.is_present() {
                tracing::warn!("Nothing to import for {}", id);
            }
            print_state(&state)?;
        }
    }

    Ok(())
}

async fn build_client(
    offline: bool,
    settings: &ProviderSettings,
) -> Result<Box<dyn ConfigService>, AuthzError> {
    if offline {
        let region = settings.region.as_deref().unwrap_or(OFFLINE_REGION);
        tracing::info!("Using in-process AWS Config stand-in ({})", region);
        return Ok(Box::new(InMemoryConfigService::new(OFFLINE_ACCOUNT_ID, region)));
    }

    #[cfg(feature = "aws")]
    {
        let service = config_authz::AwsConfigService::from_settings(settings).await;
        Ok(Box::new(service))
    }

    #[cfg(not(feature = "aws"))]
    {
        Err(AuthzError::Config {
            message: "built without the `aws` feature; use --offline".to_string(),
        })
    }
}

fn print_state(state: &ResourceState) -> Result<(), AuthzError> {
    println!("{}", serde_json::to_string_pretty(state)?);
    Ok(())
}
