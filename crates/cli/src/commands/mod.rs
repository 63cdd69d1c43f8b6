//! Command implementations.

pub mod listing;
pub mod orders;
pub mod users;

use thiserror::Error;
use true_harvest_admin::{
    collection::{RemoteCollection, ResourceSource},
    config::{ApiConfig, ConfigError},
    gateway::{ApiClient, GatewayError},
};

/// Errors a command can end with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A collection failed to load; the message is the API's.
    #[error("Failed to load {resource}: {message}")]
    Load {
        resource: &'static str,
        message: String,
    },

    #[error("No orders to export")]
    NothingToExport,

    #[error("Invalid mobile number: {0}")]
    InvalidMobile(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// API client and owner shared by every command.
pub struct Context {
    pub client: ApiClient,
    pub owner: String,
}

impl Context {
    /// Build from the same environment the admin panel reads.
    ///
    /// # Errors
    ///
    /// Returns an error when the API settings are missing or the client
    /// cannot be built.
    pub fn from_env() -> Result<Self, CliError> {
        dotenvy::dotenv().ok();
        let config = ApiConfig::from_env()?;
        let client = ApiClient::new(&config)?;
        let client = match std::env::var("TRUE_HARVEST_API_TOKEN") {
            Ok(token) if !token.trim().is_empty() => client.with_bearer(token.trim()),
            _ => client,
        };
        tracing::debug!(base_url = %client.base_url(), "API client ready");
        Ok(Self {
            client,
            owner: config.default_user_id,
        })
    }
}

/// Load a whole collection, turning a failed load into an error.
pub(crate) async fn load<A: ResourceSource>(
    api: A,
    resource: &'static str,
) -> Result<RemoteCollection<A>, CliError> {
    let collection = RemoteCollection::fetch(api).await;
    if let Some(message) = collection.error() {
        return Err(CliError::Load {
            resource,
            message: message.to_string(),
        });
    }
    tracing::info!(resource, count = collection.items().len(), "Loaded");
    Ok(collection)
}
