// Region-bound CloudFormation client construction.

use crate::CfnError;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_sdk_cloudformation::Client;

/// Builds one authenticated, region-bound client per environment.
///
/// Credentials default to the host environment's provider chain; an
/// explicit provider can be injected instead. Clients are never shared
/// across environments even when the credentials are.
#[derive(Clone, Default)]
pub struct ClientFactory {
    credentials: Option<SharedCredentialsProvider>,
}

impl ClientFactory {
    /// Resolve credentials from the default provider chain.
    pub fn from_environment() -> Self {
        Self { credentials: None }
    }

    /// Use an explicitly constructed credential source.
    pub fn with_credentials(credentials: SharedCredentialsProvider) -> Self {
        Self {
            credentials: Some(credentials),
        }
    }

    /// Construct a client bound to `region`. An empty region fails before
    /// any remote interaction.
    pub async fn client(&self, region: &str) -> Result<Client, CfnError> {
        if region.is_empty() {
            return Err(CfnError::EmptyRegion);
        }

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()));
        if let Some(credentials) = &self.credentials {
            loader = loader.credentials_provider(credentials.clone());
        }
        let config = loader.load().await;

        Ok(Client::new(&config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_region_is_rejected() {
        let factory = ClientFactory::from_environment();
        assert!(matches!(
            factory.client("").await,
            Err(CfnError::EmptyRegion)
        ));
    }
}
