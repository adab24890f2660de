//! Service holding the provider client for the duration of one run.

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_elasticbeanstalk::Client;
use log::debug;

use crate::aws::beanstalk::{BeanstalkClient, EnvironmentApi};
use crate::aws::AwsSettings;
use crate::error::SyncResult;

/// Drives one environment's platform sync against the provider API.
///
/// Generic over [`EnvironmentApi`] so the command logic can run against an
/// in-memory fake; production code uses the [`BeanstalkClient`] default.
pub struct PlatformSyncService<A = BeanstalkClient> {
    pub(crate) api: A,
}

impl PlatformSyncService<BeanstalkClient> {
    /// Connects to Elastic Beanstalk in the configured region.
    ///
    /// Explicit access keys take precedence; otherwise the default
    /// credential provider chain applies.
    pub async fn connect(settings: AwsSettings) -> SyncResult<Self> {
        debug!("Connecting to Elastic Beanstalk in {}", settings.region);
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(settings.region));
        if let Some(keys) = settings.access_keys {
            loader = loader.credentials_provider(Credentials::from_keys(
                keys.access_key_id,
                keys.secret_access_key,
                keys.session_token,
            ));
        }
        let config = loader.load().await;
        Ok(Self::with_api(BeanstalkClient::new(Client::new(&config))))
    }
}

impl<A: EnvironmentApi> PlatformSyncService<A> {
    /// Builds a service on any [`EnvironmentApi`] implementation.
    pub fn with_api(api: A) -> Self {
        Self { api }
    }
}
