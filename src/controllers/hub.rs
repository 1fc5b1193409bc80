use async_trait::async_trait;
use kube::api::ListParams;
use kube::{Api, Client, Config};
use log::{debug, info};

#[cfg(test)]
use mockall::automock;

use crate::models::managed_cluster::ManagedCluster;
use crate::models::managed_cluster_info::ManagedClusterInfo;
use crate::utils::config::HubConfig;
use crate::utils::error::Error;

/// Read access to the OCM resources on the hub.
///
/// Route handlers only talk to the hub through this trait, so tests can swap
/// in a mock for the real Kubernetes client.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// Fetches a single `ManagedCluster` by name.
    async fn get_managed_cluster(&self, name: &str) -> Result<ManagedCluster, Error>;

    /// Lists every `ManagedCluster` registered with the hub.
    async fn list_managed_clusters(&self) -> Result<Vec<ManagedCluster>, Error>;

    /// Lists every `ManagedClusterInfo`, across all cluster namespaces.
    async fn list_managed_cluster_infos(&self) -> Result<Vec<ManagedClusterInfo>, Error>;
}

pub struct HubApiClient {
    client: Client,
}

impl HubApiClient {
    pub fn new(client: Client) -> Self {
        HubApiClient { client }
    }

    /// Builds a client for the hub described by `hub`.
    ///
    /// # Arguments:
    /// - `hub` - Hub connection settings. With a URL, the client talks to that API server
    /// using the optional service account token. Without one, the usual kubeconfig or
    /// in-cluster inference applies.
    pub async fn connect(hub: &HubConfig) -> Result<Self, Error> {
        let client = match &hub.url {
            Some(url) => {
                let cluster_url = url
                    .parse::<http::Uri>()
                    .map_err(|err| Error::ConfigError(format!("OCM_HUB_URL {}: {}", url, err)))?;

                let mut config = Config::new(cluster_url);
                config.accept_invalid_certs = hub.skip_tls_verify;
                if let Some(token) = &hub.service_account_token {
                    config.auth_info.token = Some(token.clone().into());
                }

                info!("Connecting to hub {} at {}", hub.name, url);
                Client::try_from(config)?
            }
            None => {
                info!("Connecting to hub {} with inferred configuration", hub.name);
                Client::try_default().await?
            }
        };

        Ok(HubApiClient::new(client))
    }
}

#[async_trait]
impl ClusterApi for HubApiClient {
    async fn get_managed_cluster(&self, name: &str) -> Result<ManagedCluster, Error> {
        debug!("Hub get_managed_cluster {}", name);

        let api: Api<ManagedCluster> = Api::all(self.client.clone());
        Ok(api.get(name).await?)
    }

    async fn list_managed_clusters(&self) -> Result<Vec<ManagedCluster>, Error> {
        debug!("Hub list_managed_clusters");

        let api: Api<ManagedCluster> = Api::all(self.client.clone());
        Ok(api.list(&ListParams::default()).await?.items)
    }

    async fn list_managed_cluster_infos(&self) -> Result<Vec<ManagedClusterInfo>, Error> {
        debug!("Hub list_managed_cluster_infos");

        let api: Api<ManagedClusterInfo> = Api::all(self.client.clone());
        Ok(api.list(&ListParams::default()).await?.items)
    }
}
