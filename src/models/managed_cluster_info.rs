use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Spec of the `ManagedClusterInfo` resource. The hub keeps one per managed cluster,
/// in the namespace named after that cluster.
#[derive(CustomResource, Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
#[kube(
    group = "internal.open-cluster-management.io",
    version = "v1beta1",
    kind = "ManagedClusterInfo",
    plural = "managedclusterinfos",
    status = "ManagedClusterInfoStatus",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ManagedClusterInfoSpec {
    pub master_endpoint: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManagedClusterInfoStatus {
    #[serde(rename = "consoleURL")]
    pub console_url: Option<String>,
    pub kube_vendor: Option<String>,
    pub cloud_vendor: Option<String>,
    pub distribution_info: Option<DistributionInfo>,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
pub struct DistributionInfo {
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub ocp: Option<OcpDistributionInfo>,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OcpDistributionInfo {
    pub version: Option<String>,
    pub channel: Option<String>,

    #[serde(default)]
    pub upgrade_failed: bool,

    // older hubs only publish bare version strings here
    #[serde(default)]
    pub available_updates: Vec<String>,

    #[serde(default)]
    pub version_available_updates: Vec<OcpRelease>,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
pub struct OcpRelease {
    pub version: String,
    pub image: Option<String>,
    pub url: Option<String>,
}

impl ManagedClusterInfo {
    pub fn ocp(&self) -> Option<&OcpDistributionInfo> {
        self.status.as_ref()?.distribution_info.as_ref()?.ocp.as_ref()
    }
}
