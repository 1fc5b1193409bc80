use serde::Serialize;
use std::collections::BTreeMap;

/// Status half of a cluster's response payload, built from its `ManagedCluster`.
#[derive(Serialize, Debug, Default, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDetails {
    pub name: String,
    pub status: ClusterStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openshift_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openshift_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub allocatable_resources: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub available_resources: BTreeMap<String, String>,
}

#[derive(Serialize, Debug, Default, PartialEq, Clone)]
pub struct ClusterStatus {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Update half of a cluster's response payload, built from its `ManagedClusterInfo`.
/// Every key is optional except `update`, so merging it over `ClusterDetails` only
/// replaces what the info resource actually knows.
#[derive(Serialize, Debug, Default, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openshift_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_url: Option<String>,
    pub update: ClusterUpdate,
}

#[derive(Serialize, Debug, Default, PartialEq, Clone)]
pub struct ClusterUpdate {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
}
