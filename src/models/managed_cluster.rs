use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Spec of the `ManagedCluster` resource the OCM hub keeps for every registered cluster.
#[derive(CustomResource, Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
#[kube(
    group = "cluster.open-cluster-management.io",
    version = "v1",
    kind = "ManagedCluster",
    plural = "managedclusters",
    status = "ManagedClusterStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct ManagedClusterSpec {
    #[serde(default)]
    pub hub_accepts_client: bool,

    #[serde(default)]
    pub managed_cluster_client_configs: Vec<ClientConfig>,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManagedClusterStatus {
    #[serde(default)]
    pub conditions: Vec<ClusterCondition>,

    // resource quantities as reported by the agent, e.g. "cpu" -> "16"
    #[serde(default)]
    pub allocatable: BTreeMap<String, String>,
    #[serde(default)]
    pub capacity: BTreeMap<String, String>,

    pub version: Option<ManagedClusterVersion>,

    #[serde(default)]
    pub cluster_claims: Vec<ClusterClaim>,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCondition {
    #[serde(rename = "type")]
    pub type_: String,
    pub status: String,
    pub reason: Option<String>,
    pub message: Option<String>,
    pub last_transition_time: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
pub struct ManagedClusterVersion {
    pub kubernetes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
pub struct ClusterClaim {
    pub name: String,
    pub value: String,
}

impl ManagedCluster {
    pub fn condition(&self, condition_type: &str) -> Option<&ClusterCondition> {
        self.status
            .as_ref()?
            .conditions
            .iter()
            .find(|condition| condition.type_ == condition_type)
    }

    pub fn claim(&self, claim_name: &str) -> Option<&str> {
        self.status
            .as_ref()?
            .cluster_claims
            .iter()
            .find(|claim| claim.name == claim_name)
            .map(|claim| claim.value.as_str())
    }

    pub fn label(&self, label: &str) -> Option<&str> {
        self.metadata
            .labels
            .as_ref()?
            .get(label)
            .map(|value| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ManagedCluster;
    use serde_json::json;

    fn local_cluster() -> ManagedCluster {
        serde_json::from_value(json!({
            "apiVersion": "cluster.open-cluster-management.io/v1",
            "kind": "ManagedCluster",
            "metadata": {
                "name": "local-cluster",
                "labels": { "cloud": "Amazon", "openshiftVersion": "4.10.9" }
            },
            "spec": {
                "hubAcceptsClient": true,
                "managedClusterClientConfigs": [{ "url": "https://api.hub.example.com:6443" }]
            },
            "status": {
                "allocatable": { "cpu": "94", "memory": "377846540Ki" },
                "clusterClaims": [{ "name": "platform.open-cluster-management.io", "value": "AWS" }],
                "conditions": [{
                    "type": "ManagedClusterConditionAvailable",
                    "status": "True",
                    "reason": "ManagedClusterAvailable",
                    "message": "Managed cluster is available"
                }],
                "version": { "kubernetes": "v1.23.5+3afdacb" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn can_deserialize_hub_resource() {
        let cluster = local_cluster();

        assert_eq!(cluster.metadata.name.as_deref(), Some("local-cluster"));
        assert_eq!(cluster.spec.hub_accepts_client, true);
        assert_eq!(
            cluster.status.unwrap().version.unwrap().kubernetes.as_deref(),
            Some("v1.23.5+3afdacb")
        );
    }

    #[test]
    fn can_look_up_conditions_claims_and_labels() {
        let cluster = local_cluster();

        assert_eq!(
            cluster.condition("ManagedClusterConditionAvailable").map(|c| c.status.as_str()),
            Some("True")
        );
        assert_eq!(cluster.condition("HubAcceptedManagedCluster"), None);
        assert_eq!(cluster.claim("platform.open-cluster-management.io"), Some("AWS"));
        assert_eq!(cluster.label("cloud"), Some("Amazon"));
        assert_eq!(cluster.label("region"), None);
    }

    #[test]
    fn tolerates_missing_status() {
        let cluster: ManagedCluster = serde_json::from_value(json!({
            "apiVersion": "cluster.open-cluster-management.io/v1",
            "kind": "ManagedCluster",
            "metadata": { "name": "pending" },
            "spec": {}
        }))
        .unwrap();

        assert_eq!(cluster.status, None);
        assert_eq!(cluster.claim("id.openshift.io"), None);
        assert_eq!(cluster.label("clusterID"), None);
    }
}
