use std::cmp::Ordering;

use crate::models::cluster::{ClusterDetails, ClusterStatus, ClusterUpdate, UpdateInfo};
use crate::models::managed_cluster::ManagedCluster;
use crate::models::managed_cluster_info::ManagedClusterInfo;

const AVAILABLE_CONDITION: &str = "ManagedClusterConditionAvailable";

const CLAIM_CONSOLE_URL: &str = "consoleurl.cluster.open-cluster-management.io";
const CLAIM_OPENSHIFT_ID: &str = "id.openshift.io";
const CLAIM_OPENSHIFT_VERSION: &str = "version.openshift.io";
const CLAIM_PLATFORM: &str = "platform.open-cluster-management.io";
const CLAIM_REGION: &str = "region.open-cluster-management.io";

/// Reshapes a `ManagedCluster` into the status half of the response payload.
/// Claims win over the equivalent labels, which older agents set instead.
pub fn parse_managed_cluster(cluster: &ManagedCluster) -> ClusterDetails {
    let available = cluster.condition(AVAILABLE_CONDITION);
    let status = cluster.status.as_ref();

    let claim_or_label = |claim: &str, label: &str| {
        cluster
            .claim(claim)
            .or_else(|| cluster.label(label))
            .map(str::to_string)
    };

    ClusterDetails {
        name: cluster.metadata.name.clone().unwrap_or_default(),
        status: ClusterStatus {
            available: available
                .map(|condition| condition.status.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            reason: available.and_then(|condition| condition.message.clone()),
        },
        kubernetes_version: status
            .and_then(|status| status.version.as_ref())
            .and_then(|version| version.kubernetes.clone()),
        console_url: cluster.claim(CLAIM_CONSOLE_URL).map(str::to_string),
        openshift_id: claim_or_label(CLAIM_OPENSHIFT_ID, "clusterID"),
        openshift_version: claim_or_label(CLAIM_OPENSHIFT_VERSION, "openshiftVersion"),
        platform: claim_or_label(CLAIM_PLATFORM, "cloud"),
        region: cluster.claim(CLAIM_REGION).map(str::to_string),
        allocatable_resources: status
            .map(|status| status.allocatable.clone())
            .unwrap_or_default(),
        available_resources: status
            .map(|status| status.capacity.clone())
            .unwrap_or_default(),
    }
}

/// Reshapes a `ManagedClusterInfo` into the update half of the response payload.
/// A cluster without an info resource simply reports no update.
pub fn parse_update_info(info: Option<&ManagedClusterInfo>) -> UpdateInfo {
    let info = match info {
        Some(info) => info,
        None => return UpdateInfo::default(),
    };

    let console_url = info
        .status
        .as_ref()
        .and_then(|status| status.console_url.clone());

    let ocp = match info.ocp() {
        Some(ocp) => ocp,
        None => {
            return UpdateInfo {
                console_url,
                ..Default::default()
            }
        }
    };

    // (version, release notes url) for every offered release
    let offered = ocp
        .version_available_updates
        .iter()
        .map(|release| (release.version.as_str(), release.url.as_deref()))
        .chain(ocp.available_updates.iter().map(|version| (version.as_str(), None)));

    let latest = offered
        .filter(|(version, _)| match &ocp.version {
            Some(current) => compare_versions(version, current) == Ordering::Greater,
            None => true,
        })
        .fold(None::<(&str, Option<&str>)>, |latest, candidate| match latest {
            Some(best) if compare_versions(candidate.0, best.0) != Ordering::Greater => {
                // keep the release-notes url if a bare duplicate shows up later
                Some(best)
            }
            _ => Some(candidate),
        });

    UpdateInfo {
        openshift_version: ocp.version.clone(),
        console_url,
        update: ClusterUpdate {
            available: latest.is_some(),
            version: latest.map(|(version, _)| version.to_string()),
            url: latest.and_then(|(_, url)| url.map(str::to_string)),
            failed: ocp.upgrade_failed,
        },
    }
}

/// Orders dotted release versions numerically ("4.10.3" > "4.9.12").
/// Anything after the first non-digit of a component is ignored.
fn compare_versions(left: &str, right: &str) -> Ordering {
    fn components(version: &str) -> Vec<u64> {
        version
            .trim_start_matches('v')
            .split('.')
            .map(|part| {
                let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse().unwrap_or(0)
            })
            .collect()
    }

    let (left, right) = (components(left), components(right));
    let len = left.len().max(right.len());

    (0..len)
        .map(|i| {
            left.get(i)
                .unwrap_or(&0)
                .cmp(right.get(i).unwrap_or(&0))
        })
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::{compare_versions, parse_managed_cluster, parse_update_info};
    use crate::models::cluster::{ClusterUpdate, UpdateInfo};
    use crate::models::managed_cluster::ManagedCluster;
    use crate::models::managed_cluster_info::ManagedClusterInfo;
    use serde_json::{json, Value};
    use std::cmp::Ordering;

    fn managed_cluster(value: Value) -> ManagedCluster {
        serde_json::from_value(value).unwrap()
    }

    fn cluster_info(ocp: Value) -> ManagedClusterInfo {
        serde_json::from_value(json!({
            "apiVersion": "internal.open-cluster-management.io/v1beta1",
            "kind": "ManagedClusterInfo",
            "metadata": { "name": "cluster1", "namespace": "cluster1" },
            "spec": {},
            "status": { "distributionInfo": { "type": "OCP", "ocp": ocp } }
        }))
        .unwrap()
    }

    #[test]
    fn can_parse_available_cluster() {
        let cluster = managed_cluster(json!({
            "apiVersion": "cluster.open-cluster-management.io/v1",
            "kind": "ManagedCluster",
            "metadata": { "name": "cluster1", "labels": { "cloud": "Amazon", "clusterID": "label-id" } },
            "spec": {},
            "status": {
                "allocatable": { "cpu": "94", "pods": "750" },
                "capacity": { "cpu": "96", "pods": "750" },
                "clusterClaims": [
                    { "name": "id.openshift.io", "value": "claim-id" },
                    { "name": "consoleurl.cluster.open-cluster-management.io", "value": "https://console.cluster1" },
                    { "name": "region.open-cluster-management.io", "value": "us-east-1" }
                ],
                "conditions": [{
                    "type": "ManagedClusterConditionAvailable",
                    "status": "True",
                    "message": "Managed cluster is available"
                }],
                "version": { "kubernetes": "v1.23.5" }
            }
        }));

        let details = parse_managed_cluster(&cluster);

        assert_eq!(
            serde_json::to_value(&details).unwrap(),
            json!({
                "name": "cluster1",
                "status": { "available": true, "reason": "Managed cluster is available" },
                "kubernetesVersion": "v1.23.5",
                "consoleUrl": "https://console.cluster1",
                "openshiftId": "claim-id",
                "platform": "Amazon",
                "region": "us-east-1",
                "allocatableResources": { "cpu": "94", "pods": "750" },
                "availableResources": { "cpu": "96", "pods": "750" }
            })
        );
    }

    #[test]
    fn unknown_condition_means_unavailable() {
        let cluster = managed_cluster(json!({
            "apiVersion": "cluster.open-cluster-management.io/v1",
            "kind": "ManagedCluster",
            "metadata": { "name": "cluster2" },
            "spec": {},
            "status": {
                "conditions": [{
                    "type": "ManagedClusterConditionAvailable",
                    "status": "Unknown",
                    "message": "Registration agent stopped updating its lease."
                }]
            }
        }));

        let details = parse_managed_cluster(&cluster);

        assert_eq!(details.status.available, false);
        assert_eq!(
            details.status.reason.as_deref(),
            Some("Registration agent stopped updating its lease.")
        );
    }

    #[test]
    fn cluster_without_status_is_unavailable() {
        let cluster = managed_cluster(json!({
            "apiVersion": "cluster.open-cluster-management.io/v1",
            "kind": "ManagedCluster",
            "metadata": { "name": "joining" },
            "spec": {}
        }));

        assert_eq!(
            serde_json::to_value(&parse_managed_cluster(&cluster)).unwrap(),
            json!({ "name": "joining", "status": { "available": false } })
        );
    }

    #[test]
    fn missing_info_reports_no_update() {
        assert_eq!(parse_update_info(None), UpdateInfo::default());
    }

    #[test]
    fn picks_highest_offered_version() {
        let info = cluster_info(json!({
            "version": "4.9.7",
            "availableUpdates": ["4.9.8", "4.10.3"],
            "versionAvailableUpdates": [
                { "version": "4.9.8", "url": "https://errata/4.9.8" },
                { "version": "4.10.3", "url": "https://errata/4.10.3" }
            ]
        }));

        assert_eq!(
            parse_update_info(Some(&info)),
            UpdateInfo {
                openshift_version: Some("4.9.7".to_string()),
                console_url: None,
                update: ClusterUpdate {
                    available: true,
                    version: Some("4.10.3".to_string()),
                    url: Some("https://errata/4.10.3".to_string()),
                    failed: false,
                },
            }
        );
    }

    #[test]
    fn falls_back_to_bare_version_list() {
        let info = cluster_info(json!({ "version": "4.8.2", "availableUpdates": ["4.8.4"] }));

        let update = parse_update_info(Some(&info)).update;

        assert_eq!(update.available, true);
        assert_eq!(update.version.as_deref(), Some("4.8.4"));
        assert_eq!(update.url, None);
    }

    #[test]
    fn up_to_date_cluster_has_no_update() {
        let info = cluster_info(json!({ "version": "4.10.3", "upgradeFailed": true }));

        let update = parse_update_info(Some(&info)).update;

        assert_eq!(update.available, false);
        assert_eq!(update.version, None);
        assert_eq!(update.failed, true);
    }

    #[test]
    fn orders_versions_numerically() {
        assert_eq!(compare_versions("4.10.3", "4.9.12"), Ordering::Greater);
        assert_eq!(compare_versions("4.9", "4.9.0"), Ordering::Equal);
        assert_eq!(compare_versions("v1.23.5+3afdacb", "1.23.6"), Ordering::Less);
        assert_eq!(compare_versions("4.11.0-rc.1", "4.10.0"), Ordering::Greater);
    }
}
