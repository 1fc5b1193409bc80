use std::collections::HashMap;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::managed_cluster::ManagedCluster;
use crate::models::managed_cluster_info::ManagedClusterInfo;
use crate::utils::error::Error;
use crate::utils::parser::{parse_managed_cluster, parse_update_info};

/// How the all-clusters listing pairs each `ManagedCluster` with its `ManagedClusterInfo`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinStrategy {
    /// Pair the n-th cluster with the n-th info, names are not compared
    #[default]
    Positional,
    /// Pair entries whose `metadata.name` match
    ByName,
}

impl FromStr for JoinStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "by-name" => Ok(JoinStrategy::ByName),
            "positional" => Ok(JoinStrategy::Positional),
            other => Err(format!(
                "unknown join strategy {}, expected by-name or positional",
                other
            )),
        }
    }
}

/// Shallow merge of two serialized objects. Top-level keys of `overlay` replace
/// those of `base`; nested objects are not merged.
pub fn merge_objects<B, O>(base: &B, overlay: &O) -> Result<Map<String, Value>, Error>
where
    B: Serialize,
    O: Serialize,
{
    let mut merged = into_object(serde_json::to_value(base)?);
    merged.extend(into_object(serde_json::to_value(overlay)?));
    Ok(merged)
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Response payload for one cluster: its parsed status with its parsed update info on top.
pub fn cluster_payload(
    cluster: &ManagedCluster,
    info: Option<&ManagedClusterInfo>,
) -> Result<Map<String, Value>, Error> {
    merge_objects(&parse_managed_cluster(cluster), &parse_update_info(info))
}

/// Builds the all-clusters payload in the order of `clusters`. A cluster without
/// a partner info still gets an entry; info without a cluster is dropped.
pub fn join_clusters(
    clusters: &[ManagedCluster],
    infos: &[ManagedClusterInfo],
    strategy: JoinStrategy,
) -> Result<Vec<Map<String, Value>>, Error> {
    match strategy {
        JoinStrategy::Positional => clusters
            .iter()
            .enumerate()
            .map(|(index, cluster)| cluster_payload(cluster, infos.get(index)))
            .collect(),
        JoinStrategy::ByName => {
            // first entry wins on duplicate names, like the single-cluster lookup
            let mut infos_by_name: HashMap<&str, &ManagedClusterInfo> = HashMap::new();
            for info in infos {
                if let Some(name) = info.metadata.name.as_deref() {
                    infos_by_name.entry(name).or_insert(info);
                }
            }

            clusters
                .iter()
                .map(|cluster| {
                    let info = cluster
                        .metadata
                        .name
                        .as_deref()
                        .and_then(|name| infos_by_name.get(name).copied());
                    cluster_payload(cluster, info)
                })
                .collect()
        }
    }
}
