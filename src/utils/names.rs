/// Name the OCM hub registers itself under, whatever it is called locally.
pub const HUB_CLUSTER_NAME_IN_OCM: &str = "local-cluster";

/// Maps the locally configured hub alias onto the name the hub uses for itself.
/// Any other cluster name is returned unchanged.
pub fn normalize_cluster_name<'a>(cluster_name: &'a str, hub_cluster_name: &str) -> &'a str {
    if cluster_name == hub_cluster_name {
        HUB_CLUSTER_NAME_IN_OCM
    } else {
        cluster_name
    }
}
