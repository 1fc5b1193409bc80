pub mod cluster;
pub mod managed_cluster;
pub mod managed_cluster_info;
