// Handlers for the cluster status endpoints

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use log::info;
use serde_json::{Map, Value};

use crate::controllers::hub::ClusterApi;
use crate::utils::error::Error;
use crate::utils::merge::{cluster_payload, join_clusters, JoinStrategy};
use crate::utils::names::normalize_cluster_name;

/// Shared, read-only state handed to every status request.
#[derive(Clone)]
pub struct StatusState {
    api: Arc<dyn ClusterApi>,
    hub_cluster_name: Arc<str>,
    join_strategy: JoinStrategy,
}

impl StatusState {
    /// # Arguments:
    /// - `api` - Handle to the hub, built once and reused by all requests.
    /// - `hub_cluster_name` - The name the hub goes by locally; requests for it are
    /// redirected to the name the hub uses inside OCM.
    /// - `join_strategy` - How `/status` pairs clusters with their info resources.
    pub fn new(api: Arc<dyn ClusterApi>, hub_cluster_name: &str, join_strategy: JoinStrategy) -> Self {
        StatusState {
            api,
            hub_cluster_name: Arc::from(hub_cluster_name),
            join_strategy,
        }
    }
}

pub fn router(state: StatusState) -> Router {
    Router::new()
        .route("/status", get(get_all_cluster_statuses))
        .route("/status/{cluster_name}", get(get_cluster_status))
        .with_state(state)
}

/// Handler for GET /status/{cluster_name} - Returns the status of one managed cluster
/// merged with its update information
pub async fn get_cluster_status(
    State(state): State<StatusState>,
    Path(cluster_name): Path<String>,
) -> Result<Json<Map<String, Value>>, Error> {
    info!("Incoming status request for {} cluster", cluster_name);

    let cluster_name = normalize_cluster_name(&cluster_name, &state.hub_cluster_name);

    let (cluster, infos) = futures::try_join!(
        state.api.get_managed_cluster(cluster_name),
        state.api.list_managed_cluster_infos()
    )?;

    let info = infos
        .iter()
        .find(|info| info.metadata.name.as_deref() == Some(cluster_name));

    Ok(Json(cluster_payload(&cluster, info)?))
}

/// Handler for GET /status - Returns the status of every managed cluster, in the
/// order the hub lists them
pub async fn get_all_cluster_statuses(
    State(state): State<StatusState>,
) -> Result<Json<Vec<Map<String, Value>>>, Error> {
    info!("Incoming status request for all clusters");

    let (clusters, infos) = futures::try_join!(
        state.api.list_managed_clusters(),
        state.api.list_managed_cluster_infos()
    )?;

    Ok(Json(join_clusters(&clusters, &infos, state.join_strategy)?))
}
