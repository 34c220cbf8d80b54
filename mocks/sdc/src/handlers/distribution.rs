//! Distribution client API: registration, kafka data and status reports.

use super::{dispatch, unexpected_reply};
use crate::catalog::{DistributionEvents, ServiceDistributions};
use crate::error::SdcError;
use crate::onboarding::Empty;
use crate::reducer::{CatalogCommand, CatalogReply};
use crate::CatalogStore;
use axum::{
    extract::{Path, State},
    Json,
};
use platform_mocks_web::AppError;
use serde::Serialize;
use std::sync::Arc;

/// Topics handed out on registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionTopics {
    /// Notification topic
    pub distr_notification_topic_name: &'static str,
    /// Status topic
    pub distr_status_topic_name: &'static str,
}

/// Kafka coordinates of the distribution engine.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaData {
    /// Bootstrap server
    pub kafka_boot_strap_server: &'static str,
    /// Notification topic
    pub distr_notification_topic_name: &'static str,
    /// Status topic
    pub distr_status_topic_name: &'static str,
}

/// Supported artifact types.
#[allow(clippy::unused_async)]
pub async fn artifact_types() -> Json<[&'static str; 1]> {
    Json(["HEAT"])
}

/// Kafka bootstrap server and topics.
#[allow(clippy::unused_async)]
pub async fn kafka_data() -> Json<KafkaData> {
    Json(KafkaData {
        kafka_boot_strap_server: "localhost:43219",
        distr_notification_topic_name: "SDC-DIST-NOTIF-TOPIC",
        distr_status_topic_name: "SDC-DIST-STATUS-TOPIC",
    })
}

/// Register a distribution client.
#[allow(clippy::unused_async)]
pub async fn register() -> Json<DistributionTopics> {
    Json(DistributionTopics {
        distr_notification_topic_name: "testName",
        distr_status_topic_name: "testTopic",
    })
}

/// Unregister a distribution client.
#[allow(clippy::unused_async)]
pub async fn unregister() -> Json<Empty> {
    Json(Empty {})
}

/// Distribution summary of a service, by `uuid`.
///
/// A distributed service gets its distribution id on the first query.
///
/// ```bash
/// curl http://localhost:30206/sdc1/feProxy/rest/v1/catalog/services/$UUID/distribution
/// ```
pub async fn service_distribution(
    State(store): State<Arc<CatalogStore>>,
    Path(service_uuid): Path<String>,
) -> Result<Json<ServiceDistributions>, AppError> {
    match dispatch(&store, CatalogCommand::QueryDistribution { service_uuid }).await? {
        CatalogReply::Distribution(distributions) => Ok(Json(distributions)),
        _ => Err(unexpected_reply()),
    }
}

/// Recorded notifications of a distribution.
pub async fn distribution_events(
    State(store): State<Arc<CatalogStore>>,
    Path(distribution_id): Path<String>,
) -> Result<Json<DistributionEvents>, AppError> {
    let events = store
        .state(|s| {
            if s.has_distribution(&distribution_id) {
                Ok(s.distribution_events.to_vec())
            } else {
                Err(SdcError::ResourceNotFound)
            }
        })
        .await?;

    Ok(Json(DistributionEvents {
        distribution_status_list: events,
    }))
}
