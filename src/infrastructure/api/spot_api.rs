use super::client::{expect_json, ApiClient};
use crate::application::ports::gateways::{
    CreateSpotRequest, LikeAction, LikeOutcome, SpotFilters, SpotGateway, SpotPage,
};
use crate::domain::entities::{RawSpot, Spot};
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;

/// `SpotGateway` over the backend's REST endpoints.
pub struct SpotApi {
    client: ApiClient,
}

impl SpotApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Serializes only the present/truthy filter fields; `surfSeason` is
    /// repeated once per token.
    fn filter_query(filters: &SpotFilters) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(life_cost) = filters.life_cost.filter(|v| *v > 0) {
            query.push(("lifeCost", life_cost.to_string()));
        }
        if filters.has_coliving {
            query.push(("hasColiving", "true".to_string()));
        }
        if filters.has_coworking {
            query.push(("hasCoworking", "true".to_string()));
        }
        if let Some(wifi_quality) = filters.wifi_quality.filter(|v| *v > 0) {
            query.push(("wifiQuality", wifi_quality.to_string()));
        }
        if let Some(country) = filters.country.as_deref().filter(|c| !c.is_empty()) {
            query.push(("country", country.to_string()));
        }
        for season in &filters.surf_season {
            query.push(("surfSeason", season.clone()));
        }
        query
    }
}

/// The collection endpoint answers either a bare array or an envelope with
/// an explicit total count.
#[derive(Deserialize)]
#[serde(untagged)]
enum SpotsResponse {
    Envelope {
        spots: Vec<RawSpot>,
        #[serde(rename = "totalCount", default)]
        total_count: Option<usize>,
    },
    Bare(Vec<RawSpot>),
}

#[derive(Deserialize)]
struct LikeResponse {
    #[serde(rename = "userId", default)]
    user_id: String,
}

#[async_trait]
impl SpotGateway for SpotApi {
    async fn load_spots(&self, filters: &SpotFilters) -> Result<SpotPage, AppError> {
        let response = self
            .client
            .get("/spots")
            .query(&Self::filter_query(filters))
            .send()
            .await?;

        let body: SpotsResponse = expect_json(response).await?;
        let (raw_spots, total_count) = match body {
            SpotsResponse::Envelope { spots, total_count } => {
                let total = total_count.unwrap_or(spots.len());
                (spots, total)
            }
            SpotsResponse::Bare(spots) => {
                let total = spots.len();
                (spots, total)
            }
        };

        Ok(SpotPage {
            spots: raw_spots.into_iter().map(Spot::from).collect(),
            total_count,
        })
    }

    async fn create_spot(&self, request: &CreateSpotRequest) -> Result<Spot, AppError> {
        let builder = self.client.post("/spots").json(request);
        let response = self.client.authorized(builder).await.send().await?;
        let raw: RawSpot = expect_json(response).await?;
        Ok(Spot::from(raw))
    }

    async fn like_spot(&self, spot_id: &str) -> Result<LikeOutcome, AppError> {
        let builder = self.client.post(&format!("/spots/{spot_id}/like"));
        let response = self.client.authorized(builder).await.send().await?;

        // The status code is the semantic channel: 201 liked, 200 unliked.
        // Anything else, other 2xx included, is a protocol error.
        let status = response.status().as_u16();
        match status {
            201 => {
                let body: LikeResponse = response.json().await?;
                Ok(LikeOutcome {
                    action: LikeAction::Liked,
                    user_id: body.user_id,
                })
            }
            200 => {
                let body: LikeResponse = response.json().await?;
                Ok(LikeOutcome {
                    action: LikeAction::Removed,
                    user_id: body.user_id,
                })
            }
            _ => {
                let message = response.text().await.unwrap_or_default();
                Err(AppError::Api { status, message })
            }
        }
    }
}
