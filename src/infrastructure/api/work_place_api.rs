use super::client::{expect_json, ApiClient};
use crate::application::ports::gateways::{
    CreateWorkPlaceRequest, SubmitRatingRequest, WorkPlaceGateway,
};
use crate::domain::entities::{RawWorkPlace, Rating, WorkPlace};
use crate::shared::error::AppError;
use async_trait::async_trait;
use tracing::warn;

/// `WorkPlaceGateway` over the backend's REST endpoints.
pub struct WorkPlaceApi {
    client: ApiClient,
}

impl WorkPlaceApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WorkPlaceGateway for WorkPlaceApi {
    async fn load_work_places(&self, spot_id: &str) -> Result<Vec<WorkPlace>, AppError> {
        let response = self
            .client
            .get(&format!("/spots/{spot_id}/workplaces"))
            .send()
            .await?;
        let raw: Vec<RawWorkPlace> = expect_json(response).await?;

        Ok(raw
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                let kind = record.kind.clone();
                let place = WorkPlace::from_raw(record);
                if place.is_none() {
                    warn!(id, kind, "dropping workplace with unknown kind");
                }
                place
            })
            .collect())
    }

    async fn create_work_place(
        &self,
        request: &CreateWorkPlaceRequest,
    ) -> Result<WorkPlace, AppError> {
        let builder = self.client.post("/workplaces").json(request);
        let response = self.client.authorized(builder).await.send().await?;
        let raw: RawWorkPlace = expect_json(response).await?;
        WorkPlace::from_raw(raw).ok_or_else(|| {
            AppError::Deserialization("created workplace has an unknown kind".to_string())
        })
    }

    async fn submit_rating(
        &self,
        work_place_id: &str,
        request: &SubmitRatingRequest,
        edit: bool,
    ) -> Result<Rating, AppError> {
        let path = format!("/workplaces/{work_place_id}/ratings");
        let builder = if edit {
            self.client.put(&path)
        } else {
            self.client.post(&path)
        }
        .json(request);
        let response = self.client.authorized(builder).await.send().await?;
        expect_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::WorkPlaceKind;
    use crate::infrastructure::api::client::test_support::test_client;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn raw_place_json(id: &str, kind: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Dojo",
            "type": kind,
            "spot_id": "spot-1",
            "adress": "Jl. Batu Mejan",
            "latitude": "-8.66",
            "longitude": "115.13",
            "total_ratings": 2,
            "average_rating": "4.5",
            "ratings": [
                { "user_id": "u1", "rating": 5 },
                { "user_id": "u2", "rating": 4 }
            ]
        })
    }

    #[tokio::test]
    async fn load_drops_unknown_kinds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/spots/spot-1/workplaces"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                raw_place_json("a", "coworking"),
                raw_place_json("b", "library"),
                raw_place_json("c", "café")
            ])))
            .mount(&server)
            .await;

        let api = WorkPlaceApi::new(test_client(&server.uri(), None));
        let places = api.load_work_places("spot-1").await.expect("load succeeds");

        assert_eq!(places.len(), 2);
        assert!(places.iter().any(|p| p.kind == WorkPlaceKind::Coworking));
        assert!(places.iter().any(|p| p.kind == WorkPlaceKind::Cafe));
    }

    #[tokio::test]
    async fn load_normalizes_address_spelling() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/spots/spot-1/workplaces"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([raw_place_json("a", "café")])),
            )
            .mount(&server)
            .await;

        let api = WorkPlaceApi::new(test_client(&server.uri(), None));
        let places = api.load_work_places("spot-1").await.expect("load succeeds");

        assert_eq!(places[0].address.as_deref(), Some("Jl. Batu Mejan"));
        assert_eq!(places[0].average_rating, 4.5);
    }

    #[tokio::test]
    async fn create_is_authenticated_and_serializes_kind_as_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/workplaces"))
            .and(header("authorization", "Bearer tok-9"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(raw_place_json("new", "coworking")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = WorkPlaceApi::new(test_client(&server.uri(), Some("tok-9")));
        let place = api
            .create_work_place(&CreateWorkPlaceRequest {
                google_id: Some("g-123".to_string()),
                name: "Dojo".to_string(),
                kind: WorkPlaceKind::Coworking,
                spot_id: "spot-1".to_string(),
                image_link: None,
                adress: Some("Jl. Batu Mejan".to_string()),
                rating: 5,
                comment: Some("fast wifi".to_string()),
                longitude: 115.13,
                latitude: -8.66,
            })
            .await
            .expect("create succeeds");

        assert_eq!(place.id, "new");

        let requests = server.received_requests().await.expect("recording enabled");
        let body: serde_json::Value =
            serde_json::from_slice(&requests[0].body).expect("json body");
        assert_eq!(body["type"], "coworking");
        assert_eq!(body["id"], "g-123");
        assert_eq!(body["adress"], "Jl. Batu Mejan");
    }

    #[tokio::test]
    async fn rating_edit_uses_put() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/workplaces/wp-1/ratings"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "user_id": "u1", "rating": 3 })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = WorkPlaceApi::new(test_client(&server.uri(), Some("tok-9")));
        let rating = api
            .submit_rating(
                "wp-1",
                &SubmitRatingRequest {
                    kind: WorkPlaceKind::Cafe,
                    work_place_id: "wp-1".to_string(),
                    rating: 3,
                    comment: None,
                },
                true,
            )
            .await
            .expect("rating succeeds");

        assert_eq!(rating.rating, 3);
    }

    #[tokio::test]
    async fn new_rating_uses_post() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/workplaces/wp-1/ratings"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "user_id": "u2", "rating": 5 })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = WorkPlaceApi::new(test_client(&server.uri(), Some("tok-9")));
        let rating = api
            .submit_rating(
                "wp-1",
                &SubmitRatingRequest {
                    kind: WorkPlaceKind::Cafe,
                    work_place_id: "wp-1".to_string(),
                    rating: 5,
                    comment: Some("great flat white".to_string()),
                },
                false,
            )
            .await
            .expect("rating succeeds");

        assert_eq!(rating.user_id, "u2");
    }
}
