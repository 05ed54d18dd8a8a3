use super::client::{expect_json, ApiClient};
use crate::application::ports::gateways::{CommentGateway, CreateCommentRequest};
use crate::domain::entities::{Comment, RawComment};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// `CommentGateway` over the backend's REST endpoints.
pub struct CommentApi {
    client: ApiClient,
    page_limit: u32,
}

impl CommentApi {
    pub fn new(client: ApiClient, page_limit: u32) -> Self {
        Self { client, page_limit }
    }
}

#[async_trait]
impl CommentGateway for CommentApi {
    async fn load_comments(&self, spot_id: &str) -> Result<Vec<Comment>, AppError> {
        let response = self
            .client
            .get(&format!("/spots/{spot_id}/comments"))
            .query(&[("maxRecords", self.page_limit.to_string())])
            .send()
            .await?;
        let raw: Vec<RawComment> = expect_json(response).await?;
        Ok(raw.into_iter().map(Comment::from).collect())
    }

    async fn create_comment(&self, request: &CreateCommentRequest) -> Result<Comment, AppError> {
        let builder = self.client.post("/comments").json(request);
        let response = self.client.authorized(builder).await.send().await?;
        let raw: RawComment = expect_json(response).await?;
        Ok(Comment::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::api::client::test_support::test_client;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn load_caps_the_record_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/spots/spot-1/comments"))
            .and(query_param("maxRecords", "15"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "c1",
                    "content": "mellow lefts all morning",
                    "spot_id": "spot-1",
                    "creator_name": "Maya",
                    "rating": 5,
                    "date": "2024-03-18"
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let api = CommentApi::new(test_client(&server.uri(), None), 15);
        let comments = api.load_comments("spot-1").await.expect("load succeeds");

        assert_eq!(comments.len(), 1);
        assert!(comments[0].date.is_some());
    }

    #[tokio::test]
    async fn create_posts_and_normalizes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/comments"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "c2",
                "content": "crowded on weekends",
                "spot_id": "spot-1",
                "rating": 3,
                "date": "not-a-date"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = CommentApi::new(test_client(&server.uri(), Some("tok-1")), 15);
        let comment = api
            .create_comment(&CreateCommentRequest {
                content: "crowded on weekends".to_string(),
                spot_id: "spot-1".to_string(),
                creator_name: Some("Jonas".to_string()),
                rating: 3,
                date: "2024-04-02".to_string(),
            })
            .await
            .expect("create succeeds");

        assert_eq!(comment.id, "c2");
        assert!(comment.date.is_none());
    }
}
