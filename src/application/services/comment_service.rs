use crate::application::ports::gateways::{CommentGateway, CreateCommentRequest};
use crate::domain::entities::Comment;
use crate::infrastructure::cache::CommentCacheService;
use crate::shared::error::AppError;
use std::sync::Arc;

/// The comment store for the currently open destination.
pub struct CommentService {
    gateway: Arc<dyn CommentGateway>,
    cache: CommentCacheService,
}

impl CommentService {
    pub fn new(gateway: Arc<dyn CommentGateway>) -> Self {
        Self {
            gateway,
            cache: CommentCacheService::new(),
        }
    }

    pub async fn load_for_spot(&self, spot_id: &str) -> Result<(), AppError> {
        self.cache.begin_load().await;

        match self.gateway.load_comments(spot_id).await {
            Ok(comments) => {
                self.cache.complete_load(comments).await;
                Ok(())
            }
            Err(err) => {
                self.cache.fail_load().await;
                Err(err)
            }
        }
    }

    pub async fn create_comment(&self, request: CreateCommentRequest) -> Result<Comment, AppError> {
        self.cache.begin_create().await;

        match self.gateway.create_comment(&request).await {
            Ok(comment) => {
                self.cache.complete_create(comment.clone()).await;
                Ok(comment)
            }
            Err(err) => {
                self.cache.fail_create().await;
                Err(err)
            }
        }
    }

    /// Cached comments, newest first. Undated comments sort last.
    pub async fn comments(&self) -> Vec<Comment> {
        let mut comments = self.cache.all().await;
        comments.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        comments
    }

    pub async fn is_loading(&self) -> bool {
        self.cache.is_loading().await
    }

    pub async fn failed_to_load(&self) -> bool {
        self.cache.failed_to_load().await
    }

    pub async fn is_creating(&self) -> bool {
        self.cache.is_creating().await
    }

    pub async fn failed_to_create(&self) -> bool {
        self.cache.failed_to_create().await
    }
}
