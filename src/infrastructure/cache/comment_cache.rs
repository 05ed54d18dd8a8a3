use crate::domain::entities::Comment;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory cache of the comments loaded for one destination.
#[derive(Clone)]
pub struct CommentCacheService {
    state: Arc<RwLock<CommentCacheState>>,
}

struct CommentCacheState {
    comments: HashMap<String, Comment>,
    is_loading: bool,
    failed_to_load: bool,
    is_creating: bool,
    failed_to_create: bool,
}

impl CommentCacheService {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(CommentCacheState {
                comments: HashMap::new(),
                is_loading: false,
                failed_to_load: false,
                is_creating: false,
                failed_to_create: false,
            })),
        }
    }

    pub async fn begin_load(&self) {
        let mut state = self.state.write().await;
        state.is_loading = true;
        state.failed_to_load = false;
    }

    pub async fn fail_load(&self) {
        let mut state = self.state.write().await;
        state.is_loading = false;
        state.failed_to_load = true;
    }

    pub async fn complete_load(&self, comments: Vec<Comment>) {
        let mut state = self.state.write().await;
        state.is_loading = false;
        state.failed_to_load = false;
        state.comments = comments
            .into_iter()
            .map(|comment| (comment.id.clone(), comment))
            .collect();
    }

    pub async fn begin_create(&self) {
        let mut state = self.state.write().await;
        state.is_creating = true;
        state.failed_to_create = false;
    }

    pub async fn fail_create(&self) {
        let mut state = self.state.write().await;
        state.is_creating = false;
        state.failed_to_create = true;
    }

    pub async fn complete_create(&self, comment: Comment) {
        let mut state = self.state.write().await;
        state.is_creating = false;
        state.failed_to_create = false;
        state.comments.insert(comment.id.clone(), comment);
    }

    pub async fn all(&self) -> Vec<Comment> {
        self.state.read().await.comments.values().cloned().collect()
    }

    pub async fn size(&self) -> usize {
        self.state.read().await.comments.len()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn failed_to_load(&self) -> bool {
        self.state.read().await.failed_to_load
    }

    pub async fn is_creating(&self) -> bool {
        self.state.read().await.is_creating
    }

    pub async fn failed_to_create(&self) -> bool {
        self.state.read().await.failed_to_create
    }
}

impl Default for CommentCacheService {
    fn default() -> Self {
        Self::new()
    }
}
