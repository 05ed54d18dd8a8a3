use crate::shared::error::AppError;
use async_trait::async_trait;

/// An image picked by the user for upload.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Spot,
    WorkPlace,
}

impl ImageKind {
    pub fn bucket(&self) -> &'static str {
        match self {
            ImageKind::Spot => "spot-images",
            ImageKind::WorkPlace => "workplace-images",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageKind::Spot => "spot",
            ImageKind::WorkPlace => "workplace",
        }
    }
}

/// External storage collaborator. Returns the public URL of the stored
/// object; the create flows degrade failures to a missing image link.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(
        &self,
        kind: ImageKind,
        object_path: &str,
        file: &ImageFile,
    ) -> Result<String, AppError>;
}
