use async_trait::async_trait;
use shared::{
    domain::TutorialId,
    error::ServiceError,
    protocol::{RawTutorial, RemovalConfirmation, TutorialDraft, TutorialFields},
};

/// Remote CRUD interface the session drives. Implementations return raw
/// records; identifier resolution happens on the session side.
#[async_trait]
pub trait TutorialService: Send + Sync {
    async fn list_all(&self) -> Result<Vec<RawTutorial>, ServiceError>;
    async fn search_by_title(&self, title: &str) -> Result<Vec<RawTutorial>, ServiceError>;
    async fn get(&self, id: &TutorialId) -> Result<RawTutorial, ServiceError>;
    async fn create(&self, draft: &TutorialDraft) -> Result<RawTutorial, ServiceError>;
    async fn update(
        &self,
        id: &TutorialId,
        fields: &TutorialFields,
    ) -> Result<RawTutorial, ServiceError>;
    async fn remove(&self, id: &TutorialId) -> Result<RemovalConfirmation, ServiceError>;
    async fn remove_all(&self) -> Result<RemovalConfirmation, ServiceError>;
}
