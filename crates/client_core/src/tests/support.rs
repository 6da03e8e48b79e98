use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use serde_json::json;
use shared::{
    domain::TutorialId,
    error::ServiceError,
    protocol::{RawTutorial, RemovalConfirmation, TutorialDraft, TutorialFields},
};
use tokio::sync::{oneshot, Mutex, Notify};

use crate::{
    prompt::{Confirmation, Notice, NoticeSink},
    service::TutorialService,
    TutorialSession,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ListAll,
    Search(String),
    Get(String),
    Create(TutorialDraft),
    Update(String, TutorialFields),
    Remove(String),
    RemoveAll,
}

pub(crate) struct FakeService {
    pub list_response: Mutex<Result<Vec<RawTutorial>, ServiceError>>,
    pub search_response: Mutex<Result<Vec<RawTutorial>, ServiceError>>,
    pub get_response: Mutex<Result<RawTutorial, ServiceError>>,
    pub create_response: Mutex<Result<RawTutorial, ServiceError>>,
    pub update_response: Mutex<Result<RawTutorial, ServiceError>>,
    pub remove_response: Mutex<Result<RemovalConfirmation, ServiceError>>,
    pub remove_all_response: Mutex<Result<RemovalConfirmation, ServiceError>>,
    pub list_gate: Mutex<Option<oneshot::Receiver<()>>>,
    pub search_gate: Mutex<Option<oneshot::Receiver<()>>>,
    pub list_started: Notify,
    pub search_started: Notify,
    calls: Mutex<Vec<Call>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            list_response: Mutex::new(Ok(Vec::new())),
            search_response: Mutex::new(Ok(Vec::new())),
            get_response: Mutex::new(Err(ServiceError::new("Tutorial not found"))),
            create_response: Mutex::new(Err(ServiceError::generic())),
            update_response: Mutex::new(Ok(RawTutorial::default())),
            remove_response: Mutex::new(Ok(RemovalConfirmation::default())),
            remove_all_response: Mutex::new(Ok(RemovalConfirmation::default())),
            list_gate: Mutex::new(None),
            search_gate: Mutex::new(None),
            list_started: Notify::new(),
            search_started: Notify::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_list(records: Vec<RawTutorial>) -> Self {
        let service = Self::new();
        *service.list_response.try_lock().expect("fresh lock") = Ok(records);
        service
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    pub async fn count(&self, call: &Call) -> usize {
        self.calls.lock().await.iter().filter(|c| *c == call).count()
    }

    async fn record(&self, call: Call) {
        self.calls.lock().await.push(call);
    }
}

#[async_trait]
impl TutorialService for FakeService {
    async fn list_all(&self) -> Result<Vec<RawTutorial>, ServiceError> {
        self.record(Call::ListAll).await;
        let response = self.list_response.lock().await.clone();
        self.list_started.notify_one();
        let gate = self.list_gate.lock().await.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        response
    }

    async fn search_by_title(&self, title: &str) -> Result<Vec<RawTutorial>, ServiceError> {
        self.record(Call::Search(title.to_string())).await;
        let response = self.search_response.lock().await.clone();
        self.search_started.notify_one();
        let gate = self.search_gate.lock().await.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        response
    }

    async fn get(&self, id: &TutorialId) -> Result<RawTutorial, ServiceError> {
        self.record(Call::Get(id.to_string())).await;
        self.get_response.lock().await.clone()
    }

    async fn create(&self, draft: &TutorialDraft) -> Result<RawTutorial, ServiceError> {
        self.record(Call::Create(draft.clone())).await;
        self.create_response.lock().await.clone()
    }

    async fn update(
        &self,
        id: &TutorialId,
        fields: &TutorialFields,
    ) -> Result<RawTutorial, ServiceError> {
        self.record(Call::Update(id.to_string(), fields.clone()))
            .await;
        self.update_response.lock().await.clone()
    }

    async fn remove(&self, id: &TutorialId) -> Result<RemovalConfirmation, ServiceError> {
        self.record(Call::Remove(id.to_string())).await;
        self.remove_response.lock().await.clone()
    }

    async fn remove_all(&self) -> Result<RemovalConfirmation, ServiceError> {
        self.record(Call::RemoveAll).await;
        let response = self.remove_all_response.lock().await.clone();
        if response.is_ok() {
            let mut listed = self.list_response.lock().await;
            if listed.is_ok() {
                *listed = Ok(Vec::new());
            }
        }
        response
    }
}

pub(crate) struct RecordingPrompt {
    answer: bool,
    prompts: StdMutex<Vec<String>>,
    notices: StdMutex<Vec<Notice>>,
}

impl RecordingPrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: StdMutex::new(Vec::new()),
            notices: StdMutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notices lock").clone()
    }
}

impl Confirmation for RecordingPrompt {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(prompt.to_string());
        self.answer
    }
}

impl NoticeSink for RecordingPrompt {
    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .expect("notices lock")
            .push(notice.clone());
    }
}

pub(crate) fn raw(id: i64, title: &str, description: &str) -> RawTutorial {
    serde_json::from_value(json!({
        "id": id,
        "title": title,
        "description": description,
        "published": false,
    }))
    .expect("raw tutorial")
}

pub(crate) fn legacy(id: &str, title: &str, description: &str) -> RawTutorial {
    serde_json::from_value(json!({
        "_id": id,
        "title": title,
        "description": description,
    }))
    .expect("legacy tutorial")
}

pub(crate) fn session_with(
    service: Arc<FakeService>,
    prompt: Arc<RecordingPrompt>,
) -> TutorialSession {
    TutorialSession::new(service, prompt.clone(), prompt)
}

pub(crate) fn session_for(service: Arc<FakeService>) -> TutorialSession {
    session_with(service, Arc::new(RecordingPrompt::answering(true)))
}

pub(crate) fn titles(session_tutorials: &[crate::Tutorial]) -> Vec<&str> {
    session_tutorials
        .iter()
        .map(|tutorial| tutorial.title.as_str())
        .collect()
}
