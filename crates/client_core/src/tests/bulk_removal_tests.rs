use std::sync::Arc;

use shared::error::ServiceError;

use crate::{
    prompt::{Notice, REMOVE_ALL_PROMPT},
    test_support::{raw, session_with, Call, FakeService, RecordingPrompt},
    types::RemoveAllOutcome,
};

#[tokio::test]
async fn declined_confirmation_changes_nothing() {
    let service = Arc::new(FakeService::with_list(vec![raw(1, "A", "a")]));
    let prompt = Arc::new(RecordingPrompt::answering(false));
    let session = session_with(service.clone(), prompt.clone());
    session.refresh().await.expect("refresh");
    session.select_index(0).await.expect("select");

    let outcome = session.remove_all_requested().await.expect("cancelled");

    assert_eq!(outcome, RemoveAllOutcome::Cancelled);
    assert_eq!(prompt.prompts(), vec![REMOVE_ALL_PROMPT.to_string()]);
    assert_eq!(service.count(&Call::RemoveAll).await, 0);
    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.tutorials.len(), 1);
    assert!(snapshot.selection.is_some());
}

#[tokio::test]
async fn empty_list_asks_first_then_reports_nothing_to_remove() {
    let service = Arc::new(FakeService::new());
    let prompt = Arc::new(RecordingPrompt::answering(true));
    let session = session_with(service.clone(), prompt.clone());

    let outcome = session.remove_all_requested().await.expect("nothing");

    assert_eq!(outcome, RemoveAllOutcome::NothingToRemove);
    assert_eq!(prompt.prompts().len(), 1);
    assert_eq!(prompt.notices(), vec![Notice::NothingToRemove]);
    assert_eq!(prompt.notices()[0].to_string(), "nothing to remove");
    assert!(service.calls().await.is_empty());
}

#[tokio::test]
async fn confirmed_removal_calls_service_once_then_refreshes_once() {
    let service = Arc::new(FakeService::with_list(vec![
        raw(1, "A", "a"),
        raw(2, "B", "b"),
    ]));
    let prompt = Arc::new(RecordingPrompt::answering(true));
    let session = session_with(service.clone(), prompt.clone());
    session.refresh().await.expect("refresh");
    session.select_index(1).await.expect("select");

    let outcome = session.remove_all_requested().await.expect("removed");

    assert_eq!(outcome, RemoveAllOutcome::Removed);
    assert_eq!(
        service.calls().await,
        vec![Call::ListAll, Call::RemoveAll, Call::ListAll]
    );
    let snapshot = session.snapshot().await;
    assert!(snapshot.tutorials.is_empty());
    assert!(snapshot.selection.is_none());
    assert!(prompt.notices().is_empty());
}

#[tokio::test]
async fn failed_removal_leaves_state_and_surfaces_error() {
    let service = Arc::new(FakeService::with_list(vec![raw(1, "A", "a")]));
    *service.remove_all_response.lock().await =
        Err(ServiceError::new("Some error occurred while removing all tutorials."));
    let prompt = Arc::new(RecordingPrompt::answering(true));
    let session = session_with(service.clone(), prompt.clone());
    session.refresh().await.expect("refresh");
    session.select_index(0).await.expect("select");

    let err = session.remove_all_requested().await.expect_err("fails");

    assert_eq!(
        err.to_string(),
        "Some error occurred while removing all tutorials."
    );
    assert_eq!(service.count(&Call::ListAll).await, 1);
    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.tutorials.len(), 1);
    assert!(snapshot.selection.is_some());
    assert_eq!(
        prompt.notices(),
        vec![Notice::RemovalFailed(
            "Some error occurred while removing all tutorials.".to_string()
        )]
    );
}

#[tokio::test]
async fn reload_failure_after_removal_still_reports_removed() {
    let service = Arc::new(FakeService::with_list(vec![raw(1, "A", "a")]));
    let prompt = Arc::new(RecordingPrompt::answering(true));
    let session = session_with(service.clone(), prompt.clone());
    session.refresh().await.expect("refresh");
    session.select_index(0).await.expect("select");
    *service.list_response.lock().await = Err(ServiceError::new("list unavailable"));

    let outcome = session.remove_all_requested().await.expect("removed");

    assert_eq!(outcome, RemoveAllOutcome::Removed);
    assert_eq!(service.count(&Call::RemoveAll).await, 1);
    assert_eq!(service.count(&Call::ListAll).await, 2);
    assert_eq!(
        prompt.notices(),
        vec![Notice::ReloadFailed("list unavailable".to_string())]
    );
    assert!(session.selection().await.is_none());
}
