mod common;

use common::{documents, store_with, Call, FakeApi, APPROVER, PROJECT};
use document_store::models::{
    AnnotationId, AnnotationPayload, DocumentId, DocumentPatch, Feedback, FeedbackRecord,
    SearchOptions, UploadFile, UploadRequest,
};
use document_store::{Mutation, StoreError};

fn ids(store_items: &[document_store::models::Document]) -> Vec<i64> {
    store_items.iter().map(|d| d.id.0).collect()
}

#[tokio::test]
async fn fetch_documents_replaces_page_and_total() {
    let (store, api) = store_with(FakeApi::new(documents(&(1..=12).collect::<Vec<_>>())));

    store
        .fetch_documents(PROJECT, &SearchOptions::default())
        .await
        .expect("Failed to fetch documents");

    let state = store.state().await;
    assert_eq!(state.items().len(), 10);
    assert_eq!(state.total(), 12);
    assert!(!state.loading());
    assert_eq!(state.current_doc().map(|d| d.id), Some(DocumentId(1)));
    assert_eq!(api.calls(), vec![Call::ListDocuments(SearchOptions::default())]);
}

#[tokio::test]
async fn failed_fetch_leaves_items_unchanged() {
    let (store, api) = store_with(FakeApi::new(documents(&[1, 2])));
    store
        .fetch_documents(PROJECT, &SearchOptions::default())
        .await
        .expect("Failed to fetch documents");

    api.fail("list_documents");
    let err = store
        .fetch_documents(PROJECT, &SearchOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_remote());
    assert!(err.to_string().contains("list_documents failed"));
    let state = store.state().await;
    assert_eq!(ids(state.items()), vec![1, 2]);
    assert_eq!(state.total(), 2);
    assert!(!state.loading());
}

#[tokio::test]
async fn fetch_feedback_records_list_and_total() {
    let records = vec![FeedbackRecord {
        id: 3,
        text: "wrong label".to_string(),
        document: DocumentId(1),
        username: Some("reviewer".to_string()),
    }];
    let (store, _api) = store_with(FakeApi::new(vec![]).with_feedback(records.clone()));

    store
        .fetch_feedback(PROJECT, &SearchOptions::default())
        .await
        .expect("Failed to fetch feedback");

    let state = store.state().await;
    assert_eq!(state.feedback_items(), records.as_slice());
    assert_eq!(state.total_feedback(), 1);
    assert!(state.items().is_empty());
}

#[tokio::test]
async fn upload_refetches_with_the_same_query() {
    let (store, api) = store_with(FakeApi::new(documents(&[1])));
    let query = SearchOptions {
        q: "new".to_string(),
        ..SearchOptions::default()
    };

    store
        .upload_document(UploadRequest {
            project_id: PROJECT,
            format: "plain".to_string(),
            file: UploadFile {
                file_name: "batch.txt".to_string(),
                bytes: b"fresh text".to_vec(),
            },
            query: query.clone(),
        })
        .await
        .expect("Failed to upload document");

    assert_eq!(
        api.calls(),
        vec![
            Call::Upload {
                format: "plain".to_string(),
                file_name: "batch.txt".to_string(),
            },
            Call::ListDocuments(query),
        ]
    );
    let state = store.state().await;
    assert_eq!(ids(state.items()), vec![1, 2]);
    assert_eq!(state.items()[1].text, "fresh text");
    assert!(!state.loading());
}

#[tokio::test]
async fn failed_upload_skips_refetch() {
    let (store, api) = store_with(FakeApi::new(vec![]));
    api.fail("upload_file");

    let result = store
        .upload_document(UploadRequest {
            project_id: PROJECT,
            format: "csv".to_string(),
            file: UploadFile {
                file_name: "rows.csv".to_string(),
                bytes: Vec::new(),
            },
            query: SearchOptions::default(),
        })
        .await;

    assert!(result.is_err());
    assert_eq!(api.calls().len(), 1);
    assert!(!store.state().await.loading());
}

#[tokio::test]
async fn export_names_file_after_format() {
    let (store, api) = store_with(FakeApi::new(vec![]).with_export_body(b"id,text\n1,a\n"));

    let exported = store
        .export_documents(PROJECT, "csv")
        .await
        .expect("Failed to export documents");

    assert_eq!(exported.file_name, "file.csv");
    assert_eq!(exported.format, "csv");
    assert_eq!(exported.bytes, b"id,text\n1,a\n");
    assert_eq!(api.calls(), vec![Call::Export("csv".to_string())]);
}

#[tokio::test]
async fn update_document_merges_server_response() {
    let (store, _api) = store_with(FakeApi::new(documents(&[1, 2])));
    store
        .fetch_documents(PROJECT, &SearchOptions::default())
        .await
        .expect("Failed to fetch documents");

    store
        .update_document(PROJECT, DocumentPatch::new(2).text("edited"))
        .await
        .expect("Failed to update document");

    let state = store.state().await;
    let document = state.document(DocumentId(2)).expect("document 2 missing");
    assert_eq!(document.text, "edited");
    assert_eq!(state.document(DocumentId(1)).map(|d| d.text.as_str()), Some("document 1"));
}

#[tokio::test]
async fn delete_selected_clears_selection_before_deletes_resolve() {
    let (api, gate) = FakeApi::new(documents(&[1, 2, 3])).with_delete_gate();
    let (store, api) = store_with(api);
    store
        .fetch_documents(PROJECT, &SearchOptions::default())
        .await
        .expect("Failed to fetch documents");
    store
        .commit(Mutation::UpdateSelected(documents(&[1, 2])))
        .await
        .expect("Failed to select documents");

    let batch = store.delete_selected(PROJECT).await;

    assert_eq!(batch.document_ids(), &[DocumentId(1), DocumentId(2)]);
    assert!(!store.is_document_selected().await);
    let pending = store.snapshot().await;
    assert!(pending.selected().is_empty());
    assert!(pending.loading());
    assert_eq!(ids(pending.items()), vec![1, 2, 3]);

    gate.add_permits(2);
    let outcomes = batch.settle().await.expect("Delete task panicked");

    assert!(outcomes.iter().all(|o| o.is_success()));
    let state = store.state().await;
    assert_eq!(ids(state.items()), vec![3]);
    assert_eq!(state.current_doc().map(|d| d.id), Some(DocumentId(3)));
    assert!(!state.loading());
    assert_eq!(
        &api.calls()[1..],
        &[
            Call::DeleteDocument(DocumentId(1)),
            Call::DeleteDocument(DocumentId(2)),
        ]
    );
}

#[tokio::test]
async fn failed_delete_does_not_stop_the_others() {
    let (store, api) = store_with(FakeApi::new(documents(&[1, 2, 3])));
    api.fail_delete_of(DocumentId(2));
    store
        .fetch_documents(PROJECT, &SearchOptions::default())
        .await
        .expect("Failed to fetch documents");
    store
        .commit(Mutation::UpdateSelected(documents(&[1, 2, 3])))
        .await
        .expect("Failed to select documents");

    let outcomes = store
        .delete_selected(PROJECT)
        .await
        .settle()
        .await
        .expect("Delete task panicked");

    let failed: Vec<DocumentId> = outcomes
        .iter()
        .filter(|o| !o.is_success())
        .map(|o| o.document_id)
        .collect();
    assert_eq!(failed, vec![DocumentId(2)]);
    assert_eq!(ids(store.state().await.items()), vec![2]);
}

#[tokio::test]
async fn annotations_follow_the_focused_document() {
    let (store, api) = store_with(FakeApi::new(documents(&[1, 2])));
    store
        .fetch_documents(PROJECT, &SearchOptions::default())
        .await
        .expect("Failed to fetch documents");
    store
        .commit(Mutation::Focus(DocumentId(2)))
        .await
        .expect("Failed to focus");

    let created = store
        .add_annotation(PROJECT, &AnnotationPayload::new().with("label", 4))
        .await
        .expect("Failed to add annotation");
    store
        .update_annotation(
            PROJECT,
            created.id,
            &AnnotationPayload::new().with("label", 5),
        )
        .await
        .expect("Failed to update annotation");

    {
        let current = store.current_doc().await.expect("nothing focused");
        assert_eq!(current.id, DocumentId(2));
        let annotation = current.annotation(created.id).expect("annotation missing");
        assert_eq!(annotation.get("label"), Some(&serde_json::json!(5)));
    }

    store
        .delete_annotation(PROJECT, created.id)
        .await
        .expect("Failed to delete annotation");

    assert!(store.current_doc().await.unwrap().annotations.is_empty());
    assert!(store.state().await.document(DocumentId(1)).unwrap().annotations.is_empty());
    assert_eq!(
        &api.calls()[1..],
        &[
            Call::AddAnnotation(DocumentId(2)),
            Call::UpdateAnnotation(DocumentId(2), created.id),
            Call::DeleteAnnotation(DocumentId(2), created.id),
        ]
    );
}

#[tokio::test]
async fn annotation_lands_on_document_focused_when_issued() {
    let (api, gate) = FakeApi::new(documents(&[1, 2])).with_annotation_gate();
    let (store, api) = store_with(api);
    store
        .fetch_documents(PROJECT, &SearchOptions::default())
        .await
        .expect("Failed to fetch documents");
    assert_eq!(store.current_doc().await.map(|d| d.id), Some(DocumentId(1)));

    let pending = {
        let store = store.clone();
        tokio::spawn(async move {
            store
                .add_annotation(PROJECT, &AnnotationPayload::new().with("label", 1))
                .await
        })
    };
    while !api.calls().contains(&Call::AddAnnotation(DocumentId(1))) {
        tokio::task::yield_now().await;
    }

    store
        .commit(Mutation::Focus(DocumentId(2)))
        .await
        .expect("Failed to focus");
    gate.add_permits(1);
    let created = pending
        .await
        .expect("Annotation task panicked")
        .expect("Failed to add annotation");

    let state = store.state().await;
    let first = state.document(DocumentId(1)).expect("document 1 missing");
    assert!(first.annotation(created.id).is_some());
    assert!(state.document(DocumentId(2)).unwrap().annotations.is_empty());
    assert_eq!(state.current_doc().map(|d| d.id), Some(DocumentId(2)));
    assert!(!state.loading());
}

#[tokio::test]
async fn updating_unknown_annotation_is_reported() {
    let (store, _api) = store_with(FakeApi::new(documents(&[1])));
    store
        .fetch_documents(PROJECT, &SearchOptions::default())
        .await
        .expect("Failed to fetch documents");

    let err = store
        .update_annotation(PROJECT, AnnotationId(9), &AnnotationPayload::new())
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::AnnotationNotFound(AnnotationId(9))));
    assert!(!store.state().await.loading());
}

#[tokio::test]
async fn toggle_approval_flips_and_merges_response() {
    let (store, api) = store_with(FakeApi::new(documents(&[1])));
    store
        .fetch_documents(PROJECT, &SearchOptions::default())
        .await
        .expect("Failed to fetch documents");

    assert!(store.toggle_approval(PROJECT).await.expect("Failed to approve"));
    assert!(store.approved().await);
    assert_eq!(
        store.current_doc().await.and_then(|d| d.annotation_approver),
        Some(APPROVER.to_string())
    );

    assert!(!store.toggle_approval(PROJECT).await.expect("Failed to unapprove"));
    assert!(!store.approved().await);
    assert_eq!(
        &api.calls()[1..],
        &[
            Call::Approve(DocumentId(1), true),
            Call::Approve(DocumentId(1), false),
        ]
    );
}

#[tokio::test]
async fn focused_operations_need_a_current_document() {
    let (store, api) = store_with(FakeApi::new(vec![]));

    let err = store.toggle_approval(PROJECT).await.unwrap_err();
    assert!(matches!(err, StoreError::NoCurrentDocument));
    let err = store.submit_feedback(PROJECT, "hi").await.unwrap_err();
    assert!(matches!(err, StoreError::NoCurrentDocument));
    let err = store
        .add_annotation(PROJECT, &AnnotationPayload::new())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NoCurrentDocument));

    assert!(api.calls().is_empty());
    assert!(!store.state().await.loading());
}

#[tokio::test]
async fn submit_feedback_reshapes_response_into_document() {
    let (store, _api) = store_with(FakeApi::new(documents(&[1])));
    store
        .fetch_documents(PROJECT, &SearchOptions::default())
        .await
        .expect("Failed to fetch documents");

    store
        .submit_feedback(PROJECT, "needs a second pass")
        .await
        .expect("Failed to submit feedback");

    let state = store.state().await;
    assert_eq!(
        state.feedback(),
        Some(&Feedback {
            text: "needs a second pass".to_string(),
            user: Some(APPROVER.to_string()),
            document: Some(DocumentId(1)),
        })
    );
}
