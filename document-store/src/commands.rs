use crate::cli::{document_ids, Command};
use anyhow::{bail, Context, Result};
use document_store::models::{Document, DocumentId, ProjectId, SearchOptions, UploadFile, UploadRequest};
use document_store::{DocumentApi, DocumentStore, Mutation, StoreState};
use std::path::Path;

const PREVIEW_CHARS: usize = 60;

pub async fn run<A>(store: &DocumentStore<A>, project_id: ProjectId, command: Command) -> Result<()>
where
    A: DocumentApi + ?Sized + 'static,
{
    match command {
        Command::List { query } => {
            store.fetch_documents(project_id, &query.into()).await?;
            print_documents(&*store.state().await);
        }
        Command::Feedback { query } => {
            store.fetch_feedback(project_id, &query.into()).await?;
            print_feedback(&*store.state().await);
        }
        Command::Upload { file, format, query } => {
            let upload = read_upload(&file).await?;
            store
                .upload_document(UploadRequest {
                    project_id,
                    format,
                    file: upload,
                    query: query.into(),
                })
                .await?;
            print_documents(&*store.state().await);
        }
        Command::Export { format, output } => {
            let exported = store.export_documents(project_id, &format).await?;
            let path = output.join(&exported.file_name);
            tokio::fs::write(&path, &exported.bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {} bytes to {}", exported.bytes.len(), path.display());
        }
        Command::Approve { document, query } => {
            focus_document(store, project_id, DocumentId(document), query.into()).await?;
            let approved = store.toggle_approval(project_id).await?;
            println!(
                "Document {} {}",
                document,
                if approved { "approved" } else { "unapproved" }
            );
        }
        Command::SubmitFeedback {
            document,
            text,
            query,
        } => {
            focus_document(store, project_id, DocumentId(document), query.into()).await?;
            store.submit_feedback(project_id, &text).await?;
            println!("Feedback recorded on document {}", document);
        }
        Command::Delete { documents, query } => {
            delete_documents(store, project_id, &document_ids(&documents), query.into()).await?;
        }
    }

    Ok(())
}

async fn read_upload(path: &Path) -> Result<UploadFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .context("Upload path has no file name")?
        .to_string();

    Ok(UploadFile { file_name, bytes })
}

/// Load the page `query` names and focus `document` on it.
async fn focus_document<A>(
    store: &DocumentStore<A>,
    project_id: ProjectId,
    document: DocumentId,
    query: SearchOptions,
) -> Result<()>
where
    A: DocumentApi + ?Sized + 'static,
{
    store.fetch_documents(project_id, &query).await?;
    if store.state().await.document(document).is_none() {
        bail!("Document {} is not on the requested page", document);
    }
    store.commit(Mutation::Focus(document)).await?;
    Ok(())
}

async fn delete_documents<A>(
    store: &DocumentStore<A>,
    project_id: ProjectId,
    wanted: &[DocumentId],
    query: SearchOptions,
) -> Result<()>
where
    A: DocumentApi + ?Sized + 'static,
{
    store.fetch_documents(project_id, &query).await?;

    let selected: Vec<Document> = store
        .state()
        .await
        .items()
        .iter()
        .filter(|d| wanted.contains(&d.id))
        .cloned()
        .collect();
    for id in wanted {
        if !selected.iter().any(|d| d.id == *id) {
            eprintln!("Skipping document {}: not on the requested page", id);
        }
    }
    if selected.is_empty() {
        bail!("None of the requested documents are on the requested page");
    }

    store.commit(Mutation::UpdateSelected(selected)).await?;
    let outcomes = store
        .delete_selected(project_id)
        .await
        .settle()
        .await
        .context("Delete task did not complete")?;

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(()) => println!("Deleted document {}", outcome.document_id),
            Err(e) => {
                failed += 1;
                eprintln!("Failed to delete document {}: {}", outcome.document_id, e);
            }
        }
    }
    if failed > 0 {
        bail!("{} of {} deletes failed", failed, outcomes.len());
    }

    Ok(())
}

fn preview(text: &str) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() > PREVIEW_CHARS {
        format!("{}...", flat.chars().take(PREVIEW_CHARS).collect::<String>())
    } else {
        flat
    }
}

fn print_documents(state: &StoreState) {
    println!("{} of {} documents", state.items().len(), state.total());
    for document in state.items() {
        println!(
            "{}\t{}\t{}\t{}",
            document.id,
            if document.is_approved() { "approved" } else { "-" },
            document.annotations.len(),
            preview(&document.text)
        );
    }
}

fn print_feedback(state: &StoreState) {
    println!(
        "{} of {} feedback entries",
        state.feedback_items().len(),
        state.total_feedback()
    );
    for record in state.feedback_items() {
        println!(
            "{}\t{}\t{}\t{}",
            record.id,
            record.document,
            record.username.as_deref().unwrap_or("-"),
            preview(&record.text)
        );
    }
}
