use clap::{Args, Parser, Subcommand};
use document_store::models::search::DEFAULT_LIMIT;
use document_store::models::{DocumentId, ProjectId, SearchOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "document-store",
    version,
    about = "Browse and curate the documents of a labeling project"
)]
pub struct Cli {
    /// Project to operate on
    #[arg(long, short = 'p')]
    pub project: i64,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn project_id(&self) -> ProjectId {
        ProjectId(self.project)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List one page of documents
    List {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// List one page of document feedback
    Feedback {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Import a file, then list the first page
    Upload {
        file: PathBuf,
        /// Import format (plain, csv, json, conll)
        #[arg(long, default_value = "plain")]
        format: String,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Export every document of the project
    Export {
        /// Export format (csv, json)
        #[arg(long, default_value = "json")]
        format: String,
        /// Directory the export is written to
        #[arg(long, short = 'o', default_value = ".")]
        output: PathBuf,
    },
    /// Toggle approval of a document on the listed page
    Approve {
        document: i64,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Attach feedback to a document on the listed page
    SubmitFeedback {
        document: i64,
        text: String,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Delete documents on the listed page
    Delete {
        #[arg(required = true)]
        documents: Vec<i64>,
        #[command(flatten)]
        query: QueryArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u64,
    #[arg(long, default_value_t = 0)]
    pub offset: u64,
    /// Free-text search
    #[arg(long, short = 'q', default_value = "")]
    pub query: String,
    /// Server-side filter field, e.g. doc_annotations__isnull
    #[arg(long, default_value = "")]
    pub filter: String,
    /// Value sent for the filter field
    #[arg(long, default_value = "true")]
    pub checked: String,
}

impl From<QueryArgs> for SearchOptions {
    fn from(args: QueryArgs) -> Self {
        SearchOptions {
            limit: args.limit,
            offset: args.offset,
            q: args.query,
            is_checked: args.checked,
            filter_name: args.filter,
        }
    }
}

pub fn document_ids(ids: &[i64]) -> Vec<DocumentId> {
    ids.iter().copied().map(DocumentId).collect()
}
