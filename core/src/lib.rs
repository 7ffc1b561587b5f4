use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod config;
pub mod driver;
pub mod emit;
pub mod fetch;
pub mod handler;
pub mod log;

pub use config::{ConnectDescriptor, Credentials, StorageSettings};
pub use driver::{Connection, Connector, ImageRow};
pub use fetch::{get_image_list, non_null, RECENT_IMAGE_LIMIT};
pub use handler::{handle, Stage};
pub use log::{LogScope, Logger, MemoryLogger, TracingLogger};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("can not read environment variable {0}")]
    MissingEnv(&'static str),
    #[error("failed to open database connection: {0}")]
    Connect(#[source] BoxError),
    #[error("failed to execute image query: {0}")]
    Query(#[source] BoxError),
    #[error("failed to scan image row: {0}")]
    Scan(#[source] BoxError),
    #[error("failed to serialize image list: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write image list: {0}")]
    Write(#[from] std::io::Error),
}

impl Error {
    pub fn connect(err: impl Into<BoxError>) -> Self {
        Error::Connect(err.into())
    }

    pub fn query(err: impl Into<BoxError>) -> Self {
        Error::Query(err.into())
    }

    pub fn scan(err: impl Into<BoxError>) -> Self {
        Error::Scan(err.into())
    }

    /// The stage an invocation was about to complete when this error stopped it.
    pub fn stage(&self) -> Stage {
        match self {
            Error::MissingEnv(_) => Stage::ConfigLoaded,
            Error::Connect(_) => Stage::Connected,
            Error::Query(_) | Error::Scan(_) => Stage::Queried,
            Error::Serialize(_) | Error::Write(_) => Stage::Serialized,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The envelope written to the output stream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImageList {
    pub object: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub total: usize,
    pub data: Vec<Image>,
}

impl ImageList {
    pub fn new() -> Self {
        Self {
            object: "list".to_string(),
            kind: "image".to_string(),
            total: 0,
            data: Vec::new(),
        }
    }

    pub fn push(&mut self, image: Image) {
        self.data.push(image);
        self.total += 1;
    }
}

impl Default for ImageList {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Image {
    pub id: String,
    pub object: String,
    pub imagename: String,
    pub detail: String,
    pub image_url: String,
    pub owner: String,
    pub created_date: DateTime<Utc>,
    // 0 or 1, kept as stored
    pub deleted: i64,
}

impl From<ImageRow> for Image {
    fn from(row: ImageRow) -> Self {
        Image {
            id: non_null(row.id),
            object: "Image".to_string(),
            imagename: non_null(row.name),
            detail: non_null(row.detail),
            image_url: non_null(row.image_url),
            owner: non_null(row.owner),
            created_date: row.created_date,
            deleted: row.deleted,
        }
    }
}
