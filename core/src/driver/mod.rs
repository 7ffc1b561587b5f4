//! Database access seams.
//!
//! A [`Connector`] opens one [`Connection`] per invocation. Dropping the
//! connection closes it, and drivers drop their row cursors before
//! `recent_images` returns, so every exit path releases both.

use chrono::{DateTime, Utc};

use crate::{ConnectDescriptor, Result};

#[cfg(feature = "oracle")]
mod oracle;
#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "oracle")]
pub use self::oracle::{OracleConnection, OracleConnector};
#[cfg(feature = "sqlite")]
pub use self::sqlite::{SqliteConnection, SqliteConnector};

/// One `IMAGES` row as decoded by a driver, nullable text left as is.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRow {
    pub id: Option<String>,
    pub name: Option<String>,
    pub detail: Option<String>,
    pub image_url: Option<String>,
    pub owner: Option<String>,
    pub created_date: DateTime<Utc>,
    pub deleted: i64,
}

pub trait Connector {
    type Connection: Connection;

    /// Opens a connection, failing with [`crate::Error::Connect`].
    fn connect(&self, descriptor: &ConnectDescriptor) -> Result<Self::Connection>;
}

pub trait Connection {
    /// Streams the `limit` most recently created rows, newest first, into `sink`.
    ///
    /// Execution failures are [`crate::Error::Query`]; a column that cannot be
    /// decoded is [`crate::Error::Scan`]. Either stops the iteration.
    fn recent_images(&mut self, limit: usize, sink: &mut dyn FnMut(ImageRow)) -> Result<()>;
}

