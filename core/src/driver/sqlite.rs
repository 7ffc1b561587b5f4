use std::path::PathBuf;

use rusqlite::{params, OpenFlags};

use super::{Connection, Connector, ImageRow};
use crate::{ConnectDescriptor, Error, Result};

const RECENT_IMAGES_SQL: &str = "SELECT id, ImageName, Detail, ImageURL, UserName, CREATE_DATE, DELETED \
     FROM IMAGES ORDER BY CREATE_DATE DESC LIMIT ?1";

/// Opens a SQLite file named by the descriptor's service name.
///
/// Account name and password are not used; the file is opened read-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteConnector;

impl Connector for SqliteConnector {
    type Connection = SqliteConnection;

    fn connect(&self, descriptor: &ConnectDescriptor) -> Result<Self::Connection> {
        let path = PathBuf::from(descriptor.service_name());
        let conn = rusqlite::Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(Error::connect)?;

        Ok(SqliteConnection { conn })
    }
}

pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl Connection for SqliteConnection {
    fn recent_images(&mut self, limit: usize, sink: &mut dyn FnMut(ImageRow)) -> Result<()> {
        let mut stmt = self.conn.prepare(RECENT_IMAGES_SQL).map_err(Error::query)?;
        let mut rows = stmt.query(params![limit as i64]).map_err(Error::query)?;

        while let Some(row) = rows.next().map_err(Error::query)? {
            sink(ImageRow {
                id: row.get(0).map_err(Error::scan)?,
                name: row.get(1).map_err(Error::scan)?,
                detail: row.get(2).map_err(Error::scan)?,
                image_url: row.get(3).map_err(Error::scan)?,
                owner: row.get(4).map_err(Error::scan)?,
                created_date: row.get(5).map_err(Error::scan)?,
                deleted: row.get(6).map_err(Error::scan)?,
            });
        }

        Ok(())
    }
}
