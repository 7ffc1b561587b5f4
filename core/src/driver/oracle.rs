use chrono::NaiveDateTime;

use super::{Connection, Connector, ImageRow};
use crate::{ConnectDescriptor, Error, Result};

const RECENT_IMAGES_SQL: &str = "SELECT id, ImageName, Detail, ImageURL, UserName, CREATE_DATE, DELETED \
     FROM (SELECT * FROM IMAGES ORDER BY CREATE_DATE DESC) A WHERE ROWNUM <= :1";

/// Opens connections through the Oracle client libraries.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleConnector;

impl Connector for OracleConnector {
    type Connection = OracleConnection;

    fn connect(&self, descriptor: &ConnectDescriptor) -> Result<Self::Connection> {
        let conn = ::oracle::Connection::connect(
            descriptor.username(),
            descriptor.password(),
            descriptor.service_name(),
        )
        .map_err(Error::connect)?;

        Ok(OracleConnection { conn })
    }
}

pub struct OracleConnection {
    conn: ::oracle::Connection,
}

impl Connection for OracleConnection {
    fn recent_images(&mut self, limit: usize, sink: &mut dyn FnMut(ImageRow)) -> Result<()> {
        let limit = limit as i64;
        let rows = self
            .conn
            .query(RECENT_IMAGES_SQL, &[&limit])
            .map_err(Error::query)?;

        for row in rows {
            let row = row.map_err(Error::query)?;
            let created_date: NaiveDateTime = row.get(5).map_err(Error::scan)?;

            sink(ImageRow {
                id: row.get(0).map_err(Error::scan)?,
                name: row.get(1).map_err(Error::scan)?,
                detail: row.get(2).map_err(Error::scan)?,
                image_url: row.get(3).map_err(Error::scan)?,
                owner: row.get(4).map_err(Error::scan)?,
                created_date: created_date.and_utc(),
                deleted: row.get(6).map_err(Error::scan)?,
            });
        }

        Ok(())
    }
}
