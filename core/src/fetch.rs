use crate::{ConnectDescriptor, Connection, Connector, Image, ImageList, ImageRow, Logger, Result};

/// Number of rows returned per invocation.
pub const RECENT_IMAGE_LIMIT: usize = 10;

/// Maps a nullable text column to its wire value; `NULL` becomes `""`.
pub fn non_null(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Opens one connection and collects the most recently created images.
///
/// The connection lives only for the duration of this call and is dropped on
/// every return path.
pub fn get_image_list<C>(
    connector: &C,
    descriptor: &ConnectDescriptor,
    logger: &dyn Logger,
) -> Result<ImageList>
where
    C: Connector + ?Sized,
{
    let mut conn = connector.connect(descriptor).inspect_err(|e| {
        logger.error(&e.to_string());
    })?;

    select_images(&mut conn, logger)
}

fn select_images<C: Connection>(conn: &mut C, logger: &dyn Logger) -> Result<ImageList> {
    let mut list = ImageList::new();

    conn.recent_images(RECENT_IMAGE_LIMIT, &mut |row: ImageRow| {
        let image = Image::from(row);
        logger.debug(&format!(
            "id:{}, imagename:{}, detail:{}, imageurl:{}, userName:{}, createDate:{} deleted:{}",
            image.id,
            image.imagename,
            image.detail,
            image.image_url,
            image.owner,
            image.created_date,
            image.deleted,
        ));
        list.push(image);
    })
    .inspect_err(|e| logger.error(&e.to_string()))?;

    logger.info(&format!("Successful. Select Metadata ({} images)", list.total));

    Ok(list)
}
