use std::io::Write;

use crate::{ImageList, Result};

/// Writes the list as one JSON document followed by a newline.
///
/// The document is rendered in full before anything reaches `out`, so a
/// serialization failure leaves the stream untouched.
pub fn write_image_list<W: Write>(list: &ImageList, mut out: W) -> Result<()> {
    let mut buf = serde_json::to_vec(list)?;
    buf.push(b'\n');

    out.write_all(&buf)?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::tests::rows;

    #[test]
    fn writes_a_single_json_line() {
        let mut list = ImageList::new();
        for row in rows(3) {
            list.push(row.into());
        }

        let mut out = Vec::new();
        write_image_list(&list, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["data"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["data"][0]["detail"], "");
    }

    #[test]
    fn write_failure_is_reported() {
        struct Closed;

        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = write_image_list(&ImageList::new(), Closed).unwrap_err();
        assert!(matches!(err, crate::Error::Write(_)));
    }
}
