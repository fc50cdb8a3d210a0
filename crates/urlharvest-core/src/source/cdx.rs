//! CDX JSON output: an array of string arrays whose first row is the header.

use serde_json::Value;

use super::{FetchError, RecordWarning};

/// Data rows of a CDX JSON response, header removed.
#[derive(Debug, Default)]
pub(crate) struct CdxRows {
    /// `(position, fields)`; position is the row index in the response.
    pub rows: Vec<(usize, Vec<String>)>,
    pub warnings: Vec<RecordWarning>,
}

/// Decodes a CDX body. A blank body means "no captures".
///
/// The first row is skipped whatever it contains. A data row that is not an
/// array of strings becomes a warning; a body that is not a JSON array is an error.
pub(crate) fn parse_rows(body: &[u8]) -> Result<CdxRows, FetchError> {
    let mut out = CdxRows::default();
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(out);
    }

    let rows: Vec<Value> = serde_json::from_slice(body)?;
    for (position, row) in rows.into_iter().enumerate().skip(1) {
        let Value::Array(fields) = row else {
            out.warnings.push(RecordWarning {
                position,
                reason: "row is not an array".to_string(),
            });
            continue;
        };
        let fields: Option<Vec<String>> = fields
            .into_iter()
            .map(|f| match f {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect();
        match fields {
            Some(fields) => out.rows.push((position, fields)),
            None => out.warnings.push(RecordWarning {
                position,
                reason: "row has a non-string field".to_string(),
            }),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_skipped() {
        let body = br#"[["urlkey","timestamp","original"],["com,example)/","20200101000000","http://example.com/"]]"#;
        let parsed = parse_rows(body).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].0, 1);
        assert_eq!(parsed.rows[0].1[2], "http://example.com/");
    }

    #[test]
    fn first_row_skipped_even_if_it_looks_like_data() {
        let body = br#"[["a","1","http://x.example/"],["b","2","http://y.example/"]]"#;
        let parsed = parse_rows(body).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].1[0], "b");
    }

    #[test]
    fn blank_body_means_no_rows() {
        let parsed = parse_rows(b"  \n").unwrap();
        assert!(parsed.rows.is_empty());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn bad_rows_become_warnings() {
        let body = br#"[["h"],"oops",["k",2,"u"],["k","1","http://ok.example/"]]"#;
        let parsed = parse_rows(body).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        let positions: Vec<usize> = parsed.warnings.iter().map(|w| w.position).collect();
        assert_eq!(positions, vec![1, 2]);
    }

    #[test]
    fn non_array_body_is_an_error() {
        assert!(matches!(
            parse_rows(br#"{"error":"nope"}"#),
            Err(FetchError::Decode(_))
        ));
        assert!(matches!(parse_rows(b"<html>"), Err(FetchError::Decode(_))));
    }
}
