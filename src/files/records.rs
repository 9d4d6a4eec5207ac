//! Splitting of `X-IBM-Data-Type: record` payloads.
//!
//! In record mode z/OSMF prefixes every record with its length as a 4-byte
//! big-endian integer.

use crate::error::ZosmfError;

const PREFIX_LEN: usize = 4;

/// Splits a record-prefixed payload into its records.
///
/// # Errors
/// Returns [`ZosmfError::TruncatedRecord`] if a prefix or a record body runs
/// past the end of `data`.
pub fn split_record_prefixed(data: &[u8]) -> Result<Vec<&[u8]>, ZosmfError> {
    let mut records = Vec::new();
    let mut offset = 0;

    while offset < data.len() {
        let available = data.len() - offset;
        if available < PREFIX_LEN {
            return Err(ZosmfError::TruncatedRecord {
                offset,
                declared: PREFIX_LEN,
                available,
            });
        }

        let mut prefix = [0u8; PREFIX_LEN];
        prefix.copy_from_slice(&data[offset..offset + PREFIX_LEN]);
        let declared = u32::from_be_bytes(prefix) as usize;
        let start = offset + PREFIX_LEN;
        let remaining = data.len() - start;
        if declared > remaining {
            return Err(ZosmfError::TruncatedRecord {
                offset,
                declared,
                available: remaining,
            });
        }

        records.push(&data[start..start + declared]);
        offset = start + declared;
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_consecutive_records() {
        let data = [0, 0, 0, 2, b'h', b'i', 0, 0, 0, 0, 0, 0, 0, 1, b'!'];
        let records = split_record_prefixed(&data).unwrap();
        assert_eq!(records, vec![&b"hi"[..], &b""[..], &b"!"[..]]);
    }

    #[test]
    fn empty_payload_has_no_records() {
        assert!(split_record_prefixed(&[]).unwrap().is_empty());
    }

    #[test]
    fn short_prefix_is_truncated() {
        let err = split_record_prefixed(&[0, 0, 0, 1, b'x', 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            ZosmfError::TruncatedRecord {
                offset: 5,
                available: 2,
                ..
            }
        ));
    }

    #[test]
    fn short_body_is_truncated() {
        let err = split_record_prefixed(&[0, 0, 0, 9, b'a', b'b']).unwrap_err();
        assert!(matches!(
            err,
            ZosmfError::TruncatedRecord {
                offset: 0,
                declared: 9,
                available: 2,
            }
        ));
    }
}
