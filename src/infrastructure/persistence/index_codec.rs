//! `index.bin` is a bincode preamble (magic `SQIX` and format version)
//! followed by a bincode body holding the header, the shape, and the vectors
//! row-major. Integers are fixed-width little-endian.

use crate::domain::entities::flat_index::FlatIndex;
use crate::domain::error::DomainError;
use bincode::config::{Configuration, Fixint, LittleEndian};
use bincode::serde::{decode_from_slice, encode_to_vec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

const MAGIC: [u8; 4] = *b"SQIX";
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexHeader {
    pub generation: Uuid,
    pub model_id: String,
    pub saved_at: DateTime<Utc>,
}

/// Read on its own first so a future layout change is reported as a version
/// error rather than a decode failure.
#[derive(Serialize, Deserialize)]
struct Preamble {
    magic: [u8; 4],
    format_version: u32,
}

#[derive(Serialize, Deserialize)]
struct IndexBody<'a> {
    header: IndexHeader,
    dimension: u32,
    count: u64,
    vectors: Cow<'a, [f32]>,
}

fn config() -> Configuration<LittleEndian, Fixint> {
    bincode::config::standard().with_fixed_int_encoding()
}

pub fn encode(index: &FlatIndex, header: &IndexHeader) -> Result<Vec<u8>, DomainError> {
    let preamble = Preamble {
        magic: MAGIC,
        format_version: FORMAT_VERSION,
    };
    let body = IndexBody {
        header: header.clone(),
        dimension: index.dimension() as u32,
        count: index.len() as u64,
        vectors: Cow::Borrowed(index.raw()),
    };

    let mut out = encode_to_vec(&preamble, config()).map_err(encode_failed)?;
    out.extend(encode_to_vec(&body, config()).map_err(encode_failed)?);
    Ok(out)
}

pub fn decode(bytes: &[u8]) -> Result<(IndexHeader, FlatIndex), DomainError> {
    let (preamble, preamble_len) = decode_from_slice::<Preamble, _>(bytes, config())
        .map_err(|e| corrupt(&format!("unreadable preamble: {e}")))?;
    if preamble.magic != MAGIC {
        return Err(corrupt("bad magic; not an index file"));
    }
    if preamble.format_version != FORMAT_VERSION {
        return Err(corrupt(&format!(
            "unsupported index format version {} (expected {FORMAT_VERSION})",
            preamble.format_version
        )));
    }

    let rest = &bytes[preamble_len..];
    let (body, body_len) = decode_from_slice::<IndexBody<'static>, _>(rest, config())
        .map_err(|e| corrupt(&e.to_string()))?;
    if body_len != rest.len() {
        return Err(corrupt(&format!(
            "{} trailing bytes after vector data",
            rest.len() - body_len
        )));
    }

    let expected = usize::try_from(body.count)
        .ok()
        .and_then(|count| count.checked_mul(body.dimension as usize))
        .ok_or_else(|| corrupt("vector count overflows"))?;
    if body.vectors.len() != expected {
        return Err(corrupt(&format!(
            "header promises {} {}-d vectors but holds {} floats",
            body.count,
            body.dimension,
            body.vectors.len()
        )));
    }

    let index = FlatIndex::from_raw(body.dimension as usize, body.vectors.into_owned())
        .map_err(|e| corrupt(&e.to_string()))?;
    Ok((body.header, index))
}

fn corrupt(msg: &str) -> DomainError {
    DomainError::Deserialization(format!("index file: {msg}"))
}

fn encode_failed(e: bincode::error::EncodeError) -> DomainError {
    DomainError::InvalidInput(format!("Failed to encode index: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> IndexHeader {
        IndexHeader {
            generation: Uuid::new_v4(),
            model_id: "hashing-fnv1a-4".into(),
            saved_at: DateTime::<Utc>::from_timestamp_millis(1_760_000_000_123).unwrap(),
        }
    }

    #[test]
    fn test_decode_restores_header_and_vectors() {
        let index = FlatIndex::build(&[vec![0.5, -1.25, 3.0, 0.0], vec![1.0, 2.0, 3.0, 4.0]]).unwrap();
        let h = header();
        let (decoded_header, decoded) = decode(&encode(&index, &h).unwrap()).unwrap();
        assert_eq!(decoded_header, h);
        assert_eq!(decoded, index);
    }

    #[test]
    fn test_empty_index_encodes() {
        let (_, decoded) = decode(&encode(&FlatIndex::new(), &header()).unwrap()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_truncated_file_is_rejected() {
        let index = FlatIndex::build(&[vec![1.0, 2.0, 3.0, 4.0]]).unwrap();
        let bytes = encode(&index, &header()).unwrap();
        let err = decode(&bytes[..bytes.len() - 3]).unwrap_err();
        assert!(matches!(err, DomainError::Deserialization(_)));
    }

    #[test]
    fn test_bad_magic_and_version_rejected() {
        let bytes = encode(&FlatIndex::new(), &header()).unwrap();

        let mut bad_magic = bytes.clone();
        bad_magic[0] = b'X';
        assert!(decode(&bad_magic).unwrap_err().to_string().contains("magic"));

        let mut bad_version = bytes;
        bad_version[4] = 9;
        assert!(decode(&bad_version).unwrap_err().to_string().contains("version"));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        let mut bytes = encode(&FlatIndex::new(), &header()).unwrap();
        bytes.push(0);
        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn test_count_disagreeing_with_vectors_rejected() {
        let body = IndexBody {
            header: header(),
            dimension: 2,
            count: 3,
            vectors: Cow::Owned(vec![1.0, 2.0, 3.0, 4.0]),
        };
        let mut bytes = encode(&FlatIndex::new(), &header()).unwrap();
        bytes.truncate(8);
        bytes.extend(encode_to_vec(&body, config()).unwrap());

        let err = decode(&bytes).unwrap_err();
        assert!(err.to_string().contains("promises 3"), "{err}");
    }
}
