//! Records file encoding.
//!
//! The canonical document wraps the ordered sequence:
//!
//! ```text
//! {
//!   "codes": [
//!     { "id": "...", "content": "...", "name": "QR Code 1", "timestamp": 1700000000000 }
//!   ]
//! }
//! ```
//!
//! A bare array (`[]` or `[{...}]`) is also accepted on read; older builds
//! wrote `[]` when initializing an empty wallet.

use crate::error::{Result, WalletError};
use crate::model::QrRecord;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct RecordsDocument<'a> {
    codes: &'a [QrRecord],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsFile {
    Document {
        #[serde(default)]
        codes: Vec<QrRecord>,
    },
    Bare(Vec<QrRecord>),
}

pub fn encode(records: &[QrRecord], pretty: bool) -> Result<Vec<u8>> {
    let doc = RecordsDocument { codes: records };
    let bytes = if pretty {
        serde_json::to_vec_pretty(&doc)
    } else {
        serde_json::to_vec(&doc)
    };
    bytes.map_err(WalletError::Serialization)
}

pub fn decode(bytes: &[u8]) -> Result<Vec<QrRecord>> {
    let file: RecordsFile = serde_json::from_slice(bytes).map_err(WalletError::Serialization)?;
    Ok(match file {
        RecordsFile::Document { codes } => codes,
        RecordsFile::Bare(codes) => codes,
    })
}
