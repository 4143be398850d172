//! Seams to the collaborators the wallet does not implement itself.
//!
//! - A scanner turns a camera frame into text, or fails. The wallet only sees
//!   the result as a [`ScanOutcome`] and reacts by adding content.
//! - A renderer turns text into a 2D barcode image. The wallet only hands out
//!   a [`RenderRequest`]; it never builds images.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Decoded(String),
    /// The user cancelled or nothing was recognized.
    NoResult,
}

impl ScanOutcome {
    /// An empty payload is treated as no result. Anything else is kept byte for byte.
    pub fn from_payload(payload: Option<String>) -> Self {
        match payload {
            Some(text) if !text.is_empty() => ScanOutcome::Decoded(text),
            _ => ScanOutcome::NoResult,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderRequest {
    pub record_id: String,
    pub name: String,
    pub content: String,
    /// Edge length in pixels of the square image to produce.
    pub size: u32,
}

pub trait Renderer {
    type Output;
    type Error;

    fn render(&self, request: &RenderRequest) -> Result<Self::Output, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_is_no_result() {
        assert_eq!(ScanOutcome::from_payload(None), ScanOutcome::NoResult);
        assert_eq!(
            ScanOutcome::from_payload(Some(String::new())),
            ScanOutcome::NoResult
        );
    }

    #[test]
    fn payload_is_not_trimmed() {
        assert_eq!(
            ScanOutcome::from_payload(Some(" spaced ".into())),
            ScanOutcome::Decoded(" spaced ".into())
        );
    }
}
