use serde::{Deserialize, Serialize};

use crate::consts::consts::PNG_SIGNATURE;

/// Form submission asking for a certificate. Missing fields are treated as empty strings,
/// which never match a roster entry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct CertificateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl CertificateRequest {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        CertificateRequest {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Encoded PNG certificate, lives only for the duration of one response
#[derive(Clone, Debug, PartialEq)]
pub struct CertificateImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl CertificateImage {
    pub fn new(bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            bytes,
            width,
            height,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn has_png_signature(&self) -> bool {
        self.bytes.starts_with(&PNG_SIGNATURE)
    }
}
