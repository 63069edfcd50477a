//! Success notices carried across a redirect as a signed `?notice=` token.
//!
//! Token format: `<kind>.<hex hmac-sha256(secret, "<kind>:<path_segment>")>`. A token only
//! decodes for the entity it was issued for, so a hand-edited URL shows nothing.

use crate::model::EntityDescriptor;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    Added,
    Updated,
    Deleted,
}

impl Notice {
    fn kind(self) -> &'static str {
        match self {
            Notice::Added => "added",
            Notice::Updated => "updated",
            Notice::Deleted => "deleted",
        }
    }

    fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "added" => Some(Notice::Added),
            "updated" => Some(Notice::Updated),
            "deleted" => Some(Notice::Deleted),
            _ => None,
        }
    }

    /// e.g. "Router Information deleted successfully!"
    pub fn message(self, entity: &EntityDescriptor) -> String {
        format!("{} {} successfully!", entity.label, self.kind())
    }

    pub fn encode(self, entity: &EntityDescriptor, secret: &str) -> String {
        format!("{}.{}", self.kind(), sign(secret, self.kind(), entity.path_segment))
    }

    pub fn decode(token: &str, entity: &EntityDescriptor, secret: &str) -> Option<Self> {
        let (kind, sig) = token.split_once('.')?;
        let notice = Self::from_kind(kind)?;
        let bytes = hex_decode(sig)?;
        let mut mac = new_mac(secret);
        mac.update(payload(kind, entity.path_segment).as_bytes());
        mac.verify_slice(&bytes).ok()?;
        Some(notice)
    }
}

/// Query string of list views after a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

fn payload(kind: &str, path_segment: &str) -> String {
    format!("{}:{}", kind, path_segment)
}

fn new_mac(secret: &str) -> HmacSha256 {
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length")
}

fn sign(secret: &str, kind: &str, path_segment: &str) -> String {
    let mut mac = new_mac(secret);
    mac.update(payload(kind, path_segment).as_bytes());
    mac.finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 || !s.is_ascii() {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}
