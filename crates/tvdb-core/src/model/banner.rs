//! Banner entity

use crate::attrs::{AttributeMap, Value};
use crate::error::{Error, Result};

// The Season field is not always present in the banner payload; absent
// values read as empty text instead of failing.
static EMPTY_TEXT: Value = Value::Text(String::new());

/// One banner image entry from the extended banner payload.
///
/// Carries every wire field plus `banner_url`: the banner path resolved
/// against a banner-capable mirror at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    data: AttributeMap,
    banner_url: String,
}

impl Banner {
    pub(crate) fn new(mirror: &str, data: AttributeMap) -> Self {
        let banner_url = match data.get("BannerPath").and_then(Value::as_str) {
            Some(path) if !path.is_empty() => format!("{mirror}/banners/{path}"),
            _ => String::new(),
        };
        Self { data, banner_url }
    }

    /// Look a field up by name. `Season` reads as empty text when absent.
    ///
    /// # Errors
    /// `Error::AttributeNotFound` when the banner does not carry the field.
    pub fn get(&self, name: &str) -> Result<&Value> {
        match self.data.get(name) {
            Some(value) => Ok(value),
            None if name == "Season" => Ok(&EMPTY_TEXT),
            None => Err(Error::AttributeNotFound {
                entity: "Banner",
                name: name.to_string(),
            }),
        }
    }

    /// Full URL of the banner image, empty when the service supplied none
    pub fn banner_url(&self) -> &str {
        &self.banner_url
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.data
    }
}
