//! Actor entity

use crate::attrs::{AttributeMap, Value};
use crate::error::{Error, Result};

/// An actor as delivered by the extended actor payload.
///
/// Carries every wire field plus `image_url`: the actor image path resolved
/// against a banner-capable mirror at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    data: AttributeMap,
    image_url: String,
}

impl Actor {
    pub(crate) fn new(mirror: &str, data: AttributeMap) -> Self {
        let image_url = match data.get("Image").and_then(Value::as_str) {
            Some(path) if !path.is_empty() => format!("{mirror}/banners/{path}"),
            _ => String::new(),
        };
        Self { data, image_url }
    }

    /// Look a field up by name.
    ///
    /// # Errors
    /// `Error::AttributeNotFound` when the actor does not carry the field.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.data.get(name).ok_or_else(|| Error::AttributeNotFound {
            entity: "Actor",
            name: name.to_string(),
        })
    }

    /// Full URL of the actor image, empty when the service supplied none
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// The actor's name
    pub fn name(&self) -> Result<&str> {
        match self.get("Name")? {
            Value::Text(s) => Ok(s),
            other => Err(Error::BadData(format!(
                "actor field Name is not text: {other}"
            ))),
        }
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> Actor {
        let fields = vec![
            ("id".to_string(), Value::Int(29794)),
            ("Name".to_string(), Value::Text("Michael C. Hall".into())),
            ("Role".to_string(), Value::Text("Dexter Morgan".into())),
            ("Image".to_string(), Value::Text("actors/29794.jpg".into())),
        ];
        Actor::new(
            "http://thetvdb.com",
            AttributeMap::from_fields(&fields, false),
        )
    }

    #[test]
    fn test_image_url_is_resolved() {
        assert_eq!(
            actor().image_url(),
            "http://thetvdb.com/banners/actors/29794.jpg"
        );
    }

    #[test]
    fn test_missing_image_yields_empty_url() {
        let a = Actor::new("http://thetvdb.com", AttributeMap::new(false));
        assert_eq!(a.image_url(), "");
    }

    #[test]
    fn test_field_access() {
        let a = actor();
        assert_eq!(a.name().unwrap(), "Michael C. Hall");
        assert_eq!(a.get("Role").unwrap().as_str(), Some("Dexter Morgan"));

        let err = a.get("Birthday").unwrap_err();
        assert_eq!(err.to_string(), "Actor has no attribute Birthday");
    }
}
