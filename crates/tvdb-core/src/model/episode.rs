//! Episode entity

use std::fmt;

use chrono::NaiveDate;

use crate::attrs::{AttributeMap, Value};
use crate::error::{Error, Result};

/// A single episode, immutable once constructed.
///
/// All fields delivered by the service are reachable through [`get`], named
/// exactly as they appear on the wire ("EpisodeName", "FirstAired", ...),
/// case-insensitively when the client was configured that way. A handful of
/// well-known fields also have typed accessors.
///
/// [`get`]: Episode::get
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    data: AttributeMap,
}

impl Episode {
    pub(crate) fn new(data: AttributeMap) -> Self {
        Self { data }
    }

    /// Look a field up by name.
    ///
    /// # Errors
    /// `Error::AttributeNotFound` when the episode does not carry the field.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.data.get(name).ok_or_else(|| Error::AttributeNotFound {
            entity: "Episode",
            name: name.to_string(),
        })
    }

    /// The raw attribute map
    pub fn attributes(&self) -> &AttributeMap {
        &self.data
    }

    fn int_field(&self, name: &str) -> Result<i64> {
        match self.get(name)? {
            Value::Int(v) => Ok(*v),
            other => Err(Error::BadData(format!(
                "episode field {name} is not numeric: {other}"
            ))),
        }
    }

    /// Position within the season
    pub fn episode_number(&self) -> Result<u32> {
        Ok(self.int_field("EpisodeNumber")? as u32)
    }

    /// Number of the season this episode belongs to
    pub fn season_number(&self) -> Result<u32> {
        Ok(self.int_field("SeasonNumber")? as u32)
    }

    /// The episode's native id
    pub fn id(&self) -> Result<u32> {
        Ok(self.int_field("id")? as u32)
    }

    /// Display name of the episode
    pub fn name(&self) -> Result<&str> {
        match self.get("EpisodeName")? {
            Value::Text(s) => Ok(s),
            other => Err(Error::BadData(format!(
                "episode field EpisodeName is not text: {other}"
            ))),
        }
    }

    /// First air date, when the field is present and carries a date
    pub fn first_aired(&self) -> Option<NaiveDate> {
        self.data.get("FirstAired").and_then(Value::as_date)
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.season_number(), self.episode_number()) {
            (Ok(s), Ok(e)) => write!(f, "<Episode S{s:03}E{e:03}>"),
            _ => write!(f, "<Episode>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(ignore_case: bool) -> Episode {
        let fields = vec![
            ("id".to_string(), Value::Int(308834)),
            ("EpisodeName".to_string(), Value::Text("Crocodile".into())),
            ("EpisodeNumber".to_string(), Value::Int(2)),
            ("SeasonNumber".to_string(), Value::Int(1)),
            (
                "FirstAired".to_string(),
                Value::Date(NaiveDate::from_ymd_opt(2006, 10, 8).unwrap()),
            ),
            (
                "GuestStars".to_string(),
                Value::List(vec!["Terry Woodberry".into(), "June Angela".into()]),
            ),
        ];
        Episode::new(AttributeMap::from_fields(&fields, ignore_case))
    }

    #[test]
    fn test_typed_accessors() {
        let ep = episode(false);
        assert_eq!(ep.id().unwrap(), 308834);
        assert_eq!(ep.episode_number().unwrap(), 2);
        assert_eq!(ep.season_number().unwrap(), 1);
        assert_eq!(ep.name().unwrap(), "Crocodile");
        assert_eq!(
            ep.first_aired(),
            Some(NaiveDate::from_ymd_opt(2006, 10, 8).unwrap())
        );
    }

    #[test]
    fn test_unknown_attribute() {
        let ep = episode(false);
        let err = ep.get("Writer").unwrap_err();
        assert!(matches!(
            err,
            Error::AttributeNotFound {
                entity: "Episode",
                ..
            }
        ));
        assert_eq!(err.to_string(), "Episode has no attribute Writer");
    }

    #[test]
    fn test_case_insensitive_access() {
        let ep = episode(true);
        assert_eq!(
            ep.get("episodename").unwrap().as_str(),
            Some("Crocodile")
        );
        assert_eq!(ep.get("EPISODENAME").unwrap().as_str(), Some("Crocodile"));
        assert_eq!(ep.episode_number().unwrap(), 2);
    }

    #[test]
    fn test_case_sensitive_access() {
        let ep = episode(false);
        assert!(ep.get("episodename").is_err());
    }

    #[test]
    fn test_guest_stars_list() {
        let ep = episode(false);
        let stars = ep.get("GuestStars").unwrap().as_list().unwrap();
        assert_eq!(stars.len(), 2);
        assert_eq!(stars[0], "Terry Woodberry");
    }

    #[test]
    fn test_display() {
        let ep = episode(false);
        assert_eq!(ep.to_string(), "<Episode S001E002>");

        let bare = Episode::new(AttributeMap::new(false));
        assert_eq!(bare.to_string(), "<Episode>");
    }
}
