//! Mirror directory for the catalog backend
//!
//! The service historically advertised multiple mirror servers, each tagged
//! with the content types it can deliver. Selection is a uniform random
//! choice among the mirrors supporting a requested capability; nothing may
//! assume two calls pick the same mirror. Today the directory usually holds
//! a single entry, which needs no special casing.

use rand::seq::SliceRandom;
use serde::Serialize;

use crate::attrs::Value;
use crate::error::{Error, Result};
use crate::xml::Document;

/// Capability bits carried in a mirror's type mask
pub mod type_mask {
    /// Serves XML payloads
    pub const XML: u32 = 1;
    /// Serves banner images
    pub const BANNER: u32 = 2;
    /// Serves zipped payload bundles
    pub const ZIP: u32 = 4;
}

/// One mirror server entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mirror {
    id: i64,
    url: String,
    type_mask: u32,
}

impl Mirror {
    /// Base URL of the mirror, without a trailing slash
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn type_mask(&self) -> u32 {
        self.type_mask
    }

    /// Whether this mirror supports every bit of the requested mask
    pub fn supports(&self, mask: u32) -> bool {
        self.type_mask & mask == mask
    }
}

/// The set of known mirrors, built once from the mirror directory payload
#[derive(Debug, Clone, Default)]
pub struct MirrorList {
    mirrors: Vec<Mirror>,
}

impl MirrorList {
    /// Build the list from a parsed `mirrors.xml` document. Entries with
    /// missing or malformed fields are skipped.
    pub fn from_document(doc: &Document) -> MirrorList {
        let mirrors = doc
            .records("Mirror")
            .filter_map(|fields| {
                let mut id = None;
                let mut url = None;
                let mut mask = None;
                for (name, value) in fields {
                    match (name.as_str(), value) {
                        ("id", Value::Int(v)) => id = Some(*v),
                        ("mirrorpath", Value::Text(v)) => url = Some(v.clone()),
                        ("typemask", Value::Int(v)) => mask = Some(*v as u32),
                        _ => {}
                    }
                }
                Some(Mirror {
                    id: id?,
                    url: url?,
                    type_mask: mask?,
                })
            })
            .collect();

        MirrorList { mirrors }
    }

    pub fn len(&self) -> usize {
        self.mirrors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mirrors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mirror> {
        self.mirrors.iter()
    }

    /// A uniformly random mirror supporting all bits of `mask`.
    ///
    /// # Errors
    /// `Error::NoMirror` when no mirror covers the requested capabilities.
    pub fn mirror(&self, mask: u32) -> Result<&Mirror> {
        let candidates: Vec<&Mirror> = self.mirrors.iter().filter(|m| m.supports(mask)).collect();
        candidates
            .choose(&mut rand::thread_rng())
            .copied()
            .ok_or(Error::NoMirror(mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(xml: &str) -> MirrorList {
        MirrorList::from_document(&Document::parse(xml.as_bytes()).unwrap())
    }

    const MIRRORS_XML: &str = r#"<Mirrors>
        <Mirror>
            <id>1</id>
            <mirrorpath>http://thetvdb.com</mirrorpath>
            <typemask>7</typemask>
        </Mirror>
        <Mirror>
            <id>2</id>
            <mirrorpath>http://xml.example.com</mirrorpath>
            <typemask>1</typemask>
        </Mirror>
    </Mirrors>"#;

    #[test]
    fn test_from_document() {
        let list = directory(MIRRORS_XML);
        assert_eq!(list.len(), 2);

        let full = list.iter().find(|m| m.id() == 1).unwrap();
        assert_eq!(full.url(), "http://thetvdb.com");
        assert_eq!(full.type_mask(), 7);
    }

    #[test]
    fn test_mask_must_cover_all_bits() {
        let list = directory(MIRRORS_XML);

        // Only mirror 1 carries both XML and BANNER
        for _ in 0..20 {
            let m = list.mirror(type_mask::XML | type_mask::BANNER).unwrap();
            assert_eq!(m.id(), 1);
        }
    }

    #[test]
    fn test_no_matching_mirror() {
        let list = directory(
            r#"<Mirrors><Mirror>
                <id>1</id>
                <mirrorpath>http://xml.example.com</mirrorpath>
                <typemask>1</typemask>
            </Mirror></Mirrors>"#,
        );

        let result = list.mirror(type_mask::XML | type_mask::BANNER);
        assert!(matches!(result, Err(Error::NoMirror(3))));
    }

    #[test]
    fn test_single_mirror_degenerate_case() {
        let list = directory(
            r#"<Mirrors><Mirror>
                <id>1</id>
                <mirrorpath>http://thetvdb.com</mirrorpath>
                <typemask>7</typemask>
            </Mirror></Mirrors>"#,
        );

        assert_eq!(list.mirror(type_mask::XML).unwrap().id(), 1);
        assert_eq!(list.mirror(type_mask::ZIP).unwrap().id(), 1);
    }

    #[test]
    fn test_empty_directory() {
        let list = directory("<Mirrors></Mirrors>");
        assert!(list.is_empty());
        assert!(matches!(
            list.mirror(type_mask::XML),
            Err(Error::NoMirror(1))
        ));
    }

    #[test]
    fn test_selection_is_uniform_over_candidates() {
        let list = directory(MIRRORS_XML);

        // Both mirrors serve XML; over enough draws each should appear
        let mut seen = [false, false];
        for _ in 0..200 {
            match list.mirror(type_mask::XML).unwrap().id() {
                1 => seen[0] = true,
                2 => seen[1] = true,
                _ => unreachable!(),
            }
        }
        assert!(seen[0] && seen[1]);
    }
}
