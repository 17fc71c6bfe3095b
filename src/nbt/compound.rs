use std::io::{Read, Write};

use indexmap::IndexMap;
use tracing::trace;

use crate::codec::{BinaryReader, BinaryWriter};
use crate::error::{Error, Result};

use super::{Tag, TagKind};

/// Ordered collection of named tags. Names are unique; inserting an existing
/// name replaces the value in its original position.
#[derive(Debug, Clone, Default)]
pub struct Compound {
    entries: IndexMap<String, Tag>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Result<&Tag> {
        self.entries
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_owned()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Tag> {
        self.entries
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(name.to_owned()))
    }

    pub fn get_index(&self, index: usize) -> Result<(&str, &Tag)> {
        self.entries
            .get_index(index)
            .map(|(name, tag)| (name.as_str(), tag))
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// Insert under `name`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, tag: impl Into<Tag>) -> Option<Tag> {
        self.entries.insert(name.into(), tag.into())
    }

    /// Replace the value at `index`, keeping its name. Returns the old value.
    pub fn set_index(&mut self, index: usize, tag: impl Into<Tag>) -> Result<Tag> {
        let len = self.entries.len();
        let (_, slot) = self
            .entries
            .get_index_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, tag.into()))
    }

    pub fn remove(&mut self, name: &str) -> Result<Tag> {
        self.entries
            .shift_remove(name)
            .ok_or_else(|| Error::NotFound(name.to_owned()))
    }

    pub fn remove_index(&mut self, index: usize) -> Result<(String, Tag)> {
        let len = self.entries.len();
        self.entries
            .shift_remove_index(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> + '_ {
        self.entries.iter().map(|(name, tag)| (name.as_str(), tag))
    }

    pub(crate) fn read_payload<R: Read>(reader: &mut BinaryReader<R>, depth: usize) -> Result<Self> {
        let mut compound = Self::new();
        loop {
            let id = reader.read_u8()?;
            let kind = TagKind::from_u8(id).ok_or(Error::UnknownTagKind(id))?;
            if kind == TagKind::End {
                break;
            }
            let name = reader.read_string()?;
            trace!(%kind, name = %name, offset = reader.position(), "reading tag");
            let tag = Tag::read_payload(kind, reader, depth + 1)?;
            compound.entries.insert(name, tag);
        }
        Ok(compound)
    }

    pub(crate) fn write_payload<W: Write>(&self, writer: &mut BinaryWriter<W>) -> Result<()> {
        for (name, tag) in &self.entries {
            writer.write_u8(tag.kind().id())?;
            writer.write_string(name)?;
            tag.write_payload(writer)?;
        }
        writer.write_u8(TagKind::End.id())
    }
}

impl PartialEq for Compound {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Into<String>, V: Into<Tag>> FromIterator<(K, V)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut compound = Self::new();
        for (name, tag) in iter {
            compound.insert(name, tag);
        }
        compound
    }
}

impl<K: Into<String>, V: Into<Tag>> Extend<(K, V)> for Compound {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, tag) in iter {
            self.insert(name, tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> Compound {
        Compound::from_iter([
            ("Width", Tag::Short(256)),
            ("Length", Tag::Short(256)),
            ("Height", Tag::Short(1)),
        ])
    }

    #[test]
    fn test_get_by_name_and_index() {
        let compound = sample();
        assert_eq!(compound.get("Height").unwrap(), &Tag::Short(1));
        assert_eq!(compound.get_index(1).unwrap(), ("Length", &Tag::Short(256)));
        assert!(matches!(compound.get("Depth"), Err(Error::NotFound(name)) if name == "Depth"));
        assert!(matches!(
            compound.get_index(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_insert_preserves_position() {
        let mut compound = sample();
        let old = compound.insert("Length", Tag::Int(9));
        assert_eq!(old, Some(Tag::Short(256)));
        assert_eq!(compound.names().collect::<Vec<_>>(), vec!["Width", "Length", "Height"]);
        assert_eq!(compound.get("Length").unwrap(), &Tag::Int(9));

        assert_eq!(compound.insert("Materials", "Alpha"), None);
        assert_eq!(
            compound.names().collect::<Vec<_>>(),
            vec!["Width", "Length", "Height", "Materials"]
        );
    }

    #[test]
    fn test_set_get_roundtrip_keeps_order() {
        let mut compound = sample();
        let before: Vec<String> = compound.names().map(str::to_owned).collect();
        let width = compound.get("Width").unwrap().clone();
        compound.insert("Width", width);
        let after: Vec<String> = compound.names().map(str::to_owned).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_set_index_keeps_name() {
        let mut compound = sample();
        assert_eq!(compound.set_index(0, Tag::Short(128)).unwrap(), Tag::Short(256));
        assert_eq!(compound.get("Width").unwrap(), &Tag::Short(128));
        assert!(compound.set_index(10, Tag::Byte(0)).is_err());
    }

    #[test]
    fn test_remove() {
        let mut compound = sample();
        assert_eq!(compound.remove("Width").unwrap(), Tag::Short(256));
        assert!(matches!(compound.get("Width"), Err(Error::NotFound(_))));
        assert!(matches!(compound.remove("Width"), Err(Error::NotFound(_))));

        let (name, tag) = compound.remove_index(1).unwrap();
        assert_eq!(name, "Height");
        assert_eq!(tag, Tag::Short(1));
        assert_eq!(compound.names().collect::<Vec<_>>(), vec!["Length"]);
        assert!(compound.remove_index(1).is_err());
    }

    #[test]
    fn test_equality_is_ordered() {
        let a = Compound::from_iter([("a", 1i8), ("b", 2i8)]);
        let b = Compound::from_iter([("b", 2i8), ("a", 1i8)]);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_payload_layout() {
        let compound = Compound::from_iter([("hp", Tag::Short(20))]);
        let mut writer = BinaryWriter::default();
        compound.write_payload(&mut writer).unwrap();
        assert_eq!(
            writer.into_inner(),
            vec![TagKind::Short.id(), 0, 2, b'h', b'p', 0, 20, TagKind::End.id()]
        );
    }

    #[test]
    fn test_decode_duplicate_name_last_wins() {
        let data = [
            TagKind::Byte.id(), 0, 1, b'a', 1,
            TagKind::Byte.id(), 0, 1, b'b', 2,
            TagKind::Byte.id(), 0, 1, b'a', 3,
            TagKind::End.id(),
        ];
        let mut reader = BinaryReader::new(Cursor::new(&data[..]));
        let compound = Compound::read_payload(&mut reader, 0).unwrap();
        assert_eq!(compound.len(), 2);
        assert_eq!(compound.get("a").unwrap(), &Tag::Byte(3));
        assert_eq!(compound.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_decode_unknown_kind() {
        let data = [99, 0, 1, b'a'];
        let mut reader = BinaryReader::new(Cursor::new(&data[..]));
        assert!(matches!(
            Compound::read_payload(&mut reader, 0),
            Err(Error::UnknownTagKind(99))
        ));
    }

    #[test]
    fn test_decode_missing_end() {
        let data = [TagKind::Byte.id(), 0, 1, b'a', 1];
        let mut reader = BinaryReader::new(Cursor::new(&data[..]));
        assert!(matches!(
            Compound::read_payload(&mut reader, 0),
            Err(Error::UnexpectedEof { offset: 5 })
        ));
    }
}
