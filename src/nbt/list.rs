use std::io::{Read, Write};

use crate::codec::{BinaryReader, BinaryWriter};
use crate::error::{Error, Result};

use super::{Tag, TagKind};

/// Homogeneous, ordered list of unnamed tags.
///
/// Zero-length lists are allowed to declare [`TagKind::End`] as their
/// element kind, as some writers emit them that way.
#[derive(Debug, Clone, PartialEq)]
pub struct TagList {
    kind: TagKind,
    items: Vec<Tag>,
}

impl TagList {
    pub fn new(kind: TagKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    pub fn from_tags(kind: TagKind, items: Vec<Tag>) -> Result<Self> {
        let list = Self { kind, items };
        list.check_all()?;
        Ok(list)
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Result<&Tag> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Mutable access to an element. Changing the element's kind is caught
    /// when the list is encoded.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Tag> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    pub fn push(&mut self, tag: impl Into<Tag>) -> Result<()> {
        let tag = tag.into();
        self.check(self.items.len(), &tag)?;
        self.items.push(tag);
        Ok(())
    }

    /// Replace the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, tag: impl Into<Tag>) -> Result<Tag> {
        let tag = tag.into();
        self.check(index, &tag)?;
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, tag))
    }

    pub fn remove(&mut self, index: usize) -> Result<Tag> {
        let len = self.items.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        Ok(self.items.remove(index))
    }

    fn check(&self, index: usize, tag: &Tag) -> Result<()> {
        if tag.kind() != self.kind {
            return Err(Error::TypeMismatch {
                index,
                expected: self.kind,
                actual: tag.kind(),
            });
        }
        Ok(())
    }

    fn check_all(&self) -> Result<()> {
        self.items
            .iter()
            .enumerate()
            .try_for_each(|(index, tag)| self.check(index, tag))
    }

    pub(crate) fn read_payload<R: Read>(reader: &mut BinaryReader<R>, depth: usize) -> Result<Self> {
        let id = reader.read_u8()?;
        let kind = TagKind::from_u8(id).ok_or(Error::UnknownTagKind(id))?;
        let count = reader.read_i32()?;
        if count < 0 {
            return Err(Error::InvalidLength {
                what: "list",
                len: count as i64,
            });
        }
        if kind == TagKind::End && count > 0 {
            return Err(Error::UnknownTagKind(id));
        }

        let count = count as usize;
        let mut items = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            items.push(Tag::read_payload(kind, reader, depth + 1)?);
        }
        Ok(Self { kind, items })
    }

    pub(crate) fn write_payload<W: Write>(&self, writer: &mut BinaryWriter<W>) -> Result<()> {
        // Nothing is written for a list whose own elements mismatch.
        self.check_all()?;
        if self.items.len() > i32::MAX as usize {
            return Err(Error::TooLong {
                what: "list",
                len: self.items.len(),
                max: i32::MAX as usize,
            });
        }
        writer.write_u8(self.kind.id())?;
        writer.write_i32(self.items.len() as i32)?;
        for tag in &self.items {
            tag.write_payload(writer)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(list: &TagList) -> Result<Vec<u8>> {
        let mut writer = BinaryWriter::default();
        Tag::List(list.clone()).encode(&mut writer)?;
        Ok(writer.into_inner())
    }

    #[test]
    fn test_list_layout() {
        let list = TagList::from_tags(TagKind::Short, vec![Tag::Short(1), Tag::Short(-1)]).unwrap();
        assert_eq!(
            encode(&list).unwrap(),
            vec![TagKind::Short.id(), 0, 0, 0, 2, 0x00, 0x01, 0xff, 0xff]
        );
    }

    #[test]
    fn test_empty_list_of_long() {
        let list = TagList::new(TagKind::Long);
        assert_eq!(encode(&list).unwrap(), vec![TagKind::Long.id(), 0, 0, 0, 0]);
    }

    #[test]
    fn test_push_rejects_mismatch() {
        let mut list = TagList::new(TagKind::Int);
        list.push(3i32).unwrap();
        match list.push(Tag::Byte(1)) {
            Err(Error::TypeMismatch { index, expected, actual }) => {
                assert_eq!(index, 1);
                assert_eq!(expected, TagKind::Int);
                assert_eq!(actual, TagKind::Byte);
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_encode_fails_on_mismatch() {
        let mut list = TagList::new(TagKind::Byte);
        list.push(Tag::Byte(1)).unwrap();
        list.push(Tag::Byte(2)).unwrap();
        assert!(encode(&list).is_ok());

        *list.get_mut(1).unwrap() = Tag::String("oops".into());
        assert!(matches!(
            encode(&list),
            Err(Error::TypeMismatch { index: 1, .. })
        ));

        let mut writer = BinaryWriter::default();
        assert!(list.write_payload(&mut writer).is_err());
        assert_eq!(writer.position(), 0);
    }

    #[test]
    fn test_set_and_remove() {
        let mut list = TagList::from_tags(TagKind::Int, vec![Tag::Int(1), Tag::Int(2), Tag::Int(3)]).unwrap();
        assert_eq!(list.set(1, 20i32).unwrap(), Tag::Int(2));
        assert_eq!(list.remove(0).unwrap(), Tag::Int(1));
        let values: Vec<i32> = list.iter().filter_map(Tag::as_int).collect();
        assert_eq!(values, vec![20, 3]);
        assert!(matches!(
            list.get(5),
            Err(Error::IndexOutOfRange { index: 5, len: 2 })
        ));
        assert!(list.remove(2).is_err());
    }

    #[test]
    fn test_decode_end_typed_list() {
        let data = [TagKind::End.id(), 0, 0, 0, 0];
        let mut reader = BinaryReader::new(Cursor::new(&data[..]));
        let list = TagList::read_payload(&mut reader, 0).unwrap();
        assert_eq!(list.kind(), TagKind::End);
        assert!(list.is_empty());

        let data = [TagKind::End.id(), 0, 0, 0, 1];
        let mut reader = BinaryReader::new(Cursor::new(&data[..]));
        assert!(matches!(
            TagList::read_payload(&mut reader, 0),
            Err(Error::UnknownTagKind(0))
        ));
    }

    #[test]
    fn test_decode_negative_count() {
        let data = [TagKind::Int.id(), 0xff, 0xff, 0xff, 0xf0];
        let mut reader = BinaryReader::new(Cursor::new(&data[..]));
        assert!(matches!(
            TagList::read_payload(&mut reader, 0),
            Err(Error::InvalidLength { what: "list", .. })
        ));
    }

    #[test]
    fn test_decode_unknown_element_kind() {
        let data = [42, 0, 0, 0, 1];
        let mut reader = BinaryReader::new(Cursor::new(&data[..]));
        assert!(matches!(
            TagList::read_payload(&mut reader, 0),
            Err(Error::UnknownTagKind(42))
        ));
    }
}
