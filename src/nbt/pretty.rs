use std::fmt::{self, Write};

use super::{Compound, Tag, TagKind, TagList};

impl fmt::Display for Tag {
    /// One-line summary; containers show their size rather than contents.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(v) => write!(f, "{v}"),
            Self::Short(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::ByteArray(bytes) => write!(f, "[{} bytes]", bytes.len()),
            Self::String(s) => f.write_str(s),
            Self::List(list) => write!(f, "{} entries of type {}", list.len(), list.kind()),
            Self::Compound(compound) => write!(f, "{} Entries", compound.len()),
        }
    }
}

impl Tag {
    /// Render the tag and its descendants, one tag per line, tab-indented.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_tree(&mut out, self, None, 0);
        out
    }
}

fn write_tree(
    out: &mut String,
    tag: &Tag,
    name: Option<&str>,
    indent: usize,
) -> fmt::Result {
    write_header(out, tag.kind(), name, tag, indent)?;
    match tag {
        Tag::List(list) if !list.is_empty() => write_list(out, list, indent),
        Tag::Compound(compound) if !compound.is_empty() => write_compound(out, compound, indent),
        _ => Ok(()),
    }
}

/// Render a root compound without wrapping it in a [`Tag`].
pub(super) fn write_root(out: &mut String, name: &str, compound: &Compound) -> fmt::Result {
    let summary = format!("{} Entries", compound.len());
    write_header(out, TagKind::Compound, Some(name), &summary, 0)?;
    if compound.is_empty() {
        return Ok(());
    }
    write_compound(out, compound, 0)
}

fn write_header(
    out: &mut String,
    kind: TagKind,
    name: Option<&str>,
    summary: &dyn fmt::Display,
    indent: usize,
) -> fmt::Result {
    write_indent(out, indent)?;
    write!(out, "{kind}")?;
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        write!(out, "(\"{name}\")")?;
    }
    write!(out, ": {summary}")
}

fn write_list(out: &mut String, list: &TagList, indent: usize) -> fmt::Result {
    open_block(out, indent)?;
    for tag in list {
        out.push('\n');
        write_tree(out, tag, None, indent + 1)?;
    }
    close_block(out, indent)
}

fn write_compound(out: &mut String, compound: &Compound, indent: usize) -> fmt::Result {
    open_block(out, indent)?;
    for (name, tag) in compound.iter() {
        out.push('\n');
        write_tree(out, tag, Some(name), indent + 1)?;
    }
    close_block(out, indent)
}

fn open_block(out: &mut String, indent: usize) -> fmt::Result {
    out.push('\n');
    write_indent(out, indent)?;
    out.write_char('{')
}

fn close_block(out: &mut String, indent: usize) -> fmt::Result {
    out.push('\n');
    write_indent(out, indent)?;
    out.write_char('}')
}

fn write_indent(out: &mut String, indent: usize) -> fmt::Result {
    for _ in 0..indent {
        out.write_char('\t')?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summaries() {
        assert_eq!(Tag::Short(256).to_string(), "256");
        assert_eq!(Tag::ByteArray(vec![0; 4]).to_string(), "[4 bytes]");
        assert_eq!(Tag::String("Alpha".into()).to_string(), "Alpha");
        assert_eq!(
            Tag::List(TagList::new(TagKind::Long)).to_string(),
            "0 entries of type TAG_Long"
        );
    }

    #[test]
    fn test_pretty_nested() {
        let mut list = TagList::new(TagKind::Byte);
        list.push(Tag::Byte(1)).unwrap();
        let compound = Compound::from_iter([
            ("Height", Tag::Short(1)),
            ("Entities", Tag::List(list)),
            ("Empty", Tag::Compound(Compound::new())),
        ]);

        let expected = "TAG_Compound: 3 Entries\n\
                        {\n\
                        \tTAG_Short(\"Height\"): 1\n\
                        \tTAG_List(\"Entities\"): 1 entries of type TAG_Byte\n\
                        \t{\n\
                        \t\tTAG_Byte: 1\n\
                        \t}\n\
                        \tTAG_Compound(\"Empty\"): 0 Entries\n\
                        }";
        assert_eq!(Tag::Compound(compound).pretty(), expected);
    }
}
