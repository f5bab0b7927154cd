//! Named Binary Tag
//!
//! Binary tree format used for item data, block entities, height maps and the
//! dimension registry. Network NBT starts with a named root compound; a lone
//! end tag stands for "no compound".

use super::io::{PacketReader, PacketWriter};
use crate::shared::error::{DecodeError, EncodeError};

/// Maximum nesting of compounds and lists, counting the root compound
pub const MAX_DEPTH: usize = 512;

const TAG_END: u8 = 0;
const TAG_BYTE: u8 = 1;
const TAG_SHORT: u8 = 2;
const TAG_INT: u8 = 3;
const TAG_LONG: u8 = 4;
const TAG_FLOAT: u8 = 5;
const TAG_DOUBLE: u8 = 6;
const TAG_BYTE_ARRAY: u8 = 7;
const TAG_STRING: u8 = 8;
const TAG_LIST: u8 = 9;
const TAG_COMPOUND: u8 = 10;
const TAG_INT_ARRAY: u8 = 11;
const TAG_LONG_ARRAY: u8 = 12;

#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<Tag>),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    fn id(&self) -> u8 {
        match self {
            Tag::Byte(_) => TAG_BYTE,
            Tag::Short(_) => TAG_SHORT,
            Tag::Int(_) => TAG_INT,
            Tag::Long(_) => TAG_LONG,
            Tag::Float(_) => TAG_FLOAT,
            Tag::Double(_) => TAG_DOUBLE,
            Tag::ByteArray(_) => TAG_BYTE_ARRAY,
            Tag::String(_) => TAG_STRING,
            Tag::List(_) => TAG_LIST,
            Tag::Compound(_) => TAG_COMPOUND,
            Tag::IntArray(_) => TAG_INT_ARRAY,
            Tag::LongArray(_) => TAG_LONG_ARRAY,
        }
    }

    /// Read a tag that holds no other tags
    fn read_flat(r: &mut PacketReader, id: u8) -> Result<Tag, DecodeError> {
        let tag = match id {
            TAG_BYTE => Tag::Byte(r.read_i8()?),
            TAG_SHORT => Tag::Short(r.read_i16()?),
            TAG_INT => Tag::Int(r.read_i32()?),
            TAG_LONG => Tag::Long(r.read_i64()?),
            TAG_FLOAT => Tag::Float(r.read_f32()?),
            TAG_DOUBLE => Tag::Double(r.read_f64()?),
            TAG_BYTE_ARRAY => {
                let len = read_array_len(r)?;
                Tag::ByteArray(r.read_bytes(len)?.iter().map(|b| *b as i8).collect())
            }
            TAG_STRING => Tag::String(read_nbt_string(r)?),
            TAG_INT_ARRAY => {
                let len = read_array_len(r)?;
                let mut items = Vec::with_capacity(len.min(r.remaining() / 4));
                for _ in 0..len {
                    items.push(r.read_i32()?);
                }
                Tag::IntArray(items)
            }
            TAG_LONG_ARRAY => {
                let len = read_array_len(r)?;
                let mut items = Vec::with_capacity(len.min(r.remaining() / 8));
                for _ in 0..len {
                    items.push(r.read_i64()?);
                }
                Tag::LongArray(items)
            }
            other => {
                return Err(DecodeError::InvalidNbt(format!("unknown tag id {}", other)));
            }
        };
        Ok(tag)
    }

    /// Write a tag that holds no other tags
    fn write_flat(&self, w: &mut PacketWriter) {
        match self {
            Tag::Byte(v) => {
                w.write_i8(*v);
            }
            Tag::Short(v) => {
                w.write_i16(*v);
            }
            Tag::Int(v) => {
                w.write_i32(*v);
            }
            Tag::Long(v) => {
                w.write_i64(*v);
            }
            Tag::Float(v) => {
                w.write_f32(*v);
            }
            Tag::Double(v) => {
                w.write_f64(*v);
            }
            Tag::ByteArray(values) => {
                w.write_i32(values.len() as i32);
                for v in values {
                    w.write_i8(*v);
                }
            }
            Tag::String(v) => write_nbt_string(w, v),
            Tag::IntArray(values) => {
                w.write_i32(values.len() as i32);
                for v in values {
                    w.write_i32(*v);
                }
            }
            Tag::LongArray(values) => {
                w.write_i32(values.len() as i32);
                for v in values {
                    w.write_i64(*v);
                }
            }
            // Nested tags go through `write_nested`
            Tag::List(_) | Tag::Compound(_) => {}
        }
    }
}

/// Element id of a list, which must hold one kind of tag
fn list_element(items: &[Tag]) -> Result<u8, EncodeError> {
    let expected = items.first().map(Tag::id).unwrap_or(TAG_END);
    match items.iter().map(Tag::id).find(|id| *id != expected) {
        Some(found) => Err(EncodeError::MixedList { expected, found }),
        None => Ok(expected),
    }
}

/// A list or compound being decoded
enum ReadFrame {
    List {
        element: u8,
        remaining: usize,
        items: Vec<Tag>,
    },
    Compound {
        compound: Compound,
        key: Option<String>,
    },
}

impl ReadFrame {
    fn open(r: &mut PacketReader, id: u8) -> Result<Self, DecodeError> {
        if id == TAG_COMPOUND {
            return Ok(ReadFrame::Compound {
                compound: Compound::new(),
                key: None,
            });
        }

        let element = r.read_u8()?;
        let len = read_array_len(r)?;
        if element == TAG_END && len > 0 {
            return Err(DecodeError::InvalidNbt(
                "non-empty list of end tags".to_string(),
            ));
        }
        Ok(ReadFrame::List {
            element,
            remaining: len,
            items: Vec::with_capacity(len.min(r.remaining())),
        })
    }

    fn finish(self) -> Tag {
        match self {
            ReadFrame::List { items, .. } => Tag::List(items),
            ReadFrame::Compound { compound, .. } => Tag::Compound(compound),
        }
    }
}

/// Decode the body of `root` and everything nested in it.
///
/// Nesting is tracked on the heap so deep input cannot exhaust the stack.
fn read_nested(r: &mut PacketReader, root: ReadFrame) -> Result<Tag, DecodeError> {
    let mut stack = vec![root];
    let mut value: Option<Tag> = None;

    loop {
        let next = match stack.last_mut() {
            Some(ReadFrame::List {
                element,
                remaining,
                items,
            }) => {
                if let Some(tag) = value.take() {
                    items.push(tag);
                }
                if *remaining == 0 {
                    None
                } else {
                    *remaining -= 1;
                    Some(*element)
                }
            }
            Some(ReadFrame::Compound { compound, key }) => {
                if let (Some(name), Some(tag)) = (key.take(), value.take()) {
                    compound.insert(name, tag);
                }
                match r.read_u8()? {
                    TAG_END => None,
                    id => {
                        *key = Some(read_nbt_string(r)?);
                        Some(id)
                    }
                }
            }
            None => return Err(DecodeError::InvalidNbt("unbalanced nesting".to_string())),
        };

        match next {
            None => {
                let tag = match stack.pop() {
                    Some(frame) => frame.finish(),
                    None => return Err(DecodeError::InvalidNbt("unbalanced nesting".to_string())),
                };
                if stack.is_empty() {
                    return Ok(tag);
                }
                value = Some(tag);
            }
            Some(id @ (TAG_LIST | TAG_COMPOUND)) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(DecodeError::InvalidNbt(format!(
                        "nesting deeper than {}",
                        MAX_DEPTH
                    )));
                }
                stack.push(ReadFrame::open(r, id)?);
            }
            Some(id) => value = Some(Tag::read_flat(r, id)?),
        }
    }
}

/// A list or compound being encoded
enum WriteFrame<'a> {
    List(std::slice::Iter<'a, Tag>),
    Compound(std::slice::Iter<'a, (String, Tag)>),
}

/// Encode the entries of `root` and everything nested in it, recording
/// mixed lists and excess nesting on the writer.
fn write_nested(w: &mut PacketWriter, root: &Compound) {
    let mut stack = vec![WriteFrame::Compound(root.entries.iter())];
    let mut current: Option<&Tag> = None;

    loop {
        if let Some(tag) = current.take() {
            match tag {
                Tag::List(_) | Tag::Compound(_) if stack.len() >= MAX_DEPTH => {
                    w.fail(EncodeError::NbtTooDeep(MAX_DEPTH));
                    return;
                }
                Tag::List(items) => {
                    let element = match list_element(items) {
                        Ok(element) => element,
                        Err(err) => {
                            w.fail(err);
                            return;
                        }
                    };
                    w.write_u8(element).write_i32(items.len() as i32);
                    stack.push(WriteFrame::List(items.iter()));
                }
                Tag::Compound(compound) => {
                    stack.push(WriteFrame::Compound(compound.entries.iter()));
                }
                flat => flat.write_flat(w),
            }
        }

        match stack.last_mut() {
            Some(WriteFrame::List(items)) => match items.next() {
                Some(item) => current = Some(item),
                None => {
                    stack.pop();
                }
            },
            Some(WriteFrame::Compound(entries)) => match entries.next() {
                Some((name, tag)) => {
                    w.write_u8(tag.id());
                    write_nbt_string(w, name);
                    current = Some(tag);
                }
                None => {
                    w.write_u8(TAG_END);
                    stack.pop();
                }
            },
            None => return,
        }
    }
}

fn read_array_len(r: &mut PacketReader) -> Result<usize, DecodeError> {
    let len = r.read_i32()?;
    usize::try_from(len).map_err(|_| DecodeError::NegativeLength(len))
}

/// Strings are Java modified UTF-8: NUL takes two bytes and characters
/// outside the BMP are written as surrogate pairs.
fn read_nbt_string(r: &mut PacketReader) -> Result<String, DecodeError> {
    let len = usize::from(r.read_u16()?);
    let bytes = r.read_bytes(len)?;
    cesu8::from_java_cesu8(&bytes)
        .map(|value| value.into_owned())
        .map_err(|e| DecodeError::InvalidNbt(format!("string is not modified UTF-8: {}", e)))
}

fn write_nbt_string(w: &mut PacketWriter, value: &str) {
    let bytes = cesu8::to_java_cesu8(value);
    match u16::try_from(bytes.len()) {
        Ok(len) => {
            w.write_u16(len).write_bytes(&bytes);
        }
        Err(_) => {
            w.fail(EncodeError::NbtStringTooLong {
                max: usize::from(u16::MAX),
                actual: bytes.len(),
            });
        }
    }
}

/// Ordered string-keyed map of tags
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    entries: Vec<(String, Tag)>,
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

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, tag)| tag)
    }

    /// Insert or replace, keeping the original position of replaced keys
    pub fn insert(&mut self, key: impl Into<String>, tag: Tag) -> Option<Tag> {
        let key = key.into();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, tag)),
            None => {
                self.entries.push((key, tag));
                None
            }
        }
    }

    pub fn with(mut self, key: impl Into<String>, tag: Tag) -> Self {
        self.insert(key, tag);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(name, tag)| (name.as_str(), tag))
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(Tag::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.get(key) {
            Some(Tag::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_compound(&self, key: &str) -> Option<&Compound> {
        match self.get(key) {
            Some(Tag::Compound(value)) => Some(value),
            _ => None,
        }
    }

    /// Root tag: `None` for an end tag, otherwise a named compound whose
    /// name is discarded.
    pub fn read_root(r: &mut PacketReader) -> Result<Option<Compound>, DecodeError> {
        match r.read_u8()? {
            TAG_END => Ok(None),
            TAG_COMPOUND => {
                read_nbt_string(r)?;
                let root = ReadFrame::open(r, TAG_COMPOUND)?;
                match read_nested(r, root)? {
                    Tag::Compound(compound) => Ok(Some(compound)),
                    _ => Err(DecodeError::InvalidNbt("root is not a compound".to_string())),
                }
            }
            other => Err(DecodeError::InvalidNbt(format!(
                "root tag must be a compound, found id {}",
                other
            ))),
        }
    }

    /// Root tag with an empty name.
    ///
    /// A list mixing tag types, nesting past [`MAX_DEPTH`] or a string over
    /// 65535 encoded bytes cannot be represented; the failure is recorded
    /// on the writer.
    pub fn write_root(&self, w: &mut PacketWriter) {
        w.write_u8(TAG_COMPOUND);
        write_nbt_string(w, "");
        write_nested(w, self);
    }
}

impl FromIterator<(String, Tag)> for Compound {
    fn from_iter<I: IntoIterator<Item = (String, Tag)>>(iter: I) -> Self {
        let mut compound = Compound::new();
        for (key, tag) in iter {
            compound.insert(key, tag);
        }
        compound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;

    fn sample() -> Compound {
        Compound::new()
            .with("name", Tag::String("Bananrama".to_string()))
            .with("count", Tag::Int(3))
            .with(
                "nested",
                Tag::Compound(Compound::new().with("flag", Tag::Byte(1))),
            )
            .with("longs", Tag::LongArray(vec![1, -1]))
            .with(
                "list",
                Tag::List(vec![Tag::Short(1), Tag::Short(2)]),
            )
    }

    #[test]
    fn test_root_is_named_compound() {
        let mut w = PacketWriter::new();
        Compound::new().with("a", Tag::Byte(5)).write_root(&mut w);
        assert_eq!(
            w.as_slice(),
            &[0x0a, 0x00, 0x00, 0x01, 0x00, 0x01, b'a', 0x05, 0x00]
        );
    }

    #[test]
    fn test_read_written_compound() {
        let compound = sample();
        let mut w = PacketWriter::new();
        compound.write_root(&mut w);

        let mut r = PacketReader::new(w.into_bytes());
        assert_eq!(Compound::read_root(&mut r).unwrap(), Some(compound));
        assert!(r.is_empty());
    }

    #[test]
    fn test_end_tag_root_is_absent() {
        let mut r = PacketReader::new(Bytes::from_static(&[0x00]));
        assert_eq!(Compound::read_root(&mut r).unwrap(), None);
    }

    #[test]
    fn test_root_must_be_compound() {
        let mut r = PacketReader::new(Bytes::from_static(&[0x03, 0x00, 0x00, 0, 0, 0, 1]));
        assert!(matches!(
            Compound::read_root(&mut r),
            Err(DecodeError::InvalidNbt(_))
        ));
    }

    #[test]
    fn test_depth_limit() {
        // a list of lists nested past the limit
        let mut bytes = vec![0x0a, 0x00, 0x00, 0x09, 0x00, 0x01, b'x'];
        for _ in 0..MAX_DEPTH + 1 {
            bytes.extend_from_slice(&[0x09, 0x00, 0x00, 0x00, 0x01]);
        }
        let mut r = PacketReader::new(bytes);
        assert!(matches!(
            Compound::read_root(&mut r),
            Err(DecodeError::InvalidNbt(_))
        ));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut compound = sample();
        let previous = compound.insert("count", Tag::Int(4));
        assert_eq!(previous, Some(Tag::Int(3)));
        assert_eq!(compound.get_int("count"), Some(4));
        assert_eq!(compound.iter().nth(1).map(|(k, _)| k), Some("count"));
    }

    // ==========================================================================
    // Nesting
    // ==========================================================================

    /// Compound of `depth` levels counting the root, each holding the next
    fn nested(depth: usize) -> Compound {
        let mut compound = Compound::new().with("leaf", Tag::Byte(1));
        for _ in 1..depth {
            compound = Compound::new().with("c", Tag::Compound(compound));
        }
        compound
    }

    fn depth_of(compound: &Compound) -> usize {
        let mut depth = 1;
        let mut current = compound;
        while let Some(next) = current.get_compound("c") {
            depth += 1;
            current = next;
        }
        depth
    }

    fn written(compound: &Compound) -> PacketWriter {
        let mut w = PacketWriter::new();
        compound.write_root(&mut w);
        w
    }

    #[test]
    fn test_max_depth_decodes_on_small_stack() {
        let depth = std::thread::Builder::new()
            .stack_size(2 << 20)
            .spawn(|| {
                let bytes = written(&nested(MAX_DEPTH)).finish().unwrap();
                let compound = Compound::read_root(&mut PacketReader::new(bytes))
                    .unwrap()
                    .unwrap();
                depth_of(&compound)
            })
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(depth, MAX_DEPTH);
    }

    #[test]
    fn test_compound_past_max_depth_is_rejected() {
        let mut w = written(&nested(MAX_DEPTH));
        assert_eq!(w.error(), None);

        w = written(&nested(MAX_DEPTH + 1));
        assert_eq!(w.error(), Some(&EncodeError::NbtTooDeep(MAX_DEPTH)));

        // Hand-built bytes for one level too many
        let mut bytes = vec![0x0a, 0x00, 0x00];
        for _ in 1..=MAX_DEPTH {
            bytes.extend_from_slice(&[0x0a, 0x00, 0x01, b'c']);
        }
        bytes.extend(std::iter::repeat(0x00).take(MAX_DEPTH + 1));
        assert!(matches!(
            Compound::read_root(&mut PacketReader::new(bytes)),
            Err(DecodeError::InvalidNbt(_))
        ));
    }

    // ==========================================================================
    // Strings
    // ==========================================================================

    fn string_compound(raw: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0x0a, 0x00, 0x00, 0x08, 0x00, 0x01, b's'];
        bytes.extend_from_slice(&(raw.len() as u16).to_be_bytes());
        bytes.extend_from_slice(raw);
        bytes.push(0x00);
        bytes
    }

    #[test]
    fn test_reads_surrogate_pair() {
        let bytes = string_compound(&[0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80]);
        let compound = Compound::read_root(&mut PacketReader::new(bytes))
            .unwrap()
            .unwrap();
        assert_eq!(compound.get_string("s"), Some("\u{1F600}"));
    }

    #[test]
    fn test_reads_two_byte_nul() {
        let bytes = string_compound(&[b'a', 0xC0, 0x80, b'b']);
        let compound = Compound::read_root(&mut PacketReader::new(bytes))
            .unwrap()
            .unwrap();
        assert_eq!(compound.get_string("s"), Some("a\0b"));
    }

    #[test]
    fn test_writes_modified_utf8() {
        let w = written(&Compound::new().with("s", Tag::String("\u{1F600}\0".to_string())));
        assert_eq!(
            w.as_slice(),
            string_compound(&[0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80, 0xC0, 0x80]).as_slice()
        );
    }

    #[test]
    fn test_rejects_truncated_sequence() {
        let bytes = string_compound(&[b'a', 0xED, 0xA0]);
        assert!(matches!(
            Compound::read_root(&mut PacketReader::new(bytes)),
            Err(DecodeError::InvalidNbt(_))
        ));
    }

    #[test]
    fn test_oversized_string_fails_write() {
        let w = written(&Compound::new().with("s", Tag::String("a".repeat(65_536))));
        assert_eq!(
            w.error(),
            Some(&EncodeError::NbtStringTooLong {
                max: 65_535,
                actual: 65_536
            })
        );
    }

    // ==========================================================================
    // Lists
    // ==========================================================================

    #[test]
    fn test_mixed_list_fails_write() {
        let w = written(
            &Compound::new().with("list", Tag::List(vec![Tag::Short(1), Tag::Int(2)])),
        );
        assert_eq!(
            w.error(),
            Some(&EncodeError::MixedList {
                expected: TAG_SHORT,
                found: TAG_INT
            })
        );
    }

    #[test]
    fn test_empty_list_uses_end_element() {
        let w = written(&Compound::new().with("l", Tag::List(Vec::new())));
        assert_eq!(
            w.as_slice(),
            &[0x0a, 0x00, 0x00, 0x09, 0x00, 0x01, b'l', 0x00, 0, 0, 0, 0, 0x00]
        );
    }
}
