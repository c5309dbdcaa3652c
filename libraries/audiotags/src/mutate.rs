/// Per-dialect tag persistence
///
/// The mutator works the way the property model reads: callers hand in a
/// whole canonical map, and the authoritative tag's textual content is
/// rebuilt from it. Non-textual structures (embedded pictures, binary
/// frames, the Vorbis vendor string) survive untouched. Known keys travel
/// through the parser's own split/merge machinery so every format-specific
/// encoding quirk stays in the parser; custom keys take each dialect's
/// native custom-field carrier.
use std::borrow::Cow;
use std::fs::File;

use lofty::ape::{ApeItem, ApeTag};
use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFile, TaggedFileExt};
use lofty::id3::v2::{ExtendedTextFrame, Frame, Id3v2Tag};
use lofty::mp4::{Atom, AtomData, AtomIdent, Ilst};
use lofty::ogg::VorbisComments;
use lofty::tag::{ItemKey, ItemValue, MergeTag, SplitTag, Tag, TagItem, TagType};
use lofty::TextEncoding;
use tracing::debug;

use audiotags_core::{PropertyMap, TextOptions};

use crate::error::Result;
use crate::handle::Container;

/// Rebuild the container's authoritative tag from the canonical map.
///
/// The write target is always the modern primary dialect, created when
/// missing (an MPEG file that only carried ID3v1 gains an ID3v2 tag; the
/// ID3v1 tag itself is never written). This mirrors what the property
/// interface of the underlying parser generation has always done.
pub(crate) fn apply_properties(
    container: &mut Container,
    properties: &PropertyMap,
    options: TextOptions,
) {
    match container {
        Container::Mpeg(file) => {
            let current = file.remove_id3v2().unwrap_or_default();
            file.set_id3v2(rebuild_id3v2(current, properties, options));
        },
        Container::Flac(file) => {
            let mut comments = file.remove_vorbis_comments().unwrap_or_default();
            rebuild_vorbis(&mut comments, properties);
            file.set_vorbis_comments(comments);
        },
        Container::OggXiph(file) => rebuild_vorbis(file.comments_mut(), properties),
        Container::Mp4(file) => {
            let current = file.remove_ilst().unwrap_or_default();
            file.set_ilst(rebuild_ilst(current, properties));
        },
        Container::Ape(file) => {
            let current = file.remove_ape().unwrap_or_default();
            file.set_ape(rebuild_ape(current, properties));
        },
        Container::Generic(file) => rebuild_generic(file, properties),
    }
}

/// Persist a container into its backing file.
///
/// The file is expected to be positioned at the start; the parser rewrites
/// the metadata regions in place.
pub(crate) fn save_container(container: &Container, file: &mut File) -> Result<()> {
    let options = WriteOptions::default();

    match container {
        Container::Mpeg(f) => f.save_to(file, options)?,
        Container::Flac(f) => f.save_to(file, options)?,
        Container::Mp4(f) => f.save_to(file, options)?,
        Container::OggXiph(f) => match f {
            crate::handle::XiphFile::Vorbis(f) => f.save_to(file, options)?,
            crate::handle::XiphFile::Opus(f) => f.save_to(file, options)?,
            crate::handle::XiphFile::Speex(f) => f.save_to(file, options)?,
        },
        Container::Ape(f) => f.save_to(file, options)?,
        Container::Generic(f) => f.save_to(file, options)?,
    }

    Ok(())
}

/// Resolve a semantic key for a concrete dialect, accounting for keys whose
/// integer-precision sibling is the one the dialect actually stores
/// (ID3v2 `TBPM`, MP4 `tmpo`).
fn resolve_for(item_key: ItemKey, tag_type: TagType) -> Option<ItemKey> {
    if item_key.map_key(tag_type, false).is_some() {
        return Some(item_key);
    }
    if item_key == ItemKey::Bpm && ItemKey::IntegerBpm.map_key(tag_type, false).is_some() {
        return Some(ItemKey::IntegerBpm);
    }
    None
}

/// Split a canonical map into dialect-representable items and custom fields.
///
/// Returns the generic items pushed into `tag`, and the `(key, values)`
/// pairs the dialect's key tables cannot express.
fn partition_into<'a>(
    tag: &mut Tag,
    tag_type: TagType,
    properties: &'a PropertyMap,
) -> Vec<(&'a str, &'a [String])> {
    let mut custom = Vec::new();

    for (key, values) in properties.iter() {
        match resolve_for(ItemKey::from_key(TagType::VorbisComments, key), tag_type) {
            Some(item_key) => {
                for value in values {
                    tag.push_unchecked(TagItem::new(
                        item_key.clone(),
                        ItemValue::Text(value.clone()),
                    ));
                }
            },
            None => custom.push((key, values)),
        }
    }

    custom
}

/// Keep only the items the textual property model does not cover.
///
/// Binary-valued items (ratings, identifiers) survive a rebuild; text and
/// locator items are replaced wholesale from the map.
fn retain_non_textual(tag: &mut Tag) {
    tag.retain(|item| matches!(item.value(), ItemValue::Binary(_)));
}

fn rebuild_id3v2(mut tag: Id3v2Tag, properties: &PropertyMap, options: TextOptions) -> Id3v2Tag {
    // TXXX frames belong to the textual model wholesale; stale ones must not
    // survive the rebuild by hiding in the split remainder.
    tag.retain(|frame| !matches!(frame, Frame::UserText(_)));

    let (remainder, mut generic) = tag.split_tag();

    // Textual content is rebuilt from the map; pictures and binary frames
    // ride along in the generic tag and the remainder.
    retain_non_textual(&mut generic);
    let custom = partition_into(&mut generic, TagType::Id3v2, properties);

    let mut tag = remainder.merge_tag(generic);

    let encoding = if options.prefer_unicode {
        TextEncoding::UTF8
    } else {
        TextEncoding::Latin1
    };
    for (key, values) in custom {
        // Custom fields live in TXXX frames, values null-separated as usual
        tag.insert(Frame::UserText(ExtendedTextFrame::new(
            encoding,
            key.to_string(),
            values.join("\0"),
        )));
    }

    tag
}

fn rebuild_vorbis(comments: &mut VorbisComments, properties: &PropertyMap) {
    // Drain the textual items; vendor string and pictures stay put. The
    // comment block accepts arbitrary keys, so there is no custom-field
    // detour here.
    drop(comments.take_items());

    for (key, values) in properties.iter() {
        for value in values {
            comments.push(key.to_string(), value.clone());
        }
    }
}

fn rebuild_ilst(mut tag: Ilst, properties: &PropertyMap) -> Ilst {
    // Freeform text atoms are the custom-field carrier here; drop them all
    // before the split so removals take effect.
    tag.retain(|atom| {
        !(matches!(atom.ident(), AtomIdent::Freeform { .. })
            && atom
                .data()
                .all(|data| matches!(data, AtomData::UTF8(_) | AtomData::UTF16(_))))
    });

    let (remainder, mut generic) = tag.split_tag();

    retain_non_textual(&mut generic);
    let custom = partition_into(&mut generic, TagType::Mp4Ilst, properties);

    let mut tag = remainder.merge_tag(generic);

    for (key, values) in custom {
        let data: Vec<AtomData> = values
            .iter()
            .map(|value| AtomData::UTF8(value.clone()))
            .collect();
        let ident = AtomIdent::Freeform {
            mean: Cow::Borrowed("com.apple.iTunes"),
            name: Cow::Owned(key.to_string()),
        };
        if let Some(atom) = Atom::from_collection(ident, data) {
            tag.insert(atom);
        }
    }

    tag
}

fn rebuild_ape(mut tag: ApeTag, properties: &PropertyMap) -> ApeTag {
    // Text items are rebuilt from the map, custom keys included; binary
    // items (embedded pictures) stay.
    let text_keys: Vec<String> = (&tag)
        .into_iter()
        .filter(|item| matches!(item.value(), ItemValue::Text(_)))
        .map(|item| item.key().to_string())
        .collect();
    for key in &text_keys {
        tag.remove(key);
    }

    let (remainder, mut generic) = tag.split_tag();

    retain_non_textual(&mut generic);
    let custom = partition_into(&mut generic, TagType::Ape, properties);

    let mut tag = remainder.merge_tag(generic);

    for (key, values) in custom {
        // APE multi-values are null-separated within a single item
        match ApeItem::new(key.to_string(), ItemValue::Text(values.join("\0"))) {
            Ok(item) => tag.insert(item),
            Err(_) => debug!(key, "key not representable as an APE item, dropped"),
        }
    }

    tag
}

fn rebuild_generic(file: &mut TaggedFile, properties: &PropertyMap) {
    let tag_type = file
        .first_tag()
        .map(Tag::tag_type)
        .unwrap_or_else(|| file.primary_tag_type());

    if file.tag(tag_type).is_none() {
        file.insert_tag(Tag::new(tag_type));
    }
    let Some(tag) = file.tag_mut(tag_type) else {
        return;
    };

    retain_non_textual(tag);
    for (key, values) in properties.iter() {
        match resolve_for(ItemKey::from_key(TagType::VorbisComments, key), tag_type) {
            Some(item_key) => {
                for value in values {
                    tag.push_unchecked(TagItem::new(
                        item_key.clone(),
                        ItemValue::Text(value.clone()),
                    ));
                }
            },
            // Outside the known container kinds there is no custom-field
            // carrier to fall back to.
            None => debug!(key, "field has no representation in this format, dropped"),
        }
    }
}

/// Set a single field to a single value and save.
///
/// Whole-field replacement: any existing values under the key are dropped,
/// and the field is created when absent. The current properties are read
/// from the same dialect the rebuilt tag is written to, so a read after a
/// successful write observes exactly the map that was persisted.
pub fn write_field(path: impl AsRef<std::path::Path>, key: &str, value: &str) -> Result<()> {
    let mut handle = crate::FileHandle::open(path)?;
    let mut properties = handle.read_properties().unwrap_or_default();
    properties.replace(key, value);
    handle.write_tags(&properties, TextOptions::default())
}

/// Remove fields from a file by exact key or key prefix, then save.
///
/// With a non-empty `instance_id`, removes exactly `prefix + instance_id`.
/// With an empty one, removes every field whose canonical key starts with
/// `prefix`. The file is persisted either way, mirroring the write path.
pub fn remove_field(
    path: impl AsRef<std::path::Path>,
    prefix: &str,
    instance_id: &str,
) -> Result<()> {
    let mut handle = crate::FileHandle::open(path)?;
    let mut properties = handle.read_properties().unwrap_or_default();

    if instance_id.is_empty() {
        properties.retain_keys(|key| !key.starts_with(prefix));
    } else {
        let key = format!("{prefix}{instance_id}");
        properties.remove(&key);
    }

    handle.write_tags(&properties, TextOptions::default())
}
