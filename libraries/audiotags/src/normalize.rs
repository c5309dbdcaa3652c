/// Per-dialect property normalization
///
/// Each supported tag dialect is flattened into the same canonical model: an
/// ordered multimap of uppercase Vorbis-style keys to Unicode string values.
/// Nothing format-internal (frame ids, atom fourccs, binary encodings) leaks
/// past this module.
use lofty::ape::ApeTag;
use lofty::file::TaggedFileExt;
use lofty::id3::v1::Id3v1Tag;
use lofty::id3::v2::{Frame, Id3v2Tag};
use lofty::mp4::{AtomData, AtomIdent, Ilst};
use lofty::ogg::VorbisComments;
use lofty::tag::{ItemKey, Tag, TagType};

use audiotags_core::PropertyMap;

use crate::handle::Container;

/// Pick the authoritative dialect for the container and flatten it.
///
/// For MPEG this is the dialect resolver: the modern frame-based tag wins,
/// the legacy fixed-field tag is only consulted when the modern one is
/// absent, and neither present means no properties at all. The precedence
/// must not be reversed; it is what the rest of the tagging world treats as
/// canonical.
pub(crate) fn container_properties(container: &Container) -> Option<PropertyMap> {
    match container {
        Container::Mpeg(file) => match (file.id3v2(), file.id3v1()) {
            (Some(tag), _) => Some(id3v2_properties(tag)),
            (None, Some(tag)) => Some(id3v1_properties(tag)),
            (None, None) => None,
        },
        Container::Flac(file) => file
            .vorbis_comments()
            .map(vorbis_properties)
            .or_else(|| file.id3v2().map(id3v2_properties)),
        Container::OggXiph(file) => Some(vorbis_properties(file.comments())),
        Container::Mp4(file) => file.ilst().map(ilst_properties),
        Container::Ape(file) => file
            .ape()
            .map(ape_properties)
            .or_else(|| file.id3v1().map(id3v1_properties)),
        Container::Generic(file) => file.first_tag().map(generic_properties),
    }
}

/// Canonical (Vorbis-style) name for a semantic key, if it has one.
pub(crate) fn canonical_name(key: ItemKey) -> Option<String> {
    match key {
        // The integer-precision BPM key has no Vorbis spelling of its own;
        // the canonical model folds it into BPM.
        ItemKey::IntegerBpm => Some("BPM".to_string()),
        other => other.map_key(TagType::VorbisComments, false).map(str::to_owned),
    }
}

/// Map a native key of the given dialect to its canonical name, falling back
/// to the uppercased native key for fields the dialect tables do not know
/// (this is how custom fields like `CROSSONIC_ID_<instance>` pass through).
fn canonical_or_upper(tag_type: TagType, native_key: &str) -> Option<String> {
    if native_key.is_empty() {
        return None;
    }
    match canonical_name(ItemKey::from_key(tag_type, native_key)) {
        Some(name) => Some(name.to_string()),
        None => Some(native_key.to_uppercase()),
    }
}

/// Push one value per null-separated part, the ID3v2.4 multi-value layout.
fn push_multi(map: &mut PropertyMap, key: &str, value: &str) {
    for part in value.split('\0').filter(|part| !part.is_empty()) {
        map.push(key, part);
    }
}

pub(crate) fn vorbis_properties(tag: &VorbisComments) -> PropertyMap {
    let mut map = PropertyMap::new();
    for (key, value) in tag.items() {
        map.push(key.to_uppercase(), value);
    }
    map
}

pub(crate) fn id3v2_properties(tag: &Id3v2Tag) -> PropertyMap {
    let mut map = PropertyMap::new();

    for frame in tag {
        match frame {
            Frame::Text(text) => {
                if let Some(key) = frame_key(frame.id_str()) {
                    push_multi(&mut map, &key, &text.value);
                }
            },
            Frame::UserText(user) => {
                if let Some(key) = canonical_or_upper(TagType::Id3v2, &user.description) {
                    push_multi(&mut map, &key, &user.content);
                }
            },
            Frame::Comment(comment) => map.push("COMMENT", comment.content.to_string()),
            Frame::UnsynchronizedText(lyrics) => map.push("LYRICS", lyrics.content.to_string()),
            Frame::Url(url) => {
                if let Some(key) = frame_key(frame.id_str()) {
                    map.push(key, url.url());
                }
            },
            Frame::UserUrl(user) => map.push("URL", user.content.to_string()),
            Frame::Timestamp(timestamp) => {
                if let Some(key) = frame_key(frame.id_str()) {
                    map.push(key, timestamp.timestamp.to_string());
                }
            },
            // Pictures, popularimeters, and binary frames have no place in a
            // textual property view.
            _ => {},
        }
    }

    map
}

/// Canonical name for a concrete ID3v2 frame id.
fn frame_key(frame_id: &str) -> Option<String> {
    canonical_name(ItemKey::from_key(TagType::Id3v2, frame_id))
}

pub(crate) fn id3v1_properties(tag: &Id3v1Tag) -> PropertyMap {
    let mut map = PropertyMap::new();

    if let Some(title) = &tag.title {
        map.push("TITLE", title);
    }
    if let Some(artist) = &tag.artist {
        map.push("ARTIST", artist);
    }
    if let Some(album) = &tag.album {
        map.push("ALBUM", album);
    }
    if let Some(year) = &tag.year {
        map.push("DATE", year.to_string());
    }
    if let Some(comment) = &tag.comment {
        map.push("COMMENT", comment);
    }
    if let Some(track) = tag.track_number {
        map.push("TRACKNUMBER", track.to_string());
    }
    // The legacy genre is a byte index into a fixed table; it is surfaced
    // as-is rather than resolved.
    if let Some(genre) = tag.genre {
        map.push("GENRE", genre.to_string());
    }

    map
}

pub(crate) fn ilst_properties(tag: &Ilst) -> PropertyMap {
    let mut map = PropertyMap::new();

    for atom in tag {
        match atom.ident() {
            AtomIdent::Fourcc(fourcc) if fourcc == b"trkn" => {
                push_pair_atom(&mut map, atom.data(), "TRACKNUMBER", "TRACKTOTAL");
            },
            AtomIdent::Fourcc(fourcc) if fourcc == b"disk" => {
                push_pair_atom(&mut map, atom.data(), "DISCNUMBER", "DISCTOTAL");
            },
            AtomIdent::Fourcc(fourcc) => {
                // Fourccs are latin-1; promote bytes to chars for the lookup
                let native: String = fourcc.iter().map(|&b| b as char).collect();
                if let Some(key) =
                    canonical_name(ItemKey::from_key(TagType::Mp4Ilst, &native))
                {
                    push_atom_values(&mut map, key, atom.data());
                }
            },
            AtomIdent::Freeform { mean, name } => {
                let full = format!("----:{mean}:{name}");
                let key = canonical_name(ItemKey::from_key(TagType::Mp4Ilst, &full))
                    .unwrap_or_else(|| name.to_uppercase());
                push_atom_values(&mut map, &key, atom.data());
            },
        }
    }

    map
}

fn push_atom_values<'a>(
    map: &mut PropertyMap,
    key: impl Into<String>,
    data: impl Iterator<Item = &'a AtomData>,
) {
    let key = key.into();
    for value in data {
        match value {
            AtomData::UTF8(text) | AtomData::UTF16(text) => map.push(key.clone(), text),
            AtomData::SignedInteger(int) => map.push(key.clone(), int.to_string()),
            AtomData::UnsignedInteger(int) => map.push(key.clone(), int.to_string()),
            AtomData::Bool(flag) => map.push(key.clone(), if *flag { "1" } else { "0" }),
            _ => {},
        }
    }
}

/// `trkn`/`disk` atoms carry a pair of big-endian u16s (number, total).
fn push_pair_atom<'a>(
    map: &mut PropertyMap,
    data: impl Iterator<Item = &'a AtomData>,
    number_key: &str,
    total_key: &str,
) {
    for value in data {
        if let AtomData::Unknown { data, .. } = value {
            if data.len() >= 6 {
                let number = u16::from_be_bytes([data[2], data[3]]);
                let total = u16::from_be_bytes([data[4], data[5]]);
                if number > 0 {
                    map.push(number_key, number.to_string());
                }
                if total > 0 {
                    map.push(total_key, total.to_string());
                }
            }
            return;
        }
    }
}

pub(crate) fn ape_properties(tag: &ApeTag) -> PropertyMap {
    let mut map = PropertyMap::new();

    for item in tag {
        if let lofty::tag::ItemValue::Text(text) = item.value() {
            if let Some(key) = canonical_or_upper(TagType::Ape, item.key()) {
                map.push(key, text);
            }
        }
    }

    map
}

pub(crate) fn generic_properties(tag: &Tag) -> PropertyMap {
    let mut map = PropertyMap::new();

    for item in tag.items() {
        if let Some(key) = canonical_name(item.key().clone()) {
            if let Some(text) = item.value().text() {
                map.push(key, text);
            }
        }
    }

    map
}
