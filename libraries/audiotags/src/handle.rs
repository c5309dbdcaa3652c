/// File handle and container detection
use std::fs::{File, OpenOptions};
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use lofty::ape::ApeFile;
use lofty::config::ParseOptions;
use lofty::file::{AudioFile, FileType, TaggedFile, TaggedFileExt};
use lofty::flac::FlacFile;
use lofty::mp4::Mp4File;
use lofty::mpeg::MpegFile;
use lofty::ogg::{OpusFile, SpeexFile, VorbisComments, VorbisFile};
use lofty::probe::Probe;
use lofty::properties::FileProperties;
use tracing::debug;

use audiotags_core::{AudioProperties, PropertyMap, TextOptions};

use crate::error::{MetadataError, Result};
use crate::mutate;
use crate::normalize;
use crate::picture::{self, FrontCover};

/// The parsed representation of an opened file.
///
/// One variant per known container kind, fixed at open time. Every dispatch
/// point in the crate matches this exhaustively, so supporting a new kind is
/// a compile-time decision rather than a silent fall-through.
pub(crate) enum Container {
    Mpeg(MpegFile),
    Flac(FlacFile),
    Mp4(Mp4File),
    OggXiph(XiphFile),
    Ape(ApeFile),
    Generic(TaggedFile),
}

/// The Ogg wrappers all carry their metadata in a Vorbis comment block; only
/// the codec-specific parser differs.
pub(crate) enum XiphFile {
    Vorbis(VorbisFile),
    Opus(OpusFile),
    Speex(SpeexFile),
}

impl XiphFile {
    pub(crate) fn comments(&self) -> &VorbisComments {
        match self {
            Self::Vorbis(f) => f.vorbis_comments(),
            Self::Opus(f) => f.vorbis_comments(),
            Self::Speex(f) => f.vorbis_comments(),
        }
    }

    pub(crate) fn comments_mut(&mut self) -> &mut VorbisComments {
        match self {
            Self::Vorbis(f) => f.vorbis_comments_mut(),
            Self::Opus(f) => f.vorbis_comments_mut(),
            Self::Speex(f) => f.vorbis_comments_mut(),
        }
    }

    fn properties(&self) -> FileProperties {
        match self {
            Self::Vorbis(f) => FileProperties::from(f.properties().clone()),
            Self::Opus(f) => FileProperties::from(f.properties().clone()),
            Self::Speex(f) => FileProperties::from(f.properties().clone()),
        }
    }
}

/// The byte stream backing an open handle.
enum Source {
    /// An on-disk file, kept open for the lifetime of the handle
    File {
        file: File,
        path: PathBuf,
        writable: bool,
    },
    /// An owned in-memory buffer; handles opened this way are read-only
    Buffer(Cursor<Vec<u8>>),
}

/// An opened audio file: the parsed container plus the stream it came from.
///
/// The handle owns both; dropping it (or calling [`FileHandle::close`])
/// releases both together. There is no way to release one without the other,
/// and no operation is possible after the handle is gone.
///
/// A handle is not meant to be shared: one handle, one logical caller, open
/// to close. Distinct handles on distinct files are fully independent.
pub struct FileHandle {
    container: Container,
    source: Source,
}

impl FileHandle {
    /// Open an audio file and determine its container kind.
    ///
    /// The kind is detected from the content, not the extension, and the
    /// container is parsed with the format's own parser. Errors if the path
    /// is unreadable, the content is not a supported container, or (for
    /// containers outside the known kinds) no tag is present at all. On any
    /// failure everything constructed so far is dropped; there is no partial
    /// handle.
    ///
    /// The file is opened read+write when permissions allow, falling back to
    /// read-only. Mutations through a read-only handle fail with
    /// [`MetadataError::ReadOnly`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let (mut file, writable) = match OpenOptions::new().read(true).write(true).open(path) {
            Ok(file) => (file, true),
            Err(_) => {
                let file = OpenOptions::new()
                    .read(true)
                    .open(path)
                    .map_err(|_| MetadataError::FileNotFound(path.to_path_buf()))?;
                (file, false)
            },
        };

        let container = parse_container(&mut file, path)?;

        Ok(Self {
            container,
            source: Source::File {
                file,
                path: path.to_path_buf(),
                writable,
            },
        })
    }

    /// Open from an owned in-memory buffer.
    ///
    /// The handle owns the buffer for its whole lifetime, mirroring the
    /// on-disk case. Buffer handles are read-only.
    pub fn open_buffer(data: Vec<u8>) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let container = parse_container(&mut cursor, Path::new("<buffer>"))?;

        Ok(Self {
            container,
            source: Source::Buffer(cursor),
        })
    }

    /// Consume and release the handle.
    ///
    /// Dropping the handle is equivalent; this exists so call sites can make
    /// the end of a handle's life explicit. A closed handle cannot be used
    /// again, by construction.
    pub fn close(self) {}

    /// The path this handle was opened from, if it came from disk
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::File { path, .. } => Some(path),
            Source::Buffer(_) => None,
        }
    }

    /// Whether mutations through this handle can be persisted
    pub fn is_writable(&self) -> bool {
        matches!(
            self.source,
            Source::File { writable: true, .. }
        )
    }

    /// Whether the file carries a usable audio stream.
    ///
    /// False for files that parsed as a container but expose all-zero stream
    /// properties; scanners treat those as non-media.
    pub fn has_media(&self) -> bool {
        !self.read_audio_properties().is_empty()
    }

    /// Normalized tag properties of the authoritative dialect.
    ///
    /// `None` when the file currently carries no tag dialect at all (possible
    /// even after a successful open; see [`FileHandle::open`]).
    pub fn read_properties(&self) -> Option<PropertyMap> {
        normalize::container_properties(&self.container)
    }

    /// Stream-level audio properties, normalized to ms / kbps / Hz / count.
    pub fn read_audio_properties(&self) -> AudioProperties {
        let props = match &self.container {
            Container::Mpeg(f) => FileProperties::from(f.properties().clone()),
            Container::Flac(f) => FileProperties::from(f.properties().clone()),
            Container::Mp4(f) => FileProperties::from(f.properties().clone()),
            Container::OggXiph(f) => f.properties(),
            Container::Ape(f) => FileProperties::from(f.properties().clone()),
            Container::Generic(f) => f.properties().clone(),
        };

        AudioProperties::new(
            props.duration().as_millis() as u64,
            props.audio_bitrate().unwrap_or_default(),
            props.sample_rate().unwrap_or_default(),
            props.channels().unwrap_or_default(),
        )
    }

    /// Whether the file embeds a front cover.
    ///
    /// Performs the same per-format scan as [`FileHandle::front_cover`] but
    /// never clones the payload; callers that only need the boolean do not
    /// pay for the bytes.
    pub fn has_front_cover(&self) -> bool {
        picture::has_front_cover(&self.container)
    }

    /// Extract the front cover, if any.
    ///
    /// The returned payload is owned by the caller; nothing is retained by
    /// the handle.
    pub fn front_cover(&self) -> Option<FrontCover> {
        picture::front_cover(&self.container)
    }

    /// Replace the authoritative tag's textual content from a property map
    /// and save the file in place.
    ///
    /// Non-textual structures (embedded pictures, binary frames) are left
    /// untouched. The authoritative write dialect is the container's modern
    /// primary tag, created when missing.
    pub fn write_tags(&mut self, properties: &PropertyMap, options: TextOptions) -> Result<()> {
        mutate::apply_properties(&mut self.container, properties, options);
        self.save()
    }

    /// Persist the in-memory container back to the backing file.
    fn save(&mut self) -> Result<()> {
        let Source::File {
            file, writable, ..
        } = &mut self.source
        else {
            return Err(MetadataError::ReadOnly);
        };
        if !*writable {
            return Err(MetadataError::ReadOnly);
        }

        file.rewind()?;
        mutate::save_container(&self.container, file)
    }
}

/// Detect the container kind from content and parse it with the concrete
/// parser for that kind.
fn parse_container<R: Read + Seek>(reader: &mut R, path: &Path) -> Result<Container> {
    let file_type = Probe::new(&mut *reader)
        .guess_file_type()
        .map_err(MetadataError::Io)?
        .file_type();

    let Some(file_type) = file_type else {
        return Err(MetadataError::UnsupportedFormat(path.display().to_string()));
    };

    debug!(?file_type, path = %path.display(), "detected container");

    reader.seek(SeekFrom::Start(0))?;
    let options = ParseOptions::new();

    let container = match file_type {
        FileType::Mpeg => Container::Mpeg(MpegFile::read_from(reader, options)?),
        FileType::Flac => Container::Flac(FlacFile::read_from(reader, options)?),
        FileType::Mp4 => Container::Mp4(Mp4File::read_from(reader, options)?),
        FileType::Vorbis => Container::OggXiph(XiphFile::Vorbis(VorbisFile::read_from(
            reader, options,
        )?)),
        FileType::Opus => Container::OggXiph(XiphFile::Opus(OpusFile::read_from(reader, options)?)),
        FileType::Speex => {
            Container::OggXiph(XiphFile::Speex(SpeexFile::read_from(reader, options)?))
        },
        FileType::Ape => Container::Ape(ApeFile::read_from(reader, options)?),
        _ => {
            let tagged = Probe::with_file_type(&mut *reader, file_type)
                .options(options)
                .read()?;
            // Outside the known kinds we only accept files that actually
            // carry a tag; there is nothing else this library could do with
            // them.
            if tagged.tags().is_empty() {
                return Err(MetadataError::NoTagFacility(path.display().to_string()));
            }
            Container::Generic(tagged)
        },
    };

    Ok(container)
}
