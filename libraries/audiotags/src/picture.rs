/// Per-format front-cover location
///
/// Every container stores pictures in a structurally unrelated way, so there
/// is no shared traversal here, only a shared outcome: zero or one front
/// cover. The presence check and the extraction run the identical scan; only
/// extraction clones the payload.
use lofty::id3::v2::{Frame, Id3v2Tag};
use lofty::ogg::OggPictureStorage;
use lofty::picture::{Picture, PictureType};
use tracing::warn;

use crate::handle::Container;

/// A front-cover payload, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontCover {
    /// Raw image bytes
    pub data: Vec<u8>,
    /// MIME type as declared by the container, when it declares one
    pub mime_type: Option<String>,
}

pub(crate) fn has_front_cover(container: &Container) -> bool {
    locate(container).is_some()
}

pub(crate) fn front_cover(container: &Container) -> Option<FrontCover> {
    locate(container).map(|picture| FrontCover {
        data: picture.data().to_vec(),
        mime_type: picture.mime_type().map(|mime| mime.as_str().to_string()),
    })
}

fn locate(container: &Container) -> Option<&Picture> {
    match container {
        // Picture blocks are ordered; only a block declared as the front
        // cover counts.
        Container::Flac(file) => file
            .pictures()
            .iter()
            .find(|(picture, _)| picture.pic_type() == PictureType::CoverFront)
            .map(|(picture, _)| picture),

        // APE items can embed pictures, but extraction has never been wired
        // up for them; the tag's presence is only worth a diagnostic.
        Container::Ape(file) => {
            if file.ape().is_some() {
                warn!("APE tag present; embedded picture extraction is not supported");
            }
            None
        },

        // The first attached-picture frame wins regardless of its declared
        // type; legacy tagging rarely sets the type precisely.
        Container::Mpeg(file) => file.id3v2().and_then(first_attached_picture),

        // The dedicated cover-art atom holds a list; take the first entry.
        Container::Mp4(file) => file
            .ilst()
            .and_then(|ilst| ilst.pictures().and_then(|mut pictures| pictures.next())),

        // Same front-cover-type scan as FLAC, over the comment block's
        // picture list.
        Container::OggXiph(file) => file
            .comments()
            .pictures()
            .iter()
            .find(|(picture, _)| picture.pic_type() == PictureType::CoverFront)
            .map(|(picture, _)| picture),

        Container::Generic(_) => None,
    }
}

fn first_attached_picture(tag: &Id3v2Tag) -> Option<&Picture> {
    tag.into_iter().find_map(|frame| match frame {
        Frame::Picture(attached) => Some(&attached.picture),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lofty::picture::MimeType;

    fn picture(pic_type: PictureType) -> Picture {
        Picture::new_unchecked(
            pic_type,
            Some(MimeType::Jpeg),
            None,
            vec![0xFF, 0xD8, 0xFF, 0xE0],
        )
    }

    #[test]
    fn id3v2_takes_first_picture_of_any_type() {
        let mut tag = Id3v2Tag::new();
        tag.insert_picture(picture(PictureType::Media));

        let found = first_attached_picture(&tag);
        assert_eq!(found.map(Picture::pic_type), Some(PictureType::Media));
    }

    #[test]
    fn id3v2_without_pictures_yields_none() {
        let tag = Id3v2Tag::new();
        assert!(first_attached_picture(&tag).is_none());
    }
}
