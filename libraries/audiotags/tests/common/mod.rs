//! Minimal container fixtures built byte-by-byte.
//!
//! Just enough of each format for the parser to accept: a FLAC stream with
//! STREAMINFO (and optional comment/picture blocks), and a CBR MP3 made of a
//! few identical frames (with an optional trailing ID3v1 tag). No audio data
//! beyond the frame skeletons.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write fixture bytes into a fresh temp dir, returning both for the test.
pub fn write_fixture(name: &str, bytes: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, bytes).expect("write fixture");
    (dir, path)
}

/// A four-byte JPEG-ish payload; enough for byte-for-byte comparisons.
pub const COVER_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];

const FLAC_FRONT_COVER: u32 = 3;

pub fn minimal_flac(fields: &[(&str, &str)], front_cover: Option<&[u8]>) -> Vec<u8> {
    let mut blocks: Vec<(u8, Vec<u8>)> = vec![(0, streaminfo().to_vec())];
    if !fields.is_empty() {
        blocks.push((4, vorbis_comment_block(fields)));
    }
    if let Some(data) = front_cover {
        blocks.push((6, picture_block(FLAC_FRONT_COVER, data)));
    }

    let mut out = Vec::new();
    out.extend_from_slice(b"fLaC");
    let last = blocks.len() - 1;
    for (index, (ty, content)) in blocks.iter().enumerate() {
        let ty = if index == last { ty | 0x80 } else { *ty };
        out.push(ty);
        out.extend_from_slice(&(content.len() as u32).to_be_bytes()[1..]);
        out.extend_from_slice(content);
    }
    out
}

/// STREAMINFO for a 44.1kHz stereo 16-bit stream with no audio frames.
fn streaminfo() -> [u8; 34] {
    let mut info = [0u8; 34];
    info[0..2].copy_from_slice(&4096u16.to_be_bytes());
    info[2..4].copy_from_slice(&4096u16.to_be_bytes());
    // sample rate (20) | channels-1 (3) | bps-1 (5) | total samples hi (4)
    let packed: u32 = (44_100 << 12) | ((2 - 1) << 9) | ((16 - 1) << 4);
    info[10..14].copy_from_slice(&packed.to_be_bytes());
    info
}

fn vorbis_comment_block(fields: &[(&str, &str)]) -> Vec<u8> {
    let vendor = b"audiotags fixture";
    let mut out = Vec::new();
    out.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    out.extend_from_slice(vendor);
    out.extend_from_slice(&(fields.len() as u32).to_le_bytes());
    for (key, value) in fields {
        let entry = format!("{key}={value}");
        out.extend_from_slice(&(entry.len() as u32).to_le_bytes());
        out.extend_from_slice(entry.as_bytes());
    }
    out
}

fn picture_block(pic_type: u32, data: &[u8]) -> Vec<u8> {
    let mime = b"image/jpeg";
    let mut out = Vec::new();
    out.extend_from_slice(&pic_type.to_be_bytes());
    out.extend_from_slice(&(mime.len() as u32).to_be_bytes());
    out.extend_from_slice(mime);
    // empty description, then width/height/depth/colors
    for _ in 0..5 {
        out.extend_from_slice(&0u32.to_be_bytes());
    }
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(data);
    out
}

/// A CBR MPEG-1 Layer III skeleton: three identical 128kbps/44.1kHz stereo
/// frames. Frame length 144 * 128000 / 44100 = 417 bytes.
pub fn minimal_mp3() -> Vec<u8> {
    let mut out = Vec::new();
    for _ in 0..3 {
        let mut frame = vec![0u8; 417];
        frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
        out.extend_from_slice(&frame);
    }
    out
}

/// Append an ID3v1.1 tag (fixed 128-byte block at EOF).
pub fn with_id3v1(mut mp3: Vec<u8>, title: &str, artist: &str) -> Vec<u8> {
    let mut tag = [0u8; 128];
    tag[..3].copy_from_slice(b"TAG");
    copy_padded(&mut tag[3..33], title);
    copy_padded(&mut tag[33..63], artist);
    // album, year, comment stay empty; v1.1 track marker + track number
    tag[125] = 0;
    tag[126] = 1;
    tag[127] = 17; // genre index
    mp3.extend_from_slice(&tag);
    mp3
}

fn copy_padded(target: &mut [u8], value: &str) {
    let bytes = value.as_bytes();
    let len = bytes.len().min(target.len());
    target[..len].copy_from_slice(&bytes[..len]);
}

/// Prepend an ID3v2.4 tag holding a single TIT2 frame.
pub fn with_id3v2_title(mp3: Vec<u8>, title: &str) -> Vec<u8> {
    let mut frame = Vec::new();
    frame.extend_from_slice(b"TIT2");
    frame.extend_from_slice(&syncsafe(1 + title.len() as u32));
    frame.extend_from_slice(&[0, 0]);
    frame.push(3); // UTF-8
    frame.extend_from_slice(title.as_bytes());

    let mut out = Vec::new();
    out.extend_from_slice(b"ID3\x04\x00\x00");
    out.extend_from_slice(&syncsafe(frame.len() as u32));
    out.extend_from_slice(&frame);
    out.extend_from_slice(&mp3);
    out
}

fn syncsafe(value: u32) -> [u8; 4] {
    [
        (value >> 21) as u8 & 0x7F,
        (value >> 14) as u8 & 0x7F,
        (value >> 7) as u8 & 0x7F,
        value as u8 & 0x7F,
    ]
}
