//! Open-failure taxonomy: every rejected input yields an error, never a
//! partially usable handle.

mod common;

use audiotags::{read, FileHandle, MetadataError};
use common::{minimal_flac, write_fixture};

#[test]
fn nonexistent_path_is_an_open_failure() {
    let result = FileHandle::open("/definitely/does/not/exist.flac");
    assert!(matches!(result, Err(MetadataError::FileNotFound(_))));

    let result = read("/definitely/does/not/exist.flac", false);
    assert!(result.is_err());
}

#[test]
fn zero_byte_file_is_an_open_failure() {
    let (_dir, path) = write_fixture("empty.mp3", &[]);
    assert!(FileHandle::open(&path).is_err());
}

#[test]
fn foreign_content_behind_audio_extension_is_an_open_failure() {
    // Detection is content-based; the extension says nothing
    let (_dir, path) = write_fixture("not_audio.mp3", b"This is just a text file.\n");
    assert!(FileHandle::open(&path).is_err());
}

#[test]
fn truncated_container_is_an_open_failure() {
    // A FLAC marker with nothing behind it
    let (_dir, path) = write_fixture("truncated.flac", b"fLaC");
    assert!(FileHandle::open(&path).is_err());
}

#[test]
fn tagless_container_opens_but_reads_no_metadata() {
    // A structurally valid FLAC with no tag block: the container is
    // tag-capable, so the open succeeds, and the defensive extraction
    // failure surfaces on read.
    let bytes = minimal_flac(&[], None);
    let (_dir, path) = write_fixture("tagless.flac", &bytes);

    let handle = FileHandle::open(&path).expect("open succeeds");
    assert!(handle.read_properties().is_none());
    drop(handle);

    let result = read(&path, false);
    assert!(matches!(result, Err(MetadataError::NoMetadata)));
}
