//! On-disk round trips over synthesized containers: write, save, reopen,
//! read through the normalized model.

mod common;

use audiotags::{read, remove_crossonic_id, write_tag, FileHandle};
use common::{minimal_flac, minimal_mp3, with_id3v1, with_id3v2_title, write_fixture, COVER_BYTES};

#[test]
fn flac_write_field_replaces_and_persists() {
    let bytes = minimal_flac(&[("TITLE", "Old Title"), ("ARTIST", "Some Artist")], None);
    let (_dir, path) = write_fixture("song.flac", &bytes);

    write_tag(&path, "TITLE", "New Title").expect("write tag");

    let metadata = read(&path, false).expect("reopen and read");
    assert_eq!(metadata.tags.get_all("TITLE"), ["New Title"]);
    assert_eq!(metadata.tags.get("ARTIST"), Some("Some Artist"));
}

#[test]
fn flac_write_creates_tag_when_missing() {
    let bytes = minimal_flac(&[], None);
    let (_dir, path) = write_fixture("untagged.flac", &bytes);

    write_tag(&path, "title", "Created").expect("write tag");

    let metadata = read(&path, false).expect("read");
    assert_eq!(metadata.tags.get("TITLE"), Some("Created"));
}

#[test]
fn flac_crossonic_id_exact_and_prefix_removal() {
    let bytes = minimal_flac(&[("TITLE", "Keep Me")], None);
    let (_dir, path) = write_fixture("ids.flac", &bytes);

    write_tag(&path, "crossonic_id_abc", "tr_1").expect("write first id");
    write_tag(&path, "crossonic_id_xyz", "tr_2").expect("write second id");

    // Exact removal: only the addressed instance goes away
    remove_crossonic_id(&path, "abc").expect("remove exact");
    let metadata = read(&path, false).expect("read");
    assert!(!metadata.tags.contains_key("CROSSONIC_ID_ABC"));
    assert_eq!(metadata.tags.get("CROSSONIC_ID_XYZ"), Some("tr_2"));
    assert_eq!(metadata.tags.get("TITLE"), Some("Keep Me"));

    // Prefix removal: every remaining instance goes away
    remove_crossonic_id(&path, "").expect("remove by prefix");
    let metadata = read(&path, false).expect("read");
    assert!(!metadata.tags.contains_key("CROSSONIC_ID_XYZ"));
    assert_eq!(metadata.tags.get("TITLE"), Some("Keep Me"));
}

#[test]
fn mp3_legacy_tag_readable_when_alone() {
    let bytes = with_id3v1(minimal_mp3(), "Legacy Title", "Legacy Artist");
    let (_dir, path) = write_fixture("legacy.mp3", &bytes);

    let metadata = read(&path, false).expect("read");
    assert_eq!(metadata.tags.get("TITLE"), Some("Legacy Title"));
    assert_eq!(metadata.tags.get("ARTIST"), Some("Legacy Artist"));
}

#[test]
fn mp3_modern_tag_wins_when_both_dialects_present() {
    // ID3v2 carries only a title; ID3v1 carries a different title plus an
    // artist. The read must come exclusively from the modern tag.
    let bytes = with_id3v2_title(
        with_id3v1(minimal_mp3(), "Legacy Title", "Legacy Artist"),
        "Modern Title",
    );
    let (_dir, path) = write_fixture("both.mp3", &bytes);

    let metadata = read(&path, false).expect("read");
    assert_eq!(metadata.tags.get_all("TITLE"), ["Modern Title"]);
    assert!(!metadata.tags.contains_key("ARTIST"));
}

#[test]
fn mp3_modern_tag_takes_precedence_after_write() {
    let bytes = with_id3v1(minimal_mp3(), "Legacy Title", "Legacy Artist");
    let (_dir, path) = write_fixture("promoted.mp3", &bytes);

    // The write targets the modern dialect, creating it; the legacy tag
    // stays in the file but loses authority for reads.
    write_tag(&path, "TITLE", "Modern Title").expect("write tag");

    let metadata = read(&path, false).expect("read");
    assert_eq!(metadata.tags.get_all("TITLE"), ["Modern Title"]);
}

#[test]
fn mp3_custom_key_round_trips_through_user_text() {
    let bytes = with_id3v1(minimal_mp3(), "Legacy Title", "Legacy Artist");
    let (_dir, path) = write_fixture("custom.mp3", &bytes);

    write_tag(&path, "crossonic_id_abc", "tr_42").expect("write id");

    let metadata = read(&path, false).expect("read");
    assert_eq!(metadata.tags.get("CROSSONIC_ID_ABC"), Some("tr_42"));
}

#[test]
fn audio_properties_come_from_stream_info() {
    let bytes = minimal_flac(&[("TITLE", "Props")], None);
    let (_dir, path) = write_fixture("props.flac", &bytes);

    let metadata = read(&path, false).expect("read");
    assert_eq!(metadata.properties.sample_rate, 44_100);
    assert_eq!(metadata.properties.channels, 2);
}

#[test]
fn mp3_has_usable_audio_properties() {
    let bytes = minimal_mp3();
    let (_dir, path) = write_fixture("bare.mp3", &bytes);

    let handle = FileHandle::open(&path).expect("open");
    let properties = handle.read_audio_properties();
    assert_eq!(properties.sample_rate, 44_100);
    assert!(handle.has_media());
}

#[test]
fn has_image_flag_follows_the_check_request() {
    let with_cover = minimal_flac(&[("TITLE", "Art")], Some(COVER_BYTES));
    let (_dir, path) = write_fixture("art.flac", &with_cover);

    assert_eq!(read(&path, true).expect("read").has_image, Some(true));
    assert_eq!(read(&path, false).expect("read").has_image, None);

    let without_cover = minimal_flac(&[("TITLE", "No Art")], None);
    let (_dir2, path) = write_fixture("noart.flac", &without_cover);
    assert_eq!(read(&path, true).expect("read").has_image, Some(false));
}

#[test]
fn front_cover_bytes_match_embedded_payload() {
    let bytes = minimal_flac(&[("TITLE", "Art")], Some(COVER_BYTES));
    let (_dir, path) = write_fixture("cover.flac", &bytes);

    let handle = FileHandle::open(&path).expect("open");
    assert!(handle.has_front_cover());

    let cover = handle.front_cover().expect("front cover present");
    assert_eq!(cover.data, COVER_BYTES);
    assert_eq!(cover.mime_type.as_deref(), Some("image/jpeg"));
}

#[test]
fn writes_leave_embedded_pictures_alone() {
    let bytes = minimal_flac(&[("TITLE", "Art")], Some(COVER_BYTES));
    let (_dir, path) = write_fixture("keepart.flac", &bytes);

    write_tag(&path, "TITLE", "Renamed").expect("write tag");

    let handle = FileHandle::open(&path).expect("reopen");
    let cover = handle.front_cover().expect("cover survived the write");
    assert_eq!(cover.data, COVER_BYTES);
}

#[test]
fn buffer_handles_read_like_file_handles() {
    let bytes = minimal_flac(&[("TITLE", "In Memory")], None);

    let handle = FileHandle::open_buffer(bytes).expect("open buffer");
    let tags = handle.read_properties().expect("properties");
    assert_eq!(tags.get("TITLE"), Some("In Memory"));
    assert!(handle.path().is_none());
    assert!(!handle.is_writable());
}

#[test]
fn metadata_outlives_the_handle() {
    let bytes = minimal_flac(&[("TITLE", "Detached")], None);
    let (_dir, path) = write_fixture("detached.flac", &bytes);

    let metadata = {
        let handle = FileHandle::open(&path).expect("open");
        let tags = handle.read_properties().expect("properties");
        let properties = handle.read_audio_properties();
        handle.close();
        audiotags_core::Metadata::new(tags, properties)
    };

    assert_eq!(metadata.tags.get("TITLE"), Some("Detached"));
}
