//! Reading and writing MP4 metadata, including FairPlay handling

mod util;

use std::time::Duration;

use tagmeta::{Error, FileType, MimeType, Picture};

#[test_log::test]
fn fresh_file_opens_empty() {
	let dir = tempfile::tempdir().unwrap();
	let path = util::minimal_m4a(&dir, "fresh.m4a", b"M4A ");

	let meta = tagmeta::read_from_path(&path).unwrap();

	assert_eq!(meta.file_type(), FileType::Mp4);
	assert_eq!(meta.title(), None);
	assert!(meta.chapters().is_empty());
	assert!(!meta.is_drm_protected());
	assert!(meta.can_update_file());
}

#[test_log::test]
fn duration_falls_back_to_the_movie_header() {
	let dir = tempfile::tempdir().unwrap();
	let path = util::minimal_m4a(&dir, "timed.m4a", b"M4A ");

	// The fixture has no decodable stream, so the demuxer contributes
	// nothing and the mvhd duration stands in
	let meta = tagmeta::read_from_path(&path).unwrap();
	assert_eq!(meta.properties().duration(), Duration::from_secs(7));
}

#[test_log::test]
fn text_fields_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	let path = util::minimal_m4a(&dir, "tagged.m4a", b"M4A ");

	let mut meta = tagmeta::read_from_path(&path).unwrap();
	meta.set_title(String::from("Baz qux quux"));
	meta.set_artist(String::from("Foo artist"));
	meta.set_album(String::from("Bar album"));
	meta.set_album_artist(String::from("Foo album artist"));
	meta.set_genre(String::from("Classical"));
	meta.set_comment(String::from("Qux comment"));
	meta.set_copyright(String::from("2024 Foo"));
	meta.set_encoder(String::from("some encoder"));
	meta.set_lyrics(String::from("la la la"));
	meta.set_composer(String::from("Foo composer"));
	meta.set_year(1984);
	meta.set_track(7);
	meta.set_track_total(12);
	meta.set_disc(1);
	meta.set_disc_total(2);
	meta.update_file().unwrap();

	let meta = tagmeta::read_from_path(&path).unwrap();
	assert_eq!(meta.title().as_deref(), Some("Baz qux quux"));
	assert_eq!(meta.artist().as_deref(), Some("Foo artist"));
	assert_eq!(meta.album().as_deref(), Some("Bar album"));
	assert_eq!(meta.album_artist().as_deref(), Some("Foo album artist"));
	assert_eq!(meta.genre().as_deref(), Some("Classical"));
	assert_eq!(meta.comment().as_deref(), Some("Qux comment"));
	assert_eq!(meta.copyright().as_deref(), Some("2024 Foo"));
	assert_eq!(meta.encoder().as_deref(), Some("some encoder"));
	assert_eq!(meta.lyrics().as_deref(), Some("la la la"));
	assert_eq!(meta.composer().as_deref(), Some("Foo composer"));
	assert_eq!(meta.year(), Some(1984));
	assert_eq!(meta.track(), Some(7));
	assert_eq!(meta.track_total(), Some(12));
	assert_eq!(meta.disc(), Some(1));
	assert_eq!(meta.disc_total(), Some(2));
}

#[test]
fn freeform_release_dates_yield_a_year() {
	let dir = tempfile::tempdir().unwrap();
	let path = util::minimal_m4a(&dir, "dated.m4a", b"M4A ");

	let mut tag = mp4ameta::Tag::read_from_path(&path).unwrap();
	tag.set_year("2011-06-02");
	tag.write_to_path(&path).unwrap();

	let meta = tagmeta::read_from_path(&path).unwrap();
	assert_eq!(meta.year(), Some(2011));
}

#[test_log::test]
fn artwork_round_trips() {
	let dir = tempfile::tempdir().unwrap();
	let path = util::minimal_m4a(&dir, "cover.m4a", b"M4A ");

	let mut meta = tagmeta::read_from_path(&path).unwrap();
	meta.set_artwork(Picture::new(util::PNG_STUB.to_vec()).unwrap())
		.unwrap();
	meta.update_file().unwrap();

	let mut meta = tagmeta::read_from_path(&path).unwrap();
	let artwork = meta.artwork().expect("artwork should survive a commit");
	assert_eq!(artwork.mime_type(), MimeType::Png);
	assert_eq!(artwork.data(), util::PNG_STUB);

	meta.remove_artwork();
	meta.update_file().unwrap();

	let meta = tagmeta::read_from_path(&path).unwrap();
	assert!(meta.artwork().is_none());
}

#[test]
fn uncarriable_artwork_is_an_error_not_a_drop() {
	let dir = tempfile::tempdir().unwrap();
	let path = util::minimal_m4a(&dir, "tiff.m4a", b"M4A ");

	let tiff = Picture::new(util::TIFF_STUB.to_vec()).unwrap();
	assert_eq!(tiff.mime_type(), MimeType::Tiff);

	let mut meta = tagmeta::read_from_path(&path).unwrap();
	assert!(matches!(
		meta.set_artwork(tiff),
		Err(Error::UnsupportedMimeType(_))
	));

	// The failed set leaves the record untouched
	assert!(meta.artwork().is_none());
	meta.update_file().unwrap();

	let meta = tagmeta::read_from_path(&path).unwrap();
	assert!(meta.artwork().is_none());
}

#[test_log::test]
fn protected_files_refuse_updates() {
	let dir = tempfile::tempdir().unwrap();
	let path = util::minimal_m4a(&dir, "store.m4p", b"M4P ");

	let before = std::fs::read(&path).unwrap();

	let mut meta = tagmeta::read_from_path(&path).unwrap();
	assert!(meta.is_drm_protected());
	assert!(!meta.is_drm_authorized());
	assert!(!meta.can_update_file());

	// Edits still land in the record, but a commit is refused and the
	// file stays byte-identical
	meta.set_title(String::from("Not happening"));
	assert!(matches!(meta.update_file(), Err(Error::UpdateNotPermitted)));
	assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn protection_follows_the_brand_not_the_extension() {
	let dir = tempfile::tempdir().unwrap();

	// A protected brand behind a benign extension is still protected
	let path = util::minimal_m4a(&dir, "sneaky.m4a", b"M4P ");
	let meta = tagmeta::read_from_path(&path).unwrap();
	assert!(meta.is_drm_protected());
}
