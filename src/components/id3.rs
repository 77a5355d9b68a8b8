//! The MPEG/ID3 format handler
//!
//! Tag parsing and rewriting are delegated to the `id3` crate; this module
//! maps the shared property surface onto ID3v2.4 frames.

use crate::chapter::Chapter;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::meta::{Accessor, MetaData};
use crate::picture::{MimeType, Picture};
use crate::probe::FileType;
use crate::properties::FileProperties;
use crate::resolve::MetaDataHandler;

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;

use id3::frame::{Comment, Content, Lyrics, PictureType};
use id3::{Tag, TagLike, Version};

/// Handler for MPEG audio with ID3 tags
pub struct Id3Handler;

impl MetaDataHandler for Id3Handler {
	fn file_type(&self) -> FileType {
		FileType::Mpeg
	}

	fn extensions(&self) -> &'static [&'static str] {
		&["mp3"]
	}

	fn accepts(&self, path: &Path, header: &[u8]) -> bool {
		match FileType::from_buffer(header) {
			Some(file_type) => file_type == FileType::Mpeg,
			None => has_extension(path, self.extensions()),
		}
	}

	fn open(&self, path: &Path, options: ParseOptions) -> Result<Box<dyn MetaData>> {
		Ok(Box::new(Id3MetaData::read_from_path(path, options)?))
	}
}

pub(crate) fn has_extension(path: &Path, extensions: &[&str]) -> bool {
	path.extension()
		.and_then(|e| e.to_str())
		.is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// A metadata record over an MPEG/ID3 file
pub struct Id3MetaData {
	path: PathBuf,
	tag: Tag,
	properties: FileProperties,
	chapters: Vec<Chapter>,
	artwork: Option<Picture>,
	read_only: bool,
}

impl Id3MetaData {
	/// Open an MPEG file's metadata directly, bypassing dispatch
	///
	/// A file with no ID3 tag yields an empty, editable record; the tag is
	/// created on the first [`update_file`](MetaData::update_file).
	///
	/// # Errors
	///
	/// * `path` cannot be read
	/// * The file carries a tag the backing library cannot parse
	pub fn read_from_path(path: impl AsRef<Path>, options: ParseOptions) -> Result<Self> {
		let path = path.as_ref();

		let tag = match Tag::read_from_path(path) {
			Ok(tag) => tag,
			// An untagged MPEG file is still a valid, editable resource
			Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => Tag::new(),
			Err(e) => return Err(e.into()),
		};

		let properties = if options.read_properties {
			crate::properties::read_properties_or_default(path)
		} else {
			FileProperties::default()
		};

		let artwork = if options.read_cover_art {
			front_cover(&tag)
		} else {
			None
		};

		let chapters = chapters(&tag);

		let read_only = std::fs::metadata(path)
			.map(|m| m.permissions().readonly())
			.unwrap_or(true);

		Ok(Self {
			path: path.to_path_buf(),
			tag,
			properties,
			chapters,
			artwork,
			read_only,
		})
	}

	/// The backing `id3` tag, for frame-level access
	pub fn tag(&self) -> &Tag {
		&self.tag
	}

	fn text_frame(&self, id: &str) -> Option<&str> {
		self.tag.get(id).and_then(|frame| frame.content().text())
	}

	fn set_text_frame(&mut self, id: &str, value: String) {
		self.tag.set_text(id, value);
	}

	fn remove_frame(&mut self, id: &str) {
		let _ = self.tag.remove(id);
	}
}

fn front_cover(tag: &Tag) -> Option<Picture> {
	let pic = tag
		.pictures()
		.find(|p| p.picture_type == PictureType::CoverFront)
		.or_else(|| tag.pictures().next())?;

	let Some(mime_type) = MimeType::from_data(&pic.data)
		.or_else(|| MimeType::try_from(pic.mime_type.as_str()).ok())
	else {
		log::warn!(
			"Skipping embedded artwork with unrecognized mime type {:?}",
			pic.mime_type
		);
		return None;
	};

	let mut picture = Picture::unchecked(mime_type, pic.data.clone());
	if !pic.description.is_empty() {
		picture.set_description(Some(pic.description.clone()));
	}

	Some(picture)
}

fn chapters(tag: &Tag) -> Vec<Chapter> {
	let mut chapters = Vec::new();

	for frame in tag.frames() {
		let Content::Chapter(chap) = frame.content() else {
			continue;
		};

		let title = chap
			.frames
			.iter()
			.find(|f| f.id() == "TIT2")
			.and_then(|f| f.content().text())
			.map(str::to_owned);

		chapters.push(Chapter::new(
			title,
			Duration::from_millis(u64::from(chap.start_time)),
			Duration::from_millis(u64::from(chap.end_time)),
		));
	}

	chapters.sort_by_key(Chapter::start);
	chapters
}

impl Accessor for Id3MetaData {
	fn title(&self) -> Option<Cow<'_, str>> {
		self.tag.title().map(Cow::Borrowed)
	}
	fn set_title(&mut self, value: String) {
		self.tag.set_title(value)
	}
	fn remove_title(&mut self) {
		self.remove_frame("TIT2");
	}

	fn artist(&self) -> Option<Cow<'_, str>> {
		self.tag.artist().map(Cow::Borrowed)
	}
	fn set_artist(&mut self, value: String) {
		self.tag.set_artist(value)
	}
	fn remove_artist(&mut self) {
		self.remove_frame("TPE1");
	}

	fn album(&self) -> Option<Cow<'_, str>> {
		self.tag.album().map(Cow::Borrowed)
	}
	fn set_album(&mut self, value: String) {
		self.tag.set_album(value)
	}
	fn remove_album(&mut self) {
		self.remove_frame("TALB");
	}

	fn album_artist(&self) -> Option<Cow<'_, str>> {
		self.tag.album_artist().map(Cow::Borrowed)
	}
	fn set_album_artist(&mut self, value: String) {
		self.tag.set_album_artist(value)
	}
	fn remove_album_artist(&mut self) {
		self.remove_frame("TPE2");
	}

	fn genre(&self) -> Option<Cow<'_, str>> {
		self.tag.genre().map(Cow::Borrowed)
	}
	fn set_genre(&mut self, value: String) {
		self.tag.set_genre(value)
	}
	fn remove_genre(&mut self) {
		self.remove_frame("TCON");
	}

	fn comment(&self) -> Option<Cow<'_, str>> {
		self.tag
			.comments()
			.next()
			.map(|c| Cow::Borrowed(c.text.as_str()))
	}
	fn set_comment(&mut self, value: String) {
		self.remove_frame("COMM");
		let _ = self.tag.add_frame(Comment {
			lang: String::from("eng"),
			description: String::new(),
			text: value,
		});
	}
	fn remove_comment(&mut self) {
		self.remove_frame("COMM");
	}

	fn copyright(&self) -> Option<Cow<'_, str>> {
		self.text_frame("TCOP").map(Cow::Borrowed)
	}
	fn set_copyright(&mut self, value: String) {
		self.set_text_frame("TCOP", value);
	}
	fn remove_copyright(&mut self) {
		self.remove_frame("TCOP");
	}

	fn encoder(&self) -> Option<Cow<'_, str>> {
		self.text_frame("TENC").map(Cow::Borrowed)
	}
	fn set_encoder(&mut self, value: String) {
		self.set_text_frame("TENC", value);
	}
	fn remove_encoder(&mut self) {
		self.remove_frame("TENC");
	}

	fn lyrics(&self) -> Option<Cow<'_, str>> {
		self.tag
			.lyrics()
			.next()
			.map(|l| Cow::Borrowed(l.text.as_str()))
	}
	fn set_lyrics(&mut self, value: String) {
		self.remove_frame("USLT");
		let _ = self.tag.add_frame(Lyrics {
			lang: String::from("eng"),
			description: String::new(),
			text: value,
		});
	}
	fn remove_lyrics(&mut self) {
		self.remove_frame("USLT");
	}

	fn composer(&self) -> Option<Cow<'_, str>> {
		self.text_frame("TCOM").map(Cow::Borrowed)
	}
	fn set_composer(&mut self, value: String) {
		self.set_text_frame("TCOM", value);
	}
	fn remove_composer(&mut self) {
		self.remove_frame("TCOM");
	}

	fn year(&self) -> Option<u32> {
		self.tag.year().and_then(|y| u32::try_from(y).ok())
	}
	fn set_year(&mut self, value: u32) {
		self.tag.set_year(i32::try_from(value).unwrap_or(i32::MAX));
	}
	fn remove_year(&mut self) {
		self.tag.remove_year();
	}

	fn track(&self) -> Option<u32> {
		self.tag.track()
	}
	fn set_track(&mut self, value: u32) {
		self.tag.set_track(value);
	}
	fn remove_track(&mut self) {
		self.tag.remove_track();
	}

	fn track_total(&self) -> Option<u32> {
		self.tag.total_tracks()
	}
	fn set_track_total(&mut self, value: u32) {
		self.tag.set_total_tracks(value);
	}
	fn remove_track_total(&mut self) {
		self.tag.remove_total_tracks();
	}

	fn disc(&self) -> Option<u32> {
		self.tag.disc()
	}
	fn set_disc(&mut self, value: u32) {
		self.tag.set_disc(value);
	}
	fn remove_disc(&mut self) {
		self.tag.remove_disc();
	}

	fn disc_total(&self) -> Option<u32> {
		self.tag.total_discs()
	}
	fn set_disc_total(&mut self, value: u32) {
		self.tag.set_total_discs(value);
	}
	fn remove_disc_total(&mut self) {
		self.tag.remove_total_discs();
	}
}

impl MetaData for Id3MetaData {
	fn file_type(&self) -> FileType {
		FileType::Mpeg
	}

	fn path(&self) -> &Path {
		&self.path
	}

	fn properties(&self) -> &FileProperties {
		&self.properties
	}

	fn artwork(&self) -> Option<&Picture> {
		self.artwork.as_ref()
	}

	fn set_artwork(&mut self, picture: Picture) -> Result<()> {
		self.remove_frame("APIC");
		let _ = self.tag.add_frame(id3::frame::Picture {
			mime_type: picture.mime_type().as_str().to_string(),
			picture_type: PictureType::CoverFront,
			description: picture.description().unwrap_or_default().to_string(),
			data: picture.data().to_vec(),
		});
		self.artwork = Some(picture);
		Ok(())
	}

	fn remove_artwork(&mut self) {
		self.remove_frame("APIC");
		self.artwork = None;
	}

	fn chapters(&self) -> &[Chapter] {
		&self.chapters
	}

	fn can_update_file(&self) -> bool {
		!self.read_only
	}

	fn update_file(&mut self) -> Result<()> {
		if !self.can_update_file() {
			return Err(crate::Error::UpdateNotPermitted);
		}

		self.tag.write_to_path(&self.path, Version::Id3v24)?;
		Ok(())
	}
}
