//! The MP4 format handler
//!
//! The `ilst` atom tree is read and rewritten by the `mp4ameta` crate. FairPlay
//! protected files (the `M4P ` brand) open normally but refuse updates.

use crate::chapter::Chapter;
use crate::components::id3::has_extension;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::meta::{Accessor, MetaData};
use crate::picture::{MimeType, Picture};
use crate::probe::{self, FileType};
use crate::properties::FileProperties;
use crate::resolve::MetaDataHandler;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use mp4ameta::{Img, ImgFmt, Tag};

const DRM_BRAND: [u8; 4] = *b"M4P ";

/// Handler for MPEG-4 audio
pub struct Mp4Handler;

impl MetaDataHandler for Mp4Handler {
	fn file_type(&self) -> FileType {
		FileType::Mp4
	}

	fn extensions(&self) -> &'static [&'static str] {
		&["m4a", "m4b", "m4p", "m4r", "m4v", "mp4"]
	}

	fn accepts(&self, path: &Path, header: &[u8]) -> bool {
		match FileType::from_buffer(header) {
			Some(file_type) => file_type == FileType::Mp4,
			None => has_extension(path, self.extensions()),
		}
	}

	fn open(&self, path: &Path, options: ParseOptions) -> Result<Box<dyn MetaData>> {
		Ok(Box::new(Mp4MetaData::read_from_path(path, options)?))
	}
}

/// A metadata record over an MP4 file
pub struct Mp4MetaData {
	path: PathBuf,
	tag: Tag,
	properties: FileProperties,
	artwork: Option<Picture>,
	drm_protected: bool,
	read_only: bool,
}

impl Mp4MetaData {
	/// Open an MP4 file's metadata directly, bypassing dispatch
	///
	/// # Errors
	///
	/// * `path` cannot be read
	/// * The atom tree is malformed
	pub fn read_from_path(path: impl AsRef<Path>, options: ParseOptions) -> Result<Self> {
		let path = path.as_ref();

		let tag = Tag::read_from_path(path)?;

		let header = probe::read_header(path)?;
		let drm_protected = probe::mp4_brands(&header).contains(&DRM_BRAND)
			|| has_extension(path, &["m4p"]);

		let mut properties = if options.read_properties {
			crate::properties::read_properties_or_default(path)
		} else {
			FileProperties::default()
		};

		// The mvhd atom is authoritative when the demuxer gets nothing out of
		// the stream (protected files in particular)
		if options.read_properties && properties.duration.is_zero() {
			if let Some(duration) = tag.duration() {
				properties.duration = duration;
			}
		}

		let artwork = if options.read_cover_art {
			tag.artwork().map(img_to_picture)
		} else {
			None
		};

		let read_only = std::fs::metadata(path)
			.map(|m| m.permissions().readonly())
			.unwrap_or(true);

		Ok(Self {
			path: path.to_path_buf(),
			tag,
			properties,
			artwork,
			drm_protected,
			read_only,
		})
	}

	/// The backing `mp4ameta` tag, for atom-level access
	pub fn tag(&self) -> &Tag {
		&self.tag
	}
}

fn img_to_picture(img: Img<&[u8]>) -> Picture {
	let mime_type = match img.fmt {
		ImgFmt::Png => MimeType::Png,
		ImgFmt::Jpeg => MimeType::Jpeg,
		ImgFmt::Bmp => MimeType::Bmp,
	};

	Picture::unchecked(mime_type, img.data.to_vec())
}

impl Accessor for Mp4MetaData {
	fn title(&self) -> Option<Cow<'_, str>> {
		self.tag.title().map(Cow::Borrowed)
	}
	fn set_title(&mut self, value: String) {
		self.tag.set_title(value)
	}
	fn remove_title(&mut self) {
		self.tag.remove_title();
	}

	fn artist(&self) -> Option<Cow<'_, str>> {
		self.tag.artist().map(Cow::Borrowed)
	}
	fn set_artist(&mut self, value: String) {
		self.tag.set_artist(value)
	}
	fn remove_artist(&mut self) {
		self.tag.remove_artists();
	}

	fn album(&self) -> Option<Cow<'_, str>> {
		self.tag.album().map(Cow::Borrowed)
	}
	fn set_album(&mut self, value: String) {
		self.tag.set_album(value)
	}
	fn remove_album(&mut self) {
		self.tag.remove_album();
	}

	fn album_artist(&self) -> Option<Cow<'_, str>> {
		self.tag.album_artist().map(Cow::Borrowed)
	}
	fn set_album_artist(&mut self, value: String) {
		self.tag.set_album_artist(value)
	}
	fn remove_album_artist(&mut self) {
		self.tag.remove_album_artists();
	}

	fn genre(&self) -> Option<Cow<'_, str>> {
		self.tag.genre().map(Cow::Borrowed)
	}
	fn set_genre(&mut self, value: String) {
		self.tag.set_genre(value)
	}
	fn remove_genre(&mut self) {
		self.tag.remove_genres();
	}

	fn comment(&self) -> Option<Cow<'_, str>> {
		self.tag.comment().map(Cow::Borrowed)
	}
	fn set_comment(&mut self, value: String) {
		self.tag.set_comment(value)
	}
	fn remove_comment(&mut self) {
		self.tag.remove_comments();
	}

	fn copyright(&self) -> Option<Cow<'_, str>> {
		self.tag.copyright().map(Cow::Borrowed)
	}
	fn set_copyright(&mut self, value: String) {
		self.tag.set_copyright(value)
	}
	fn remove_copyright(&mut self) {
		self.tag.remove_copyright();
	}

	fn encoder(&self) -> Option<Cow<'_, str>> {
		self.tag.encoder().map(Cow::Borrowed)
	}
	fn set_encoder(&mut self, value: String) {
		self.tag.set_encoder(value)
	}
	fn remove_encoder(&mut self) {
		self.tag.remove_encoder();
	}

	fn lyrics(&self) -> Option<Cow<'_, str>> {
		self.tag.lyrics().map(Cow::Borrowed)
	}
	fn set_lyrics(&mut self, value: String) {
		self.tag.set_lyrics(value)
	}
	fn remove_lyrics(&mut self) {
		self.tag.remove_lyrics();
	}

	fn composer(&self) -> Option<Cow<'_, str>> {
		self.tag.composer().map(Cow::Borrowed)
	}
	fn set_composer(&mut self, value: String) {
		self.tag.set_composer(value)
	}
	fn remove_composer(&mut self) {
		self.tag.remove_composers();
	}

	fn year(&self) -> Option<u32> {
		// The day atom is a free-form date; the leading four digits are the
		// release year ("2011" and "2011-06-02" both parse)
		let day = self.tag.year()?;
		let digits: String = day.chars().take_while(char::is_ascii_digit).collect();
		digits.parse().ok()
	}
	fn set_year(&mut self, value: u32) {
		self.tag.set_year(value.to_string());
	}
	fn remove_year(&mut self) {
		self.tag.remove_year();
	}

	fn track(&self) -> Option<u32> {
		self.tag.track_number().map(u32::from)
	}
	fn set_track(&mut self, value: u32) {
		self.tag
			.set_track_number(u16::try_from(value).unwrap_or(u16::MAX));
	}
	fn remove_track(&mut self) {
		self.tag.remove_track_number();
	}

	fn track_total(&self) -> Option<u32> {
		self.tag.total_tracks().map(u32::from)
	}
	fn set_track_total(&mut self, value: u32) {
		self.tag
			.set_total_tracks(u16::try_from(value).unwrap_or(u16::MAX));
	}
	fn remove_track_total(&mut self) {
		self.tag.remove_total_tracks();
	}

	fn disc(&self) -> Option<u32> {
		self.tag.disc_number().map(u32::from)
	}
	fn set_disc(&mut self, value: u32) {
		self.tag
			.set_disc_number(u16::try_from(value).unwrap_or(u16::MAX));
	}
	fn remove_disc(&mut self) {
		self.tag.remove_disc_number();
	}

	fn disc_total(&self) -> Option<u32> {
		self.tag.total_discs().map(u32::from)
	}
	fn set_disc_total(&mut self, value: u32) {
		self.tag
			.set_total_discs(u16::try_from(value).unwrap_or(u16::MAX));
	}
	fn remove_disc_total(&mut self) {
		self.tag.remove_total_discs();
	}
}

impl MetaData for Mp4MetaData {
	fn file_type(&self) -> FileType {
		FileType::Mp4
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
		let data = picture.data().to_vec();
		let img = match picture.mime_type() {
			MimeType::Png => Img::png(data),
			MimeType::Jpeg => Img::jpeg(data),
			MimeType::Bmp => Img::bmp(data),
			// covr only carries PNG, JPEG and BMP payloads
			other => {
				return Err(crate::Error::UnsupportedMimeType(
					other.as_str().to_string(),
				))
			},
		};

		self.tag.set_artwork(img);
		self.artwork = Some(picture);
		Ok(())
	}

	fn remove_artwork(&mut self) {
		self.tag.remove_artworks();
		self.artwork = None;
	}

	fn chapters(&self) -> &[Chapter] {
		// mp4ameta does not surface chpl/tref chapter atoms
		&[]
	}

	fn is_drm_protected(&self) -> bool {
		self.drm_protected
	}

	fn can_update_file(&self) -> bool {
		!self.drm_protected && !self.read_only
	}

	fn update_file(&mut self) -> Result<()> {
		if !self.can_update_file() {
			return Err(crate::Error::UpdateNotPermitted);
		}

		self.tag.write_to_path(&self.path)?;
		Ok(())
	}
}
