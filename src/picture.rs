use crate::{Error, Result};

use std::convert::TryFrom;
use std::io::{Cursor, Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

/// Mime types for embedded artwork.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
}

impl TryFrom<&str> for MimeType {
	type Error = Error;

	fn try_from(inp: &str) -> Result<Self> {
		Ok(match inp {
			"image/jpeg" | "image/jpg" => MimeType::Jpeg,
			"image/png" => MimeType::Png,
			"image/tiff" => MimeType::Tiff,
			"image/bmp" => MimeType::Bmp,
			"image/gif" => MimeType::Gif,
			_ => return Err(Error::UnsupportedMimeType(inp.to_string())),
		})
	}
}

impl From<MimeType> for &'static str {
	fn from(mt: MimeType) -> Self {
		match mt {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Tiff => "image/tiff",
			MimeType::Bmp => "image/bmp",
			MimeType::Gif => "image/gif",
		}
	}
}

impl MimeType {
	/// The mime type's string representation, ex. "image/png"
	pub fn as_str(&self) -> &'static str {
		(*self).into()
	}

	/// Guess the mime type from the image's magic bytes
	///
	/// Returns `None` when the signature matches no supported format.
	pub fn from_data(data: &[u8]) -> Option<Self> {
		match data {
			[0x89, b'P', b'N', b'G', ..] => Some(Self::Png),
			[0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
			[b'G', b'I', b'F', b'8', ..] => Some(Self::Gif),
			[b'B', b'M', ..] => Some(Self::Bmp),
			[b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some(Self::Tiff),
			_ => None,
		}
	}
}

/// An embedded artwork image
///
/// The image data is kept in its original encoding; the mime type is
/// verified against the data's magic bytes on construction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Picture {
	pub(crate) mime_type: MimeType,
	pub(crate) description: Option<String>,
	pub(crate) data: Vec<u8>,
}

impl Picture {
	/// Create a `Picture`, detecting the mime type from the data
	///
	/// # Errors
	///
	/// * `data` does not start with a recognized image signature
	///   ([`Error::NotAPicture`])
	pub fn new(data: Vec<u8>) -> Result<Self> {
		let mime_type = MimeType::from_data(&data).ok_or(Error::NotAPicture)?;

		Ok(Self {
			mime_type,
			description: None,
			data,
		})
	}

	/// Create a `Picture` with a caller-provided mime type
	///
	/// The mime type is trusted as-is. This is only useful for data coming
	/// out of an existing tag whose signature is nonstandard.
	pub fn unchecked(mime_type: MimeType, data: Vec<u8>) -> Self {
		Self {
			mime_type,
			description: None,
			data,
		}
	}

	/// The picture's mime type
	pub fn mime_type(&self) -> MimeType {
		self.mime_type
	}

	/// The description, if one was stored alongside the image
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Set the description
	pub fn set_description(&mut self, description: Option<String>) {
		self.description = description;
	}

	/// The encoded image data
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Consume the picture, returning its encoded data
	pub fn into_data(self) -> Vec<u8> {
		self.data
	}
}

/// Information about a [`Picture`]
///
/// Decoded from the image header without re-encoding the data.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct PictureInformation {
	/// The picture's width in pixels
	pub width: u32,
	/// The picture's height in pixels
	pub height: u32,
	/// The picture's color depth in bits per pixel
	pub color_depth: u32,
	/// The number of colors used
	pub num_colors: u32,
}

impl PictureInformation {
	/// Attempt to extract [`PictureInformation`] from a [`Picture`]
	///
	/// NOTE: This only supports PNG and JPEG images. If another image is
	/// provided, the `PictureInformation` will be zeroed out.
	///
	/// # Errors
	///
	/// * `picture.data` is less than 8 bytes in length
	pub fn from_picture(picture: &Picture) -> Result<Self> {
		let reader = &*picture.data;

		if reader.len() < 8 {
			return Err(Error::NotAPicture);
		}

		match reader[..4] {
			[0x89, b'P', b'N', b'G'] => Ok(Self::from_png(reader).unwrap_or_default()),
			[0xFF, 0xD8, 0xFF, ..] => Ok(Self::from_jpeg(reader).unwrap_or_default()),
			_ => Ok(Self::default()),
		}
	}

	/// Attempt to extract [`PictureInformation`] from a PNG
	///
	/// # Errors
	///
	/// * `data` is not a valid PNG
	pub fn from_png(mut data: &[u8]) -> Result<Self> {
		let reader = &mut data;

		let mut sig = [0; 8];
		reader.read_exact(&mut sig)?;

		if sig != [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A] {
			return Err(Error::NotAPicture);
		}

		let mut ihdr = [0; 8];
		reader.read_exact(&mut ihdr)?;

		// The signature must be immediately followed by the IHDR chunk
		if !ihdr.ends_with(b"IHDR") {
			return Err(Error::NotAPicture);
		}

		let width = reader.read_u32::<BigEndian>()?;
		let height = reader.read_u32::<BigEndian>()?;
		let mut color_depth = u32::from(reader.read_u8()?);
		let color_type = reader.read_u8()?;

		match color_type {
			2 => color_depth *= 3,
			4 | 6 => color_depth *= 4,
			_ => {},
		}

		let mut ret = Self {
			width,
			height,
			color_depth,
			num_colors: 0,
		};

		// The color type 3 (indexed-color) means there should be a "PLTE"
		// chunk, whose data can be used in the `num_colors` field. It isn't
		// applicable to other color types.
		if color_type != 3 {
			return Ok(ret);
		}

		let mut reader = Cursor::new(reader);

		// Skip 7 bytes
		// Compression method (1)
		// Filter method (1)
		// Interlace method (1)
		// CRC (4)
		reader.seek(SeekFrom::Current(7))?;

		let mut chunk_type = [0; 4];

		while let (Ok(size), Ok(())) = (
			reader.read_u32::<BigEndian>(),
			reader.read_exact(&mut chunk_type),
		) {
			if &chunk_type == b"PLTE" {
				// The PLTE chunk contains 1-256 3-byte entries
				ret.num_colors = size / 3;
				break;
			}

			// Skip the chunk's data (size) and CRC (4 bytes)
			let (content_size, overflowed) = size.overflowing_add(4);
			if overflowed {
				break;
			}

			reader.seek(SeekFrom::Current(i64::from(content_size)))?;
		}

		Ok(ret)
	}

	/// Attempt to extract [`PictureInformation`] from a JPEG
	///
	/// # Errors
	///
	/// * `data` is not a JPEG image
	/// * `data` does not contain a `SOFn` frame
	pub fn from_jpeg(mut data: &[u8]) -> Result<Self> {
		let reader = &mut data;

		let mut frame_marker = [0; 4];
		reader.read_exact(&mut frame_marker)?;

		if !matches!(frame_marker, [0xFF, 0xD8, 0xFF, ..]) {
			return Err(Error::NotAPicture);
		}

		let mut section_len = reader.read_u16::<BigEndian>()?;

		let mut reader = Cursor::new(reader);

		// The length contains itself, so anything < 2 is invalid
		let (content_len, overflowed) = section_len.overflowing_sub(2);
		if overflowed {
			return Err(Error::NotAPicture);
		}
		reader.seek(SeekFrom::Current(i64::from(content_len)))?;

		while let Ok(0xFF) = reader.read_u8() {
			let marker = reader.read_u8()?;
			section_len = reader.read_u16::<BigEndian>()?;

			// This marks the SOS (Start of Scan), which is
			// the end of the header
			if marker == 0xDA {
				break;
			}

			// We are looking for a frame with a "SOFn" marker, with `n`
			// either being 0 or 2. Since there isn't a header like PNG, we
			// need to search for this frame.
			if marker == 0xC0 || marker == 0xC2 {
				let precision = reader.read_u8()?;
				let height = u32::from(reader.read_u16::<BigEndian>()?);
				let width = u32::from(reader.read_u16::<BigEndian>()?);
				let components = reader.read_u8()?;

				return Ok(Self {
					width,
					height,
					color_depth: u32::from(precision) * u32::from(components),
					num_colors: 0,
				});
			}

			reader.seek(SeekFrom::Current(i64::from(section_len.saturating_sub(2))))?;
		}

		Err(Error::NotAPicture)
	}
}

#[cfg(test)]
mod tests {
	use super::{MimeType, Picture, PictureInformation};

	// 1x1 PNG, greyscale, 8 bit
	const PNG_HEADER: &[u8] = &[
		0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D',
		b'R', 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x00, 0x00, 0x00, 0x00,
	];

	#[test]
	fn mime_detection() {
		assert_eq!(MimeType::from_data(PNG_HEADER), Some(MimeType::Png));
		assert_eq!(
			MimeType::from_data(&[0xFF, 0xD8, 0xFF, 0xE0]),
			Some(MimeType::Jpeg)
		);
		assert_eq!(MimeType::from_data(b"not an image"), None);
	}

	#[test]
	fn png_information() {
		let picture = Picture::new(PNG_HEADER.to_vec()).unwrap();
		let information = PictureInformation::from_picture(&picture).unwrap();

		assert_eq!(information.width, 1);
		assert_eq!(information.height, 1);
		assert_eq!(information.color_depth, 8);
	}

	#[test]
	fn rejects_garbage() {
		assert!(Picture::new(vec![0x00, 0x01, 0x02, 0x03]).is_err());
	}
}
