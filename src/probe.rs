use crate::config::ParseOptions;
use crate::meta::MetaData;
use crate::resolve::{default_registry, HandlerRegistry};
use crate::Result;

use std::fs::File;
use std::io::Read;
use std::path::Path;

const ID3: [u8; 3] = *b"ID3";
const FTYP: [u8; 4] = *b"ftyp";

/// The number of header bytes read for capability checks
///
/// This is the size of the prefix passed to
/// [`MetaDataHandler::accepts`](crate::MetaDataHandler::accepts).
pub const HEADER_LEN: usize = 36;

/// The file's container format, based on the matched handler
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FileType {
	/// An MPEG audio file carrying ID3 tags. Common extensions: `.mp3`
	Mpeg,
	/// An MPEG-4 container with iTunes-style metadata. Common extensions:
	/// `.mp4, .m4a, .m4b, .m4p, .m4r, .m4v`
	Mp4,
}

impl FileType {
	/// Attempts to determine the `FileType` from an extension
	///
	/// NOTE: Since this only looks at the extension, the result could be
	/// incorrect.
	pub fn from_ext(ext: &str) -> Option<Self> {
		match ext.to_ascii_lowercase().as_str() {
			"mp3" => Some(Self::Mpeg),
			"m4a" | "m4b" | "m4p" | "m4r" | "m4v" | "mp4" | "isom" => Some(Self::Mp4),
			_ => None,
		}
	}

	/// Attempts to determine the `FileType` from a buffer of file contents
	///
	/// Only the first [`HEADER_LEN`] bytes are relevant.
	pub fn from_buffer(buf: &[u8]) -> Option<Self> {
		if buf.starts_with(&ID3) {
			return Some(Self::Mpeg);
		}

		// MPEG frame sync, 11 set bits
		if buf.len() >= 2 && buf[0] == 0xFF && buf[1] & 0xE0 == 0xE0 {
			return Some(Self::Mpeg);
		}

		if buf.len() >= 8 && buf[4..8] == FTYP {
			return Some(Self::Mp4);
		}

		None
	}
}

/// Pull the brands out of an MP4 `ftyp` box, major brand first.
///
/// Returns an empty list when the buffer doesn't start with an `ftyp` box.
pub(crate) fn mp4_brands(buf: &[u8]) -> Vec<[u8; 4]> {
	let mut brands = Vec::new();

	if buf.len() < 16 || buf[4..8] != FTYP {
		return brands;
	}

	let size = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
	let end = size.min(buf.len());

	// Major brand, then (skipping the minor version) any compatible brands
	// that fit in the buffer.
	brands.push([buf[8], buf[9], buf[10], buf[11]]);

	let mut pos = 16;
	while pos + 4 <= end {
		brands.push([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]]);
		pos += 4;
	}

	brands
}

pub(crate) fn read_header(path: &Path) -> Result<Vec<u8>> {
	let mut file = File::open(path)?;

	let mut header = vec![0; HEADER_LEN];
	let mut read = 0;

	while read < HEADER_LEN {
		let n = file.read(&mut header[read..])?;
		if n == 0 {
			break;
		}
		read += n;
	}

	header.truncate(read);
	Ok(header)
}

/// Provides a way to check and open files through a [`HandlerRegistry`]
///
/// # Examples
///
/// ```no_run
/// use tagmeta::{Accessor, Probe};
///
/// # fn main() -> tagmeta::Result<()> {
/// let meta = Probe::new().open("music.mp3")?;
/// println!("{:?}", meta.title());
/// # Ok(())
/// # }
/// ```
pub struct Probe<'a> {
	registry: &'a HandlerRegistry,
	options: ParseOptions,
}

impl Default for Probe<'static> {
	fn default() -> Self {
		Self::new()
	}
}

impl Probe<'static> {
	/// Create a `Probe` over the process-wide default registry
	#[must_use]
	pub fn new() -> Self {
		Self {
			registry: default_registry(),
			options: ParseOptions::new(),
		}
	}
}

impl<'a> Probe<'a> {
	/// Create a `Probe` over a caller-composed registry
	#[must_use]
	pub fn with_registry(registry: &'a HandlerRegistry) -> Self {
		Self {
			registry,
			options: ParseOptions::new(),
		}
	}

	/// Set the [`ParseOptions`] passed to the matched handler
	#[must_use]
	pub fn options(mut self, options: ParseOptions) -> Self {
		self.options = options;
		self
	}

	/// Attempts to get a [`FileType`] from a path
	///
	/// NOTE: This is based on the content of the file. If you want to guess
	/// based on extension, see [`Probe::file_type_from_extension`].
	pub fn file_type(&self, path: impl AsRef<Path>) -> Option<FileType> {
		let header = read_header(path.as_ref()).ok()?;
		FileType::from_buffer(&header)
	}

	/// Attempts to get the [`FileType`] based on the file extension
	///
	/// NOTE: Since this only looks at the extension, the result could be
	/// incorrect.
	pub fn file_type_from_extension(&self, path: impl AsRef<Path>) -> Option<FileType> {
		let ext = path.as_ref().extension()?.to_str()?;
		FileType::from_ext(ext)
	}

	/// Open a metadata record for the file at `path`
	///
	/// The registered handlers are consulted in registration order; the
	/// first whose capability check accepts the file opens it.
	///
	/// # Errors
	///
	/// * `path` does not exist or is empty
	/// * No registered handler accepts the file
	///   ([`Error::UnsupportedFormat`](crate::Error::UnsupportedFormat))
	/// * The matched handler fails to parse the file
	pub fn open(&self, path: impl AsRef<Path>) -> Result<Box<dyn MetaData>> {
		self.registry.open_with(path.as_ref(), self.options)
	}
}

/// Open a metadata record using the default registry
///
/// See [`Probe::open`].
///
/// # Errors
///
/// See [`Probe::open`].
///
/// # Examples
///
/// ```no_run
/// use tagmeta::Accessor;
///
/// # fn main() -> tagmeta::Result<()> {
/// let meta = tagmeta::read_from_path("music.m4a")?;
/// println!("{:?}", meta.artist());
/// # Ok(())
/// # }
/// ```
pub fn read_from_path(path: impl AsRef<Path>) -> Result<Box<dyn MetaData>> {
	Probe::new().open(path)
}
