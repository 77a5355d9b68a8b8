//! Format handler registration and dispatch
//!
//! The handlers participating in dispatch live in a [`HandlerRegistry`],
//! consulted in registration order. Custom handlers are registered by
//! composing a registry explicitly and handing it to
//! [`Probe::with_registry`](crate::Probe::with_registry).

use crate::components::id3::Id3Handler;
use crate::components::mp4::Mp4Handler;
use crate::config::ParseOptions;
use crate::error::{Error, Result};
use crate::meta::MetaData;
use crate::probe::{read_header, FileType};

use std::path::Path;
use std::sync::OnceLock;

/// A format handler participating in metadata dispatch
///
/// Implementing this trait (and registering the implementation) makes it
/// possible to open files through [`Probe`](crate::Probe) with a custom
/// format backend.
pub trait MetaDataHandler: Send + Sync {
	/// The [`FileType`] records produced by this handler report
	fn file_type(&self) -> FileType;

	/// The file extensions this handler understands, without the '.'
	fn extensions(&self) -> &'static [&'static str];

	/// Whether this handler can open the file
	///
	/// `header` holds up to [`HEADER_LEN`](crate::HEADER_LEN) bytes of the
	/// file's contents; implementations should prefer the content signature
	/// and fall back to the extension.
	fn accepts(&self, path: &Path, header: &[u8]) -> bool;

	/// Open a metadata record for the file
	///
	/// Only called after [`MetaDataHandler::accepts`] returned `true`.
	///
	/// # Errors
	///
	/// The backing library could not parse the file.
	fn open(&self, path: &Path, options: ParseOptions) -> Result<Box<dyn MetaData>>;
}

/// An ordered collection of format handlers
///
/// Dispatch order is registration order; among equally-capable handlers the
/// earliest registration wins. [`HandlerRegistry::default`] holds the
/// built-in handlers, ID3 first.
pub struct HandlerRegistry {
	handlers: Vec<&'static dyn MetaDataHandler>,
}

impl HandlerRegistry {
	/// Create an empty registry
	///
	/// A registry with no handlers rejects every file with
	/// [`Error::UnsupportedFormat`].
	#[must_use]
	pub const fn new() -> Self {
		Self {
			handlers: Vec::new(),
		}
	}

	/// Append a handler, giving it the lowest dispatch priority so far
	pub fn register(&mut self, handler: &'static dyn MetaDataHandler) {
		self.handlers.push(handler);
	}

	/// The registered handlers, in dispatch order
	pub fn handlers(&self) -> impl Iterator<Item = &'static dyn MetaDataHandler> + '_ {
		self.handlers.iter().copied()
	}

	/// The number of registered handlers
	pub fn len(&self) -> usize {
		self.handlers.len()
	}

	/// Whether the registry has no handlers
	pub fn is_empty(&self) -> bool {
		self.handlers.is_empty()
	}

	/// Every extension understood by some registered handler
	///
	/// Useful for building file-open dialogs or scanner filters.
	pub fn supported_extensions(&self) -> Vec<&'static str> {
		let mut extensions = Vec::new();
		for handler in &self.handlers {
			for ext in handler.extensions() {
				if !extensions.contains(ext) {
					extensions.push(*ext);
				}
			}
		}

		extensions
	}

	/// Open `path` through the first handler that accepts it
	pub(crate) fn open_with(&self, path: &Path, options: ParseOptions) -> Result<Box<dyn MetaData>> {
		let metadata = std::fs::metadata(path)?;
		if !metadata.is_file() {
			return Err(Error::Io(std::io::Error::new(
				std::io::ErrorKind::InvalidInput,
				"expected a local file",
			)));
		}
		if metadata.len() == 0 {
			return Err(Error::EmptyFile);
		}

		let header = read_header(path)?;

		for handler in &self.handlers {
			if handler.accepts(path, &header) {
				log::debug!(
					"{}: dispatching to the {:?} handler",
					path.display(),
					handler.file_type()
				);
				return handler.open(path, options);
			}
		}

		Err(Error::UnsupportedFormat(path.display().to_string()))
	}
}

impl Default for HandlerRegistry {
	/// The built-in handlers, in dispatch order: ID3, then MP4
	fn default() -> Self {
		let mut registry = Self::new();
		registry.register(&Id3Handler);
		registry.register(&Mp4Handler);
		registry
	}
}

/// The process-wide registry backing [`Probe::new`](crate::Probe::new) and
/// [`read_from_path`](crate::read_from_path)
pub(crate) fn default_registry() -> &'static HandlerRegistry {
	static INSTANCE: OnceLock<HandlerRegistry> = OnceLock::new();
	INSTANCE.get_or_init(HandlerRegistry::default)
}
