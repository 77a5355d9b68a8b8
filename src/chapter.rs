use std::time::Duration;

/// A chapter marker embedded in the metadata
///
/// Chapters are read-only; they come out of ID3v2 `CHAP` frames. The MP4
/// backend does not expose chapter tracks, so MP4 records always report an
/// empty chapter list.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Chapter {
	pub(crate) title: Option<String>,
	pub(crate) start: Duration,
	pub(crate) end: Duration,
}

impl Chapter {
	/// Create a new `Chapter`
	#[must_use]
	pub const fn new(title: Option<String>, start: Duration, end: Duration) -> Self {
		Self { title, start, end }
	}

	/// The chapter's title, if one is stored
	pub fn title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	/// Offset of the chapter's start from the beginning of the audio
	pub fn start(&self) -> Duration {
		self.start
	}

	/// Offset of the chapter's end from the beginning of the audio
	pub fn end(&self) -> Duration {
		self.end
	}
}
