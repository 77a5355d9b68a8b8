/// Options to control how a file is opened
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) read_properties: bool,
	pub(crate) read_cover_art: bool,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	read_properties: true,
	/// 	read_cover_art: true,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// # Examples
	///
	/// ```rust
	/// use tagmeta::ParseOptions;
	///
	/// let parse_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			read_properties: true,
			read_cover_art: true,
		}
	}

	/// Whether or not to read the audio properties
	///
	/// Skipping them avoids demuxing the audio stream entirely; the record's
	/// [`FileProperties`](crate::FileProperties) will be zeroed out.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagmeta::ParseOptions;
	///
	/// // By default, `read_properties` is enabled. Here, we don't want to read them.
	/// let parse_options = ParseOptions::new().read_properties(false);
	/// ```
	pub fn read_properties(&mut self, read_properties: bool) -> Self {
		self.read_properties = read_properties;
		*self
	}

	/// Whether or not to read embedded cover art
	///
	/// # Examples
	///
	/// ```rust
	/// use tagmeta::ParseOptions;
	///
	/// let parse_options = ParseOptions::new().read_cover_art(false);
	/// ```
	pub fn read_cover_art(&mut self, read_cover_art: bool) -> Self {
		self.read_cover_art = read_cover_art;
		*self
	}
}
