/// Errors that could occur within tagmeta.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// No registered handler accepted the resource
	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),

	/// The file contains no data
	#[error("File contains no data")]
	EmptyFile,

	/// The resource cannot be rewritten (read-only or DRM-protected)
	#[error("The file cannot be updated")]
	UpdateNotPermitted,

	/// Provided data is not a recognized image
	#[error("Data is not a recognized picture format")]
	NotAPicture,

	/// Unsupported artwork mime type
	#[error("Unsupported mime type: {0}")]
	UnsupportedMimeType(String),

	/// Errors from the ID3 backend
	#[error(transparent)]
	Id3(#[from] id3::Error),

	/// Errors from the MP4 backend
	#[error(transparent)]
	Mp4(#[from] mp4ameta::Error),

	/// Errors from the audio-properties demuxer
	#[error(transparent)]
	Demux(#[from] symphonia::core::errors::Error),

	/// Represents all cases of `std::io::Error`.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Type alias for the result of metadata operations.
pub type Result<T> = std::result::Result<T, Error>;
