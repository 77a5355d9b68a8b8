use std::fs::File;
use std::path::Path;
use std::time::Duration;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Various *immutable* audio properties
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct FileProperties {
	pub(crate) duration: Duration,
	pub(crate) overall_bitrate: Option<u32>,
	pub(crate) audio_bitrate: Option<u32>,
	pub(crate) sample_rate: Option<u32>,
	pub(crate) channels: Option<u8>,
}

impl Default for FileProperties {
	fn default() -> Self {
		Self {
			duration: Duration::ZERO,
			overall_bitrate: None,
			audio_bitrate: None,
			sample_rate: None,
			channels: None,
		}
	}
}

impl FileProperties {
	/// Create a new `FileProperties`
	#[must_use]
	pub const fn new(
		duration: Duration,
		overall_bitrate: Option<u32>,
		audio_bitrate: Option<u32>,
		sample_rate: Option<u32>,
		channels: Option<u8>,
	) -> Self {
		Self {
			duration,
			overall_bitrate,
			audio_bitrate,
			sample_rate,
			channels,
		}
	}

	/// Duration of the audio
	pub fn duration(&self) -> Duration {
		self.duration
	}

	/// Overall bitrate (kbps)
	pub fn overall_bitrate(&self) -> Option<u32> {
		self.overall_bitrate
	}

	/// Audio bitrate (kbps)
	pub fn audio_bitrate(&self) -> Option<u32> {
		self.audio_bitrate
	}

	/// Sample rate (Hz)
	pub fn sample_rate(&self) -> Option<u32> {
		self.sample_rate
	}

	/// Channel count
	pub fn channels(&self) -> Option<u8> {
		self.channels
	}
}

/// Demux `path` and pull the default track's properties.
///
/// This never decodes audio packets; everything comes from the container and
/// codec parameters.
pub(crate) fn read_properties(path: &Path) -> crate::error::Result<FileProperties> {
	let file = File::open(path)?;
	let file_len = file.metadata().map(|m| m.len()).unwrap_or_default();

	let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

	let mut hint = Hint::new();
	if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
		hint.with_extension(ext);
	}

	let probed = symphonia::default::get_probe()
		.format(
			&hint,
			mss,
			&FormatOptions::default(),
			&MetadataOptions::default(),
		)?;

	let format = probed.format;

	let Some(track) = format.default_track() else {
		return Ok(FileProperties::default());
	};

	let params = &track.codec_params;

	let mut duration = Duration::ZERO;
	if let (Some(time_base), Some(n_frames)) = (params.time_base, params.n_frames) {
		let time = time_base.calc_time(n_frames);
		duration = Duration::from_secs(time.seconds) + Duration::from_secs_f64(time.frac);
	}

	let sample_rate = params.sample_rate;
	let channels = params.channels.map(|c| c.count() as u8);

	let mut overall_bitrate = None;
	let duration_ms = duration.as_millis();
	if duration_ms > 0 && file_len > 0 {
		overall_bitrate = Some((u128::from(file_len) * 8 / duration_ms) as u32);
	}

	Ok(FileProperties {
		duration,
		// A single audio track, so the stream bitrate is the file bitrate
		// minus container overhead; the distinction isn't worth a decode.
		audio_bitrate: overall_bitrate,
		overall_bitrate,
		sample_rate,
		channels,
	})
}

/// Best-effort wrapper around [`read_properties`].
///
/// Property extraction is advisory; a file whose tag is perfectly readable
/// can still have an undecodable stream (DRM sample entries, truncation).
pub(crate) fn read_properties_or_default(path: &Path) -> FileProperties {
	match read_properties(path) {
		Ok(properties) => properties,
		Err(e) => {
			log::warn!(
				"Unable to read audio properties of {}: {e}; continuing with defaults",
				path.display()
			);
			FileProperties::default()
		},
	}
}
