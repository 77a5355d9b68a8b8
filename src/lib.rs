//! Read and write audio metadata through a single property surface.
//!
//! Files are opened through a registry of format handlers. Each handler is
//! asked, in registration order, whether it recognizes the file (by content
//! signature first, extension second); the first handler that accepts it
//! produces a [`MetaData`] record. The record owns an in-memory copy of the
//! file's tag, so edits are cheap and nothing touches the file until
//! [`MetaData::update_file`] is called.
//!
//! # Supported Formats
//!
//! | Format | Tag | Backed by |
//! |--------|-----|-----------|
//! | MPEG audio (`mp3`) | ID3v2 | [`id3`] |
//! | MPEG-4 audio (`m4a`, `m4b`, `m4p`, `m4r`, `m4v`, `mp4`) | `ilst` | [`mp4ameta`] |
//!
//! Audio properties (duration, bitrate, sample rate, channels) come from
//! [`symphonia`] and are best-effort: a record is still usable when its
//! stream cannot be demuxed.
//!
//! # Examples
//!
//! ## Reading a file
//!
//! ```rust,no_run
//! # fn main() -> tagmeta::Result<()> {
//! use tagmeta::{read_from_path, Accessor, MetaData};
//!
//! let meta = read_from_path("test.mp3")?;
//!
//! println!("title:    {:?}", meta.title());
//! println!("artist:   {:?}", meta.artist());
//! println!("duration: {:?}", meta.properties().duration());
//! # Ok(())
//! # }
//! ```
//!
//! ## Editing and committing
//!
//! ```rust,no_run
//! # fn main() -> tagmeta::Result<()> {
//! use tagmeta::{read_from_path, Accessor, MetaData};
//!
//! let mut meta = read_from_path("test.m4a")?;
//!
//! // Edits only touch the in-memory record
//! meta.set_title(String::from("Title"));
//! meta.set_track(7);
//!
//! // Until the record is written back
//! if meta.can_update_file() {
//! 	meta.update_file()?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Registering a custom handler
//!
//! Dispatch order is registration order; see [`HandlerRegistry`].
//!
//! ```rust,no_run
//! # fn main() -> tagmeta::Result<()> {
//! use tagmeta::components::id3::Id3Handler;
//! use tagmeta::components::mp4::Mp4Handler;
//! use tagmeta::{HandlerRegistry, Probe};
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register(&Mp4Handler);
//! registry.register(&Id3Handler);
//!
//! let _meta = Probe::with_registry(&registry).open("test.m4a")?;
//! # Ok(())
//! # }
//! ```

mod chapter;
mod config;
mod error;
mod meta;
mod picture;
mod probe;
mod properties;
mod resolve;

pub mod components;

pub use chapter::Chapter;
pub use config::ParseOptions;
pub use error::{Error, Result};
pub use meta::{Accessor, MetaData};
pub use picture::{MimeType, Picture, PictureInformation};
pub use probe::{read_from_path, FileType, Probe, HEADER_LEN};
pub use properties::FileProperties;
pub use resolve::{HandlerRegistry, MetaDataHandler};
