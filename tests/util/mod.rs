//! Synthesized fixtures for the integration tests
//!
//! No binary assets; every test file is generated into a [`tempfile::TempDir`]
//! from the container structure up.

// Not every test crate uses every helper.
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Write a headerless MPEG stream (frame sync only, no ID3 tag).
pub fn synth_mp3(dir: &TempDir, name: &str) -> PathBuf {
	let mut data = Vec::new();

	// A few sync-worded junk frames are enough for signature detection
	for _ in 0..4 {
		data.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
		data.extend_from_slice(&[0x55; 28]);
	}

	let path = dir.path().join(name);
	fs::write(&path, data).unwrap();
	path
}

/// Serialize one box with the given payload.
fn atom(name: &[u8; 4], payload: &[u8]) -> Vec<u8> {
	let size = u32::try_from(payload.len() + 8).unwrap();

	let mut out = Vec::with_capacity(payload.len() + 8);
	out.extend_from_slice(&size.to_be_bytes());
	out.extend_from_slice(name);
	out.extend_from_slice(payload);
	out
}

/// Build the smallest MP4 file the metadata layer can read back and rewrite.
///
/// The movie header declares a 7 second duration at a 1000 Hz timescale; the
/// tag atom tree (`udta.meta.hdlr` + empty `ilst`) is present so there is a
/// place to write new metadata into.
pub fn minimal_m4a(dir: &TempDir, name: &str, major_brand: &[u8; 4]) -> PathBuf {
	let mut ftyp_payload = Vec::new();
	ftyp_payload.extend_from_slice(major_brand);
	ftyp_payload.extend_from_slice(&[0, 0, 0, 0]);
	ftyp_payload.extend_from_slice(major_brand);
	ftyp_payload.extend_from_slice(b"isom");
	let ftyp = atom(b"ftyp", &ftyp_payload);

	// mvhd version 0: timescale 1000, duration 7000
	let mut mvhd_payload = vec![0u8; 100];
	mvhd_payload[12..16].copy_from_slice(&1000u32.to_be_bytes());
	mvhd_payload[16..20].copy_from_slice(&7000u32.to_be_bytes());
	// rate 1.0, volume 1.0
	mvhd_payload[20..24].copy_from_slice(&0x0001_0000u32.to_be_bytes());
	mvhd_payload[24..26].copy_from_slice(&0x0100u16.to_be_bytes());
	// identity matrix
	mvhd_payload[36..40].copy_from_slice(&0x0001_0000u32.to_be_bytes());
	mvhd_payload[52..56].copy_from_slice(&0x0001_0000u32.to_be_bytes());
	mvhd_payload[68..72].copy_from_slice(&0x4000_0000u32.to_be_bytes());
	// next track ID
	mvhd_payload[96..100].copy_from_slice(&1u32.to_be_bytes());
	let mvhd = atom(b"mvhd", &mvhd_payload);

	let mut hdlr_payload = vec![0u8; 25];
	hdlr_payload[8..12].copy_from_slice(b"mdir");
	hdlr_payload[12..16].copy_from_slice(b"appl");
	let hdlr = atom(b"hdlr", &hdlr_payload);

	let ilst = atom(b"ilst", &[]);

	let mut meta_payload = vec![0u8; 4];
	meta_payload.extend_from_slice(&hdlr);
	meta_payload.extend_from_slice(&ilst);
	let meta = atom(b"meta", &meta_payload);

	let udta = atom(b"udta", &meta);

	let mut moov_payload = Vec::new();
	moov_payload.extend_from_slice(&mvhd);
	moov_payload.extend_from_slice(&udta);
	let moov = atom(b"moov", &moov_payload);

	let mdat = atom(b"mdat", &[0x00; 16]);

	let mut data = Vec::new();
	data.extend_from_slice(&ftyp);
	data.extend_from_slice(&moov);
	data.extend_from_slice(&mdat);

	let path = dir.path().join(name);
	fs::write(&path, data).unwrap();
	path
}

/// A little-endian TIFF header, enough for signature detection.
pub const TIFF_STUB: &[u8] = &[0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00];

/// A 1x1 greyscale PNG header, enough for signature and size detection.
pub const PNG_STUB: &[u8] = &[
	0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
	0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x00, 0x00, 0x00, 0x00,
];
