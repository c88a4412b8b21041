use std::{fs, path::Path};

use sgf::{
	error::ErrorKind,
	format::{FrameRect, SIGNATURE},
	Accessor, PersistStage,
};
use tempfile::{tempdir, TempDir};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR not really an image";

fn trailer(width: u16, height: u16, frames: &[[u16; 4]], scripts: &[u8]) -> Vec<u8> {
	let mut bytes = Vec::new();
	for short in [width, height, 3, 4] {
		bytes.extend(short.to_be_bytes());
	}
	bytes.extend((frames.len() as u16).to_be_bytes());
	for frame in frames {
		for short in frame {
			bytes.extend(short.to_be_bytes());
		}
	}
	bytes.extend((scripts.len() as u16).to_be_bytes());
	bytes.extend(scripts);
	let data_length = bytes.len() as u32;
	bytes.extend(data_length.to_be_bytes());
	bytes.extend(SIGNATURE);
	bytes
}

fn write_asset(dir: &TempDir, name: &str, tail: &[u8]) -> std::path::PathBuf {
	let path = dir.path().join(name);
	let mut bytes = PNG.to_vec();
	bytes.extend(tail);
	fs::write(&path, bytes).expect("write asset");
	path
}

fn sample(dir: &TempDir) -> std::path::PathBuf {
	write_asset(
		dir,
		"sprite.png",
		&trailer(20, 10, &[[0, 0, 10, 10], [10, 0, 10, 10]], b"jump()"),
	)
}

fn read(path: &Path) -> Vec<u8> {
	fs::read(path).expect("read file")
}

#[test]
fn opens_two_frame_asset() {
	let dir = tempdir().expect("tempdir");
	let path = sample(&dir);
	let asset = Accessor::open(&path).expect("open asset");

	assert_eq!(asset.width(), 20);
	assert_eq!(asset.height(), 10);
	assert_eq!(asset.reg_axis_x(), 3);
	assert_eq!(asset.reg_axis_y(), 4);
	assert_eq!(asset.frames_count(), 2);
	assert_eq!(
		asset.frame_rects(),
		&[
			FrameRect { x: 0, y: 0, w: 10, h: 10 },
			FrameRect { x: 10, y: 0, w: 10, h: 10 },
		]
	);
	assert_eq!(asset.scripts(), b"jump()");
	assert_eq!(asset.scripts_count(), 6);
	assert_eq!(asset.data_length(), 34);
	assert_eq!(asset.file_size(), (PNG.len() + 34 + 13) as u64);
	assert_eq!(asset.frames_data().len(), 18);
}

#[test]
fn missing_file_is_io_error() {
	let dir = tempdir().expect("tempdir");
	let err = Accessor::open(dir.path().join("nope.png")).expect_err("no such file");
	assert_eq!(err.kind(), None);
}

#[test]
fn plain_png_is_unauthorized() {
	let dir = tempdir().expect("tempdir");
	let path = write_asset(&dir, "plain.png", b"");
	let err = Accessor::open(&path).expect_err("no signature");
	assert!(err.is_unauthorized());
	assert_eq!(err.to_string(), "sgf: unauthorized file!");
}

#[test]
fn losing_the_last_byte_is_unauthorized() {
	let dir = tempdir().expect("tempdir");
	let path = sample(&dir);
	let mut bytes = read(&path);
	bytes.pop();
	fs::write(&path, bytes).expect("truncate");

	let err = Accessor::open(&path).expect_err("signature cut short");
	assert_eq!(err.kind(), Some(ErrorKind::Unauthorized));
}

#[test]
fn oversized_data_length_is_malformed() {
	let dir = tempdir().expect("tempdir");
	let mut tail = trailer(1, 1, &[], b"");
	let at = tail.len() - 13;
	tail[at..at + 4].copy_from_slice(&10_000_u32.to_be_bytes());
	let path = write_asset(&dir, "broken.png", &tail);

	let err = Accessor::open(&path).expect_err("offsets before start of file");
	assert!(err.is_malformed());
	assert!(!err.is_unauthorized());
}

#[test]
fn edits_survive_reopening() {
	let dir = tempdir().expect("tempdir");
	let path = sample(&dir);
	let mut asset = Accessor::open(&path).expect("open asset");

	asset.set_width(640);
	asset.set_height(480);
	asset.set_registration(320, 470);
	asset
		.set_scripts(&b"walk(); walk(); jump()"[..])
		.expect("script fits");
	assert_eq!(asset.scripts_count(), 22);
	asset.persist().expect("persist");

	let reopened = Accessor::open(&path).expect("reopen asset");
	assert_eq!(reopened.width(), 640);
	assert_eq!(reopened.height(), 480);
	assert_eq!(reopened.reg_axis_x(), 320);
	assert_eq!(reopened.reg_axis_y(), 470);
	assert_eq!(reopened.frame_rects(), asset.frame_rects());
	assert_eq!(reopened.scripts(), b"walk(); walk(); jump()");
	assert_eq!(reopened.data_length(), 34 + 16);
	assert_eq!(reopened.file_size(), (PNG.len() + 50 + 13) as u64);

	// refreshed in place too
	assert_eq!(asset.data_length(), reopened.data_length());
	assert_eq!(asset.file_size(), reopened.file_size());

	assert!(read(&path).starts_with(PNG));
	assert!(!asset.backup_path().exists());
}

#[test]
fn shrinking_the_script() {
	let dir = tempdir().expect("tempdir");
	let path = sample(&dir);
	let mut asset = Accessor::open(&path).expect("open asset");
	asset.set_scripts(Vec::new()).expect("empty script");
	assert!(asset.write_back());

	let reopened = Accessor::open(&path).expect("reopen asset");
	assert_eq!(reopened.scripts(), b"");
	assert_eq!(reopened.scripts_count(), 0);
	assert_eq!(reopened.data_length(), 28);
	assert_eq!(reopened.frames_count(), 2);
}

#[test]
fn persisting_twice_is_stable() {
	let dir = tempdir().expect("tempdir");
	let path = sample(&dir);
	let original = read(&path);
	let mut asset = Accessor::open(&path).expect("open asset");

	asset.persist().expect("first persist");
	let first = read(&path);
	assert_eq!(first, original);

	asset.set_scripts(&b"longer script than before"[..]).expect("fits");
	asset.persist().expect("second persist");
	let second = read(&path);
	asset.persist().expect("third persist");
	assert_eq!(read(&path), second);
}

#[test]
fn failed_backup_leaves_asset_alone() {
	let dir = tempdir().expect("tempdir");
	let path = sample(&dir);
	let original = read(&path);
	let mut asset = Accessor::open(&path).expect("open asset");

	// a directory in the way makes the copy fail
	fs::create_dir(asset.backup_path()).expect("block backup path");

	asset.set_width(1);
	asset.set_scripts(&b"never written"[..]).expect("fits");
	let err = asset.persist().expect_err("backup is a directory");
	assert_eq!(err.stage, PersistStage::Backup);

	assert_eq!(read(&path), original);
	assert!(!asset.backup_path().exists());
	assert_eq!(asset.data_length(), 34);

	fs::create_dir(asset.backup_path()).expect("block backup path again");
	assert!(!asset.write_back());
	assert_eq!(read(&path), original);
	assert!(!asset.backup_path().exists());
}

#[test]
fn backup_path_appends_suffix() {
	let dir = tempdir().expect("tempdir");
	let path = sample(&dir);
	let asset = Accessor::open(&path).expect("open asset");
	assert_eq!(asset.backup_path(), dir.path().join("sprite.png.bak"));
}
