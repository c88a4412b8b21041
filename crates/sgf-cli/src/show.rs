use std::path::PathBuf;

use clap::{Parser, ValueHint};
use sgf::Accessor;
use tracing::info;

#[derive(Debug, Clone, Parser)]
pub struct ShowArgs {
	/// Asset file.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub input: PathBuf,

	/// Print the script as hex instead of text.
	#[arg(long)]
	pub hex: bool,
}

pub(crate) fn show(args: ShowArgs) -> miette::Result<()> {
	info!(path=?args.input, "open asset");
	let asset = Accessor::open(&args.input)?;

	println!("file size: {} bytes", asset.file_size());
	println!("data length: {} bytes", asset.data_length());
	println!("size: {}x{}", asset.width(), asset.height());
	println!(
		"registration point: {},{}",
		asset.reg_axis_x(),
		asset.reg_axis_y()
	);

	println!("frames: {}", asset.frames_count());
	for (n, rect) in asset.frame_rects().iter().enumerate() {
		println!("  {n}: {},{} {}x{}", rect.x, rect.y, rect.w, rect.h);
	}

	println!("script: {} bytes", asset.scripts_count());
	if args.hex {
		for line in asset.scripts().chunks(16) {
			let hex: Vec<String> = line.iter().map(|b| format!("{b:02x}")).collect();
			println!("  {}", hex.join(" "));
		}
	} else if !asset.scripts().is_empty() {
		println!("{}", String::from_utf8_lossy(asset.scripts()));
	}

	Ok(())
}
