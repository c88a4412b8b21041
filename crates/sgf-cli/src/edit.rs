use std::{fs::read, path::PathBuf};

use clap::{Parser, ValueHint};
use miette::{IntoDiagnostic, WrapErr};
use sgf::Accessor;
use tracing::{debug, info};

#[derive(Debug, Clone, Parser)]
pub struct EditArgs {
	/// Asset file.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub input: PathBuf,

	/// New image width.
	#[arg(long)]
	pub width: Option<u16>,

	/// New image height.
	#[arg(long)]
	pub height: Option<u16>,

	/// New registration point X axis.
	#[arg(long)]
	pub reg_x: Option<u16>,

	/// New registration point Y axis.
	#[arg(long)]
	pub reg_y: Option<u16>,

	/// Replace the script with this text.
	#[arg(long, conflicts_with_all = ["script_file", "clear_script"])]
	pub script: Option<String>,

	/// Replace the script with the contents of a file.
	#[arg(
		long,
		conflicts_with = "clear_script",
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub script_file: Option<PathBuf>,

	/// Remove the script.
	#[arg(long)]
	pub clear_script: bool,
}

pub(crate) fn edit(args: EditArgs) -> miette::Result<()> {
	info!(path=?args.input, "open asset");
	let mut asset = Accessor::open(&args.input)?;

	if let Some(width) = args.width {
		asset.set_width(width);
	}
	if let Some(height) = args.height {
		asset.set_height(height);
	}
	if let Some(x) = args.reg_x {
		asset.set_reg_axis_x(x);
	}
	if let Some(y) = args.reg_y {
		asset.set_reg_axis_y(y);
	}

	if let Some(script) = args.script {
		asset.set_scripts(script)?;
	} else if let Some(path) = &args.script_file {
		let script = read(path)
			.into_diagnostic()
			.wrap_err_with(|| format!("reading script from {}", path.display()))?;
		asset.set_scripts(script)?;
	} else if args.clear_script {
		asset.set_scripts(Vec::new())?;
	}

	debug!(snapshot=?asset.snapshot(), "edited fields");

	info!("write asset back");
	asset.persist()?;
	println!(
		"wrote {} ({} bytes of trailer)",
		args.input.display(),
		asset.data_length()
	);

	Ok(())
}
