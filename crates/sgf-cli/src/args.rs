use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::{edit::EditArgs, show::ShowArgs};

/// Inspect and edit the animation trailer of SGF assets.
#[derive(Debug, Clone, Parser)]
#[command(
	name = "sgf",
	bin_name = "sgf",
	author,
	version,
	after_help = "Want more detail? Try the long '--help' flag!",
	after_long_help = "Didn't expect this much output? Use the short '-h' flag to get short help."
)]
#[cfg_attr(debug_assertions, command(before_help = "⚠ DEBUG BUILD ⚠"))]
pub struct Args {
	/// Set diagnostic log level.
	///
	/// This enables diagnostic logging, which is useful for investigating bugs. Use multiple
	/// times to increase verbosity: -v is warnings, -vv info, -vvv debug, -vvvv trace. The
	/// RUST_LOG environment variable takes precedence.
	#[arg(long, short, action = ArgAction::Count, global = true)]
	pub verbose: u8,

	/// Write diagnostic logs to a file.
	///
	/// Logs are written as JSON. If the path is a directory, a timestamped file is created in it.
	#[arg(
		long,
		global = true,
		value_hint = ValueHint::AnyPath,
		value_name = "PATH",
	)]
	pub log_file: Option<PathBuf>,

	/// What to do.
	#[command(subcommand)]
	pub action: Action,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
	/// Print every field of an asset's trailer.
	Show(ShowArgs),

	/// Change fields of an asset's trailer and write it back.
	Edit(EditArgs),
}
