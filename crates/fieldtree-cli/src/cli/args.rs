//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that commands compose.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Model file (positional).
pub fn model_path_arg() -> Arg {
    Arg::new("model_path")
        .value_name("MODEL")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Model JSON file, or .bin for the binary encoding (use \"-\" for stdin)")
}

/// Field overrides file (--overrides).
pub fn overrides_arg() -> Arg {
    Arg::new("overrides")
        .long("overrides")
        .short('o')
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Overrides as [[keyPath, field], ...]")
}

/// Key path (positional).
pub fn key_path_arg() -> Arg {
    Arg::new("key_path")
        .value_name("KEYPATH")
        .required(true)
        .help("Dotted key path, e.g. address.city (empty for the root)")
}

/// Raw value file (positional).
pub fn value_path_arg() -> Arg {
    Arg::new("value_path")
        .value_name("VALUE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Raw value JSON file (use \"-\" for stdin)")
}

/// Serialized tree file (--tree).
pub fn tree_arg() -> Arg {
    Arg::new("tree")
        .long("tree")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Check a serialized field tree instead of inferring one")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON")
}

/// Show value paths in dumps (--paths).
pub fn paths_arg() -> Arg {
    Arg::new("paths")
        .long("paths")
        .action(ArgAction::SetTrue)
        .help("Show the value path of every keyed field")
}

/// Show field ids in dumps (--ids).
pub fn ids_arg() -> Arg {
    Arg::new("ids")
        .long("ids")
        .action(ArgAction::SetTrue)
        .help("Show field ids and recursion targets")
}

/// Hide labels in dumps (--no-labels).
pub fn no_labels_arg() -> Arg {
    Arg::new("no_labels")
        .long("no-labels")
        .action(ArgAction::SetTrue)
        .help("Hide field labels")
}

/// Only sort descriptors (--sort).
pub fn sort_arg() -> Arg {
    Arg::new("sort")
        .long("sort")
        .action(ArgAction::SetTrue)
        .conflicts_with("filter")
        .help("Print sort descriptors only")
}

/// Only filter descriptors (--filter).
pub fn filter_arg() -> Arg {
    Arg::new("filter")
        .long("filter")
        .action(ArgAction::SetTrue)
        .help("Print filter descriptors only")
}

/// Keep raw labels (--raw-labels).
pub fn raw_labels_arg() -> Arg {
    Arg::new("raw_labels")
        .long("raw-labels")
        .action(ArgAction::SetTrue)
        .help("Use keys as labels without humanizing them")
}

/// Verbosity (-v, repeatable).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .global(true)
        .help("Verbosity level (-v for debug, -vv for trace)")
}
