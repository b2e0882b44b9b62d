//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but are populated from clap;
//! `Into<*Args>` impls bridge dispatch to the command handlers.

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::check::CheckArgs;
use crate::commands::config::{ConfigArgs, Descriptors};
use crate::commands::dump::DumpArgs;
use crate::commands::infer::InferArgs;
use crate::commands::loader::TreeInput;
use crate::commands::paths::PathsArgs;
use crate::commands::validate::ValidateArgs;

/// Count of `-v` flags. Global, so it may appear before or after the
/// subcommand.
pub fn verbosity(m: &ArgMatches) -> u8 {
    let own = m.get_count("verbose");
    let sub = m
        .subcommand()
        .map(|(_, sub)| sub.get_count("verbose"))
        .unwrap_or(0);
    own.max(sub)
}

/// Model, overrides and label style shared by every command.
pub struct InputParams {
    pub model_path: PathBuf,
    pub overrides: Option<PathBuf>,
    pub raw_labels: bool,
}

impl InputParams {
    fn from_matches(m: &ArgMatches) -> Self {
        Self {
            model_path: m
                .get_one::<PathBuf>("model_path")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("-")),
            overrides: m.get_one::<PathBuf>("overrides").cloned(),
            raw_labels: flag(m, "raw_labels"),
        }
    }
}

impl From<InputParams> for TreeInput {
    fn from(p: InputParams) -> Self {
        Self {
            model_path: p.model_path,
            overrides: p.overrides,
            humanize_labels: !p.raw_labels,
        }
    }
}

pub struct InferParams {
    pub input: InputParams,
    pub compact: bool,
}

impl InferParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            compact: m.get_flag("compact"),
        }
    }
}

impl From<InferParams> for InferArgs {
    fn from(p: InferParams) -> Self {
        Self {
            input: p.input.into(),
            compact: p.compact,
        }
    }
}

pub struct DumpParams {
    pub input: InputParams,
    pub paths: bool,
    pub ids: bool,
    pub no_labels: bool,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            paths: m.get_flag("paths"),
            ids: m.get_flag("ids"),
            no_labels: m.get_flag("no_labels"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            input: p.input.into(),
            paths: p.paths,
            ids: p.ids,
            labels: !p.no_labels,
        }
    }
}

pub struct PathsParams {
    pub input: InputParams,
    pub key_path: String,
}

impl PathsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            key_path: m.get_one::<String>("key_path").cloned().unwrap_or_default(),
        }
    }
}

impl From<PathsParams> for PathsArgs {
    fn from(p: PathsParams) -> Self {
        Self {
            input: p.input.into(),
            key_path: p.key_path,
        }
    }
}

pub struct ConfigParams {
    pub input: InputParams,
    pub sort: bool,
    pub filter: bool,
    pub compact: bool,
}

impl ConfigParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            sort: m.get_flag("sort"),
            filter: m.get_flag("filter"),
            compact: m.get_flag("compact"),
        }
    }
}

impl From<ConfigParams> for ConfigArgs {
    fn from(p: ConfigParams) -> Self {
        let descriptors = match (p.sort, p.filter) {
            (true, _) => Descriptors::Sorts,
            (_, true) => Descriptors::Filters,
            _ => Descriptors::Both,
        };
        Self {
            input: p.input.into(),
            descriptors,
            compact: p.compact,
        }
    }
}

pub struct ValidateParams {
    pub input: InputParams,
    pub value_path: PathBuf,
}

impl ValidateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            value_path: m
                .get_one::<PathBuf>("value_path")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("-")),
        }
    }
}

impl From<ValidateParams> for ValidateArgs {
    fn from(p: ValidateParams) -> Self {
        Self {
            input: p.input.into(),
            value_path: p.value_path,
        }
    }
}

pub struct CheckParams {
    pub input: InputParams,
    pub tree: Option<PathBuf>,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            tree: m.get_one::<PathBuf>("tree").cloned(),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: p.input.into(),
            tree: p.tree,
        }
    }
}

/// A flag that only some commands define.
fn flag(m: &ArgMatches, id: &str) -> bool {
    m.try_get_one::<bool>(id).ok().flatten().copied().unwrap_or(false)
}
