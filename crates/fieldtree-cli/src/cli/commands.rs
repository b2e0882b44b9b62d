//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("fieldtree")
        .about("Inspect field trees inferred from schema models")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(infer_command())
        .subcommand(dump_command())
        .subcommand(paths_command())
        .subcommand(config_command())
        .subcommand(validate_command())
        .subcommand(check_command())
}

/// Print the serialized field tree.
pub fn infer_command() -> Command {
    Command::new("infer")
        .about("Infer a field tree and print its serialized form")
        .after_help(
            r#"EXAMPLES:
  fieldtree infer model.json
  fieldtree infer model.json --overrides overrides.json
  cat model.json | fieldtree infer - --compact"#,
        )
        .arg(model_path_arg())
        .arg(overrides_arg())
        .arg(raw_labels_arg())
        .arg(compact_arg())
}

/// Print the indented tree.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the inferred field tree")
        .after_help(
            r#"EXAMPLES:
  fieldtree dump model.json
  fieldtree dump model.json --paths
  fieldtree dump model.json --ids --no-labels"#,
        )
        .arg(model_path_arg())
        .arg(overrides_arg())
        .arg(raw_labels_arg())
        .arg(paths_arg())
        .arg(ids_arg())
        .arg(no_labels_arg())
}

/// Map a key path to its value path.
pub fn paths_command() -> Command {
    Command::new("paths")
        .about("Print the value path for a key path")
        .after_help(
            r#"EXAMPLES:
  fieldtree paths model.json tags           # $.tags.[]
  fieldtree paths model.json shape.circle   # $.shape.<circle>"#,
        )
        .arg(model_path_arg())
        .arg(key_path_arg())
        .arg(overrides_arg())
}

/// Print sort and filter descriptors.
pub fn config_command() -> Command {
    Command::new("config")
        .about("Print derived sort and filter descriptors as JSON")
        .arg(model_path_arg())
        .arg(overrides_arg())
        .arg(raw_labels_arg())
        .arg(sort_arg())
        .arg(filter_arg())
        .arg(compact_arg())
}

/// Validate a raw value.
pub fn validate_command() -> Command {
    Command::new("validate")
        .about("Transform a raw value and print its validation error codes")
        .after_help(
            r#"EXAMPLES:
  fieldtree validate model.json value.json
  echo '{"name": "x"}' | fieldtree validate model.json -"#,
        )
        .arg(model_path_arg())
        .arg(value_path_arg())
        .arg(overrides_arg())
}

/// Report error fields.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Report positions that could not be built")
        .after_help(
            r#"EXAMPLES:
  fieldtree check model.json
  fieldtree check model.json --tree saved.json"#,
        )
        .arg(model_path_arg())
        .arg(tree_arg())
        .arg(overrides_arg().conflicts_with("tree"))
}
