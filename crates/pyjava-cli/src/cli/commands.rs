//! Command builder for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI.
///
/// There are no subcommands: every invocation transpiles. `-c`/`-o` are
/// single-valued, so clap rejects them when given twice.
pub fn build_cli() -> Command {
    Command::new("pyjava")
        .about("Transpile PyJava (brace-delimited Python) to canonical Python")
        .override_usage("pyjava [OPTIONS] [--] [INPUTS]...")
        .after_help(
            r#"EXAMPLES:
  pyjava                              # uses ./pyjavaconfig.json, or prints this help
  pyjava src/                         # every .pyj file under src/, written to ./
  pyjava -o build 'src/**.pyj'        # glob input, output mirrors the tree in build/
  pyjava -c ci.json main.pyj          # explicit config"#,
        )
        .arg(config_arg())
        .arg(output_dir_arg())
        .arg(color_arg())
        .arg(verbose_arg())
        .arg(inputs_arg())
}
