use clap::Parser;
use std::path::PathBuf;

/// Evaluate type-level expressions from TypeScript declaration files.
#[derive(Parser, Debug)]
#[command(name = "tseval", version, about, long_about = None)]
pub struct Cli {
    /// Declaration file to evaluate `Main` in. Omit when `--eval` is self-contained.
    pub source: Option<PathBuf>,

    /// Positional arguments instantiating `Main`'s tuple type parameter.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Evaluate this literal type expression instead of instantiating `Main`.
    #[arg(short = 'e', long = "eval")]
    pub eval: Option<String>,

    /// Explicit path to a project configuration file (default: search upward for tsconfig.json).
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_and_trailing_instantiation_arguments() {
        let cli = Cli::try_parse_from(["tseval", "./Test.d.ts", "Joe"]).unwrap();
        assert_eq!(cli.source, Some(PathBuf::from("./Test.d.ts")));
        assert_eq!(cli.args, vec!["Joe".to_string()]);
    }

    #[test]
    fn parses_eval_without_a_source_file() {
        let cli = Cli::try_parse_from(["tseval", "-e", "1 | 2 | 3"]).unwrap();
        assert_eq!(cli.source, None);
        assert_eq!(cli.eval, Some("1 | 2 | 3".to_string()));
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["tseval", "--nope"]).is_err());
    }

    #[test]
    fn rejects_option_missing_its_value() {
        assert!(Cli::try_parse_from(["tseval", "--project"]).is_err());
    }
}
