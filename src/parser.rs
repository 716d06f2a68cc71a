use swc_common::{sync::Lrc, FileName, SourceMap};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax, TsSyntax};

/// A source file failed to parse as TypeScript. Carries swc's diagnostic rendering verbatim.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ParseError(pub String);

/// Parses a whole compilation unit into its top-level module items.
///
/// Adapted from the teacher's `parse_expression`, which parsed a single REPL expression. This
/// tool needs the declarations surrounding the synthetic one (the user's type aliases `Main`
/// refers to), so it parses the full module instead of a lone expression.
pub fn parse_module(content: &str, file_name: &str) -> Result<Module, ParseError> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        Lrc::new(FileName::Custom(file_name.to_string())),
        content.to_string(),
    );

    let lexer = Lexer::new(
        Syntax::Typescript(TsSyntax {
            tsx: false,
            decorators: false,
            disallow_ambiguous_jsx_like: true,
            dts: file_name.ends_with(".d.ts"),
            no_early_errors: false,
        }),
        EsVersion::Es2020,
        StringInput::from(&*fm),
        None,
    );

    let mut parser = Parser::new_from(lexer);
    parser
        .parse_module()
        .map_err(|err| ParseError(format!("{:?}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_type_alias_declaration() {
        let module = parse_module("export type Main = 1 | 2 | 3;", "input.ts").unwrap();
        assert_eq!(module.body.len(), 1);
    }

    #[test]
    fn reports_parse_errors_instead_of_panicking() {
        let result = parse_module("type Main = ;;; garbage ===", "input.ts");
        assert!(result.is_err());
    }
}
