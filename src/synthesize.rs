/// Reserved name for the synthetic declaration. Never exposed to the user; the source file is
/// expected never to declare a type under this name.
pub const RESERVED_NAME: &str = "__tseval_result_type";

/// Produces the literal text of the one synthetic declaration the resolver will splice onto the
/// compilation unit. Pure function of its inputs — no filesystem, no parsing, no validation of
/// `explicit_expression`'s syntax (a malformed expression surfaces later as a resolution error).
pub fn synthesize(explicit_expression: Option<&str>, positional_args: &[String]) -> String {
    let expression = if let Some(expression) = explicit_expression.filter(|s| !s.is_empty()) {
        expression.to_string()
    } else if !positional_args.is_empty() {
        let literals = positional_args
            .iter()
            .map(|arg| serde_json::to_string(arg).expect("a &str always serializes to JSON"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Main<[{literals}]>")
    } else {
        "Main".to_string()
    };

    format!("type {RESERVED_NAME} = {expression}")
}
