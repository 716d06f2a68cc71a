use crate::alias::AliasTable;
use crate::scope::Scope;
use crate::types::{LiteralProperty, LiteralValue, ObjectProperty, Type};
use crate::union;
use swc_ecma_ast::{
    Expr, Lit, TsEntityName, TsIndexedAccessType, TsKeywordTypeKind, TsLit, TsTplLitType,
    TsTupleType, TsType, TsTypeElement, TsTypeLit, TsTypeRef, TsUnionOrIntersectionType,
};

/// A type construct this tool's carried oracle cannot resolve, or a name it cannot find.
/// Replaces the teacher's `unimplemented!()`/`panic!()` style: this is a library function
/// called from a CLI that must exit cleanly with a message, not a REPL that can afford to die
/// on the next prompt.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Unbound type: {0}")]
    Unbound(String),
    #[error("{0}")]
    Unsupported(String),
    #[error("{0}")]
    Invalid(String),
}

/// Resolves a type-level AST node to its normal form.
///
/// Generalizes the teacher's `synth: Env, &Expr -> Type` judgment: same shape (structural
/// recursion threaded through an environment, bottoming out at literals and primitives), new
/// domain (`TsType` nodes from a declaration file instead of `Expr` nodes from a REPL line).
pub fn resolve(aliases: &AliasTable, scope: &Scope, ty: &TsType) -> Result<Type, ResolveError> {
    match ty {
        TsType::TsKeywordType(keyword) => Ok(resolve_keyword(keyword.kind)),
        TsType::TsLitType(lit) => resolve_lit(aliases, scope, &lit.lit),
        TsType::TsTypeRef(type_ref) => resolve_type_ref(aliases, scope, type_ref),
        TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsUnionType(u)) => {
            let members = u
                .types
                .iter()
                .map(|t| resolve(aliases, scope, t))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(union::union(members))
        }
        TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsIntersectionType(_)) => {
            Err(ResolveError::Unsupported("intersection types are not supported".into()))
        }
        TsType::TsTupleType(tuple) => resolve_tuple(aliases, scope, tuple),
        TsType::TsArrayType(array) => {
            Ok(Type::Array(Box::new(resolve(aliases, scope, &array.elem_type)?)))
        }
        TsType::TsParenthesizedType(paren) => resolve(aliases, scope, &paren.type_ann),
        TsType::TsIndexedAccessType(indexed) => resolve_indexed_access(aliases, scope, indexed),
        TsType::TsTypeLit(lit) => resolve_type_lit(aliases, scope, lit),
        other => Err(ResolveError::Unsupported(format!(
            "unsupported type construct: {:?}",
            other
        ))),
    }
}

fn resolve_keyword(kind: TsKeywordTypeKind) -> Type {
    match kind {
        TsKeywordTypeKind::TsAnyKeyword => Type::Any,
        TsKeywordTypeKind::TsUnknownKeyword => Type::Unknown,
        TsKeywordTypeKind::TsNumberKeyword => Type::Number,
        TsKeywordTypeKind::TsObjectKeyword => Type::AnyObject,
        TsKeywordTypeKind::TsBooleanKeyword => Type::Boolean,
        TsKeywordTypeKind::TsBigIntKeyword => Type::BigInt,
        TsKeywordTypeKind::TsStringKeyword => Type::String,
        TsKeywordTypeKind::TsSymbolKeyword => Type::Symbol,
        TsKeywordTypeKind::TsVoidKeyword => Type::Void,
        TsKeywordTypeKind::TsUndefinedKeyword => Type::Undefined,
        TsKeywordTypeKind::TsNullKeyword => Type::Null,
        TsKeywordTypeKind::TsNeverKeyword => Type::Never,
        TsKeywordTypeKind::TsIntrinsicKeyword => Type::Unknown,
    }
}

fn resolve_lit(aliases: &AliasTable, scope: &Scope, lit: &TsLit) -> Result<Type, ResolveError> {
    match lit {
        TsLit::Str(s) => Ok(Type::literal_string(s.value.to_string())),
        TsLit::Number(n) => Ok(Type::literal_number(number_text(n))),
        TsLit::Bool(b) => Ok(Type::literal_boolean(b.value)),
        TsLit::BigInt(_) => Err(ResolveError::Unsupported("bigint literal types are not supported".into())),
        TsLit::Tpl(tpl) => resolve_template(aliases, scope, tpl),
    }
}

fn number_text(n: &swc_ecma_ast::Number) -> String {
    n.raw.as_ref().map(|raw| raw.to_string()).unwrap_or_else(|| {
        if n.value == n.value.trunc() {
            format!("{}", n.value as i64)
        } else {
            n.value.to_string()
        }
    })
}

fn resolve_type_ref(
    aliases: &AliasTable,
    scope: &Scope,
    type_ref: &TsTypeRef,
) -> Result<Type, ResolveError> {
    let name = match &type_ref.type_name {
        TsEntityName::Ident(ident) => ident.sym.to_string(),
        TsEntityName::TsQualifiedName(_) => {
            return Err(ResolveError::Unsupported("qualified type names are not supported".into()))
        }
    };

    // A bare reference (no type arguments) may be a type parameter bound in the current scope,
    // which always wins over a same-named top-level alias (lexical shadowing).
    if type_ref.type_params.is_none() {
        if let Some(bound) = scope.get(&name) {
            return Ok(bound.clone());
        }
    }

    let alias = aliases
        .get(&name)
        .ok_or_else(|| ResolveError::Unbound(name.clone()))?;

    let provided_args: &[Box<TsType>] = type_ref
        .type_params
        .as_ref()
        .map(|params| params.params.as_slice())
        .unwrap_or(&[]);

    let mut callee_scope = Scope::new();
    for (index, param_name) in alias.params.iter().enumerate() {
        let bound = match provided_args.get(index) {
            // Type arguments are evaluated in the *caller's* scope, before entering the alias.
            Some(arg) => resolve(aliases, scope, arg)?,
            None => Type::Any,
        };
        callee_scope = callee_scope.with(param_name, bound);
    }

    resolve(aliases, &callee_scope, &alias.body)
}

fn resolve_tuple(aliases: &AliasTable, scope: &Scope, tuple: &TsTupleType) -> Result<Type, ResolveError> {
    let mut elements = Vec::with_capacity(tuple.elem_types.len());
    for elem in &tuple.elem_types {
        let resolved = match &*elem.ty {
            TsType::TsRestType(_) => {
                return Err(ResolveError::Unsupported("rest elements in tuple types are not supported".into()))
            }
            TsType::TsOptionalType(optional) => resolve(aliases, scope, &optional.type_ann)?,
            other => resolve(aliases, scope, other)?,
        };
        elements.push(resolved);
    }
    Ok(Type::Tuple(elements))
}

fn resolve_indexed_access(
    aliases: &AliasTable,
    scope: &Scope,
    indexed: &TsIndexedAccessType,
) -> Result<Type, ResolveError> {
    let object = resolve(aliases, scope, &indexed.obj_type)?;
    let index = resolve(aliases, scope, &indexed.index_type)?;

    match (&object, &index) {
        (
            Type::Tuple(elements),
            Type::Literal(LiteralProperty {
                value: LiteralValue::Number(n),
                ..
            }),
        ) => {
            let position: usize = n
                .parse()
                .map_err(|_| ResolveError::Unsupported(format!("non-integer tuple index `{n}`")))?;
            elements
                .get(position)
                .cloned()
                .ok_or_else(|| ResolveError::Invalid(format!("tuple index {position} is out of bounds")))
        }
        (
            Type::Object(properties),
            Type::Literal(LiteralProperty {
                value: LiteralValue::String(key),
                ..
            }),
        ) => properties
            .iter()
            .find(|property| &property.name == key)
            .map(|property| property.ty.clone())
            .ok_or_else(|| ResolveError::Invalid(format!("property `{key}` does not exist on type"))),
        _ => Err(ResolveError::Unsupported(
            "indexed access is only supported on tuple types by numeric literal index, or object type literals by string literal key".into(),
        )),
    }
}

fn resolve_type_lit(aliases: &AliasTable, scope: &Scope, lit: &TsTypeLit) -> Result<Type, ResolveError> {
    let mut properties = Vec::with_capacity(lit.members.len());
    for member in &lit.members {
        match member {
            TsTypeElement::TsPropertySignature(prop) => {
                let name = property_key_name(&prop.key)?;
                let ty = match &prop.type_ann {
                    Some(annotation) => resolve(aliases, scope, &annotation.type_ann)?,
                    None => Type::Any,
                };
                properties.push(ObjectProperty { name, ty });
            }
            _ => {
                return Err(ResolveError::Unsupported(
                    "only plain property signatures are supported in object type literals".into(),
                ))
            }
        }
    }
    Ok(Type::Object(properties))
}

fn property_key_name(key: &Expr) -> Result<String, ResolveError> {
    match key {
        Expr::Ident(ident) => Ok(ident.sym.to_string()),
        Expr::Lit(Lit::Str(s)) => Ok(s.value.to_string()),
        _ => Err(ResolveError::Unsupported(
            "computed property keys in object type literals are not supported".into(),
        )),
    }
}

/// Distributes a template literal's placeholders over every union arm (`${1 | 2}x` fans out to
/// `"1x" | "2x"`) by reusing the teacher-adapted `union::distribute_union` cartesian product
/// instead of re-deriving it here.
fn resolve_template(
    aliases: &AliasTable,
    scope: &Scope,
    tpl: &TsTplLitType,
) -> Result<Type, ResolveError> {
    let placeholders = tpl
        .types
        .iter()
        .map(|placeholder| resolve(aliases, scope, placeholder))
        .collect::<Result<Vec<_>, _>>()?;

    let quasis: Vec<String> = tpl.quasis.iter().map(|q| q.raw.to_string()).collect();

    let results = union::distribute_union(placeholders)
        .into_iter()
        .map(|combination| {
            let mut rendered = String::new();
            for (index, text) in quasis.iter().enumerate() {
                rendered.push_str(text);
                if let Some(value) = combination.get(index) {
                    rendered.push_str(&template_literal_text(value)?);
                }
            }
            Ok(Type::literal_string(rendered))
        })
        .collect::<Result<Vec<_>, ResolveError>>()?;

    Ok(union::union(results))
}

/// The string form a single (non-union — already distributed by the caller) type takes when
/// substituted into a template literal type position. A bare, non-literal primitive cannot be
/// stringified exactly, so it is reported as unsupported rather than guessed at.
fn template_literal_text(ty: &Type) -> Result<String, ResolveError> {
    match ty {
        Type::Literal(LiteralProperty { value, .. }) => Ok(literal_text(value)),
        Type::Null => Ok("null".to_string()),
        Type::Undefined => Ok("undefined".to_string()),
        other => Err(ResolveError::Unsupported(format!(
            "cannot substitute non-literal type `{other}` into a template literal type"
        ))),
    }
}

fn literal_text(value: &LiteralValue) -> String {
    match value {
        LiteralValue::String(value) => value.clone(),
        LiteralValue::Number(value) => value.clone(),
        LiteralValue::Boolean(value) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_module;
    use pretty_assertions::assert_eq;

    fn resolve_expression(source: &str, expression: &str) -> Result<Type, ResolveError> {
        let module_source = format!("{source}\ntype __probe = {expression};");
        let module = parse_module(&module_source, "input.ts").unwrap();
        let aliases = AliasTable::from_module(&module);
        let probe = crate::alias::find_type_alias(&module, "__probe").unwrap();
        resolve(&aliases, &Scope::new(), probe)
    }

    #[test]
    fn resolves_primitive_keywords() {
        assert_eq!(resolve_expression("", "string").unwrap(), Type::String);
        assert_eq!(resolve_expression("", "number").unwrap(), Type::Number);
    }

    #[test]
    fn resolves_union_of_numeric_literals() {
        let ty = resolve_expression("", "1 | 2 | 3").unwrap();
        assert_eq!(ty.to_string(), "1 | 2 | 3");
    }

    #[test]
    fn resolves_generic_alias_instantiation() {
        let ty = resolve_expression("type Wrap<T> = [T];", "Wrap<string>").unwrap();
        assert_eq!(ty, Type::Tuple(vec![Type::String]));
    }

    #[test]
    fn resolves_template_literal_substitution() {
        let ty = resolve_expression(
            "type Main<Args extends [string]> = `Hello, ${Args[0]}!`;",
            "Main<[\"Joe\"]>",
        )
        .unwrap();
        assert_eq!(ty.to_string(), "\"Hello, Joe!\"");
    }

    #[test]
    fn resolves_template_literal_distributing_over_a_union() {
        let ty = resolve_expression("", "`${1 | 2}x`").unwrap();
        assert_eq!(ty.to_string(), "\"1x\" | \"2x\"");
    }

    #[test]
    fn unbound_identifier_is_a_resolution_error() {
        let err = resolve_expression("", "Main").unwrap_err();
        assert!(matches!(err, ResolveError::Unbound(name) if name == "Main"));
    }

    #[test]
    fn tuple_index_out_of_bounds_is_reported() {
        let err = resolve_expression("", "[string][1]").unwrap_err();
        assert!(matches!(err, ResolveError::Invalid(_)));
    }
}
