use std::fmt;

/// A resolved type-level value: the normal form the carried oracle renders.
///
/// Generalizes the teacher's value-typing `Type` (null/boolean/number/string/object/function)
/// into the type-level domain this tool actually evaluates: literal types, unions, tuples and
/// object type literals, the shapes `Main`'s declarations are built from.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Type {
    Null,
    Undefined,
    Void,
    Boolean,
    Number,
    String,
    BigInt,
    Symbol,
    Never,
    Any,
    Unknown,
    /// The `object` keyword type, distinct from a concrete `Object` type literal.
    AnyObject,
    Object(Vec<ObjectProperty>),
    Tuple(Vec<Type>),
    Array(Box<Type>),
    Union(Vec<Type>),
    Literal(LiteralProperty),
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ObjectProperty {
    pub name: String,
    pub ty: Type,
}

/// A singleton literal type together with the primitive it narrows (mirrors the teacher's
/// `SingletonProperty`), so `is_subtype` can still tell `"Joe"` apart from `string`.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct LiteralProperty {
    pub base: Box<Type>,
    pub value: LiteralValue,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum LiteralValue {
    Boolean(bool),
    // Kept as the literal's source text so distinct numeric literals never collapse via float
    // equality quirks, and so rendering reproduces exactly what the declaration wrote.
    Number(String),
    String(String),
}

impl Type {
    pub fn literal_string(value: impl Into<String>) -> Type {
        Type::Literal(LiteralProperty {
            base: Box::new(Type::String),
            value: LiteralValue::String(value.into()),
        })
    }

    pub fn literal_number(value: impl Into<String>) -> Type {
        Type::Literal(LiteralProperty {
            base: Box::new(Type::Number),
            value: LiteralValue::Number(value.into()),
        })
    }

    pub fn literal_boolean(value: bool) -> Type {
        Type::Literal(LiteralProperty {
            base: Box::new(Type::Boolean),
            value: LiteralValue::Boolean(value),
        })
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Type::Union(_))
    }

    /// Renders with TypeScript's display convention: literal types quoted/bare by kind, unions
    /// joined by ` | `, tuples bracketed. Never truncates (matches the "NoTruncation" oracle
    /// formatting flag required by the resolver).
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Null => write!(f, "null"),
            Type::Undefined => write!(f, "undefined"),
            Type::Void => write!(f, "void"),
            Type::Boolean => write!(f, "boolean"),
            Type::Number => write!(f, "number"),
            Type::String => write!(f, "string"),
            Type::BigInt => write!(f, "bigint"),
            Type::Symbol => write!(f, "symbol"),
            Type::Never => write!(f, "never"),
            Type::Any => write!(f, "any"),
            Type::Unknown => write!(f, "unknown"),
            Type::AnyObject => write!(f, "object"),
            Type::Object(properties) => {
                if properties.is_empty() {
                    return write!(f, "{{}}");
                }
                let props: Vec<String> = properties
                    .iter()
                    .map(|p| format!("{}: {}", p.name, p.ty))
                    .collect();
                write!(f, "{{ {} }}", props.join("; "))
            }
            Type::Tuple(elements) => {
                let elements: Vec<String> = elements.iter().map(|t| t.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Type::Array(elem) => {
                if elem.is_union() {
                    write!(f, "({})[]", elem)
                } else {
                    write!(f, "{}[]", elem)
                }
            }
            Type::Union(types) => {
                let rendered: Vec<String> = types.iter().map(|t| t.to_string()).collect();
                write!(f, "{}", rendered.join(" | "))
            }
            Type::Literal(LiteralProperty { value, .. }) => match value {
                LiteralValue::Boolean(value) => write!(f, "{value}"),
                LiteralValue::Number(value) => write!(f, "{value}"),
                LiteralValue::String(value) => write!(f, "\"{}\"", escape_string_literal(value)),
            },
        }
    }
}

fn escape_string_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Structural subtyping, used only to collapse redundant union members (e.g. `"foo" | string`
/// collapses to `string`). Not a general assignability check — the oracle never enforces
/// generic constraints, matching the teacher's permissive, non-erroring style.
pub fn is_subtype(a: &Type, b: &Type) -> bool {
    if a == b {
        return true;
    }
    match (a, b) {
        (Type::Never, _) => true,
        (_, Type::Unknown) | (_, Type::Any) => true,
        (Type::Literal(LiteralProperty { base, .. }), b) => is_subtype(base, b),
        (Type::Union(xs), b) => xs.iter().all(|x| is_subtype(x, b)),
        (a, b @ Type::Object(_)) => is_subtype_object(a, b),
        (Type::Tuple(a_elems), Type::Tuple(b_elems)) => {
            a_elems.len() == b_elems.len()
                && a_elems
                    .iter()
                    .zip(b_elems.iter())
                    .all(|(a, b)| is_subtype(a, b))
        }
        _ => false,
    }
}

fn is_subtype_object(a: &Type, b: &Type) -> bool {
    if let (Type::Object(a_props), Type::Object(b_props)) = (a, b) {
        b_props.iter().all(|b_prop| {
            a_props
                .iter()
                .find(|p| p.name == b_prop.name)
                .is_some_and(|a_prop| is_subtype(&a_prop.ty, &b_prop.ty))
        })
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_literal_types() {
        assert_eq!(Type::literal_string("Joe").to_string(), "\"Joe\"");
        assert_eq!(Type::literal_number("7").to_string(), "7");
        assert_eq!(Type::literal_boolean(true).to_string(), "true");
    }

    #[test]
    fn renders_union_in_declared_order() {
        let union = Type::Union(vec![
            Type::literal_number("1"),
            Type::literal_number("2"),
            Type::literal_number("3"),
        ]);
        assert_eq!(union.to_string(), "1 | 2 | 3");
    }

    #[test]
    fn renders_tuple_and_object() {
        let tuple = Type::Tuple(vec![Type::String, Type::Number]);
        assert_eq!(tuple.to_string(), "[string, number]");

        let object = Type::Object(vec![ObjectProperty {
            name: "n".to_string(),
            ty: Type::Number,
        }]);
        assert_eq!(object.to_string(), "{ n: number }");
    }

    #[test]
    fn literal_is_subtype_of_its_base() {
        assert!(is_subtype(&Type::literal_string("Joe"), &Type::String));
        assert!(!is_subtype(&Type::String, &Type::literal_string("Joe")));
        assert!(is_subtype(&Type::Never, &Type::Number));
    }

    #[test]
    fn escapes_quotes_and_backslashes_in_rendered_literals() {
        assert_eq!(
            Type::literal_string("a\"b\\c").to_string(),
            "\"a\\\"b\\\\c\""
        );
    }
}
