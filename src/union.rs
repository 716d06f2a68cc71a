use crate::types::{is_subtype, Type};

/// Drops any member already covered by another member (e.g. `"foo"` next to `string`).
/// Adapted verbatim in shape from the teacher's `collapse_subtypes`; only `Type`'s domain
/// changed, from value types to resolved type-level types.
pub fn collapse_subtypes(types: Vec<Type>) -> Vec<Type> {
    types
        .iter()
        .enumerate()
        .filter(|&(i1, t1)| {
            types
                .iter()
                .enumerate()
                .all(|(i2, t2)| i1 == i2 || !is_subtype(t1, t2) || (is_subtype(t2, t1) && i1 < i2))
        })
        .map(|(_, t)| t.clone())
        .collect()
}

pub fn flatten(types: Vec<Type>) -> Vec<Type> {
    types
        .into_iter()
        .flat_map(|t| match t {
            Type::Union(ts) => ts,
            _ => vec![t],
        })
        .collect()
}

/// Normal form of a union: flattens nested unions, drops redundant members, and collapses to
/// `Never`/the sole member when the result has fewer than two distinct members.
pub fn union(types: Vec<Type>) -> Type {
    let types = collapse_subtypes(flatten(types));
    if types.is_empty() {
        Type::Never
    } else if types.len() == 1 {
        types[0].clone()
    } else {
        Type::Union(types)
    }
}

/// Cartesian-expands a sequence of types where some entries are themselves unions, producing
/// every combination — the building block template literal type substitution needs to
/// distribute `${A | B}` across each arm.
pub fn distribute_union(types: Vec<Type>) -> Vec<Vec<Type>> {
    types.into_iter().fold(vec![vec![]], |acc, t| {
        acc.into_iter()
            .flat_map(|current_combination| match &t {
                Type::Union(union_types) => union_types
                    .iter()
                    .map(|arm| {
                        let mut expanded = current_combination.clone();
                        expanded.push(arm.clone());
                        expanded
                    })
                    .collect::<Vec<_>>(),
                _ => {
                    let mut expanded = current_combination.clone();
                    expanded.push(t.clone());
                    vec![expanded]
                }
            })
            .collect()
    })
}
