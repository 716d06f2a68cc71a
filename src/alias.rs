use std::collections::HashMap;
use swc_ecma_ast::{Decl, ModuleDecl, ModuleItem, Stmt, TsType};

/// One `type Name<Params...> = Body` declaration found at the top level of a parsed unit.
#[derive(Clone, Debug)]
pub struct TypeAlias {
    pub params: Vec<String>,
    pub body: TsType,
}

/// The set of type aliases visible to `resolve`, built once per invocation from the spliced
/// module (the user's declarations plus the synthetic one). Never mutated after construction —
/// generic instantiation binds parameters in a fresh `Scope`, not by touching this table.
#[derive(Default)]
pub struct AliasTable {
    aliases: HashMap<String, TypeAlias>,
}

impl AliasTable {
    pub fn from_module(module: &swc_ecma_ast::Module) -> Self {
        let mut aliases = HashMap::new();
        for item in &module.body {
            if let Some(decl) = ts_type_alias_decl(item) {
                aliases.insert(
                    decl.id.sym.to_string(),
                    TypeAlias {
                        params: decl
                            .type_params
                            .as_ref()
                            .map(|params| {
                                params
                                    .params
                                    .iter()
                                    .map(|p| p.name.sym.to_string())
                                    .collect()
                            })
                            .unwrap_or_default(),
                        body: (*decl.type_ann).clone(),
                    },
                );
            }
        }
        AliasTable { aliases }
    }

    pub fn get(&self, name: &str) -> Option<&TypeAlias> {
        self.aliases.get(name)
    }
}

/// Finds the synthetic declaration's right-hand side by its reserved name. Distinct from
/// `AliasTable::get` because the resolver needs this before an `AliasTable` even exists — it is
/// the seed the rest of resolution starts from (step 7 of the splice-and-extract protocol).
pub fn find_type_alias<'a>(module: &'a swc_ecma_ast::Module, name: &str) -> Option<&'a TsType> {
    module
        .body
        .iter()
        .find_map(|item| ts_type_alias_decl(item).filter(|decl| decl.id.sym.as_ref() == name))
        .map(|decl| &*decl.type_ann)
}

fn ts_type_alias_decl(item: &ModuleItem) -> Option<&swc_ecma_ast::TsTypeAliasDecl> {
    match item {
        ModuleItem::Stmt(Stmt::Decl(Decl::TsTypeAlias(decl))) => Some(decl),
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => match &export.decl {
            Decl::TsTypeAlias(decl) => Some(decl),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_module;

    #[test]
    fn finds_exported_and_local_aliases() {
        let module = parse_module(
            "export type Main<T> = T;\ntype Helper = string;",
            "input.ts",
        )
        .unwrap();
        let table = AliasTable::from_module(&module);
        assert!(table.get("Main").is_some());
        assert!(table.get("Helper").is_some());
        assert_eq!(table.get("Main").unwrap().params, vec!["T".to_string()]);
    }

    #[test]
    fn find_type_alias_locates_the_synthetic_declaration() {
        let module = parse_module("type __tseval_result_type = Main;", "input.ts").unwrap();
        assert!(find_type_alias(&module, "__tseval_result_type").is_some());
        assert!(find_type_alias(&module, "does_not_exist").is_none());
    }
}
