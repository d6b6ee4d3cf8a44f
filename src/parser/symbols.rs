//! Symbol table and import list
//!
//! The table is a write-only accumulator. Scopes are flat: the root scope
//! [`GLOBAL_SCOPE`] always exists, and a function's scope is created the first
//! time something is recorded in it. Nothing is ever removed.

use super::ast::{Expr, Pos};
use serde::Serialize;
use std::collections::BTreeMap;

/// Name of the root scope
pub const GLOBAL_SCOPE: &str = "-Global-";

/// Type recorded for declarations that carry no explicit type
pub const AUTO_TYPE: &str = "auto";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    pub pos: Pos,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scope {
    pub constants: BTreeMap<String, VariableEntry>,
    pub variables: BTreeMap<String, VariableEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructType {
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolTable {
    pub scopes: BTreeMap<String, Scope>,
    pub types: BTreeMap<String, StructType>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut scopes = BTreeMap::new();
        scopes.insert(GLOBAL_SCOPE.to_string(), Scope::default());
        Self {
            scopes,
            types: BTreeMap::new(),
        }
    }

    /// Record `name` in `scope`, replacing any earlier entry with that name.
    pub fn declare_variable(&mut self, scope: &str, name: &str, entry: VariableEntry) {
        self.scopes
            .entry(scope.to_string())
            .or_default()
            .variables
            .insert(name.to_string(), entry);
    }

    pub fn declare_field(&mut self, struct_name: &str, field: &str, type_name: &str) {
        self.types
            .entry(struct_name.to_string())
            .or_default()
            .fields
            .insert(field.to_string(), type_name.to_string());
    }

    pub fn is_struct_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn scope(&self, name: &str) -> Option<&Scope> {
        self.scopes.get(name)
    }

    pub fn variable(&self, scope: &str, name: &str) -> Option<&VariableEntry> {
        self.scopes.get(scope)?.variables.get(name)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRef {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Pos")]
    pub pos: Pos,
}

/// One imported package path, quotes stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportEntry {
    #[serde(rename = "Package")]
    pub package: PackageRef,
}

impl ImportEntry {
    pub fn new(name: impl Into<String>, pos: Pos) -> Self {
        Self {
            package: PackageRef {
                name: name.into(),
                pos,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.package.name
    }
}
