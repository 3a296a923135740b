//! One lexical scope: a mapping per name category, chained to an
//! optional parent. Pushed on entering a `Let` and on entering a
//! `FunctionDeclaration` body; nothing else creates one.
use std::collections::HashMap;

use crate::ast::{FunctionDeclaration, TypeDeclaration};

use super::table::StorageLocation;

pub(super) type ScopeId = usize;

#[derive(Default)]
pub(super) struct Scope<'ast> {
    pub(super) parent: Option<ScopeId>,
    pub(super) functions: HashMap<String, &'ast FunctionDeclaration>,
    pub(super) storage: HashMap<String, StorageLocation<'ast>>,
    pub(super) types: HashMap<String, &'ast TypeDeclaration>,
}

impl<'ast> Scope<'ast> {
    pub(super) fn with_parent(parent: ScopeId) -> Self {
        Self {
            parent: Some(parent),
            ..Default::default()
        }
    }
}
