use std::sync::Arc;

use crate::ast::{Param, QueryValue, Statement, Where};

/// One `ORDER BY` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sort {
    pub property: String,
    pub ascending: bool,
}

impl Sort {
    pub fn asc(property: impl Into<String>) -> Self {
        Sort {
            property: property.into(),
            ascending: true,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Sort {
            property: property.into(),
            ascending: false,
        }
    }
}

/// Read intent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectQuery {
    pub entity: String,
    /// Projected fields; empty selects everything
    pub fields: Vec<String>,
    pub condition: Option<Where>,
    pub sorts: Vec<Sort>,
    /// Maximum number of results; 0 is unbounded
    pub limit: u64,
    pub skip: u64,
    /// Counting projection (`count(this)`, `countBy`, `existsBy`)
    pub count: bool,
}

/// Delete intent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DeleteQuery {
    pub entity: String,
    pub fields: Vec<String>,
    pub condition: Option<Where>,
}

/// `field = value` assignment of an UPDATE.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpdateItem {
    pub field: String,
    pub value: QueryValue,
}

/// Update intent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UpdateQuery {
    pub entity: String,
    pub items: Vec<UpdateItem>,
    pub condition: Option<Where>,
}

impl SelectQuery {
    pub fn for_each_param<'a>(&'a self, f: &mut impl FnMut(&'a Param)) {
        if let Some(w) = &self.condition {
            w.condition.for_each_param(f);
        }
    }
}

impl DeleteQuery {
    pub fn for_each_param<'a>(&'a self, f: &mut impl FnMut(&'a Param)) {
        if let Some(w) = &self.condition {
            w.condition.for_each_param(f);
        }
    }
}

impl UpdateQuery {
    pub fn for_each_param<'a>(&'a self, f: &mut impl FnMut(&'a Param)) {
        for item in &self.items {
            item.value.for_each_param(&mut *f);
        }
        if let Some(w) = &self.condition {
            w.condition.for_each_param(f);
        }
    }
}

/// Shared, immutable parse result handed out by the provider cache.
///
/// Cloning only bumps reference counts, so repeated lookups of one key
/// return the same allocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Select(Arc<SelectQuery>),
    Delete(Arc<DeleteQuery>),
    Update(Arc<UpdateQuery>),
}

impl Query {
    pub fn entity(&self) -> &str {
        match self {
            Query::Select(q) => &q.entity,
            Query::Delete(q) => &q.entity,
            Query::Update(q) => &q.entity,
        }
    }

    pub fn as_select(&self) -> Option<&Arc<SelectQuery>> {
        match self {
            Query::Select(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_delete(&self) -> Option<&Arc<DeleteQuery>> {
        match self {
            Query::Delete(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_update(&self) -> Option<&Arc<UpdateQuery>> {
        match self {
            Query::Update(q) => Some(q),
            _ => None,
        }
    }

    /// Whether both values point at the same cached allocation.
    pub fn ptr_eq(&self, other: &Query) -> bool {
        match (self, other) {
            (Query::Select(a), Query::Select(b)) => Arc::ptr_eq(a, b),
            (Query::Delete(a), Query::Delete(b)) => Arc::ptr_eq(a, b),
            (Query::Update(a), Query::Update(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Statement> for Query {
    fn from(statement: Statement) -> Self {
        match statement {
            Statement::Select(q) => Query::Select(Arc::new(q)),
            Statement::Delete(q) => Query::Delete(Arc::new(q)),
            Statement::Update(q) => Query::Update(Arc::new(q)),
        }
    }
}
