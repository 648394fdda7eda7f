use crate::ast::{DeleteQuery, Param, SelectQuery, UpdateQuery};

/// Owned result of a single parse, before it is shared through the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    /// `SELECT ... FROM ...` or `FROM ...`
    ///
    /// # Example
    /// ```text
    /// SELECT name FROM Person WHERE age > 10 ORDER BY name DESC LIMIT 5
    /// ```
    Select(SelectQuery),

    /// `DELETE ... FROM ...`
    ///
    /// # Example
    /// ```text
    /// DELETE FROM Person WHERE age = 10
    /// ```
    Delete(DeleteQuery),

    /// `UPDATE ... SET ...`
    ///
    /// # Example
    /// ```text
    /// UPDATE Person SET active = true WHERE age > :age
    /// ```
    Update(UpdateQuery),
}

impl Statement {
    pub fn entity(&self) -> &str {
        match self {
            Statement::Select(q) => &q.entity,
            Statement::Delete(q) => &q.entity,
            Statement::Update(q) => &q.entity,
        }
    }

    pub fn for_each_param<'a>(&'a self, f: &mut impl FnMut(&'a Param)) {
        match self {
            Statement::Select(q) => q.for_each_param(f),
            Statement::Delete(q) => q.for_each_param(f),
            Statement::Update(q) => q.for_each_param(f),
        }
    }
}
