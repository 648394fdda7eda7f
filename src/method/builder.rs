use crate::{
    ast::{Condition, DeleteQuery, Operator, Param, QueryValue, SelectQuery, Sort, Statement, Where},
    method::{MethodError, MethodTokenizer},
};

/// What a predicate segment compares against.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Terminal {
    Compare(Operator),
    Between,
    Boolean(bool),
    Null,
}

fn terminal(word: &str) -> Option<Terminal> {
    let terminal = match word {
        "Equals" => Terminal::Compare(Operator::Equals),
        "GreaterThan" => Terminal::Compare(Operator::GreaterThan),
        "GreaterThanEqual" => Terminal::Compare(Operator::GreaterEqualsThan),
        "LessThan" => Terminal::Compare(Operator::LesserThan),
        "LessThanEqual" => Terminal::Compare(Operator::LesserEqualsThan),
        "Like" => Terminal::Compare(Operator::Like),
        "In" => Terminal::Compare(Operator::In),
        "Contains" => Terminal::Compare(Operator::Contains),
        "StartsWith" => Terminal::Compare(Operator::StartsWith),
        "EndsWith" => Terminal::Compare(Operator::EndsWith),
        "Between" => Terminal::Between,
        "True" => Terminal::Boolean(true),
        "False" => Terminal::Boolean(false),
        "Null" => Terminal::Null,
        _ => return None,
    };
    Some(terminal)
}

fn is_keyword(word: &str) -> bool {
    terminal(word).is_some()
        || matches!(
            word,
            "And" | "Or" | "Not" | "IgnoreCase" | "OrderBy" | "By" | "Asc" | "Desc"
        )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Find,
    Count,
    Exists,
    Delete,
}

/// Builds a [`Statement`] from a derived-query method name.
///
/// `find` produces a select, `count` and `exists` a counting select, and
/// `delete` a delete. Every word must be placed; anything left over is an
/// error naming the full identifier.
pub struct MethodQueryBuilder<'a> {
    method: &'a str,
    words: Vec<&'a str>,
    position: usize,
    next_param: usize,
}

impl<'a> MethodQueryBuilder<'a> {
    pub fn new(method: &'a str) -> Result<Self, MethodError> {
        if method.trim().is_empty() {
            return Err(MethodError::EmptyMethod);
        }
        let words: Vec<&str> = MethodTokenizer::new(method).words().collect();
        tracing::trace!(method, ?words, "tokenized derived query");
        Ok(MethodQueryBuilder {
            method,
            words,
            position: 0,
            next_param: 1,
        })
    }

    fn current(&self) -> Option<&'a str> {
        self.words.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn unexpected(&self, word: &str) -> MethodError {
        MethodError::UnexpectedWord {
            word: word.to_string(),
            method: self.method.to_string(),
        }
    }

    fn missing_property(&self) -> MethodError {
        MethodError::MissingProperty {
            method: self.method.to_string(),
        }
    }

    pub fn build(mut self, entity: &str) -> Result<Statement, MethodError> {
        let verb = self.parse_verb()?;
        let limit = self.parse_subject(verb)?;

        let condition = if self.current() == Some("By") {
            self.advance();
            self.parse_predicate()?.map(Where::new)
        } else {
            None
        };

        let sorts = if self.current() == Some("OrderBy") {
            if verb == Verb::Delete {
                return Err(self.unexpected("OrderBy"));
            }
            self.advance();
            self.parse_sorts()?
        } else {
            vec![]
        };

        if let Some(word) = self.current() {
            return Err(self.unexpected(word));
        }

        let statement = match verb {
            Verb::Delete => Statement::Delete(DeleteQuery {
                entity: entity.to_string(),
                fields: vec![],
                condition,
            }),
            _ => Statement::Select(SelectQuery {
                entity: entity.to_string(),
                fields: vec![],
                condition,
                sorts,
                limit,
                skip: 0,
                count: matches!(verb, Verb::Count | Verb::Exists),
            }),
        };
        Ok(statement)
    }

    fn parse_verb(&mut self) -> Result<Verb, MethodError> {
        let word = self.current().unwrap_or_default();
        let verb = match word {
            "find" => Verb::Find,
            "count" => Verb::Count,
            "exists" => Verb::Exists,
            "delete" => Verb::Delete,
            _ => {
                return Err(MethodError::UnknownVerb {
                    verb: word.to_string(),
                    method: self.method.to_string(),
                });
            }
        };
        self.advance();

        if self.current().is_none() {
            return Err(MethodError::VerbOnly {
                method: self.method.to_string(),
            });
        }
        Ok(verb)
    }

    /// Words between the verb and `By`/`OrderBy`; returns the limit.
    fn parse_subject(&mut self, verb: Verb) -> Result<u64, MethodError> {
        let mut limit = 0;

        while let Some(word) = self.current() {
            match word {
                "By" | "OrderBy" => break,
                "All" => self.advance(),
                "First" | "Top" if verb == Verb::Find && limit == 0 => {
                    self.advance();
                    limit = match self.current() {
                        Some(digits) if digits.starts_with(|c: char| c.is_ascii_digit()) => {
                            self.advance();
                            match digits.parse::<u64>() {
                                Ok(n) if n > 0 => n,
                                _ => {
                                    return Err(MethodError::InvalidLimit {
                                        limit: digits.to_string(),
                                        method: self.method.to_string(),
                                    });
                                }
                            }
                        }
                        _ => 1,
                    };
                }
                _ => return Err(self.unexpected(word)),
            }
        }

        Ok(limit)
    }

    /// `p1 And p2 Or p3` => OR(AND(p1, p2), p3)
    fn parse_predicate(&mut self) -> Result<Option<Condition>, MethodError> {
        let mut segments: Vec<&'a str> = vec![];
        while let Some(word) = self.current() {
            if word == "OrderBy" {
                break;
            }
            segments.push(word);
            self.advance();
        }

        if segments.is_empty() {
            return Ok(None);
        }

        let mut or_children = vec![];
        for or_group in segments.split(|w| *w == "Or") {
            let mut and_children = vec![];
            for segment in or_group.split(|w| *w == "And") {
                and_children.push(self.parse_segment(segment)?);
            }
            or_children.push(match and_children.len() {
                1 => and_children.remove(0),
                _ => Condition::and(and_children),
            });
        }

        Ok(Some(match or_children.len() {
            1 => or_children.remove(0),
            _ => Condition::or(or_children),
        }))
    }

    /// `Property [IgnoreCase] [Not] [Keyword]`, modifiers in any order.
    fn parse_segment(&mut self, words: &[&str]) -> Result<Condition, MethodError> {
        let Some((&property, modifiers)) = words.split_first() else {
            return Err(self.missing_property());
        };
        if is_keyword(property) {
            return Err(self.unexpected(property));
        }

        let mut negated = false;
        let mut ignore_case = false;
        let mut kind = None;

        for &word in modifiers {
            match word {
                "Not" if !negated => negated = true,
                "IgnoreCase" if !ignore_case => ignore_case = true,
                _ => match terminal(word) {
                    Some(t) if kind.is_none() => kind = Some(t),
                    _ => return Err(self.unexpected(word)),
                },
            }
        }

        let field = property_path(property);
        let name = field.rsplit('.').next().unwrap_or(&field).to_string();

        let leaf = match kind.unwrap_or(Terminal::Compare(Operator::Equals)) {
            Terminal::Compare(operator) => {
                let value = QueryValue::Param(self.next_param(&name));
                Condition::leaf(field, operator, value)
            }
            Terminal::Between => {
                let low = QueryValue::Param(self.next_param(&name));
                let high = QueryValue::Param(self.next_param(&name));
                Condition::leaf(field, Operator::Between, QueryValue::Array(vec![low, high]))
            }
            Terminal::Boolean(b) => Condition::eq(field, QueryValue::Boolean(b)),
            Terminal::Null => Condition::eq(field, QueryValue::Null),
        };

        let condition = if ignore_case {
            Condition::ignore_case(leaf)
        } else {
            leaf
        };
        Ok(if negated {
            Condition::not(condition)
        } else {
            condition
        })
    }

    fn next_param(&mut self, name: &str) -> Param {
        let param = Param::indexed(name, self.next_param);
        self.next_param += 1;
        param
    }

    fn parse_sorts(&mut self) -> Result<Vec<Sort>, MethodError> {
        let mut sorts = vec![];

        while let Some(word) = self.current() {
            if is_keyword(word) {
                return Err(self.unexpected(word));
            }
            self.advance();

            let ascending = match self.current() {
                Some("Asc") => {
                    self.advance();
                    true
                }
                Some("Desc") => {
                    self.advance();
                    false
                }
                _ => true,
            };
            sorts.push(Sort {
                property: property_path(word),
                ascending,
            });
        }

        if sorts.is_empty() {
            return Err(self.missing_property());
        }
        Ok(sorts)
    }
}

/// `Salary_Currency` => `salary.currency`
fn property_path(word: &str) -> String {
    word.split('_')
        .filter(|part| !part.is_empty())
        .map(decapitalize)
        .collect::<Vec<_>>()
        .join(".")
}

/// Lower-case the first letter unless the word opens with an acronym (`URL`).
fn decapitalize(word: &str) -> String {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a.is_uppercase() && b.is_uppercase() => word.to_string(),
        (Some(a), _) => a.to_lowercase().chain(word[a.len_utf8()..].chars()).collect(),
        (None, _) => String::new(),
    }
}

/// Build the statement for `method` against `entity`.
pub fn build(method: &str, entity: &str) -> Result<Statement, MethodError> {
    MethodQueryBuilder::new(method)?.build(entity)
}
