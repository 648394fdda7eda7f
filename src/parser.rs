use std::mem;

use crate::{
    ast::{
        Condition, DeleteQuery, Function, Number, Operator, Param, QueryValue, SelectQuery, Sort,
        Statement, Token, UpdateItem, UpdateQuery, Where,
    },
    lexer::{LexError, Lexer},
    normalize,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("unexpected '{fragment}', expected {expected}, in query: {query}")]
    UnexpectedToken {
        fragment: String,
        expected: String,
        query: String,
    },

    #[error("unexpected end of query, expected {expected}, in query: {query}")]
    UnexpectedEnd { expected: String, query: String },

    #[error("{source}, in query: {query}")]
    Lex { source: LexError, query: String },

    #[error("no entity given in query: {query}")]
    MissingEntity { query: String },
}

impl ParseError {
    /// The text that failed to parse, if any.
    pub fn query(&self) -> Option<&str> {
        match self {
            ParseError::EmptyQuery => None,
            ParseError::UnexpectedToken { query, .. }
            | ParseError::UnexpectedEnd { query, .. }
            | ParseError::Lex { query, .. }
            | ParseError::MissingEntity { query } => Some(query),
        }
    }
}

/// Recursive-descent parser for the textual dialect.
///
/// ```text
/// query      := verb entity? ('WHERE' or)? order? skip? limit?
/// or         := and ('OR' and)*
/// and        := unary ('AND' unary)*
/// unary      := 'NOT'? primary
/// primary    := '(' or ')' | comparison
/// comparison := path op value
/// ```
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    /// `current_token` as written in the query.
    current_text: String,
    query: String,
    default_entity: Option<String>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let query = lexer.source();
        if query.trim().is_empty() {
            return Err(ParseError::EmptyQuery);
        }
        let current_token = lexer.next_token().map_err(|source| ParseError::Lex {
            source,
            query: query.clone(),
        })?;
        let current_text = lexer.lexeme();
        Ok(Parser {
            lexer,
            current_token,
            current_text,
            query,
            default_entity: None,
        })
    }

    /// Entity to use when the query names none, e.g. `SELECT name WHERE ...`.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.default_entity = Some(entity.into());
        self
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token().map_err(|source| ParseError::Lex {
            source,
            query: self.query.clone(),
        })?;
        self.current_text = self.lexer.lexeme();
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(&expected.fragment()));
        }
        self.advance()
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.current_token {
            Token::Eof => ParseError::UnexpectedEnd {
                expected: expected.to_string(),
                query: self.query.clone(),
            },
            _ => self.unexpected_fragment(self.current_text.clone(), expected),
        }
    }

    /// Consume the current token and return its source spelling.
    fn take_word(&mut self) -> Result<String, ParseError> {
        let word = mem::take(&mut self.current_text);
        self.advance()?;
        Ok(word)
    }

    fn unexpected_fragment(&self, fragment: String, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            fragment,
            expected: expected.to_string(),
            query: self.query.clone(),
        }
    }

    /// Parse any statement and require the input to end after it.
    pub fn parse(&mut self) -> Result<Statement, ParseError> {
        let statement = match self.current_token {
            Token::Select | Token::From => Statement::Select(self.parse_select_body()?),
            Token::Delete => Statement::Delete(self.parse_delete_body()?),
            Token::Update => Statement::Update(self.parse_update_body()?),
            _ => return Err(self.unexpected("SELECT, FROM, DELETE or UPDATE")),
        };
        self.expect(Token::Eof)?;
        Ok(statement)
    }

    pub fn parse_select(&mut self) -> Result<SelectQuery, ParseError> {
        if !matches!(self.current_token, Token::Select | Token::From) {
            return Err(self.unexpected("SELECT or FROM"));
        }
        let query = self.parse_select_body()?;
        self.expect(Token::Eof)?;
        Ok(query)
    }

    pub fn parse_delete(&mut self) -> Result<DeleteQuery, ParseError> {
        if !self.check(&Token::Delete) {
            return Err(self.unexpected("DELETE"));
        }
        let query = self.parse_delete_body()?;
        self.expect(Token::Eof)?;
        Ok(query)
    }

    pub fn parse_update(&mut self) -> Result<UpdateQuery, ParseError> {
        if !self.check(&Token::Update) {
            return Err(self.unexpected("UPDATE"));
        }
        let query = self.parse_update_body()?;
        self.expect(Token::Eof)?;
        Ok(query)
    }

    fn parse_select_body(&mut self) -> Result<SelectQuery, ParseError> {
        let mut query = SelectQuery::default();

        if self.check(&Token::Select) {
            self.advance()?;
            let (fields, count) = self.parse_select_list()?;
            query.fields = fields;
            query.count = count;
        }

        if self.check(&Token::From) {
            self.advance()?;
        }
        query.entity = self.parse_entity()?;
        query.condition = self.parse_where()?;

        if self.check(&Token::Order) {
            self.advance()?;
            self.expect(Token::By)?;
            query.sorts = self.parse_sorts()?;
        }
        if self.check(&Token::Skip) {
            self.advance()?;
            query.skip = self.parse_count_literal()?;
        }
        if self.check(&Token::Limit) {
            self.advance()?;
            query.limit = self.parse_count_literal()?;
        }

        Ok(query)
    }

    fn parse_delete_body(&mut self) -> Result<DeleteQuery, ParseError> {
        self.advance()?; // DELETE

        let mut fields = vec![];
        if !self.check(&Token::From) {
            fields.push(self.parse_path()?);
            while self.check(&Token::Comma) {
                self.advance()?;
                fields.push(self.parse_path()?);
            }
        }
        self.expect(Token::From)?;

        Ok(DeleteQuery {
            entity: self.parse_entity()?,
            fields,
            condition: self.parse_where()?,
        })
    }

    fn parse_update_body(&mut self) -> Result<UpdateQuery, ParseError> {
        self.advance()?; // UPDATE

        let entity = self.parse_entity()?;
        self.expect(Token::Set)?;

        let mut items = vec![self.parse_update_item()?];
        while self.check(&Token::Comma) {
            self.advance()?;
            items.push(self.parse_update_item()?);
        }

        Ok(UpdateQuery {
            entity,
            items,
            condition: self.parse_where()?,
        })
    }

    fn parse_update_item(&mut self) -> Result<UpdateItem, ParseError> {
        let field = self.parse_path()?;
        self.expect(Token::Eq)?;
        let value = self.parse_value()?;
        Ok(UpdateItem { field, value })
    }

    /// Returns the projected fields and whether the list was `count(this)`.
    fn parse_select_list(&mut self) -> Result<(Vec<String>, bool), ParseError> {
        if self.check(&Token::From) {
            return Ok((vec![], false));
        }
        if self.check(&Token::Star) {
            self.advance()?;
            return Ok((vec![], false));
        }

        let mut fields = vec![];
        loop {
            let field = self.parse_path()?;

            if self.check(&Token::LParen) && field.eq_ignore_ascii_case("count") {
                self.advance()?;
                let is_this = matches!(
                    &self.current_token,
                    Token::Identifier(this) if this.eq_ignore_ascii_case("this")
                );
                if !is_this {
                    return Err(self.unexpected("this"));
                }
                self.advance()?;
                self.expect(Token::RParen)?;

                if !fields.is_empty() || self.check(&Token::Comma) {
                    return Err(self.unexpected_fragment(
                        "count(this)".to_string(),
                        "count(this) as the only selected field",
                    ));
                }
                return Ok((vec![], true));
            }

            fields.push(field);
            if !self.check(&Token::Comma) {
                return Ok((fields, false));
            }
            self.advance()?;
        }
    }

    /// A reserved word names the entity when no default entity could stand in
    /// for it, so `FROM Order` reads as the entity `Order`.
    fn parse_entity(&mut self) -> Result<String, ParseError> {
        let named = match self.current_token {
            Token::Identifier(_) => true,
            Token::Where | Token::Eof => false,
            ref token if token.is_keyword() => self.default_entity.is_none(),
            _ => return Err(self.unexpected("an entity name")),
        };
        if named {
            return self.take_word();
        }
        self.default_entity
            .clone()
            .ok_or_else(|| ParseError::MissingEntity {
                query: self.query.clone(),
            })
    }

    fn parse_where(&mut self) -> Result<Option<Where>, ParseError> {
        if !self.check(&Token::Where) {
            return Ok(None);
        }
        self.advance()?;
        let condition = normalize::simplify(self.parse_or()?);
        Ok(Some(Where::new(condition)))
    }

    fn parse_sorts(&mut self) -> Result<Vec<Sort>, ParseError> {
        let mut sorts = vec![];
        loop {
            let property = self.parse_path()?;
            let ascending = match self.current_token {
                Token::Asc => {
                    self.advance()?;
                    true
                }
                Token::Desc => {
                    self.advance()?;
                    false
                }
                _ => true,
            };
            sorts.push(Sort {
                property,
                ascending,
            });

            if !self.check(&Token::Comma) {
                return Ok(sorts);
            }
            self.advance()?;
        }
    }

    fn parse_count_literal(&mut self) -> Result<u64, ParseError> {
        match self.current_token {
            Token::Integer(n) if n >= 0 => {
                self.advance()?;
                Ok(n as u64)
            }
            _ => Err(self.unexpected("a non-negative integer")),
        }
    }

    /// `name` or `address.city`
    fn parse_path(&mut self) -> Result<String, ParseError> {
        let path = self.parse_identifier()?;
        self.parse_dotted(path)
    }

    /// Extend `path` with `.segment` parts. Reserved words are plain names
    /// after a dot (`address.order`).
    fn parse_dotted(&mut self, mut path: String) -> Result<String, ParseError> {
        while self.check(&Token::Dot) {
            self.advance()?;
            path.push('.');
            if self.current_token.is_keyword() {
                path.push_str(&self.take_word()?);
            } else {
                path.push_str(&self.parse_identifier()?);
            }
        }
        Ok(path)
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        if !matches!(self.current_token, Token::Identifier(_)) {
            return Err(self.unexpected("a field name"));
        }
        self.take_word()
    }

    fn parse_or(&mut self) -> Result<Condition, ParseError> {
        let mut children = vec![self.parse_and()?];

        while self.check(&Token::Or) {
            self.advance()?;
            children.push(self.parse_and()?);
        }

        Ok(match children.len() {
            1 => children.remove(0),
            _ => Condition::or(children),
        })
    }

    fn parse_and(&mut self) -> Result<Condition, ParseError> {
        let mut children = vec![self.parse_unary()?];

        while self.check(&Token::And) {
            self.advance()?;
            children.push(self.parse_unary()?);
        }

        Ok(match children.len() {
            1 => children.remove(0),
            _ => Condition::and(children),
        })
    }

    fn parse_unary(&mut self) -> Result<Condition, ParseError> {
        if self.check(&Token::Not) {
            self.advance()?;
            return Ok(Condition::not(self.parse_primary()?));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Condition, ParseError> {
        if self.check(&Token::LParen) {
            self.advance()?;
            let condition = self.parse_or()?;
            self.expect(Token::RParen)?;
            return Ok(condition);
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Condition, ParseError> {
        let field = self.parse_path()?;

        let operator = match self.current_token {
            Token::Eq => Operator::Equals,
            Token::NotEq => Operator::NotEquals,
            Token::Lt => Operator::LesserThan,
            Token::LtEq => Operator::LesserEqualsThan,
            Token::Gt => Operator::GreaterThan,
            Token::GtEq => Operator::GreaterEqualsThan,
            Token::Like | Token::In | Token::Between => {
                return self.parse_keyword_comparison(field);
            }
            Token::Is => {
                self.advance()?;
                let negated = self.check(&Token::Not);
                if negated {
                    self.advance()?;
                }
                self.expect(Token::Null)?;
                let condition = Condition::eq(field, QueryValue::Null);
                return Ok(if negated {
                    Condition::not(condition)
                } else {
                    condition
                });
            }
            Token::Not => {
                self.advance()?;
                if !matches!(self.current_token, Token::Like | Token::In | Token::Between) {
                    return Err(self.unexpected("LIKE, IN or BETWEEN after NOT"));
                }
                return Ok(Condition::not(self.parse_keyword_comparison(field)?));
            }
            _ => return Err(self.unexpected("a comparison operator")),
        };

        self.advance()?;
        let value = self.parse_value()?;
        Ok(Condition::leaf(field, operator, value))
    }

    /// `LIKE v`, `IN (v, ...)` or `BETWEEN v AND v`
    fn parse_keyword_comparison(&mut self, field: String) -> Result<Condition, ParseError> {
        match self.current_token {
            Token::Like => {
                self.advance()?;
                let value = self.parse_value()?;
                Ok(Condition::leaf(field, Operator::Like, value))
            }
            Token::In => {
                self.advance()?;
                self.expect(Token::LParen)?;
                let mut items = vec![self.parse_value()?];
                while self.check(&Token::Comma) {
                    self.advance()?;
                    items.push(self.parse_value()?);
                }
                self.expect(Token::RParen)?;
                Ok(Condition::leaf(field, Operator::In, QueryValue::Array(items)))
            }
            Token::Between => {
                self.advance()?;
                let low = self.parse_value()?;
                self.expect(Token::And)?;
                let high = self.parse_value()?;
                Ok(Condition::leaf(
                    field,
                    Operator::Between,
                    QueryValue::Array(vec![low, high]),
                ))
            }
            _ => Err(self.unexpected("LIKE, IN or BETWEEN")),
        }
    }

    /// Literal, parameter, enum path or function call
    fn parse_value(&mut self) -> Result<QueryValue, ParseError> {
        let value = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::String(s) => QueryValue::String(s),
            Token::Integer(n) => QueryValue::Number(Number::Integer(n)),
            Token::Decimal(d) => QueryValue::Number(Number::Decimal(d)),
            Token::Boolean(b) => QueryValue::Boolean(b),
            Token::Null => QueryValue::Null,
            Token::NamedParam(name) => QueryValue::Param(Param::named(name)),
            Token::PositionalParam(n) => QueryValue::Param(Param::positional(n)),
            Token::Identifier(name) => {
                self.advance()?;
                return self.parse_identifier_value(name);
            }
            token => {
                self.current_token = token;
                return Err(self.unexpected("a literal, parameter or function call"));
            }
        };
        self.advance()?;
        Ok(value)
    }

    /// After an identifier in value position: `NAME(...)` or `Type.CONSTANT`.
    fn parse_identifier_value(&mut self, name: String) -> Result<QueryValue, ParseError> {
        if self.check(&Token::LParen) {
            self.advance()?;
            let mut args = vec![];
            if !self.check(&Token::RParen) {
                args.push(self.parse_value()?);
                while self.check(&Token::Comma) {
                    self.advance()?;
                    args.push(self.parse_value()?);
                }
            }
            self.expect(Token::RParen)?;
            return Ok(QueryValue::Function(Function {
                name: name.to_uppercase(),
                args,
            }));
        }

        if !self.check(&Token::Dot) {
            return Err(self.unexpected_fragment(
                name,
                "a literal, parameter, function call or Enum.CONSTANT",
            ));
        }

        Ok(QueryValue::Enum(self.parse_dotted(name)?))
    }
}

/// Parse a statement of any kind.
pub fn parse(query: &str) -> Result<Statement, ParseError> {
    Parser::new(Lexer::new(query))?.parse()
}
