use rust_decimal::Decimal;

/// Lexical token of the textual query dialect.
///
/// Keywords are recognized case-insensitively; identifier and string spans
/// keep their original casing.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Integer literal, sign included
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -10
    /// ```
    Integer(i64),

    /// Decimal literal, kept as written
    ///
    /// # Examples
    /// ```text
    /// 12.12
    /// -0.5
    /// ```
    Decimal(Decimal),

    /// String literal in single or double quotes, doubled quote escapes
    ///
    /// # Examples
    /// ```text
    /// 'Otavio'
    /// "Otavio"
    /// 'it''s'
    /// ```
    String(String),

    /// `TRUE` / `FALSE`
    Boolean(bool),

    /// `NULL`
    Null,

    /// Named parameter (`:name`)
    NamedParam(String),

    /// Positional parameter (`?1`), 1-based
    PositionalParam(usize),

    // Identifiers
    /// Field, entity or function name
    ///
    /// Starts with a letter or underscore, followed by letters, digits or underscores.
    Identifier(String),

    // Keywords
    Select,
    From,
    Where,
    Delete,
    Update,
    Set,
    And,
    Or,
    Not,
    Like,
    In,
    Between,
    Is,
    Order,
    By,
    Asc,
    Desc,
    Skip,
    Limit,

    // Comparison
    /// `=`
    Eq,
    /// `<>` or `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,

    // Delimiters
    LParen,
    RParen,
    Comma,
    Dot,
    /// `*` in a select list
    Star,

    /// End of input
    Eof,
}

impl Token {
    /// Map an identifier to its keyword token, ignoring case.
    pub fn keyword(ident: &str) -> Option<Token> {
        let token = match ident.to_ascii_uppercase().as_str() {
            "SELECT" => Token::Select,
            "FROM" => Token::From,
            "WHERE" => Token::Where,
            "DELETE" => Token::Delete,
            "UPDATE" => Token::Update,
            "SET" => Token::Set,
            "AND" => Token::And,
            "OR" => Token::Or,
            "NOT" => Token::Not,
            "LIKE" => Token::Like,
            "IN" => Token::In,
            "BETWEEN" => Token::Between,
            "IS" => Token::Is,
            "ORDER" => Token::Order,
            "BY" => Token::By,
            "ASC" => Token::Asc,
            "DESC" => Token::Desc,
            "SKIP" => Token::Skip,
            "LIMIT" => Token::Limit,
            "TRUE" => Token::Boolean(true),
            "FALSE" => Token::Boolean(false),
            "NULL" => Token::Null,
            _ => return None,
        };
        Some(token)
    }

    /// Reserved words, not counting the `TRUE`/`FALSE`/`NULL` literals.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Token::Select
                | Token::From
                | Token::Where
                | Token::Delete
                | Token::Update
                | Token::Set
                | Token::And
                | Token::Or
                | Token::Not
                | Token::Like
                | Token::In
                | Token::Between
                | Token::Is
                | Token::Order
                | Token::By
                | Token::Asc
                | Token::Desc
                | Token::Skip
                | Token::Limit
        )
    }

    /// Canonical rendering used in error messages.
    pub fn fragment(&self) -> String {
        match self {
            Token::Integer(n) => n.to_string(),
            Token::Decimal(d) => d.to_string(),
            Token::String(s) => format!("'{}'", s.replace('\'', "''")),
            Token::Boolean(b) => b.to_string().to_uppercase(),
            Token::Null => "NULL".to_string(),
            Token::NamedParam(name) => format!(":{name}"),
            Token::PositionalParam(n) => format!("?{n}"),
            Token::Identifier(name) => name.clone(),
            Token::Select => "SELECT".to_string(),
            Token::From => "FROM".to_string(),
            Token::Where => "WHERE".to_string(),
            Token::Delete => "DELETE".to_string(),
            Token::Update => "UPDATE".to_string(),
            Token::Set => "SET".to_string(),
            Token::And => "AND".to_string(),
            Token::Or => "OR".to_string(),
            Token::Not => "NOT".to_string(),
            Token::Like => "LIKE".to_string(),
            Token::In => "IN".to_string(),
            Token::Between => "BETWEEN".to_string(),
            Token::Is => "IS".to_string(),
            Token::Order => "ORDER".to_string(),
            Token::By => "BY".to_string(),
            Token::Asc => "ASC".to_string(),
            Token::Desc => "DESC".to_string(),
            Token::Skip => "SKIP".to_string(),
            Token::Limit => "LIMIT".to_string(),
            Token::Eq => "=".to_string(),
            Token::NotEq => "<>".to_string(),
            Token::Lt => "<".to_string(),
            Token::LtEq => "<=".to_string(),
            Token::Gt => ">".to_string(),
            Token::GtEq => ">=".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Comma => ",".to_string(),
            Token::Dot => ".".to_string(),
            Token::Star => "*".to_string(),
            Token::Eof => "<end of query>".to_string(),
        }
    }
}
