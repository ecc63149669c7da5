//! Profile expression evaluation.
//!
//! A document may restrict itself to profiles using expressions such as
//! `dev`, `!prod` or `(dev | staging) & !cloud`. Operator precedence is
//! `!` over `&` over `|`. A malformed expression matches nothing rather
//! than failing the whole load.

/// Returns true if any of the given expressions matches.
///
/// `is_active` decides whether a bare profile name counts as active.
pub fn matches_any<F>(expressions: &[String], is_active: F) -> bool
where
    F: Fn(&str) -> bool,
{
    expressions
        .iter()
        .any(|expression| matches(expression, &is_active))
}

/// Evaluates a single profile expression.
pub fn matches<F>(expression: &str, is_active: &F) -> bool
where
    F: Fn(&str) -> bool,
{
    let tokens = tokenize(expression);
    let mut parser = Parser {
        tokens: &tokens,
        position: 0,
    };
    match parser.parse_or(is_active) {
        Some(result) if parser.at_end() => result,
        _ => false,
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Not,
    And,
    Or,
    Open,
    Close,
    Name(String),
}

fn tokenize(expression: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut name = String::new();

    for ch in expression.chars() {
        let token = match ch {
            '!' => Some(Token::Not),
            '&' => Some(Token::And),
            '|' => Some(Token::Or),
            '(' => Some(Token::Open),
            ')' => Some(Token::Close),
            c if c.is_whitespace() => None,
            c => {
                name.push(c);
                continue;
            }
        };
        if !name.is_empty() {
            tokens.push(Token::Name(std::mem::take(&mut name)));
        }
        if let Some(token) = token {
            tokens.push(token);
        }
    }
    if !name.is_empty() {
        tokens.push(Token::Name(name));
    }
    tokens
}

struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> Parser<'a> {
    fn at_end(&self) -> bool {
        self.position == self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn parse_or<F>(&mut self, is_active: &F) -> Option<bool>
    where
        F: Fn(&str) -> bool,
    {
        let mut result = self.parse_and(is_active)?;
        while matches!(self.peek(), Some(Token::Or)) {
            self.advance();
            let rhs = self.parse_and(is_active)?;
            result = result || rhs;
        }
        Some(result)
    }

    fn parse_and<F>(&mut self, is_active: &F) -> Option<bool>
    where
        F: Fn(&str) -> bool,
    {
        let mut result = self.parse_unary(is_active)?;
        while matches!(self.peek(), Some(Token::And)) {
            self.advance();
            let rhs = self.parse_unary(is_active)?;
            result = result && rhs;
        }
        Some(result)
    }

    fn parse_unary<F>(&mut self, is_active: &F) -> Option<bool>
    where
        F: Fn(&str) -> bool,
    {
        match self.advance()? {
            Token::Not => Some(!self.parse_unary(is_active)?),
            Token::Open => {
                let inner = self.parse_or(is_active)?;
                match self.advance()? {
                    Token::Close => Some(inner),
                    _ => None,
                }
            }
            Token::Name(name) => Some(is_active(name)),
            _ => None,
        }
    }
}
