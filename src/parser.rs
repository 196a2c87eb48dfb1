use crate::ast::Expr;
use crate::config::Config;
use crate::error::{DlError, Span};
use crate::lexer::{Token, TokenType};

/// Recursive-descent parser. Each form is `(` KEYWORD operands... `)`,
/// and the keyword alone decides which operands follow.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, &Config::default())
    }

    pub fn with_config(mut tokens: Vec<Token>, config: &Config) -> Self {
        // Callers building token lists by hand may leave off the terminator.
        if !matches!(tokens.last(), Some(token) if token.token_type == TokenType::Eof) {
            let end = tokens.last().map(|token| token.span.end).unwrap_or(0);
            tokens.push(Token::new(TokenType::Eof, String::new(), Span::single(end)));
        }

        Self {
            tokens,
            current: 0,
            depth: 0,
            max_depth: config.max_depth,
        }
    }

    /// Parses the first complete form. Anything after it is ignored.
    pub fn parse(&mut self) -> Result<Expr, DlError> {
        let expr = self.expression()?;

        if !self.is_at_end() {
            log::warn!(
                "ignoring {} token(s) after the top-level form, starting at '{}'",
                self.tokens.len() - 1 - self.current,
                self.peek().lexeme
            );
        }

        log::debug!("parsed top-level '{}' form", expr.keyword());
        Ok(expr)
    }

    fn expression(&mut self) -> Result<Expr, DlError> {
        if self.depth >= self.max_depth {
            return Err(DlError::resource_exhausted(self.peek().span, self.max_depth));
        }

        self.depth += 1;
        let result = self.form();
        self.depth -= 1;
        result
    }

    fn form(&mut self) -> Result<Expr, DlError> {
        let open = self
            .consume_with_help(
                TokenType::LeftParen,
                "Expected '(' to start an expression",
                "Every expression is a parenthesized form such as (val 1) or (var x).".to_string(),
            )?
            .span;

        let keyword = self.advance().clone();
        match keyword.token_type {
            TokenType::Val => self.val(open),
            TokenType::Var => {
                let name = self.identifier("after 'var'")?;
                self.finish(open, |span| Expr::Var { name, span })
            }
            TokenType::Add => {
                let left = Box::new(self.expression()?);
                let right = Box::new(self.expression()?);
                self.finish(open, |span| Expr::Add { left, right, span })
            }
            TokenType::Let => self.let_expression(open),
            TokenType::If => self.if_expression(open),
            TokenType::Function => self.function(open),
            TokenType::Call => {
                let callee = Box::new(self.expression()?);
                let argument = Box::new(self.expression()?);
                self.finish(open, |span| Expr::Call {
                    callee,
                    argument,
                    span,
                })
            }
            TokenType::Set => {
                let name = self.identifier("after 'set'")?;
                let value = Box::new(self.expression()?);
                self.finish(open, |span| Expr::Set { name, value, span })
            }
            TokenType::Block => {
                let (exprs, span) = self.sequence(open)?;
                if exprs.is_empty() {
                    return Err(DlError::parse_error_with_help(
                        span,
                        "A block needs at least one expression".to_string(),
                        "Example: (block (set x (val 1)) (var x) )".to_string(),
                    ));
                }
                Ok(Expr::Block { exprs, span })
            }
            TokenType::Arr => {
                let (elements, span) = self.sequence(open)?;
                Ok(Expr::Arr { elements, span })
            }
            TokenType::Gen => {
                let length = Box::new(self.expression()?);
                let function = Box::new(self.expression()?);
                self.finish(open, |span| Expr::Gen {
                    length,
                    function,
                    span,
                })
            }
            TokenType::At => {
                let array = Box::new(self.expression()?);
                let index = Box::new(self.expression()?);
                self.finish(open, |span| Expr::At { array, index, span })
            }
            TokenType::RightParen => Err(DlError::parse_error(
                open.to(keyword.span),
                "Empty parentheses are not allowed".to_string(),
            )),
            TokenType::Eof => Err(DlError::parse_error(
                keyword.span,
                "Unexpected end of input after '('".to_string(),
            )),
            _ => Err(DlError::parse_error_with_help(
                keyword.span,
                format!("Expected a keyword after '(', found '{}'", keyword.lexeme),
                "Forms start with one of: val var add let if function call set block arr gen at."
                    .to_string(),
            )),
        }
    }

    fn val(&mut self, open: Span) -> Result<Expr, DlError> {
        let token = self.consume(TokenType::Integer, "Expected an integer after 'val'")?;
        let value = token.lexeme.parse::<i64>().map_err(|_| {
            DlError::parse_error(token.span, format!("Invalid integer: {}", token.lexeme))
        })?;
        self.finish(open, |span| Expr::Val { value, span })
    }

    fn let_expression(&mut self, open: Span) -> Result<Expr, DlError> {
        let name = self.identifier("after 'let'")?;
        self.consume_with_help(
            TokenType::Equal,
            "Expected '=' after the name in 'let'",
            "Let bindings look like (let x = (val 1) in (var x)).".to_string(),
        )?;
        let value = Box::new(self.expression()?);
        self.consume_with_help(
            TokenType::In,
            "Expected 'in' after the bound value",
            "Let bindings look like (let x = (val 1) in (var x)).".to_string(),
        )?;
        let body = Box::new(self.expression()?);
        self.finish(open, |span| Expr::Let { name, value, body, span })
    }

    fn if_expression(&mut self, open: Span) -> Result<Expr, DlError> {
        let left = Box::new(self.expression()?);
        let right = Box::new(self.expression()?);
        self.consume_with_help(
            TokenType::Then,
            "Expected 'then' after the compared expressions",
            "Conditionals look like (if (var a) (var b) then (val 1) else (val 0)).".to_string(),
        )?;
        let then_branch = Box::new(self.expression()?);
        self.consume_with_help(
            TokenType::Else,
            "Expected 'else' after the then-branch",
            "Conditionals look like (if (var a) (var b) then (val 1) else (val 0)).".to_string(),
        )?;
        let else_branch = Box::new(self.expression()?);
        self.finish(open, |span| Expr::If {
            left,
            right,
            then_branch,
            else_branch,
            span,
        })
    }

    fn function(&mut self, open: Span) -> Result<Expr, DlError> {
        let param = self.identifier("after 'function'")?;
        // `=` is optional: `(function x BODY)` and `(function x = BODY)` are the same.
        self.match_types(&[TokenType::Equal]);
        let body = Box::new(self.expression()?);
        self.finish(open, |span| Expr::Function { param, body, span })
    }

    /// Parses expressions up to and including the closing `)` of a
    /// variadic form.
    fn sequence(&mut self, open: Span) -> Result<(Vec<Expr>, Span), DlError> {
        let mut items = Vec::new();

        while !self.check(&TokenType::RightParen) && !self.is_at_end() {
            items.push(self.expression()?);
        }

        let close = self.consume(TokenType::RightParen, "Expected ')' to close the list")?;
        Ok((items, open.to(close.span)))
    }

    fn finish<F>(&mut self, open: Span, build: F) -> Result<Expr, DlError>
    where
        F: FnOnce(Span) -> Expr,
    {
        let close = self.consume(TokenType::RightParen, "Expected ')' after expression")?;
        Ok(build(open.to(close.span)))
    }

    fn identifier(&mut self, context: &str) -> Result<String, DlError> {
        let token = self.consume(TokenType::Identifier, &format!("Expected a name {}", context))?;
        Ok(token.lexeme.clone())
    }

    fn match_types(&mut self, types: &[TokenType]) -> bool {
        for token_type in types {
            if self.check(token_type) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, token_type: &TokenType) -> bool {
        if self.is_at_end() {
            false
        } else {
            &self.peek().token_type == token_type
        }
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
            self.previous()
        } else {
            self.peek()
        }
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn unexpected_span(&self) -> Span {
        if self.is_at_end() && self.current > 0 {
            // At EOF, point just past the last real token
            Span::single(self.tokens[self.current - 1].span.end)
        } else {
            self.peek().span
        }
    }

    fn consume(&mut self, token_type: TokenType, message: &str) -> Result<&Token, DlError> {
        if self.check(&token_type) {
            Ok(self.advance())
        } else {
            Err(DlError::parse_error(
                self.unexpected_span(),
                format!("{}, found {}", message, self.describe_current()),
            ))
        }
    }

    fn consume_with_help(&mut self, token_type: TokenType, message: &str, help: String) -> Result<&Token, DlError> {
        if self.check(&token_type) {
            Ok(self.advance())
        } else {
            Err(DlError::parse_error_with_help(
                self.unexpected_span(),
                format!("{}, found {}", message, self.describe_current()),
                help,
            ))
        }
    }

    fn describe_current(&self) -> String {
        let token = self.peek();
        match token.token_type {
            TokenType::Eof => "end of input".to_string(),
            _ => format!("'{}'", token.lexeme),
        }
    }
}
