use crate::error::{DlError, Span};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    // Delimiters
    LeftParen,
    RightParen,
    Equal,

    // Literals
    Identifier,
    Integer,

    // Keywords
    Val,
    Var,
    Add,
    Let,
    In,
    If,
    Then,
    Else,
    Function,
    Call,
    Set,
    Block,
    Arr,
    Gen,
    At,

    // Special
    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            span,
        }
    }
}

/// Splits source text into whitespace-separated words, with `(` and `)`
/// always standing alone. Every other run of non-whitespace is one token.
pub struct Lexer {
    source: String,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    keywords: HashMap<&'static str, TokenType>,
}

impl Lexer {
    pub fn new(source: String) -> Self {
        let mut keywords = HashMap::new();
        keywords.insert("val", TokenType::Val);
        keywords.insert("var", TokenType::Var);
        keywords.insert("add", TokenType::Add);
        keywords.insert("let", TokenType::Let);
        keywords.insert("in", TokenType::In);
        keywords.insert("if", TokenType::If);
        keywords.insert("then", TokenType::Then);
        keywords.insert("else", TokenType::Else);
        keywords.insert("function", TokenType::Function);
        keywords.insert("call", TokenType::Call);
        keywords.insert("set", TokenType::Set);
        keywords.insert("block", TokenType::Block);
        keywords.insert("arr", TokenType::Arr);
        keywords.insert("gen", TokenType::Gen);
        keywords.insert("at", TokenType::At);
        keywords.insert("=", TokenType::Equal);

        Self {
            source,
            tokens: Vec::new(),
            start: 0,
            current: 0,
            keywords,
        }
    }

    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, DlError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        if self.tokens.is_empty() {
            return Err(DlError::lex_error(
                Span::single(self.current),
                "Program is empty".to_string(),
            ));
        }

        self.tokens.push(Token::new(
            TokenType::Eof,
            String::new(),
            Span::single(self.current),
        ));

        log::debug!("lexer produced {} tokens", self.tokens.len() - 1);
        Ok(std::mem::take(&mut self.tokens))
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self) {
        let c = self.advance();

        match c {
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            c if c.is_whitespace() => {}
            _ => self.word(),
        }
    }

    fn advance(&mut self) -> char {
        match self.source[self.current..].chars().next() {
            Some(c) => {
                self.current += c.len_utf8();
                c
            }
            None => '\0',
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn word(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '(' || c == ')' {
                break;
            }
            self.advance();
        }

        let text = &self.source[self.start..self.current];
        let token_type = match self.keywords.get(text) {
            Some(keyword) => keyword.clone(),
            None if text.parse::<i64>().is_ok() => TokenType::Integer,
            None => TokenType::Identifier,
        };

        self.add_token(token_type);
    }

    fn add_token(&mut self, token_type: TokenType) {
        let text = self.source[self.start..self.current].to_string();
        self.tokens.push(Token::new(
            token_type,
            text,
            Span::new(self.start, self.current),
        ));
    }
}
