use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LexError,
    ParseError,
    UnboundIdentifier,
    TypeError,
    IndexOutOfRange,
    ResourceExhausted,
    Overflow,
}

impl ErrorKind {
    fn title(self) -> &'static str {
        match self {
            ErrorKind::LexError => "Lexical Error",
            ErrorKind::ParseError => "Parse Error",
            ErrorKind::UnboundIdentifier => "Unbound Identifier",
            ErrorKind::TypeError => "Type Error",
            ErrorKind::IndexOutOfRange => "Index Out Of Range",
            ErrorKind::ResourceExhausted => "Resource Exhausted",
            ErrorKind::Overflow => "Overflow",
        }
    }

    fn color(self) -> Color {
        match self {
            ErrorKind::LexError => Color::Red,
            ErrorKind::ParseError => Color::Yellow,
            ErrorKind::UnboundIdentifier | ErrorKind::TypeError => Color::Magenta,
            ErrorKind::IndexOutOfRange | ErrorKind::Overflow => Color::Blue,
            ErrorKind::ResourceExhausted => Color::Red,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DlError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl DlError {
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: None,
        }
    }

    pub fn new_with_help(kind: ErrorKind, span: Span, message: String, help: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: Some(help),
        }
    }

    pub fn lex_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::LexError, span, message)
    }

    pub fn parse_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::ParseError, span, message)
    }

    pub fn parse_error_with_help(span: Span, message: String, help: String) -> Self {
        Self::new_with_help(ErrorKind::ParseError, span, message, help)
    }

    pub fn unbound(span: Span, name: &str) -> Self {
        Self::new(
            ErrorKind::UnboundIdentifier,
            span,
            format!("Unbound identifier '{}'", name),
        )
    }

    pub fn type_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::TypeError, span, message)
    }

    pub fn type_error_with_help(span: Span, message: String, help: String) -> Self {
        Self::new_with_help(ErrorKind::TypeError, span, message, help)
    }

    pub fn index_out_of_range(span: Span, index: i64, len: usize) -> Self {
        Self::new(
            ErrorKind::IndexOutOfRange,
            span,
            format!("Index {} is out of range for an array of length {}", index, len),
        )
    }

    pub fn resource_exhausted(span: Span, limit: usize) -> Self {
        Self::new_with_help(
            ErrorKind::ResourceExhausted,
            span,
            format!("Nesting depth exceeded the limit of {}", limit),
            "Raise the limit with --max-depth or --max-eval-depth, or check for unbounded recursion.".to_string(),
        )
    }

    pub fn overflow(span: Span, left: i64, right: i64) -> Self {
        Self::new(
            ErrorKind::Overflow,
            span,
            format!("Integer overflow computing {} + {}", left, right),
        )
    }

    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");
        let color = self.kind.color();

        let mut report_builder = Report::build(ReportKind::Error, filename, self.span.start)
            .with_message(format!("{}: {}", self.kind.title().fg(color), self.message))
            .with_label(
                Label::new((filename, self.span.start..self.span.end))
                    .with_message(&self.message)
                    .with_color(color),
            );

        if let Some(ref help_text) = self.help {
            report_builder = report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        if let Err(err) = report_builder
            .finish()
            .eprint((filename, Source::from(source)))
        {
            log::warn!("failed to print diagnostic: {}", err);
        }
    }
}

impl fmt::Display for DlError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DlError {}
