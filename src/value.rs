//! Declaration value splitting.
//!
//! Values are split into components and separators using the cssparser
//! tokenizer, keeping the exact source text of every piece so untouched
//! parts of a value are reproduced byte for byte.

use std::borrow::Cow;
use std::ops::Range;

use cssparser::{ParseError, Parser, ParserInput, Token};

use crate::tokenize::{is_calc_placeholder, is_protected_placeholder};

/// What a value component is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Ident,
    Number,
    Percentage,
    Dimension,
    /// A function call other than `url()`.
    Function,
    Url,
    /// A protected `calc()` expression, possibly sign-flipped.
    Calc,
    /// Anything else: colors, strings, multi-token runs.
    Other,
}

/// Role of a piece of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Whitespace, or a protected comment placeholder.
    Space,
    Comma,
    Slash,
    Item(Kind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Part<'a> {
    pub text: &'a str,
    pub role: Role,
}

impl<'a> Part<'a> {
    pub fn kind(&self) -> Option<Kind> {
        match self.role {
            Role::Item(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_item(&self) -> bool {
        matches!(self.role, Role::Item(_))
    }

    pub fn ident(&self) -> Option<&'a str> {
        (self.role == Role::Item(Kind::Ident)).then_some(self.text)
    }

    /// Whether the component is an identifier equal to `word`.
    pub fn is_ident(&self, word: &str) -> bool {
        self.ident().is_some_and(|ident| ident.eq_ignore_ascii_case(word))
    }

    /// Whether the component is a number, length, percentage or `calc()`.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.role,
            Role::Item(Kind::Number | Kind::Percentage | Kind::Dimension | Kind::Calc)
        )
    }

    /// Function name and argument text for function components.
    pub fn function(&self) -> Option<Function<'a>> {
        if !matches!(self.role, Role::Item(Kind::Function | Kind::Url)) {
            return None;
        }
        Function::parse(self.text)
    }
}

/// A function component split into name and arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Function<'a> {
    pub name: &'a str,
    pub args: &'a str,
    /// Text after the arguments: `)` or nothing when unterminated.
    pub close: &'a str,
}

impl<'a> Function<'a> {
    pub fn parse(text: &'a str) -> Option<Self> {
        let open = text.find('(')?;
        let (args, close) = match text.strip_suffix(')') {
            Some(inner) if inner.len() > open => (&inner[open + 1..], ")"),
            _ => (&text[open + 1..], ""),
        };
        Some(Self {
            name: &text[..open],
            args,
            close,
        })
    }

    /// Name without a vendor prefix, lowercased.
    pub fn base_name(&self) -> String {
        strip_vendor_prefix(self.name).1.to_ascii_lowercase()
    }

    pub fn is_prefixed(&self) -> bool {
        !strip_vendor_prefix(self.name).0.is_empty()
    }

    pub fn rebuild(&self, args: &str) -> String {
        format!("{}({}{}", self.name, args, self.close)
    }
}

/// Split a vendor prefix (`-webkit-`, `-moz-`, `-ms-`, `-o-`) off a name.
pub fn strip_vendor_prefix(name: &str) -> (&str, &str) {
    for prefix in ["-webkit-", "-moz-", "-ms-", "-o-"] {
        if name.len() > prefix.len() && name[..prefix.len()].eq_ignore_ascii_case(prefix) {
            return name.split_at(prefix.len());
        }
    }
    ("", name)
}

/// A value split into parts.
#[derive(Debug, Clone)]
pub struct Value<'a> {
    pub parts: Vec<Part<'a>>,
}

type NestedError<'i> = ParseError<'i, ()>;

impl<'a> Value<'a> {
    pub fn parse(text: &'a str) -> Self {
        let mut input = ParserInput::new(text);
        let mut parser = Parser::new(&mut input);
        let mut parts = Vec::new();
        let mut item: Option<(usize, usize, Kind)> = None;
        let mut tokens_in_item = 0;

        loop {
            let start = parser.position().byte_index();
            let token = match parser.next_including_whitespace() {
                Ok(token) => token.clone(),
                Err(_) => break,
            };
            if matches!(
                token,
                Token::Function(_)
                    | Token::ParenthesisBlock
                    | Token::SquareBracketBlock
                    | Token::CurlyBracketBlock
            ) {
                let _ = parser.parse_nested_block(|p| {
                    while p.next_including_whitespace_and_comments().is_ok() {}
                    Ok::<_, NestedError>(())
                });
            }
            let end = parser.position().byte_index();

            let separator = match token {
                Token::WhiteSpace(_) => Some(Role::Space),
                Token::Comma => Some(Role::Comma),
                Token::Delim('/') => Some(Role::Slash),
                _ => None,
            };
            match separator {
                Some(role) => {
                    flush(text, &mut parts, item.take(), tokens_in_item);
                    tokens_in_item = 0;
                    parts.push(Part {
                        text: &text[start..end],
                        role,
                    });
                }
                None => {
                    let kind = token_kind(&token);
                    item = Some(match item {
                        Some((item_start, _, first)) => (item_start, end, first),
                        None => (start, end, kind),
                    });
                    tokens_in_item += 1;
                }
            }
        }
        flush(text, &mut parts, item, tokens_in_item);
        Self { parts }
    }

    pub fn items(&self) -> impl Iterator<Item = (usize, &Part<'a>)> {
        self.parts.iter().enumerate().filter(|(_, part)| part.is_item())
    }

    pub fn item_indices(&self, range: Range<usize>) -> Vec<usize> {
        range.filter(|&i| self.parts[i].is_item()).collect()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.parts.iter().any(|part| part.role == role)
    }

    /// Part ranges between top-level commas.
    pub fn layers(&self) -> Vec<Range<usize>> {
        self.split_at_role(0..self.parts.len(), Role::Comma)
    }

    /// Part ranges of `range` between parts with the given role.
    pub fn split_at_role(&self, range: Range<usize>, role: Role) -> Vec<Range<usize>> {
        let mut out = Vec::new();
        let mut start = range.start;
        for i in range.clone() {
            if self.parts[i].role == role {
                out.push(start..i);
                start = i + 1;
            }
        }
        out.push(start..range.end);
        out
    }

    /// Start an edit buffer holding every part's original text.
    pub fn edit(&self) -> Edit<'a> {
        Edit {
            texts: self.parts.iter().map(|part| Cow::Borrowed(part.text)).collect(),
        }
    }
}

fn flush<'a>(
    text: &'a str,
    parts: &mut Vec<Part<'a>>,
    item: Option<(usize, usize, Kind)>,
    tokens: usize,
) {
    let Some((start, end, first)) = item else {
        return;
    };
    let slice = &text[start..end];
    let role = if is_protected_placeholder(slice) {
        Role::Space
    } else if is_calc_placeholder(slice) {
        Role::Item(Kind::Calc)
    } else if tokens == 1 {
        Role::Item(first)
    } else {
        Role::Item(Kind::Other)
    };
    parts.push(Part { text: slice, role });
}

fn token_kind(token: &Token<'_>) -> Kind {
    match token {
        Token::Ident(_) => Kind::Ident,
        Token::Number { .. } => Kind::Number,
        Token::Percentage { .. } => Kind::Percentage,
        Token::Dimension { .. } => Kind::Dimension,
        Token::UnquotedUrl(_) => Kind::Url,
        Token::Function(name) if name.eq_ignore_ascii_case("url") => Kind::Url,
        Token::Function(_) => Kind::Function,
        _ => Kind::Other,
    }
}

/// Replacement texts for the parts of a [`Value`].
#[derive(Debug, Clone)]
pub struct Edit<'a> {
    pub texts: Vec<Cow<'a, str>>,
}

impl<'a> Edit<'a> {
    pub fn set(&mut self, index: usize, text: impl Into<Cow<'a, str>>) {
        self.texts[index] = text.into();
    }

    pub fn get(&self, index: usize) -> &str {
        &self.texts[index]
    }

    pub fn finish(self) -> String {
        self.texts.concat()
    }
}

/// Split a numeric component into number text and unit text.
pub fn split_unit(text: &str) -> (&str, &str) {
    let end = text
        .char_indices()
        .find(|&(i, c)| {
            !(c.is_ascii_digit()
                || c == '.'
                || ((c == '-' || c == '+') && i == 0)
                || ((c == 'e' || c == 'E')
                    && text[i + 1..].starts_with(|n: char| n.is_ascii_digit())))
        })
        .map_or(text.len(), |(i, _)| i);
    text.split_at(end)
}

/// Numeric value of a number, percentage or dimension.
pub fn number(text: &str) -> Option<f64> {
    split_unit(text).0.parse().ok()
}

pub fn is_zero(text: &str) -> bool {
    number(text).is_some_and(|n| n == 0.0)
}

/// Negate a number, percentage, dimension or protected `calc()`.
///
/// Zero is returned unchanged. Other functions are wrapped in `calc()`.
pub fn flip_sign<'a>(part: &Part<'a>) -> Cow<'a, str> {
    let text = part.text;
    match part.role {
        Role::Item(Kind::Number | Kind::Percentage | Kind::Dimension) => {
            if is_zero(text) {
                Cow::Borrowed(text)
            } else if let Some(rest) = text.strip_prefix('-') {
                Cow::Borrowed(rest)
            } else if let Some(rest) = text.strip_prefix('+') {
                Cow::Owned(format!("-{rest}"))
            } else {
                Cow::Owned(format!("-{text}"))
            }
        }
        Role::Item(Kind::Calc) => match text.strip_prefix('-') {
            Some(rest) => Cow::Borrowed(rest),
            None => Cow::Owned(format!("-{text}")),
        },
        Role::Item(Kind::Function) => Cow::Owned(format!("calc(-1 * {text})")),
        _ => Cow::Borrowed(text),
    }
}

/// `100 - v` for a percentage, keeping the input's decimal places.
pub fn complement_percentage(text: &str) -> Option<String> {
    let digits = text.strip_suffix('%')?;
    let (negative, digits) = match digits.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, digits.strip_prefix('+').unwrap_or(digits)),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let scale = 10i128.checked_pow(fraction.len() as u32)?;
    let mut scaled: i128 = format!("{whole}{fraction}").parse().ok()?;
    if negative {
        scaled = -scaled;
    }
    let result = scale.checked_mul(100)?.checked_sub(scaled)?;

    let sign = if result < 0 { "-" } else { "" };
    let magnitude = result.unsigned_abs();
    let scale = scale as u128;
    if fraction.is_empty() {
        Some(format!("{sign}{magnitude}%"))
    } else {
        Some(format!(
            "{sign}{}.{:0width$}%",
            magnitude / scale,
            magnitude % scale,
            width = fraction.len()
        ))
    }
}

/// Format a number with at most `decimals` places, trimming trailing zeros.
pub fn format_number(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    };
    if text == "-0" { "0".to_string() } else { text }
}
