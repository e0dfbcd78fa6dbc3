//! Extended query syntax.
//!
//! | Token       | Matches when the field...          |
//! |-------------|------------------------------------|
//! | `jscript`   | fuzzy-matches `jscript`            |
//! | `=scheme`   | is exactly `scheme`                |
//! | `'python`   | contains `python`                  |
//! | `!ruby`     | does not contain `ruby`            |
//! | `^java`     | starts with `java`                 |
//! | `!^earlang` | does not start with `earlang`      |
//! | `.js$`      | ends with `.js`                    |
//! | `!.go$`     | does not end with `.go`            |
//!
//! Whitespace-separated tokens must all match (AND); ` | ` separates
//! alternatives (OR). Double quotes keep spaces inside a token: `="foo bar"`.

use super::score::fuzzy_score;
use super::SearchOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Fuzzy,
    Exact,
    Include,
    Inverse,
    Prefix,
    InversePrefix,
    Suffix,
    InverseSuffix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub op: Operator,
    /// Lower-cased term with operator characters and quotes removed.
    pub term: String,
}

impl Token {
    pub fn fuzzy(term: &str) -> Self {
        Self {
            op: Operator::Fuzzy,
            term: term.to_lowercase(),
        }
    }

    /// Score this token against an already lower-cased field. `None` means no match.
    pub fn score(&self, text: &str, options: &SearchOptions) -> Option<f64> {
        let term = self.term.as_str();
        let hit = match self.op {
            Operator::Fuzzy => return fuzzy_score(term, text, options),
            Operator::Exact => text == term,
            Operator::Include => text.contains(term),
            Operator::Inverse => !text.contains(term),
            Operator::Prefix => text.starts_with(term),
            Operator::InversePrefix => !text.starts_with(term),
            Operator::Suffix => text.ends_with(term),
            Operator::InverseSuffix => !text.ends_with(term),
        };
        hit.then_some(0.0)
    }
}

/// A parsed query: OR-groups of AND-ed tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub groups: Vec<Vec<Token>>,
}

impl Query {
    pub fn parse(input: &str) -> Self {
        let raw = split_tokens(input);
        let groups: Vec<Vec<Token>> = raw
            .split(|token| token == OR_SEPARATOR)
            .filter(|group| !group.is_empty())
            .map(|group| group.iter().map(|token| parse_token(token)).collect())
            .collect();

        if groups.is_empty() {
            // Nothing but separators: match the input literally.
            return Self {
                groups: vec![vec![Token::fuzzy(input)]],
            };
        }
        Self { groups }
    }

    /// Mean token score of the first group that fully matches `text`.
    pub fn score(&self, text: &str, options: &SearchOptions) -> Option<f64> {
        self.groups.iter().find_map(|tokens| {
            let mut total = 0.0;
            for token in tokens {
                total += token.score(text, options)?;
            }
            Some(total / tokens.len() as f64)
        })
    }
}

/// A lone unquoted `|` between whitespace starts a new OR-group.
const OR_SEPARATOR: &str = "|";

/// Split on whitespace that is not inside double quotes.
fn split_tokens(group: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in group.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn parse_token(raw: &str) -> Token {
    let (op, term) = if let Some(rest) = raw.strip_prefix('=') {
        (Operator::Exact, rest)
    } else if let Some(rest) = raw.strip_prefix("!^") {
        (Operator::InversePrefix, rest)
    } else if let Some(rest) = raw.strip_prefix('!') {
        match rest.strip_suffix('$') {
            Some(inner) => (Operator::InverseSuffix, inner),
            None => (Operator::Inverse, rest),
        }
    } else if let Some(rest) = raw.strip_prefix('^') {
        (Operator::Prefix, rest)
    } else if let Some(rest) = raw.strip_prefix('\'') {
        (Operator::Include, rest)
    } else if let Some(rest) = raw.strip_suffix('$') {
        (Operator::Suffix, rest)
    } else {
        (Operator::Fuzzy, raw)
    };

    Token {
        op,
        term: unquote(term).to_lowercase(),
    }
}

fn unquote(term: &str) -> &str {
    term.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(term)
}
