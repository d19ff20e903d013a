//! Command tags for executed statements.
//!
//! The driver only reports rows affected, so the tag PostgreSQL would send
//! (`CREATE TABLE`, `INSERT 0 3`, `SELECT 1` ...) is rebuilt from the text of
//! the last statement in the command.

/// Placeholder token for a parenthesised group at statement level.
const GROUP: &str = "()";

/// Object kinds spelled with more than one keyword.
const COMPOUND_OBJECTS: &[&[&str]] = &[
    &["FOREIGN", "DATA", "WRAPPER"],
    &["TEXT", "SEARCH", "CONFIGURATION"],
    &["TEXT", "SEARCH", "DICTIONARY"],
    &["TEXT", "SEARCH", "PARSER"],
    &["TEXT", "SEARCH", "TEMPLATE"],
    &["MATERIALIZED", "VIEW"],
    &["FOREIGN", "TABLE"],
    &["EVENT", "TRIGGER"],
    &["ACCESS", "METHOD"],
    &["USER", "MAPPING"],
    &["DEFAULT", "PRIVILEGES"],
    &["OPERATOR", "CLASS"],
    &["OPERATOR", "FAMILY"],
];

/// Words between `CREATE` and the object kind that never appear in the tag.
const CREATE_MODIFIERS: &[&str] = &[
    "OR",
    "REPLACE",
    "TEMP",
    "TEMPORARY",
    "UNLOGGED",
    "GLOBAL",
    "LOCAL",
    "UNIQUE",
    "RECURSIVE",
    "TRUSTED",
    "PROCEDURAL",
    "CONSTRAINT",
];

/// Build the PostgreSQL command tag for `sql`, given the rows affected by its
/// last statement.
///
/// `INSERT` carries the legacy OID column, so it renders as `INSERT 0 n`.
/// An empty command yields `OK`.
pub fn command_tag(sql: &str, rows_affected: u64) -> String {
    match split_statements(sql).last() {
        Some(tokens) => statement_tag(tokens, rows_affected),
        None => "OK".to_string(),
    }
}

fn statement_tag(tokens: &[String], rows: u64) -> String {
    let Some(verb) = tokens.first() else {
        return "OK".to_string();
    };

    match verb.as_str() {
        "INSERT" => format!("INSERT 0 {rows}"),
        "UPDATE" | "DELETE" | "MERGE" | "SELECT" | "COPY" | "MOVE" | "FETCH" => {
            format!("{verb} {rows}")
        }
        "VALUES" | "TABLE" => format!("SELECT {rows}"),
        "WITH" => match main_statement(tokens) {
            Some(start) => statement_tag(&tokens[start..], rows),
            None => format!("SELECT {rows}"),
        },
        "CREATE" => create_tag(&tokens[1..], rows),
        "ALTER" | "DROP" => match object_kind(&tokens[1..]) {
            Some(kind) => format!("{verb} {kind}"),
            None => verb.clone(),
        },
        "TRUNCATE" => "TRUNCATE TABLE".to_string(),
        "LOCK" => "LOCK TABLE".to_string(),
        "REFRESH" => "REFRESH MATERIALIZED VIEW".to_string(),
        "DECLARE" => "DECLARE CURSOR".to_string(),
        "CLOSE" if tokens.get(1).is_some_and(|t| t == "ALL") => "CLOSE CURSOR ALL".to_string(),
        "CLOSE" => "CLOSE CURSOR".to_string(),
        "START" => "START TRANSACTION".to_string(),
        "END" => "COMMIT".to_string(),
        "ABORT" => "ROLLBACK".to_string(),
        "DISCARD" => match tokens.get(1).map(String::as_str) {
            Some("TEMPORARY") => "DISCARD TEMP".to_string(),
            Some(what) => format!("DISCARD {what}"),
            None => "DISCARD".to_string(),
        },
        _ => verb.clone(),
    }
}

/// `CREATE TABLE ... AS` and `CREATE MATERIALIZED VIEW ... AS` report the
/// rows they wrote, like a `SELECT`.
fn create_tag(rest: &[String], rows: u64) -> String {
    let body: Vec<&String> = rest
        .iter()
        .skip_while(|t| CREATE_MODIFIERS.contains(&t.as_str()))
        .collect();

    let Some(kind) = object_kind(rest) else {
        return "CREATE".to_string();
    };

    let writes_rows = matches!(kind.as_str(), "TABLE" | "MATERIALIZED VIEW")
        && body.iter().any(|t| t.as_str() == "AS");
    if writes_rows {
        return format!("SELECT {rows}");
    }

    format!("CREATE {kind}")
}

/// Object kind named after `CREATE`/`ALTER`/`DROP`, with modifiers skipped
/// and `USER`/`GROUP` folded into `ROLE`.
fn object_kind(rest: &[String]) -> Option<String> {
    let words: Vec<&str> = rest
        .iter()
        .map(String::as_str)
        .skip_while(|t| CREATE_MODIFIERS.contains(t))
        .collect();

    if let Some(compound) = COMPOUND_OBJECTS
        .iter()
        .find(|compound| words.starts_with(compound))
    {
        return Some(compound.join(" "));
    }

    match *words.first()? {
        "USER" | "GROUP" => Some("ROLE".to_string()),
        GROUP => None,
        word => Some(word.to_string()),
    }
}

/// Index of the statement that follows the CTE list of a `WITH` statement.
fn main_statement(tokens: &[String]) -> Option<usize> {
    let is = |i: usize, word: &str| tokens.get(i).is_some_and(|t| t == word);

    let mut i = 1;
    if is(i, "RECURSIVE") {
        i += 1;
    }

    // Each pass starts on a CTE name:
    // name [ (columns) ] AS [ NOT ] [ MATERIALIZED ] ( body )
    loop {
        i += 1;
        if is(i, GROUP) {
            i += 1;
        }
        if !is(i, "AS") {
            return None;
        }
        i += 1;
        if is(i, "NOT") {
            i += 1;
        }
        if is(i, "MATERIALIZED") {
            i += 1;
        }
        if !is(i, GROUP) {
            return None;
        }
        i += 1;

        if is(i, ",") {
            i += 1;
            continue;
        }
        return (i < tokens.len()).then_some(i);
    }
}

/// Split a command into statements of upper-cased, statement-level tokens.
///
/// Quoted text and comments are skipped, and each top-level parenthesised
/// group collapses into a single `()` token. Empty statements are dropped.
fn split_statements(sql: &str) -> Vec<Vec<String>> {
    let chars: Vec<char> = sql.chars().collect();
    let mut statements = Vec::new();
    let mut tokens: Vec<String> = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match c {
            '-' if next == Some('-') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if next == Some('*') => {
                i = skip_block_comment(&chars, i);
            }
            '\'' | '"' => {
                let end = skip_quoted(&chars, i, c);
                if depth == 0 {
                    let text: String = chars[i..end].iter().collect();
                    tokens.push(text);
                }
                i = end;
            }
            '$' if dollar_tag(&chars, i).is_some() => {
                i = skip_dollar_quoted(&chars, i);
                if depth == 0 {
                    tokens.push("$$".to_string());
                }
            }
            '(' => {
                if depth == 0 {
                    tokens.push(GROUP.to_string());
                }
                depth += 1;
                i += 1;
            }
            ')' => {
                depth = depth.saturating_sub(1);
                i += 1;
            }
            ';' if depth == 0 => {
                if !tokens.is_empty() {
                    statements.push(std::mem::take(&mut tokens));
                }
                i += 1;
            }
            c if c.is_whitespace() => i += 1,
            c if is_word_char(c) => {
                let start = i;
                while i < chars.len() && is_word_char(chars[i]) {
                    i += 1;
                }
                if depth == 0 {
                    let word: String = chars[start..i].iter().collect();
                    tokens.push(word.to_ascii_uppercase());
                }
            }
            c => {
                if depth == 0 {
                    tokens.push(c.to_string());
                }
                i += 1;
            }
        }
    }

    if !tokens.is_empty() {
        statements.push(tokens);
    }
    statements
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '.')
}

/// End index (exclusive) of a quoted literal or identifier starting at
/// `start`. Doubled quotes are escapes.
fn skip_quoted(chars: &[char], start: usize, quote: char) -> usize {
    let mut i = start + 1;
    while i < chars.len() {
        if chars[i] == quote {
            if chars.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    chars.len()
}

fn skip_block_comment(chars: &[char], start: usize) -> usize {
    let mut i = start + 2;
    let mut nesting = 1;
    while i < chars.len() && nesting > 0 {
        match (chars[i], chars.get(i + 1)) {
            ('/', Some('*')) => {
                nesting += 1;
                i += 2;
            }
            ('*', Some('/')) => {
                nesting -= 1;
                i += 2;
            }
            _ => i += 1,
        }
    }
    i
}

/// The `$tag$` opening a dollar-quoted string at `start`, if any.
fn dollar_tag(chars: &[char], start: usize) -> Option<String> {
    let mut i = start + 1;
    while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
        i += 1;
    }
    let tag_starts_ok = chars
        .get(start + 1)
        .is_some_and(|c| *c == '$' || c.is_alphabetic() || *c == '_');
    if tag_starts_ok && chars.get(i) == Some(&'$') {
        Some(chars[start..=i].iter().collect())
    } else {
        None
    }
}

fn skip_dollar_quoted(chars: &[char], start: usize) -> usize {
    let Some(tag) = dollar_tag(chars, start) else {
        return start + 1;
    };
    let tag: Vec<char> = tag.chars().collect();
    let mut i = start + tag.len();
    while i + tag.len() <= chars.len() {
        if chars[i..i + tag.len()] == tag[..] {
            return i + tag.len();
        }
        i += 1;
    }
    chars.len()
}
