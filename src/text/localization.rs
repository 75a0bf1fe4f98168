use std::{collections::BTreeMap, path::Path};

/// Read the string for `image_index` from the dictionary at `path`.
///
/// The key is the decimal image index. Missing files, unparseable files and missing keys
/// all yield `None`; choosing the right language file is the resolver's job.
pub fn lookup(path: Option<&Path>, image_index: u32) -> Option<String> {
    let path = path?;
    let dict = read_dictionary(path)?;
    let value = dict.get(&image_index.to_string()).cloned();
    if value.is_none() {
        tracing::debug!(path = %path.display(), image_index, "no localized string for image");
    }
    value
}

/// Load a flat string dictionary from disk.
pub fn read_dictionary(path: &Path) -> Option<BTreeMap<String, String>> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "dictionary not readable");
            return None;
        }
    };
    let dict = parse_dictionary_bytes(&bytes);
    if dict.is_none() {
        tracing::debug!(path = %path.display(), "dictionary not parseable");
    }
    dict
}

/// Parse a dictionary file's raw bytes.
///
/// Binary and XML property lists go through `plist`; everything else is decoded as text
/// and handed to [`parse_dictionary`]. Non-string values are ignored.
pub fn parse_dictionary_bytes(bytes: &[u8]) -> Option<BTreeMap<String, String>> {
    if bytes.starts_with(b"bplist") {
        return parse_plist(bytes);
    }
    let text = decode_text(bytes)?;
    let trimmed = text.trim_start();
    if trimmed.starts_with("<?xml") || trimmed.starts_with("<!DOCTYPE") || trimmed.starts_with("<plist") {
        return parse_plist(trimmed.as_bytes());
    }
    parse_dictionary(&text)
}

fn parse_plist(bytes: &[u8]) -> Option<BTreeMap<String, String>> {
    let value = plist::Value::from_reader(std::io::Cursor::new(bytes)).ok()?;
    let dict = value.into_dictionary()?;
    Some(
        dict.into_iter()
            .filter_map(|(k, v)| v.into_string().map(|s| (k, s)))
            .collect(),
    )
}

/// Parse either a JSON object or a `"key" = "value";` strings table.
pub fn parse_dictionary(text: &str) -> Option<BTreeMap<String, String>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('{') {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(trimmed).ok()?;
        return Some(
            map.into_iter()
                .filter_map(|(k, v)| match v {
                    serde_json::Value::String(s) => Some((k, s)),
                    _ => None,
                })
                .collect(),
        );
    }
    StringsTable::new(trimmed).parse()
}

fn decode_text(bytes: &[u8]) -> Option<String> {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec()).ok(),
        _ => String::from_utf8(bytes.to_vec()).ok(),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes.chunks_exact(2).map(|c| unit([c[0], c[1]])).collect();
    String::from_utf16(&units).ok()
}

struct StringsTable<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> StringsTable<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars().peekable(),
        }
    }

    fn parse(mut self) -> Option<BTreeMap<String, String>> {
        let mut out = BTreeMap::new();
        loop {
            self.skip_trivia()?;
            if self.chars.peek().is_none() {
                return Some(out);
            }
            let key = self.token()?;
            self.skip_trivia()?;
            self.expect('=')?;
            self.skip_trivia()?;
            let value = self.token()?;
            self.skip_trivia()?;
            self.expect(';')?;
            out.insert(key, value);
        }
    }

    fn expect(&mut self, want: char) -> Option<()> {
        (self.chars.next()? == want).then_some(())
    }

    /// Skip whitespace and comments. `None` on an unterminated block comment.
    fn skip_trivia(&mut self) -> Option<()> {
        loop {
            match self.chars.peek().copied() {
                Some(c) if c.is_whitespace() => {
                    self.chars.next();
                }
                Some('/') => {
                    let mut look = self.chars.clone();
                    look.next();
                    match look.next() {
                        Some('/') => {
                            for c in self.chars.by_ref() {
                                if c == '\n' {
                                    break;
                                }
                            }
                        }
                        Some('*') => {
                            self.chars.next();
                            self.chars.next();
                            let mut prev = '\0';
                            loop {
                                let c = self.chars.next()?;
                                if prev == '*' && c == '/' {
                                    break;
                                }
                                prev = c;
                            }
                        }
                        _ => return Some(()),
                    }
                }
                _ => return Some(()),
            }
        }
    }

    fn token(&mut self) -> Option<String> {
        match self.chars.peek().copied()? {
            '"' => {
                self.chars.next();
                self.quoted()
            }
            _ => {
                let mut s = String::new();
                while let Some(&c) = self.chars.peek() {
                    if c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | '$' | '/' | ':') {
                        s.push(c);
                        self.chars.next();
                    } else {
                        break;
                    }
                }
                (!s.is_empty()).then_some(s)
            }
        }
    }

    fn quoted(&mut self) -> Option<String> {
        let mut s = String::new();
        loop {
            match self.chars.next()? {
                '"' => return Some(s),
                '\\' => match self.chars.next()? {
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    'r' => s.push('\r'),
                    other => s.push(other),
                },
                c => s.push(c),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/localization.rs"]
mod tests;
