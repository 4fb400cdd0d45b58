use ecow::EcoString;
use smallvec::SmallVec;

use super::MemoryError;

/// One step of a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Property lookup: `name`, `['name']` or `["name"]`.
    Key(EcoString),
    /// Array element: `[3]`.
    Index(usize),
}

/// Split a path like `a.b[0]['c.d']` into segments.
///
/// The first segment may be an index (`[0].name`) so that memories rooted at
/// an array can be addressed.
pub fn parse_path(path: &str) -> Result<SmallVec<[PathSegment; 4]>, MemoryError> {
    let invalid = |reason: &'static str| MemoryError::InvalidPath {
        path: path.into(),
        reason,
    };

    let chars: SmallVec<[char; 32]> = path.chars().collect();
    if chars.is_empty() {
        return Err(invalid("path is empty"));
    }

    let mut segments = SmallVec::new();
    let mut i = 0;
    loop {
        let start = i;
        while i < chars.len() && chars[i] != '.' && chars[i] != '[' {
            if chars[i] == ']' {
                return Err(invalid("']' without a matching '['"));
            }
            i += 1;
        }
        if i > start {
            segments.push(PathSegment::Key(chars[start..i].iter().copied().collect()));
        } else if !(start == 0 && chars.get(i) == Some(&'[')) {
            return Err(invalid("empty segment"));
        }

        while chars.get(i) == Some(&'[') {
            i += 1;
            match chars.get(i) {
                Some(&quote) if quote == '\'' || quote == '"' => {
                    i += 1;
                    let key_start = i;
                    while i < chars.len() && chars[i] != quote {
                        i += 1;
                    }
                    if i == chars.len() {
                        return Err(invalid("unterminated quoted key"));
                    }
                    segments.push(PathSegment::Key(chars[key_start..i].iter().copied().collect()));
                    i += 1;
                }
                _ => {
                    let digits_start = i;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                    if i == digits_start {
                        return Err(invalid("index must be a non-negative integer"));
                    }
                    let digits: alloc::string::String = chars[digits_start..i].iter().collect();
                    let index = digits
                        .parse::<usize>()
                        .map_err(|_| invalid("index is too large"))?;
                    segments.push(PathSegment::Index(index));
                }
            }
            if chars.get(i) != Some(&']') {
                return Err(invalid("missing ']'"));
            }
            i += 1;
        }

        match chars.get(i) {
            None => break,
            Some('.') => {
                i += 1;
                if i == chars.len() {
                    return Err(invalid("empty segment"));
                }
            }
            Some(_) => return Err(invalid("unexpected character after ']'")),
        }
    }

    Ok(segments)
}
