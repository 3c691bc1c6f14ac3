//! The CSS selector subset used by the page.
//!
//! Supported: type (`section`, `*`), id (`#nav-toggle`), class (`.nav-link`),
//! attribute presence (`[id]`), attribute equality (`[href="#about"]`), any
//! compound of those, and the descendant combinator (whitespace). That covers
//! every selector the controllers issue; the browser shim hands selectors to
//! `querySelector` instead.

/// Read access to one element, as needed for matching.
pub trait ElementView {
    fn tag(&self) -> &str;
    fn attr(&self, name: &str) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

impl Compound {
    fn matches<E: ElementView + ?Sized>(&self, el: &E) -> bool {
        if let Some(tag) = &self.tag {
            if !el.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|(name, expected)| match (el.attr(name), expected) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
        })
    }
}

/// A parsed selector: compounds joined by descendant combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<Compound>,
}

impl Selector {
    /// Parses `input`, returning `None` for anything outside the subset.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let parts = split_descendants(input)?
            .iter()
            .map(|raw| parse_compound(raw))
            .collect::<Option<Vec<_>>>()?;

        if parts.is_empty() {
            return None;
        }
        Some(Self { parts })
    }

    /// Whether `el`, with `ancestors` ordered nearest first, matches.
    pub fn matches<E: ElementView + ?Sized>(&self, el: &E, ancestors: &[&E]) -> bool {
        let Some((last, rest)) = self.parts.split_last() else {
            return false;
        };
        if !last.matches(el) {
            return false;
        }

        let mut remaining = rest.iter().rev().peekable();
        for ancestor in ancestors {
            match remaining.peek() {
                Some(part) if part.matches(*ancestor) => {
                    remaining.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        remaining.peek().is_none()
    }
}

fn split_descendants(input: &str) -> Option<Vec<String>> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut bracket = false;
    let mut quote: Option<char> = None;

    for c in input.trim().chars() {
        match (c, quote, bracket) {
            (q, Some(open), _) if q == open => {
                quote = None;
                current.push(c);
            }
            (_, Some(_), _) => current.push(c),
            ('"' | '\'', None, true) => {
                quote = Some(c);
                current.push(c);
            }
            ('[', None, false) => {
                bracket = true;
                current.push(c);
            }
            (']', None, true) => {
                bracket = false;
                current.push(c);
            }
            (c, None, false) if c.is_whitespace() => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            (',' | '>' | '+' | '~' | ':', None, false) => return None,
            _ => current.push(c),
        }
    }

    if quote.is_some() || bracket {
        return None;
    }
    if !current.is_empty() {
        parts.push(current);
    }
    Some(parts)
}

const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &[char], pos: &mut usize) -> Option<String> {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    (*pos > start).then(|| chars[start..*pos].iter().collect())
}

fn parse_compound(raw: &str) -> Option<Compound> {
    let chars: Vec<char> = raw.chars().collect();
    let mut pos = 0;
    let mut compound = Compound::default();

    if chars.first() == Some(&'*') {
        pos = 1;
    } else if chars.first().copied().is_some_and(is_ident_char) {
        compound.tag = take_ident(&chars, &mut pos);
    }

    while pos < chars.len() {
        let c = chars[pos];
        pos += 1;
        match c {
            '#' => compound.id = Some(take_ident(&chars, &mut pos)?),
            '.' => compound.classes.push(take_ident(&chars, &mut pos)?),
            '[' => compound.attrs.push(parse_attribute(&chars, &mut pos)?),
            _ => return None,
        }
    }

    Some(compound)
}

fn parse_attribute(chars: &[char], pos: &mut usize) -> Option<(String, Option<String>)> {
    let name = take_ident(chars, pos)?;

    match chars.get(*pos)? {
        ']' => {
            *pos += 1;
            Some((name, None))
        }
        '=' => {
            *pos += 1;
            let value = match chars.get(*pos)? {
                q @ ('"' | '\'') => {
                    let close = chars[*pos + 1..].iter().position(|c| c == q)? + *pos + 1;
                    let value: String = chars[*pos + 1..close].iter().collect();
                    *pos = close + 1;
                    value
                }
                _ => take_ident(chars, pos)?,
            };
            if chars.get(*pos) != Some(&']') {
                return None;
            }
            *pos += 1;
            Some((name, Some(value)))
        }
        _ => None,
    }
}
