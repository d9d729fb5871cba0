//! Inline markup parser for rich text sections.
//!
//! The authoring dialect is deliberately tiny and hand-parsed: `**bold**`,
//! `*italic*`, `![alt](url)` embeds, and line prefixes `• ` / `1. ` for
//! lists. It is not markdown - bullet lines use the literal `• ` glyph the
//! editor's toolbar inserts - so a general-purpose markdown crate would
//! accept the wrong grammar.

/// Escapes text for safe interpolation into HTML body or attribute
/// positions.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders authored rich text content to display markup.
///
/// Line-oriented: consecutive `• ` lines become one `<ul>`, consecutive
/// `N. ` lines one `<ol>`, a line that is exactly an image embed becomes a
/// standalone `<img>`, anything else a `<p>`. Blank lines close the open
/// list.
pub fn render_rich_text(content: &str) -> String {
    #[derive(PartialEq)]
    enum ListState {
        None,
        Bullet,
        Numbered,
    }

    let mut out = String::new();
    let mut list = ListState::None;

    let close_list = |out: &mut String, list: &mut ListState| {
        match list {
            ListState::Bullet => out.push_str("</ul>\n"),
            ListState::Numbered => out.push_str("</ol>\n"),
            ListState::None => {}
        }
        *list = ListState::None;
    };

    for line in content.lines() {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            close_list(&mut out, &mut list);
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("\u{2022} ") {
            if list != ListState::Bullet {
                close_list(&mut out, &mut list);
                out.push_str("<ul>\n");
                list = ListState::Bullet;
            }
            out.push_str(&format!("<li>{}</li>\n", render_inline(item)));
            continue;
        }

        if let Some(item) = strip_numbered_prefix(trimmed) {
            if list != ListState::Numbered {
                close_list(&mut out, &mut list);
                out.push_str("<ol>\n");
                list = ListState::Numbered;
            }
            out.push_str(&format!("<li>{}</li>\n", render_inline(item)));
            continue;
        }

        close_list(&mut out, &mut list);

        if let Some((alt, url, rest)) = parse_image_embed(trimmed) {
            if rest.trim().is_empty() {
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\">\n",
                    escape(url),
                    escape(alt)
                ));
                continue;
            }
        }

        out.push_str(&format!("<p>{}</p>\n", render_inline(trimmed)));
    }

    close_list(&mut out, &mut list);
    out
}

/// Renders one line's inline spans: `**bold**`, `*italic*`, `![alt](url)`.
/// Unmatched markers fall through as literal text.
pub fn render_inline(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::new();
    let mut plain = String::new();
    let mut i = 0;

    let flush = |plain: &mut String, out: &mut String| {
        if !plain.is_empty() {
            out.push_str(&escape(plain));
            plain.clear();
        }
    };

    while i < chars.len() {
        // ![alt](url)
        if chars[i] == '!' && i + 1 < chars.len() && chars[i + 1] == '[' {
            let rest: String = chars[i..].iter().collect();
            if let Some((alt, url, consumed)) = parse_image_embed_prefix(&rest) {
                flush(&mut plain, &mut out);
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\">",
                    escape(url),
                    escape(alt)
                ));
                i += consumed;
                continue;
            }
        }

        // **bold**
        if chars[i] == '*' && i + 1 < chars.len() && chars[i + 1] == '*' {
            if let Some(end) = find_marker(&chars, i + 2, &['*', '*']) {
                let inner: String = chars[i + 2..end].iter().collect();
                flush(&mut plain, &mut out);
                out.push_str(&format!("<strong>{}</strong>", escape(&inner)));
                i = end + 2;
                continue;
            }
        }

        // *italic* - empty emphasis stays literal so `**` pairs without a
        // closing pair don't collapse into <em></em>
        if chars[i] == '*' {
            if let Some(end) = find_marker(&chars, i + 1, &['*']) {
                if end > i + 1 {
                    let inner: String = chars[i + 1..end].iter().collect();
                    flush(&mut plain, &mut out);
                    out.push_str(&format!("<em>{}</em>", escape(&inner)));
                    i = end + 1;
                    continue;
                }
            }
        }

        plain.push(chars[i]);
        i += 1;
    }

    flush(&mut plain, &mut out);
    out
}

/// Strips a `N. ` prefix (one or more digits, dot, space), if present.
fn strip_numbered_prefix(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    rest.strip_prefix(". ")
}

/// Parses a leading `![alt](url)`; returns (alt, url, chars consumed).
fn parse_image_embed_prefix(text: &str) -> Option<(&str, &str, usize)> {
    let after_bang = text.strip_prefix("![")?;
    let close_bracket = after_bang.find(']')?;
    let alt = &after_bang[..close_bracket];
    let after_alt = &after_bang[close_bracket + 1..];
    let after_paren = after_alt.strip_prefix('(')?;
    let close_paren = after_paren.find(')')?;
    let url = &after_paren[..close_paren];

    let consumed_bytes = 2 + close_bracket + 2 + close_paren + 1;
    let consumed_chars = text[..consumed_bytes].chars().count();
    Some((alt, url, consumed_chars))
}

/// Parses an image embed at the start of a line; returns (alt, url, rest).
fn parse_image_embed(line: &str) -> Option<(&str, &str, &str)> {
    let (alt, url, consumed_chars) = parse_image_embed_prefix(line)?;
    let consumed_bytes: usize = line
        .char_indices()
        .nth(consumed_chars)
        .map(|(b, _)| b)
        .unwrap_or(line.len());
    Some((alt, url, &line[consumed_bytes..]))
}

/// Finds the next occurrence of `marker` at or after `from`.
fn find_marker(chars: &[char], from: usize, marker: &[char]) -> Option<usize> {
    if chars.len() < marker.len() {
        return None;
    }
    (from..=chars.len() - marker.len()).find(|&i| &chars[i..i + marker.len()] == marker)
}
