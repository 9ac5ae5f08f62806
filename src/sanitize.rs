//! Neutralises server-supplied text before it is put on screen.
//!
//! Reply text is untrusted. Terminal escape sequences could move the cursor,
//! recolour or clear the screen, so they are always removed. The chat server
//! also answers with small HTML fragments (`<strong>`, `<br>`, `<div>`); when
//! markup stripping is enabled those are flattened into plain lines.

const ESC: char = '\u{1b}';
const BEL: char = '\u{7}';

/// Returns the text that may be shown for a bot reply.
pub fn reply_text(raw: &str, strip_markup: bool) -> String {
    let mut text = strip_control(raw);
    if strip_markup {
        text = decode_entities(&flatten_markup(&text));
    }
    text.trim_end().to_string()
}

/// Removes escape sequences and control characters, keeping newlines and tabs.
pub fn strip_control(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ESC => match chars.peek().copied() {
                // CSI: parameters then a final byte in '@'..='~'
                Some('[') => {
                    chars.next();
                    for n in chars.by_ref() {
                        if ('@'..='~').contains(&n) {
                            break;
                        }
                    }
                }
                // OSC: terminated by BEL or ESC '\'
                Some(']') => {
                    chars.next();
                    while let Some(n) = chars.next() {
                        if n == BEL {
                            break;
                        }
                        if n == ESC {
                            if chars.peek() == Some(&'\\') {
                                chars.next();
                            }
                            break;
                        }
                    }
                }
                // Two-character sequence such as ESC D or ESC M
                Some(n) if ('@'..='_').contains(&n) => {
                    chars.next();
                }
                // A stray ESC; whatever follows is ordinary text
                _ => {}
            },
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    out.push('\n');
                }
            }
            '\n' | '\t' => out.push(c),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }

    out
}

/// Turns HTML fragments into plain lines. A `<` that does not open a tag is kept.
pub fn flatten_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        let opens_tag = candidate[1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!');
        let end = candidate.find('>');

        match (opens_tag, end) {
            (true, Some(end)) => {
                apply_tag(&candidate[1..end], &mut out);
                rest = &candidate[end + 1..];
            }
            _ => {
                out.push('<');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn apply_tag(tag: &str, out: &mut String) {
    let closing = tag.starts_with('/');
    let name: String = tag
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();

    match (name.as_str(), closing) {
        ("br", _) => out.push('\n'),
        ("div" | "p" | "li" | "tr", true) => out.push('\n'),
        ("div" | "p" | "li" | "tr", false) => {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
        }
        _ => {}
    }
}

/// Decodes the handful of entities the chat server produces.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        let decoded = candidate
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| entity(&candidate[1..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &candidate[end + 1..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" | "#39" => '\'',
        "nbsp" => ' ',
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or(name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)?
        }
    };

    (!c.is_control() || c == '\n' || c == '\t').then_some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_reply_is_unchanged() {
        assert_eq!(reply_text("Sunny, 22°C", true), "Sunny, 22°C");
        assert_eq!(reply_text("Hello! How can I assist?", false), "Hello! How can I assist?");
    }

    #[test]
    fn escape_sequences_are_removed() {
        let raw = "\u{1b}[2J\u{1b}[31mred\u{1b}[0m \u{1b}]0;title\u{7}done\u{8}";
        assert_eq!(strip_control(raw), "red done");
    }

    #[test]
    fn stray_escape_keeps_following_text() {
        assert_eq!(
            strip_control("line1\u{1b}\nline2 a\u{1b}bc"),
            "line1\nline2 abc"
        );
        assert_eq!(strip_control("\u{1b}Dclear \u{1b}Mup"), "clear up");
    }

    #[test]
    fn trailing_whitespace_lines_are_trimmed() {
        assert_eq!(reply_text("Sunny\t\n \t\n", false), "Sunny");
        assert_eq!(reply_text("Sunny<br>\t<br>", true), "Sunny");
    }

    #[test]
    fn carriage_returns_become_newlines() {
        assert_eq!(strip_control("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn forecast_markup_is_flattened() {
        let raw = "<strong>Weather forecast for oxford:</strong><br>\
                   <div>Today: 12.5°C, light rain</div>\
                   <div>Tomorrow: 14.1°C, clear sky</div>";
        assert_eq!(
            reply_text(raw, true),
            "Weather forecast for oxford:\nToday: 12.5°C, light rain\nTomorrow: 14.1°C, clear sky"
        );
    }

    #[test]
    fn markup_is_kept_literal_when_stripping_is_off() {
        assert_eq!(reply_text("<b>hi</b>", false), "<b>hi</b>");
    }

    #[test]
    fn lone_angle_brackets_survive() {
        assert_eq!(flatten_markup("2 < 3 and 5 > 4"), "2 < 3 and 5 > 4");
        assert_eq!(flatten_markup("unterminated <b"), "unterminated <b");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(
            decode_entities("Tom &amp; Jerry &lt;3 &#39;hi&#39; &#x41; &bogus; &"),
            "Tom & Jerry <3 'hi' A &bogus; &"
        );
    }

    #[test]
    fn encoded_control_characters_are_not_decoded() {
        assert_eq!(decode_entities("&#27;[2J"), "&#27;[2J");
    }
}
