//! WordprocessingML fragments and XML text escaping.

/// Escape text for element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters other than tab/newline are invalid in XML 1.0.
            c if (c as u32) < 0x20 && c != '\t' && c != '\n' && c != '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Reverse of [`escape`], plus numeric character references.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let Some(semi) = tail.find(';') else {
            out.push_str(tail);
            return out;
        };
        let entity = &tail[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };
        if let Some(c) = decoded {
            out.push(c);
            rest = &tail[semi + 1..];
        } else {
            out.push('&');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "both",
        }
    }
}

/// One `<w:p>` with a single run.
pub fn paragraph(text: &str, align: Align, bold: bool) -> String {
    let mut p = String::from("<w:p><w:pPr>");
    p.push_str(&format!("<w:jc w:val=\"{}\"/>", align.as_str()));
    p.push_str("</w:pPr>");
    if !text.is_empty() {
        p.push_str("<w:r>");
        if bold {
            p.push_str("<w:rPr><w:b/></w:rPr>");
        }
        p.push_str(&format!(
            "<w:t xml:space=\"preserve\">{}</w:t>",
            escape(text)
        ));
        p.push_str("</w:r>");
    }
    p.push_str("</w:p>");
    p
}

pub fn empty_paragraph() -> String {
    "<w:p/>".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a & b", "a &amp; b")]
    #[case("<w:t>", "&lt;w:t&gt;")]
    #[case("\"x\" 'y'", "&quot;x&quot; &apos;y&apos;")]
    #[case("ação", "ação")]
    #[case("bell\u{7}", "bell")]
    fn escaping(#[case] raw: &str, #[case] escaped: &str) {
        assert_eq!(escape(raw), escaped);
    }

    #[rstest]
    #[case("a &amp; b", "a & b")]
    #[case("&#233;&#xE9;", "éé")]
    #[case("AT&T", "AT&T")]
    #[case("&bogus; ok", "&bogus; ok")]
    fn unescaping(#[case] escaped: &str, #[case] raw: &str) {
        assert_eq!(unescape(escaped), raw);
    }

    #[test]
    fn paragraph_markup() {
        let p = paragraph("Título & cia", Align::Center, true);
        assert_eq!(
            p,
            "<w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr><w:r><w:rPr><w:b/></w:rPr>\
             <w:t xml:space=\"preserve\">Título &amp; cia</w:t></w:r></w:p>"
        );
        assert!(!paragraph("", Align::Left, false).contains("<w:r>"));
    }
}
