/// Escape text for XML element content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Quote a CSV field when it holds a comma, quote or newline.
pub fn escape_csv(text: &str) -> String {
    if text.contains([',', '"', '\n']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Escape text for a JSON string literal body.
pub fn escape_json(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_entities() {
        assert_eq!(
            escape_xml(r#"Tom & "Jerry" <run> 'fast'"#),
            "Tom &amp; &quot;Jerry&quot; &lt;run&gt; &apos;fast&apos;"
        );
        assert_eq!(escape_xml("&amp;"), "&amp;amp;");
    }

    #[test]
    fn csv_quotes_only_when_needed() {
        assert_eq!(escape_csv("Chaoyang District"), "Chaoyang District");
        assert_eq!(escape_csv("Beijing, China"), "\"Beijing, China\"");
        assert_eq!(escape_csv("the \"park\""), "\"the \"\"park\"\"\"");
        assert_eq!(escape_csv("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(escape_csv(""), "");
    }

    #[test]
    fn json_control_characters() {
        assert_eq!(escape_json("a\\b\"c\n\r\t"), "a\\\\b\\\"c\\n\\r\\t");
        assert_eq!(escape_json("plain"), "plain");
    }
}
