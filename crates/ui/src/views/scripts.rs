use dioxus::document::eval;

pub(super) fn clipboard_script(text: &str) -> String {
    format!(
        r#"(function() {{
                    const text = {text:?};
                    if (navigator.clipboard && navigator.clipboard.writeText) {{
                        navigator.clipboard.writeText(text);
                        return;
                    }}
                    const area = document.createElement("textarea");
                    area.value = text;
                    document.body.appendChild(area);
                    area.select();
                    document.execCommand("copy");
                    area.remove();
                }})();"#
    )
}

/// Fire-and-forget copy; the webview gives no useful failure signal.
pub(super) fn copy_to_clipboard(text: &str) {
    let _ = eval(&clipboard_script(text));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipboard_script_quotes_the_text() {
        let script = clipboard_script("Name: \"Ada\"\nScore: 1/2");
        assert!(script.contains(r#"const text = "Name: \"Ada\"\nScore: 1/2";"#));
    }
}
