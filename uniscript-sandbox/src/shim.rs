/// Script that reports uncaught errors and console output to the parent
/// window.
pub const ERROR_SHIM: &str = r#"
<script>
    window.onerror = function(message, source, lineno, colno, error) {
        window.parent.postMessage({type: 'error', msg: message, line: lineno}, '*');
    };
    console.log = function(msg) { window.parent.postMessage({type: 'log', msg: msg}, '*'); };
</script>
"#;

/// Insert [`ERROR_SHIM`] right after the first `<head>` tag.
///
/// Documents without a `<head>` tag are returned unchanged.
pub fn instrument(html: &str) -> String {
    html.replacen("<head>", &format!("<head>{ERROR_SHIM}"), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injects_after_first_head_only() {
        let html = "<html><head><title>x</title></head><body><head></body></html>";
        let out = instrument(html);
        assert!(out.starts_with(&format!("<html><head>{ERROR_SHIM}<title>")));
        assert_eq!(out.matches("window.onerror").count(), 1);
        assert!(out.ends_with("<body><head></body></html>"));
    }

    #[test]
    fn documents_without_head_are_untouched() {
        let html = "<p>fragment</p>";
        assert_eq!(instrument(html), html);
    }
}
