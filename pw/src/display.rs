//! Pass-through for observing resolved text

use tracing::info;

/// Log `text` and hand it back unchanged
pub fn display(text: String) -> String {
    info!(len = text.len(), "display:\n{}", text);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_identity() {
        assert_eq!(display(String::new()), "");
        assert_eq!(display("The red cat\n{unresolved}".to_string()), "The red cat\n{unresolved}");
    }
}
