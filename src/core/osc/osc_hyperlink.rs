// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Helper functions for creating OSC 8 hyperlink sequences.

use std::path::Path;

use super::osc_codes::OscSequence;

/// Creates an OSC 8 hyperlink sequence.
///
/// # Arguments
/// * `uri` - The URI/URL to link to (e.g., `<https://example.com>`, `<file:///path/to/file>`)
/// * `text` - The display text for the hyperlink
///
/// # Returns
/// A string containing the complete OSC 8 hyperlink sequence
///
/// # Example
/// ```
/// use vt_compositor::core::osc::osc_hyperlink::format_hyperlink;
/// let link = format_hyperlink("https://example.com", "Example");
/// assert_eq!(link, "\u{1b}]8;;https://example.com\u{7}Example\u{1b}]8;;\u{7}");
/// ```
#[must_use]
pub fn format_hyperlink(uri: &str, text: &str) -> String {
    let start = OscSequence::HyperlinkStart {
        uri: uri.to_string(),
        id: None,
    };
    let end = OscSequence::HyperlinkEnd;
    format!("{start}{text}{end}")
}

/// Creates an OSC 8 hyperlink for a file path.
///
/// This function converts a file path to a proper file:// URI and creates
/// a clickable hyperlink that will open the file in the default application
/// when clicked in a terminal that supports OSC 8.
///
/// # Arguments
/// * `path` - The file path to create a hyperlink for
///
/// # Returns
/// A string containing the OSC 8 hyperlink sequence for the file
///
/// # Example
/// ```
/// use vt_compositor::core::osc::osc_hyperlink::format_file_hyperlink;
/// use std::path::Path;
/// let path = Path::new("/home/user/document.txt");
/// let link = format_file_hyperlink(path);
/// // Result will be a clickable link showing the path
/// ```
#[must_use]
pub fn format_file_hyperlink(path: &Path) -> String {
    let display_text = path.display().to_string();

    // Convert path to file:// URI
    let uri = if path.is_absolute() {
        format!("file://{}", path.display())
    } else {
        // For relative paths, convert to absolute first.
        match std::env::current_dir().map(|cwd| cwd.join(path)) {
            Ok(abs_path) => format!("file://{}", abs_path.display()),
            Err(_) => format!("file://{}", path.display()), // Fallback
        }
    };

    // URL encode special characters in the URI.
    let encoded_uri = uri
        .chars()
        .map(|c| match c {
            ' ' => "%20".to_string(),
            '#' => "%23".to_string(),
            '?' => "%3F".to_string(),
            '&' => "%26".to_string(),
            '%' => "%25".to_string(),
            _ => c.to_string(),
        })
        .collect::<String>();

    format_hyperlink(&encoded_uri, &display_text)
}
