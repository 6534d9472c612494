//! Content-type classification by file extension

/// Content type used for unknown extensions and names without one
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

const KNOWN_TYPES: &[(&str, &str)] = &[
    (".txt", "text/plain"),
    (".edi", "application/edi"),
    (".xml", "application/xml"),
    (".json", "application/json"),
];

/// Lowercased extension of the last path component, including the dot.
///
/// Returns an empty string when the name has no extension. Leading dots of
/// the file name do not start an extension, so `.env` has none.
pub fn extension(name: &str) -> String {
    let file_name = name.rsplit('/').next().unwrap_or(name);
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();

    match file_name[stem_start..].rfind('.') {
        Some(idx) => file_name[stem_start + idx..].to_lowercase(),
        None => String::new(),
    }
}

/// Map a blob name to its content type. Never fails.
pub fn classify(name: &str) -> &'static str {
    let ext = extension(name);
    KNOWN_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, content_type)| *content_type)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(classify("a.txt"), "text/plain");
        assert_eq!(classify("a.edi"), "application/edi");
        assert_eq!(classify("a.xml"), "application/xml");
        assert_eq!(classify("a.json"), "application/json");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("a.EDI"), "application/edi");
        assert_eq!(classify("Report.Json"), "application/json");
    }

    #[test]
    fn test_fallback_to_default() {
        assert_eq!(classify("a"), DEFAULT_CONTENT_TYPE);
        assert_eq!(classify("a.csv"), DEFAULT_CONTENT_TYPE);
        assert_eq!(classify(""), DEFAULT_CONTENT_TYPE);
        assert_eq!(classify(".json"), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("invoice-2024.edi"), ".edi");
        assert_eq!(extension("archive.tar.GZ"), ".gz");
        assert_eq!(extension("uploads/batch.v2/readme"), "");
        assert_eq!(extension("uploads/data.xml"), ".xml");
        assert_eq!(extension("trailing."), ".");
        assert_eq!(extension(".bashrc"), "");
        assert_eq!(extension("noext"), "");
    }

    #[test]
    fn test_container_paths() {
        assert_eq!(classify("samples-workitems/orders/po-17.xml"), "application/xml");
        assert_eq!(classify("samples-workitems/in.bound/notes"), "text/plain");
    }
}
