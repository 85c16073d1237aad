//! Content-type guessing for resource files.

/// Content types the converter recognizes, with their file extensions.
/// The first extension listed for a type is the canonical one.
const MIME_TYPES: &[(&str, &[&str])] = &[
    ("image/png", &["png"]),
    ("image/jpeg", &["jpg", "jpeg"]),
    ("image/vnd-ms.dds", &["dds"]),
    ("text/plain", &["glsl", "vert", "vs", "frag", "fs", "txt"]),
];

/// Guess a content type from a filename's extension, case-insensitively.
/// Unrecognized extensions map to `application/octet-stream`.
pub fn guess_mime_type(filename: &str) -> &'static str {
    let lower = filename.to_lowercase();
    for (mime_type, extensions) in MIME_TYPES {
        for extension in *extensions {
            if lower.ends_with(extension)
                && lower[..lower.len() - extension.len()].ends_with('.')
            {
                return mime_type;
            }
        }
    }
    "application/octet-stream"
}

/// Reverse lookup: the canonical extension (with leading dot) for a
/// content type, or `.bin` if the type is unrecognized.
pub fn guess_file_extension(mime_type: &str) -> String {
    for (known, extensions) in MIME_TYPES {
        if *known == mime_type {
            return format!(".{}", extensions[0]);
        }
    }
    ".bin".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_are_case_insensitive() {
        assert_eq!(guess_mime_type("textures/foo.PNG"), "image/png");
        assert_eq!(guess_mime_type("photo.JpEg"), "image/jpeg");
        assert_eq!(guess_mime_type("shader.vert"), "text/plain");
        assert_eq!(guess_mime_type("cubemap.dds"), "image/vnd-ms.dds");
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        assert_eq!(guess_mime_type("geometry.bin"), "application/octet-stream");
        assert_eq!(guess_mime_type("no_extension"), "application/octet-stream");
        // A bare extension-looking name is not a match without its dot.
        assert_eq!(guess_mime_type("png"), "application/octet-stream");
        assert_eq!(guess_mime_type("sharpng"), "application/octet-stream");
    }

    #[test]
    fn extension_lookup_round_trips() {
        // For any recognized filename, the extension guessed back from its
        // mime type must be one of the extensions listed for that type.
        for name in ["a.png", "b.JPG", "c.jpeg", "d.dds", "e.frag", "f.TXT"] {
            let mime = guess_mime_type(name);
            let ext = guess_file_extension(mime);
            let (_, extensions) = MIME_TYPES
                .iter()
                .find(|(known, _)| *known == mime)
                .expect("recognized name must map to a table entry");
            assert!(extensions.contains(&&ext[1..]));
        }
    }

    #[test]
    fn unknown_mime_type_defaults_to_bin() {
        assert_eq!(guess_file_extension("application/octet-stream"), ".bin");
        assert_eq!(guess_file_extension("image/ktx2"), ".bin");
    }
}
