//! Stored paths for uploaded files.
//!
//! Only the path that ends up in the database is resolved here; where the
//! bytes live is up to whichever storage backend the caller uses.

use db_migration::event_image;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadPathError {
    #[error("Could not derive a valid file name from {0:?}")]
    InvalidName(String),
    #[error("Upload path does not fit in {max_length} characters")]
    TooLong { max_length: usize },
}

/// A column that stores a reference to an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadField {
    pub name: &'static str,
    /// Namespace every stored path starts with, e.g. `events/`.
    pub upload_to: &'static str,
    pub help_text: &'static str,
    pub max_length: usize,
}

pub const EVENT_IMAGE: UploadField = UploadField {
    name: event_image::COLUMN,
    upload_to: event_image::UPLOAD_TO,
    help_text: event_image::HELP_TEXT,
    max_length: event_image::MAX_LENGTH as usize,
};

impl UploadField {
    /// Resolve the path stored for an upload named `filename`.
    ///
    /// Directory components of `filename` are discarded. When the result is
    /// longer than `max_length` the file stem is shortened and the extension
    /// kept.
    pub fn generate_path(&self, filename: &str) -> Result<String, UploadPathError> {
        let name = valid_file_name(filename)?;
        let path = self.join(&name);
        let len = path.chars().count();
        if len <= self.max_length {
            return Ok(path);
        }

        let overflow = len - self.max_length;
        let (stem, extension) = split_extension(&name);
        let stem_len = stem.chars().count();
        if overflow >= stem_len {
            return Err(UploadPathError::TooLong {
                max_length: self.max_length,
            });
        }

        let truncated: String = stem.chars().take(stem_len - overflow).collect();
        Ok(self.join(&format!("{truncated}{extension}")))
    }

    /// Whether `path` names a single file directly under this field's namespace.
    pub fn owns(&self, path: &str) -> bool {
        match path.strip_prefix(self.upload_to) {
            Some(rest) => !rest.is_empty() && !rest.contains('/') && rest != "." && rest != "..",
            None => false,
        }
    }

    fn join(&self, name: &str) -> String {
        if self.upload_to.is_empty() || self.upload_to.ends_with('/') {
            format!("{}{name}", self.upload_to)
        } else {
            format!("{}/{name}", self.upload_to)
        }
    }
}

/// Reduce an uploaded file name to `[-_.[:alnum:]]`, spaces becoming `_`.
pub fn valid_file_name(filename: &str) -> Result<String, UploadPathError> {
    let base = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);

    let cleaned: String = base
        .trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return Err(UploadPathError::InvalidName(filename.to_string()));
    }
    Ok(cleaned)
}

fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_image_field_metadata() {
        assert_eq!(EVENT_IMAGE.name, "image");
        assert_eq!(EVENT_IMAGE.upload_to, "events/");
        assert_eq!(EVENT_IMAGE.help_text, "Event image");
        assert_eq!(EVENT_IMAGE.max_length, 100);
    }

    #[test]
    fn generate_path_places_file_under_events() {
        assert_eq!(
            EVENT_IMAGE.generate_path("poster.png").unwrap(),
            "events/poster.png"
        );
        assert_eq!(
            EVENT_IMAGE.generate_path("  Open Day 2025!.JPG ").unwrap(),
            "events/Open_Day_2025.JPG"
        );
    }

    #[test]
    fn generate_path_drops_directory_components() {
        assert_eq!(
            EVENT_IMAGE.generate_path("../../etc/passwd").unwrap(),
            "events/passwd"
        );
        assert_eq!(
            EVENT_IMAGE.generate_path(r"C:\Users\staff\banner.webp").unwrap(),
            "events/banner.webp"
        );
    }

    #[test]
    fn generate_path_rejects_names_without_usable_characters() {
        for name in ["", "   ", "..", "uploads/", "***"] {
            assert_eq!(
                EVENT_IMAGE.generate_path(name),
                Err(UploadPathError::InvalidName(name.to_string())),
                "{name:?}"
            );
        }
    }

    #[test]
    fn generate_path_truncates_stem_to_fit() {
        let long_name = format!("{}.jpeg", "a".repeat(150));
        let path = EVENT_IMAGE.generate_path(&long_name).unwrap();

        assert_eq!(path.chars().count(), EVENT_IMAGE.max_length);
        assert!(path.starts_with("events/aaa"));
        assert!(path.ends_with("a.jpeg"));
    }

    #[test]
    fn generate_path_fails_when_extension_alone_is_too_long() {
        let name = format!("x.{}", "e".repeat(120));
        assert_eq!(
            EVENT_IMAGE.generate_path(&name),
            Err(UploadPathError::TooLong { max_length: 100 })
        );
    }

    #[test]
    fn owns_only_direct_children_of_namespace() {
        assert!(EVENT_IMAGE.owns("events/poster.png"));
        assert!(!EVENT_IMAGE.owns("events/"));
        assert!(!EVENT_IMAGE.owns("events/../secret.png"));
        assert!(!EVENT_IMAGE.owns("news/poster.png"));
    }

    #[test]
    fn join_adds_separator_when_namespace_lacks_one() {
        let field = UploadField {
            name: "logo",
            upload_to: "branding",
            help_text: "Logo",
            max_length: 100,
        };
        assert_eq!(field.generate_path("logo.svg").unwrap(), "branding/logo.svg");
    }
}
