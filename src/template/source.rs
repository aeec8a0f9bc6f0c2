//! Where skeleton templates come from.
//!
//! Every language ships a default template compiled into the binary. A user may point `<language>.template-file`
//! at a replacement; an unreadable replacement degrades to the bundled default with a warning.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::profile::{LanguageId, Target};

/// Settings key (within the language namespace) holding a template override path.
pub const TEMPLATE_FILE_SETTING: &str = "template-file";

/// Errors raised while reading a template override.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("cannot read template '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Default template bundled for `language`.
pub fn bundled_template(language: LanguageId) -> &'static str {
    match language {
        LanguageId::Cpp => include_str!("../../assets/templates/cpp.tmpl"),
        LanguageId::Java => include_str!("../../assets/templates/java.tmpl"),
        LanguageId::CSharp => include_str!("../../assets/templates/csharp.tmpl"),
        LanguageId::VisualBasic => include_str!("../../assets/templates/vb.tmpl"),
        LanguageId::Python => include_str!("../../assets/templates/python.tmpl"),
    }
}

/// Read a template file from disk.
pub fn read_template(path: impl AsRef<Path>) -> Result<String, TemplateError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Template for the target language: the configured override when readable, else the bundled default.
pub fn load_template(target: Target<'_>) -> Cow<'static, str> {
    let bundled = bundled_template(target.profile.id());
    let path = target.setting_string(TEMPLATE_FILE_SETTING, "");
    if path.trim().is_empty() {
        return Cow::Borrowed(bundled);
    }
    match read_template(path.trim()) {
        Ok(text) => Cow::Owned(text),
        Err(err) => {
            tracing::warn!(error = %err, "falling back to the bundled template");
            Cow::Borrowed(bundled)
        }
    }
}
