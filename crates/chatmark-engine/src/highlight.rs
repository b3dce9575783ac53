use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use thiserror::Error;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

static DEFAULT_HIGHLIGHTER: Lazy<Arc<SyntectHighlighter>> =
    Lazy::new(|| Arc::new(SyntectHighlighter::new()));

/// Class prefix on every highlighted span, e.g. `hljs-keyword`.
pub const CLASS_PREFIX: &str = "hljs-";

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("failed to load syntaxes from {path}: {source}")]
    LoadSyntaxes {
        path: PathBuf,
        source: syntect::LoadingError,
    },

    #[error("failed to highlight {language} code: {source}")]
    Highlight {
        language: String,
        source: syntect::Error,
    },
}

/// Turns a code fence body into highlighted HTML.
pub trait Highlighter: Send + Sync + fmt::Debug {
    fn highlight(&self, language: &str, code: &str) -> Result<String, HighlightError>;
}

/// The shared highlighter used when the caller supplies none.
pub fn default_highlighter() -> Arc<dyn Highlighter> {
    DEFAULT_HIGHLIGHTER.clone()
}

/// Class-based HTML highlighting over syntect's bundled grammars.
///
/// Languages syntect has no grammar for come out as escaped plain text.
#[derive(Default)]
pub struct SyntectHighlighter {
    custom: Option<SyntaxSet>,
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every `.sublime-syntax` file under `path` to the bundled set.
    pub fn with_syntaxes_from(path: &Path) -> Result<Self, HighlightError> {
        let mut builder = SyntaxSet::load_defaults_newlines().into_builder();
        builder
            .add_from_folder(path, true)
            .map_err(|source| HighlightError::LoadSyntaxes {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            custom: Some(builder.build()),
        })
    }

    fn syntaxes(&self) -> &SyntaxSet {
        self.custom.as_ref().unwrap_or(&SYNTAX_SET)
    }

    fn find_syntax(&self, language: &str) -> &SyntaxReference {
        let set = self.syntaxes();
        set.find_syntax_by_token(language)
            .or_else(|| set.find_syntax_by_extension(language))
            .unwrap_or_else(|| set.find_syntax_plain_text())
    }
}

impl fmt::Debug for SyntectHighlighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntectHighlighter")
            .field("syntaxes", &self.syntaxes().syntaxes().len())
            .finish()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, language: &str, code: &str) -> Result<String, HighlightError> {
        let syntax = self.find_syntax(language);
        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            self.syntaxes(),
            ClassStyle::SpacedPrefixed {
                prefix: CLASS_PREFIX,
            },
        );
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|source| HighlightError::Highlight {
                    language: language.to_string(),
                    source,
                })?;
        }
        Ok(generator.finalize())
    }
}
