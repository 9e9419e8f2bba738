use anyhow::Context;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::eco::EcoVolume;
use crate::flashcards::FlashcardExporter;

/// Opening errors
#[derive(Debug, thiserror::Error)]
pub enum OpeningError {
    #[error("Invalid opening identity {identity:?}: {reason}")]
    InvalidIdentity { identity: String, reason: &'static str },

    #[error("Opening '{identity}' is not stored yet. Store it before exporting it as a flashcard")]
    NotStored { identity: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Flashcard export failed: {0}")]
    Export(#[from] anyhow::Error),
}

/// Header telling the flashcard tool how to turn a stored opening into a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardTemplate {
    pub model: String,
    pub tags: String,
    pub deck: String,
    pub markdown: bool,
}

impl Default for CardTemplate {
    fn default() -> Self {
        CardTemplate {
            model: "Chessli Openings".to_string(),
            tags: "chess::openings".to_string(),
            deck: "Chessli::openings".to_string(),
            markdown: false,
        }
    }
}

impl CardTemplate {
    /// Metadata block placed at the top of every stored opening
    pub fn header(&self) -> String {
        format!(
            "model: {}\ntags: {}\ndeck: {}\nmarkdown: {}\n\n",
            self.model,
            self.tags,
            self.deck,
            if self.markdown { "True" } else { "False" }
        )
    }
}

/// Storage context an opening is created under
#[derive(Debug, Clone)]
pub struct OpeningContext {
    openings_dir: PathBuf,
    template: CardTemplate,
}

impl OpeningContext {
    pub fn new(openings_dir: PathBuf, template: CardTemplate) -> Self {
        OpeningContext {
            openings_dir,
            template,
        }
    }

    pub fn openings_dir(&self) -> &Path {
        &self.openings_dir
    }

    pub fn template(&self) -> &CardTemplate {
        &self.template
    }
}

/// Attributes rendered into an opening document, in output order
const FIELDS: [Field; 4] = [Field::Name, Field::Site, Field::Eco, Field::Moves];

#[derive(Debug, Clone, Copy)]
enum Field {
    Name,
    Site,
    Eco,
    Moves,
}

impl Field {
    fn title(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Site => "Site",
            Field::Eco => "Eco",
            Field::Moves => "Moves",
        }
    }
}

/// What `Opening::store` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// Written for the first time
    Stored,
    /// Already present and rewritten because the store was forced
    Overwritten,
    /// Already present, left untouched
    AlreadyKnown,
}

/// One opening seen in a game
#[derive(Debug, Clone)]
pub struct Opening {
    name: String,
    site: String,
    eco: String,
    moves: String,
    context: Arc<OpeningContext>,
}

impl Opening {
    /// Create an opening. The `(eco, name)` pair doubles as a file name, so
    /// both must be non-empty and free of path separators, and the ECO code
    /// must start with a volume letter (A-E).
    ///
    /// Surrounding whitespace is trimmed from `name` and `eco` first; the
    /// identity is built from the trimmed values.
    pub fn new(
        name: impl Into<String>,
        site: impl Into<String>,
        eco: impl Into<String>,
        moves: impl Into<String>,
        context: Arc<OpeningContext>,
    ) -> Result<Self, OpeningError> {
        let name: String = name.into();
        let eco: String = eco.into();
        let opening = Opening {
            name: name.trim().to_string(),
            site: site.into(),
            eco: eco.trim().to_string(),
            moves: moves.into(),
            context,
        };
        opening.validate()?;
        Ok(opening)
    }

    fn validate(&self) -> Result<(), OpeningError> {
        let reason = if self.eco.is_empty() {
            Some("ECO code is empty")
        } else if EcoVolume::from_code(&self.eco).is_none() {
            Some("ECO code does not start with a volume letter (A-E)")
        } else if self.name.is_empty() {
            Some("name is empty")
        } else if [&self.eco, &self.name]
            .iter()
            .any(|s| s.contains(['/', '\\', '\0']))
        {
            Some("contains a path separator")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(OpeningError::InvalidIdentity {
                identity: self.identity(),
                reason,
            }),
            None => Ok(()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn eco(&self) -> &str {
        &self.eco
    }

    pub fn moves(&self) -> &str {
        &self.moves
    }

    fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Site => &self.site,
            Field::Eco => &self.eco,
            Field::Moves => &self.moves,
        }
    }

    /// `"{eco} - {name}"`, used for display and as the file stem
    pub fn identity(&self) -> String {
        format!("{} - {}", self.eco, self.name)
    }

    /// Where this opening lives on disk
    pub fn path(&self) -> PathBuf {
        self.context
            .openings_dir()
            .join(format!("{}.md", self.identity()))
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Markdown document with one section per attribute
    pub fn render(&self) -> String {
        let mut md = String::from("# Opening\n");
        for field in FIELDS {
            md.push_str("## ");
            md.push_str(field.title());
            md.push('\n');
            md.push_str(self.field(field));
            md.push('\n');
        }
        md
    }

    /// Full file contents: card header followed by the rendered opening
    pub fn document(&self) -> String {
        format!("{}{}\n\n", self.context.template().header(), self.render())
    }

    /// Persist the opening unless it is already known. `force` rewrites it.
    pub fn store(&self, force: bool) -> Result<StoreOutcome, OpeningError> {
        let existed = self.exists();
        if existed && !force {
            log::info!(
                "Ignoring {}. You already know that opening :)",
                self.identity()
            );
            return Ok(StoreOutcome::AlreadyKnown);
        }

        log::info!("Storing opening: {}", self.identity());
        fs::create_dir_all(self.context.openings_dir())?;
        fs::write(self.path(), self.document())?;

        Ok(if existed {
            StoreOutcome::Overwritten
        } else {
            StoreOutcome::Stored
        })
    }

    /// Hand the stored file to the flashcard tool. The opening has to be
    /// stored first; the exporter is not called otherwise.
    pub fn export_to_flashcards(&self, exporter: &dyn FlashcardExporter) -> Result<(), OpeningError> {
        if !self.exists() {
            return Err(OpeningError::NotStored {
                identity: self.identity(),
            });
        }

        let path = self.path();
        exporter
            .add_from_file(&path)
            .with_context(|| format!("{} could not import {:?}", exporter.name(), path))?;
        log::debug!("Exported {} via {}", self.identity(), exporter.name());
        Ok(())
    }
}

impl fmt::Display for Opening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.eco, self.name)
    }
}

impl PartialEq for Opening {
    fn eq(&self, other: &Self) -> bool {
        self.eco == other.eco && self.name == other.name
    }
}

impl Eq for Opening {}
