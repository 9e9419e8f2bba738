use anyhow::Result;
use std::path::Path;

/// Trait for flashcard tool abstraction
/// Implementations import a stored opening file as a card and must never
/// overwrite a card that already exists in the deck
pub trait FlashcardExporter: Send + Sync {
    /// Create cards from the given file
    fn add_from_file(&self, path: &Path) -> Result<()>;

    /// Get the exporter name (for logging/debugging)
    fn name(&self) -> &str;
}
