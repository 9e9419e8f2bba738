pub mod apy;
pub mod backend;

pub use apy::ApyExporter;
pub use backend::FlashcardExporter;

/// Exporter that records the files it was asked to import
#[cfg(test)]
pub(crate) mod testing {
    use anyhow::{Result, anyhow};
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use super::FlashcardExporter;

    #[derive(Default)]
    pub struct RecordingExporter {
        calls: Mutex<Vec<PathBuf>>,
        fail: bool,
    }

    impl RecordingExporter {
        pub fn failing() -> Self {
            RecordingExporter {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        pub fn calls(&self) -> Vec<PathBuf> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl FlashcardExporter for RecordingExporter {
        fn add_from_file(&self, path: &Path) -> Result<()> {
            self.calls.lock().unwrap().push(path.to_path_buf());
            if self.fail {
                return Err(anyhow!("import refused"));
            }
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }
}
