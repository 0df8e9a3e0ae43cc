use std::path::PathBuf;

use tempfile::TempDir;

/// Isolated filesystem holding skills, plans and config stores.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created temp directory: {data_path:?}");

        Self {
            temp_dir,
            data_path,
        }
    }

    /// Create a test file with content.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }

    /// Create a skill file under `skills/<dir>/SKILL.md`.
    #[must_use]
    pub fn create_skill(&self, dir: &str, content: &str) -> PathBuf {
        self.create_file(&format!("skills/{dir}/SKILL.md"), content)
    }

    /// Write a plan payload as pretty JSON.
    #[must_use]
    pub fn create_plan(&self, name: &str, plan: &serde_json::Value) -> PathBuf {
        let content = serde_json::to_string_pretty(plan).expect("Failed to serialize plan");
        self.create_file(&format!("plans/{name}.json"), &content)
    }

    #[must_use]
    pub fn skills_dir(&self) -> PathBuf {
        self.data_path.join("skills")
    }
}

impl Drop for UnitTestFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up temp directory: {:?}", self.data_path);
    }
}
