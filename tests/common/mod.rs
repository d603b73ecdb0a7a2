#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use student_roster::config::CONFIG_DIR_ENV;
use tempfile::TempDir;

/// Serialises tests that touch `ROSTER_CONFIG_DIR`.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Isolated config dir and data file inside a temp directory. Holds the env
/// mutex for its whole lifetime.
pub struct TestEnv {
    _lock: MutexGuard<'static, ()>,
    pub _tmp: TempDir,
    pub config_dir: PathBuf,
    pub data_file: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = TempDir::new().expect("TempDir");
        let config_dir = tmp.path().join("config");
        let data_file = tmp.path().join("data").join("students.txt");
        std::fs::create_dir_all(&config_dir).unwrap();
        let env = Self {
            _lock: lock,
            _tmp: tmp,
            config_dir,
            data_file,
        };
        env.write_config();
        env
    }

    /// Points `config.json` at this environment's data file.
    fn write_config(&self) {
        let config = serde_json::json!({
            "data_file": self.data_file.to_str().unwrap(),
            "log_filter": "debug",
        });
        std::fs::write(
            self.config_dir.join("config.json"),
            serde_json::to_string_pretty(&config).unwrap(),
        )
        .unwrap();
    }

    pub fn activate(&self) {
        std::env::set_var(CONFIG_DIR_ENV, &self.config_dir);
    }

    pub fn deactivate() {
        std::env::remove_var(CONFIG_DIR_ENV);
    }

    pub fn data_contents(&self) -> String {
        std::fs::read_to_string(&self.data_file).unwrap_or_default()
    }
}

/// Writes tab-delimited records: `(name, id, grade, department, score)`.
pub fn create_fixture_records(env: &TestEnv, records: &[(&str, i64, &str, &str, f32)]) {
    std::fs::create_dir_all(env.data_file.parent().unwrap()).unwrap();
    let content: String = records
        .iter()
        .map(|(name, id, grade, dept, score)| format!("{name}\t{id}\t{grade}\t{dept}\t{score}\n"))
        .collect();
    std::fs::write(&env.data_file, content).unwrap();
}
