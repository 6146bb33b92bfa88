//! Environment layer of the settings
//!
//! Sets process-wide variables; must stay the only test in this binary.

use std::path::PathBuf;

use tempfile::TempDir;

use dashlayout::config::{local_config_path, Settings};

#[test]
fn given_dashlayout_env_vars_when_loading_then_they_override_files() {
    // Arrange
    let temp = TempDir::new().unwrap();
    std::fs::write(
        local_config_path(temp.path()),
        "backup = false\nlayout_file = \"local.json\"\n",
    )
    .unwrap();
    std::env::set_var("DASHLAYOUT_BACKUP", "true");
    std::env::set_var("DASHLAYOUT_SHOW_END_MARKERS", "true");
    std::env::set_var("DASHLAYOUT_LAYOUT_FILE", "from-env.json");

    // Act
    let settings = Settings::load(Some(temp.path()));

    std::env::remove_var("DASHLAYOUT_BACKUP");
    std::env::remove_var("DASHLAYOUT_SHOW_END_MARKERS");
    std::env::remove_var("DASHLAYOUT_LAYOUT_FILE");

    // Assert
    let settings = settings.unwrap();
    assert!(settings.backup);
    assert!(settings.show_end_markers);
    assert!(settings.pretty);
    assert_eq!(settings.layout_file, PathBuf::from("from-env.json"));
}
