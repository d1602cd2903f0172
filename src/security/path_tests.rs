use super::PathSanitizer;

#[test]
fn test_plain_file_name() {
    let result = PathSanitizer::sanitize("latest_versions.json");
    assert_eq!(result.unwrap(), "latest_versions.json");
}

#[test]
fn test_nested_relative_name() {
    let result = PathSanitizer::sanitize("runs/2024/older_versions.json");
    assert_eq!(result.unwrap(), "runs/2024/older_versions.json");
}

#[test]
fn test_normalize_current_dir_markers() {
    let result = PathSanitizer::sanitize("./runs/./older.json");
    assert_eq!(result.unwrap(), "runs/older.json");
}

#[test]
fn test_reject_parent_directory_traversal() {
    let result = PathSanitizer::sanitize("../outside.json");
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Parent directory traversal")
    );
}

#[test]
fn test_reject_parent_in_middle() {
    let result = PathSanitizer::sanitize("runs/../../outside.json");
    assert!(result.is_err());
}

#[test]
fn test_reject_absolute_path() {
    let result = PathSanitizer::sanitize("/etc/passwd");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Absolute path"));
}

#[test]
fn test_reject_empty_name() {
    let result = PathSanitizer::sanitize("  ");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Empty file name"));
}

#[test]
fn test_reject_only_current_dir() {
    let result = PathSanitizer::sanitize("./.");
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("No valid components")
    );
}

#[test]
fn test_hidden_names_allowed() {
    let result = PathSanitizer::sanitize(".cache/older.json");
    assert_eq!(result.unwrap(), ".cache/older.json");
}
