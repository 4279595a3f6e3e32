use crate::UtilsError;

/// Accepts only a single flat file name: no separators, traversal, null
/// bytes or drive letters.
pub fn validate_file_name(component: &str) -> Result<(), UtilsError> {
    if component.is_empty() {
        return Err(UtilsError::PathError("Empty file name".to_string()));
    }

    if component == "." || component == ".." {
        return Err(UtilsError::PathError(format!(
            "'{}' is not a file name (path traversal attempt)",
            component
        )));
    }

    if component.contains('/') || component.contains('\\') {
        return Err(UtilsError::PathError(
            "Path contains a directory separator".to_string(),
        ));
    }

    if component.contains('\0') {
        return Err(UtilsError::PathError("Path contains null byte".to_string()));
    }

    // Windows drive letters (C:, D:, etc.)
    if component.len() >= 2 && component.chars().nth(1) == Some(':') {
        return Err(UtilsError::PathError("Drive letters are not allowed".to_string()));
    }

    Ok(())
}
