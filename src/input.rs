use std::fs;
use std::path::Path;

use crate::error::Result;

/// Strip YAML frontmatter from the beginning of a template.
pub fn strip_frontmatter(template: &str) -> &str {
    if !template.starts_with("---") {
        return template;
    }
    // Find the closing ---
    if let Some(end) = template[3..].find("\n---") {
        let after_frontmatter = &template[3 + end + 4..];
        after_frontmatter.trim_start_matches(['\r', '\n'])
    } else {
        template
    }
}

/// Read a template file, dropping any frontmatter unless asked to keep it.
pub fn read_template(path: &Path, keep_frontmatter: bool) -> Result<String> {
    let content = fs::read_to_string(path)?;
    if keep_frontmatter {
        Ok(content)
    } else {
        Ok(strip_frontmatter(&content).to_string())
    }
}
