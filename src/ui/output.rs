use stagehand::config::ConfigWarning;

pub fn format_config_warning(w: &ConfigWarning) -> String {
    let mut out = match w.line {
        Some(line) => format!(
            "Warning: unknown config key '{}' in {}:{}\n",
            w.key,
            w.file.display(),
            line
        ),
        None => format!(
            "Warning: unknown config key '{}' in {}\n",
            w.key,
            w.file.display()
        ),
    };

    if let Some(suggestion) = &w.suggestion {
        out.push_str(&format!("   Did you mean '{}'?\n", suggestion));
    }
    out
}

pub fn print_config_warnings(warnings: &[ConfigWarning], json: bool) {
    for w in warnings {
        if json {
            let _ = crate::ui::json::emit(serde_json::json!({
                "event": "config_warning",
                "key": w.key,
                "file": w.file.display().to_string(),
                "line": w.line,
                "suggestion": w.suggestion,
            }));
        } else {
            eprint!("{}", format_config_warning(w));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn warning_with_suggestion() {
        let w = ConfigWarning {
            key: "bucket".into(),
            file: PathBuf::from("stagehand.toml"),
            line: Some(6),
            suggestion: Some("buckets".into()),
        };
        insta::assert_snapshot!(format_config_warning(&w), @r"
        Warning: unknown config key 'bucket' in stagehand.toml:6
           Did you mean 'buckets'?
        ");
    }
}
