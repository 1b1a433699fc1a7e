use crossterm::style::Stylize;
use stagehand::DeployError;

pub fn format_error(err: &anyhow::Error, color: bool) -> String {
    let Some(deploy) = err.downcast_ref::<DeployError>() else {
        return paint(format!("[ERROR] {:#}\n", err), color);
    };

    match deploy {
        DeployError::Aborted => "Aborted.\n".to_string(),
        DeployError::MissingPrecondition { missing } => {
            let mut out = paint("[ERROR] missing required settings\n".to_string(), color);
            for field in missing {
                out.push_str(&format!("  - '{}' is not set", field.name));
                if !field.provided_by.is_empty() {
                    out.push_str(&format!("; use {}", field.provided_by.join(" or ")));
                }
                out.push('\n');
            }
            out
        }
        DeployError::UploadFailed { failures } => {
            let mut out = paint(
                format!("[ERROR] upload failed for {} bucket(s)\n", failures.len()),
                color,
            );
            for failure in failures {
                out.push_str(&format!("  - {}: {}\n", failure.bucket, failure.message));
            }
            out
        }
        other => paint(format!("[ERROR] {}\n", other), color),
    }
}

fn paint(text: String, color: bool) -> String {
    if color {
        text.red().to_string()
    } else {
        text
    }
}

pub fn print_error(err: &anyhow::Error, json: bool, color: bool) {
    if json {
        let mut output = serde_json::json!({
            "event": "error",
            "message": format!("{:#}", err),
        });
        if let Some(deploy) = err.downcast_ref::<DeployError>() {
            output["aborted"] = serde_json::Value::Bool(matches!(deploy, DeployError::Aborted));
            if let Some(code) = deploy.exit_code() {
                output["exit_code"] = serde_json::json!(code);
            }
        }
        let _ = crate::ui::json::emit(output);
        return;
    }

    eprint!("{}", format_error(err, color));
}
