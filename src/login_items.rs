use std::path::Path;
use std::process::Command;

use objc2_foundation::NSBundle;

/// Whether the app bundle is currently in the OS login-items list.
/// Held by the app delegate and re-read from the OS on every toggle,
/// so a failed scripting call cannot desync the menu check mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Unregistered,
    Registered,
}

const LIST_SCRIPT: &str = r#"tell application "System Events"
    get the path of every login item
end tell"#;

/// Path of the running app bundle, the identity used for login items.
pub fn bundle_path() -> String {
    NSBundle::mainBundle().bundlePath().to_string()
}

/// Query the OS login-items list for the given bundle path.
pub fn current_state(bundle_path: &str) -> Result<LoginState, String> {
    let raw = run_osascript(LIST_SCRIPT)?;
    let paths = parse_item_list(&raw);
    if paths.iter().any(|p| p == bundle_path) {
        Ok(LoginState::Registered)
    } else {
        Ok(LoginState::Unregistered)
    }
}

/// Add the bundle to the login-items list.
pub fn register(bundle_path: &str) -> Result<(), String> {
    run_osascript(&add_script(bundle_path)).map(|_| ())
}

/// Remove the login item matching the bundle's basename.
pub fn unregister(bundle_path: &str) -> Result<(), String> {
    run_osascript(&remove_script(item_name(bundle_path))).map(|_| ())
}

fn add_script(bundle_path: &str) -> String {
    format!(
        r#"tell application "System Events"
    make login item at end with properties {{path: "{}", hidden:false}}
end tell"#,
        bundle_path
    )
}

fn remove_script(name: &str) -> String {
    format!(
        r#"tell application "System Events"
    delete login item "{}"
end tell"#,
        name
    )
}

/// System Events names login items after the bundle's last path component.
fn item_name(bundle_path: &str) -> &str {
    Path::new(bundle_path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(bundle_path)
}

/// osascript prints login item paths as one comma-separated line.
fn parse_item_list(raw: &str) -> Vec<String> {
    raw.trim()
        .split(", ")
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn run_osascript(script: &str) -> Result<String, String> {
    let output = Command::new("osascript")
        .arg("-e")
        .arg(script)
        .output()
        .map_err(|e| format!("failed to run osascript: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "osascript exited with {}: {}",
            output.status,
            stderr.trim()
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_empty_list() {
        assert!(parse_item_list("\n").is_empty());
        assert!(parse_item_list("").is_empty());
    }

    #[test]
    fn parses_single_item() {
        assert_eq!(
            parse_item_list("/Applications/Shotbar.app\n"),
            vec!["/Applications/Shotbar.app"]
        );
    }

    #[test]
    fn parses_multiple_items() {
        let raw = "/Applications/Shotbar.app, /Applications/Other.app\n";
        assert_eq!(
            parse_item_list(raw),
            vec!["/Applications/Shotbar.app", "/Applications/Other.app"]
        );
    }

    #[test]
    fn item_name_is_bundle_basename() {
        assert_eq!(item_name("/Applications/Shotbar.app"), "Shotbar.app");
        assert_eq!(item_name("Shotbar.app"), "Shotbar.app");
    }

    #[test]
    fn add_script_embeds_path() {
        let script = add_script("/Applications/Shotbar.app");
        assert!(script.contains(r#"path: "/Applications/Shotbar.app""#));
        assert!(script.contains("make login item at end"));
    }

    #[test]
    fn remove_script_embeds_name() {
        let script = remove_script("Shotbar.app");
        assert!(script.contains(r#"delete login item "Shotbar.app""#));
    }
}
