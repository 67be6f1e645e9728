use std::process::Command;

#[allow(deprecated)]
use objc2_core_graphics::CGWindowListCreateImage;
use objc2_app_kit::{NSAlert, NSAlertFirstButtonReturn, NSModalResponse};
use objc2_core_foundation::{CGPoint, CGRect, CGSize};
use objc2_core_graphics::{CGWindowID, CGWindowImageOption, CGWindowListOption};
use objc2_foundation::{MainThreadMarker, NSString};

const PRIVACY_PANE_URL: &str =
    "x-apple.systempreferences:com.apple.preference.security?Privacy_ScreenRecording";

/// What the user picked in the permission alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionChoice {
    OpenSettings,
    Quit,
}

/// Probe screen recording permission with a 1x1 capture.
/// Any failure reads as "permission not granted".
#[allow(deprecated)] // CGWindowListCreateImage deprecated in favor of ScreenCaptureKit
pub fn has_screen_recording_permission() -> bool {
    let probe_rect = CGRect::new(CGPoint::ZERO, CGSize::new(1.0, 1.0));
    let image = CGWindowListCreateImage(
        probe_rect,
        CGWindowListOption::OptionOnScreenOnly,
        0 as CGWindowID,
        CGWindowImageOption::NominalResolution,
    );
    image.is_some()
}

/// Run the modal permission alert and report which button was pressed.
pub fn request_permission(mtm: MainThreadMarker) -> PermissionChoice {
    let alert = NSAlert::new(mtm);
    alert.setMessageText(&NSString::from_str("Screen Recording Permission Required"));
    alert.setInformativeText(&NSString::from_str(
        "To capture screenshots, please grant Screen Recording permission.",
    ));
    alert.addButtonWithTitle(&NSString::from_str("Open System Preferences"));
    alert.addButtonWithTitle(&NSString::from_str("Quit"));

    let response = alert.runModal();
    choice_for_response(response)
}

fn choice_for_response(response: NSModalResponse) -> PermissionChoice {
    if response == NSAlertFirstButtonReturn {
        PermissionChoice::OpenSettings
    } else {
        PermissionChoice::Quit
    }
}

/// Deep-link into the Screen Recording privacy pane.
pub fn open_privacy_settings() {
    if let Err(e) = Command::new("open").arg(PRIVACY_PANE_URL).status() {
        eprintln!("Failed to open System Preferences: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use objc2_app_kit::NSAlertSecondButtonReturn;

    #[test]
    fn first_button_opens_settings() {
        assert_eq!(
            choice_for_response(NSAlertFirstButtonReturn),
            PermissionChoice::OpenSettings
        );
    }

    #[test]
    fn second_button_quits() {
        assert_eq!(
            choice_for_response(NSAlertSecondButtonReturn),
            PermissionChoice::Quit
        );
    }
}
