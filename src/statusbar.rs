use objc2::rc::Retained;
use objc2::runtime::Sel;
use objc2_app_kit::{
    NSControlStateValueOff, NSControlStateValueOn, NSMenu, NSMenuItem, NSStatusBar, NSStatusItem,
    NSVariableStatusItemLength,
};
use objc2_foundation::{MainThreadMarker, NSString};

pub struct StatusBar {
    // The status bar only keeps the item while a reference is held.
    _status_item: Retained<NSStatusItem>,
    startup_item: Retained<NSMenuItem>,
}

impl StatusBar {
    pub fn new(mtm: MainThreadMarker) -> Self {
        let status_bar = NSStatusBar::systemStatusBar();
        let status_item = status_bar.statusItemWithLength(NSVariableStatusItemLength);

        // Set the status bar button title
        if let Some(button) = status_item.button(mtm) {
            button.setTitle(&NSString::from_str("\u{1F4F7}")); // 📷
        }

        // Create menu
        let menu = NSMenu::new(mtm);

        // Capture item - action routes through responder chain to app delegate
        let capture_item = unsafe {
            NSMenuItem::initWithTitle_action_keyEquivalent(
                mtm.alloc(),
                &NSString::from_str("Capture"),
                Some(Sel::register(c"captureScreenshot:")),
                &NSString::from_str(""),
            )
        };
        menu.addItem(&capture_item);

        // Run at Startup item - check mark mirrors the delegate's login state
        let startup_item = unsafe {
            NSMenuItem::initWithTitle_action_keyEquivalent(
                mtm.alloc(),
                &NSString::from_str("Run at Startup"),
                Some(Sel::register(c"toggleStartup:")),
                &NSString::from_str(""),
            )
        };
        menu.addItem(&startup_item);

        // Quit item
        let quit_item = unsafe {
            NSMenuItem::initWithTitle_action_keyEquivalent(
                mtm.alloc(),
                &NSString::from_str("Quit"),
                Some(Sel::register(c"terminate:")),
                &NSString::from_str("q"),
            )
        };
        menu.addItem(&quit_item);

        status_item.setMenu(Some(&menu));

        StatusBar {
            _status_item: status_item,
            startup_item,
        }
    }

    pub fn set_startup_registered(&self, registered: bool) {
        let state = if registered {
            NSControlStateValueOn
        } else {
            NSControlStateValueOff
        };
        self.startup_item.setState(state);
    }
}
