use std::cell::{Cell, RefCell};

use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2::{define_class, msg_send, DefinedClass, MainThreadOnly};
use objc2_app_kit::NSApplicationDelegate;
use objc2_foundation::{MainThreadMarker, NSNotification, NSObject, NSObjectProtocol};

use crate::login_items::{self, LoginState};
use crate::permission::{self, PermissionChoice};
use crate::statusbar::StatusBar;

pub struct AppDelegateIvars {
    status_bar: RefCell<Option<StatusBar>>,
    login_state: Cell<LoginState>,
}

define_class!(
    #[unsafe(super(NSObject))]
    #[thread_kind = MainThreadOnly]
    #[name = "AppDelegate"]
    #[ivars = AppDelegateIvars]
    pub struct AppDelegate;

    unsafe impl NSObjectProtocol for AppDelegate {}

    unsafe impl NSApplicationDelegate for AppDelegate {
        #[unsafe(method(applicationDidFinishLaunching:))]
        fn application_did_finish_launching(&self, _notification: &NSNotification) {
            let mtm = MainThreadMarker::from(self);

            let status_bar = StatusBar::new(mtm);

            // Initialize the check mark from the OS login-items list.
            let state = match login_items::current_state(&login_items::bundle_path()) {
                Ok(state) => state,
                Err(e) => {
                    eprintln!("Login item query failed: {}", e);
                    LoginState::Unregistered
                }
            };
            self.ivars().login_state.set(state);
            status_bar.set_startup_registered(state == LoginState::Registered);

            *self.ivars().status_bar.borrow_mut() = Some(status_bar);

            self.check_screen_recording_permission(mtm);
        }
    }

    // --- Menu actions ---
    impl AppDelegate {
        #[unsafe(method(captureScreenshot:))]
        fn capture_screenshot(&self, _sender: &AnyObject) {
            match crate::capture::capture_interactive() {
                Ok(Some(path)) => eprintln!("Saved {}", path.display()),
                // User cancelled the selection, nothing to do.
                Ok(None) => {}
                Err(e) => eprintln!("Capture failed: {}", e),
            }
        }

        #[unsafe(method(toggleStartup:))]
        fn toggle_startup(&self, _sender: &AnyObject) {
            let bundle_path = login_items::bundle_path();

            // Re-read the OS list instead of trusting the check mark.
            let state = match login_items::current_state(&bundle_path) {
                Ok(state) => state,
                Err(e) => {
                    eprintln!("Login item query failed: {}", e);
                    return;
                }
            };

            let flipped = match state {
                LoginState::Unregistered => {
                    login_items::register(&bundle_path).map(|()| LoginState::Registered)
                }
                LoginState::Registered => {
                    login_items::unregister(&bundle_path).map(|()| LoginState::Unregistered)
                }
            };

            // Only flip the check mark on confirmed success.
            match flipped {
                Ok(new_state) => {
                    self.ivars().login_state.set(new_state);
                    if let Some(bar) = self.ivars().status_bar.borrow().as_ref() {
                        bar.set_startup_registered(new_state == LoginState::Registered);
                    }
                }
                Err(e) => eprintln!("Login item update failed: {}", e),
            }
        }
    }
);

impl AppDelegate {
    pub fn new(mtm: MainThreadMarker) -> Retained<Self> {
        let this = mtm.alloc().set_ivars(AppDelegateIvars {
            status_bar: RefCell::new(None),
            login_state: Cell::new(LoginState::Unregistered),
        });
        unsafe { msg_send![super(this), init] }
    }

    /// Permission gate: without screen recording access the app is unusable,
    /// so after the alert the process exits under either button.
    fn check_screen_recording_permission(&self, mtm: MainThreadMarker) {
        if permission::has_screen_recording_permission() {
            return;
        }

        match permission::request_permission(mtm) {
            PermissionChoice::OpenSettings => permission::open_privacy_settings(),
            PermissionChoice::Quit => {}
        }
        std::process::exit(0);
    }
}
