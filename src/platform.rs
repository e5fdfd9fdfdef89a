use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("could not update startup registration: {0}")]
    AutoStart(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

/// Host OS capabilities the app needs beyond the window shell. Kept behind
/// a trait so the scheduler/UI glue can be exercised with a test double.
pub trait Host {
    fn set_auto_start(&self, enabled: bool) -> Result<(), PlatformError>;
    fn notify(&self, kind: NoticeKind, title: &str, body: &str);
    fn play_cue(&self);
}

/// Production implementation: Run-key registration via auto-launch, system
/// notifications via notify-rust, and the Win32 asterisk beep as the cue.
pub struct NativeHost;

impl Host for NativeHost {
    fn set_auto_start(&self, enabled: bool) -> Result<(), PlatformError> {
        let exe = std::env::current_exe()
            .map_err(|e| PlatformError::AutoStart(e.to_string()))?;
        let auto = auto_launch::AutoLaunchBuilder::new()
            .set_app_name("azkar-reminder")
            .set_app_path(&exe.to_string_lossy())
            .build()
            .map_err(|e| PlatformError::AutoStart(e.to_string()))?;

        let already = auto.is_enabled().unwrap_or(false);
        let result = match (enabled, already) {
            (true, false) => auto.enable(),
            (false, true) => auto.disable(),
            _ => return Ok(()),
        };
        result.map_err(|e| PlatformError::AutoStart(e.to_string()))
    }

    fn notify(&self, kind: NoticeKind, title: &str, body: &str) {
        let icon = match kind {
            NoticeKind::Info => "dialog-information",
            NoticeKind::Warning => "dialog-warning",
        };
        if let Err(e) = notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .icon(icon)
            .show()
        {
            log::warn!("failed to show notification: {e}");
        }
    }

    fn play_cue(&self) {
        #[cfg(windows)]
        unsafe {
            use windows_sys::Win32::UI::WindowsAndMessaging::{MessageBeep, MB_ICONASTERISK};
            MessageBeep(MB_ICONASTERISK);
        }
    }
}

/// On Windows, `ViewportCommand::Visible(true)` plus `request_repaint()` is
/// not enough to un-hide a window hidden via `ViewportCommand::Visible(false)`:
/// Win32 does not deliver `WM_PAINT` to hidden windows, so the egui loop may
/// not act on the change promptly. Calling `ShowWindow`/`SetForegroundWindow`
/// directly makes Windows deliver the paint message and wake the loop.
///
/// No-op on non-Windows platforms, where the repaint mechanism suffices.
pub fn show_window_native() {
    #[cfg(windows)]
    {
        use windows_sys::Win32::UI::WindowsAndMessaging::{
            FindWindowW, SetForegroundWindow, ShowWindow, SW_SHOW,
        };

        // Locate the main window by its title (set in eframe::run_native).
        let title: Vec<u16> = format!("{}\0", crate::app::APP_TITLE).encode_utf16().collect();
        let hwnd = unsafe { FindWindowW(std::ptr::null(), title.as_ptr()) };
        if hwnd != std::ptr::null_mut() {
            unsafe {
                ShowWindow(hwnd, SW_SHOW);
                SetForegroundWindow(hwnd);
            }
        }
    }
}

/// Hide the window immediately via Win32 `ShowWindow(SW_HIDE)`, so it
/// disappears before egui presents another frame.
///
/// No-op on non-Windows platforms.
pub fn hide_window_native() {
    #[cfg(windows)]
    {
        use windows_sys::Win32::UI::WindowsAndMessaging::{FindWindowW, ShowWindow, SW_HIDE};

        let title: Vec<u16> = format!("{}\0", crate::app::APP_TITLE).encode_utf16().collect();
        let hwnd = unsafe { FindWindowW(std::ptr::null(), title.as_ptr()) };
        if hwnd != std::ptr::null_mut() {
            unsafe {
                ShowWindow(hwnd, SW_HIDE);
            }
        }
    }
}
