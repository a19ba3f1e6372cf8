use sysinfo::System;

/// Name and version of this SDK as reported to the collector.
pub const SDK_VERSION: &str = concat!(env!("CARGO_PKG_NAME"), "@", env!("CARGO_PKG_VERSION"));

/// Snapshot of the environment an application runs in.
///
/// A client takes one snapshot at construction and attaches it to every event. Use
/// [`SystemInfo::detect`] to read the current environment or build the struct directly to report
/// custom values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    /// Whether the application is a debug build.
    pub is_debug: bool,
    /// Operating system name, e.g. `Windows`, `macOS` or the Linux distribution name.
    pub os_name: String,
    /// Operating system version.
    pub os_version: String,
    /// Locale in `<language>-<REGION>` form, e.g. `en-US`. Empty if unknown.
    pub locale: String,
    /// Version of the host application.
    pub app_version: String,
    /// Build number of the host application.
    pub app_build_number: String,
    /// SDK identifier, defaults to [`SDK_VERSION`].
    pub sdk_version: String,
}

impl SystemInfo {
    /// Read the current environment.
    ///
    /// Application version and build number are not discoverable from a library and are left
    /// empty. Set them with [`crate::ClientBuilder::with_app_version`] and
    /// [`crate::ClientBuilder::with_app_build_number`].
    pub fn detect() -> Self {
        SystemInfo {
            is_debug: cfg!(debug_assertions),
            os_name: os_name(),
            os_version: System::os_version().unwrap_or_default(),
            locale: sys_locale::get_locale().unwrap_or_default(),
            app_version: String::new(),
            app_build_number: String::new(),
            sdk_version: SDK_VERSION.into(),
        }
    }
}

fn os_name() -> String {
    match std::env::consts::OS {
        "windows" => "Windows".into(),
        "macos" => "macOS".into(),
        "ios" => "iOS".into(),
        "android" => "Android".into(),
        "freebsd" => "FreeBSD".into(),
        "linux" => System::name().unwrap_or_else(|| "Linux".into()),
        other => other.into(),
    }
}
