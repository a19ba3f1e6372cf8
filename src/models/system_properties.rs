use crate::{models::LimitedLenString, SystemInfo};
use serde::{Deserialize, Serialize};

/// Environment metadata attached to every event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SystemProperties {
    pub(crate) is_debug: bool,
    pub(crate) os_name: String,
    pub(crate) os_version: LimitedLenString<30>,
    pub(crate) locale: String,
    pub(crate) app_version: String,
    pub(crate) app_build_number: String,
    pub(crate) sdk_version: LimitedLenString<40>,
}

impl From<&SystemInfo> for SystemProperties {
    fn from(info: &SystemInfo) -> Self {
        SystemProperties {
            is_debug: info.is_debug,
            os_name: info.os_name.clone(),
            os_version: info.os_version.as_str().into(),
            locale: info.locale.clone(),
            app_version: info.app_version.clone(),
            app_build_number: info.app_build_number.clone(),
            sdk_version: info.sdk_version.as_str().into(),
        }
    }
}
