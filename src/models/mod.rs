mod event;
mod limited_len_string;
mod properties;
mod system_properties;

pub(crate) use event::*;
pub(crate) use limited_len_string::*;
pub use properties::{Properties, Value};
pub(crate) use system_properties::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn system_props() -> SystemProperties {
        SystemProperties {
            is_debug: false,
            os_name: "Linux".into(),
            os_version: "6.1.0".into(),
            locale: "en-US".into(),
            app_version: "1.0.0".into(),
            app_build_number: "42".into(),
            sdk_version: "aptabase@0.1.0".into(),
        }
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 40, 0).unwrap()
    }

    #[test]
    fn serialization_format() {
        let event = Event {
            timestamp: timestamp(),
            session_id: "171728639612345678".into(),
            event_name: "app_started".into(),
            system_props: system_props(),
            props: None,
        };
        let serialized = serde_json::to_string(&event).unwrap();
        let expected = "{\"timestamp\":\"2024-03-01T10:40:00.000Z\",\"sessionId\":\"171728639612345678\",\"eventName\":\"app_started\",\"systemProps\":{\"isDebug\":false,\"osName\":\"Linux\",\"osVersion\":\"6.1.0\",\"locale\":\"en-US\",\"appVersion\":\"1.0.0\",\"appBuildNumber\":\"42\",\"sdkVersion\":\"aptabase@0.1.0\"}}";
        assert_eq!(expected, serialized);
    }

    #[test]
    fn round_trip() {
        let event = Event {
            timestamp: timestamp(),
            session_id: "171728639612345678".into(),
            event_name: "purchase".into(),
            system_props: system_props(),
            props: Some(
                Properties::new()
                    .insert("item", "book")
                    .insert("quantity", 2)
                    .insert("price", 12.5),
            ),
        };
        let serialized = serde_json::to_vec(&event).unwrap();
        let parsed: Event = serde_json::from_slice(&serialized).unwrap();
        assert_eq!(event, parsed);
    }

    #[test]
    fn round_trip_with_non_finite_floats() {
        let event = Event {
            timestamp: timestamp(),
            session_id: "171728639612345678".into(),
            event_name: "measure".into(),
            system_props: system_props(),
            props: Some(
                Properties::new()
                    .insert("ratio", f64::NAN)
                    .insert("inf", f64::INFINITY),
            ),
        };
        let serialized = serde_json::to_string(&event).unwrap();
        assert!(serialized.contains(r#""props":{"inf":"inf","ratio":"NaN"}"#));
        let parsed: Event = serde_json::from_str(&serialized).unwrap();
        assert_eq!(event, parsed);
    }

    #[test]
    fn round_trip_keeps_second_precision_of_now() {
        let now = Utc::now();
        let event = Event {
            timestamp: now,
            session_id: "1".into(),
            event_name: "tick".into(),
            system_props: system_props(),
            props: None,
        };
        let parsed: Event = serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        assert_eq!(now.timestamp(), parsed.timestamp.timestamp());
    }

    #[test]
    fn version_strings_are_bounded() {
        let props = SystemProperties {
            os_version: "1".repeat(100).into(),
            sdk_version: "2".repeat(100).into(),
            ..system_props()
        };
        assert_eq!(30, props.os_version.as_ref().len());
        assert_eq!(40, props.sdk_version.as_ref().len());
    }
}
