/// Severity, ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            _ => None,
        }
    }
}

/// Structured event log. Each event is one JSON object per line:
/// `{"ts": <unix ms>, "level": "...", "event": "...", ...fields}`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Logger {
    min_level: LogLevel,
}

impl Logger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn log_event(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        if !self.enabled(level) {
            return;
        }

        let line = format_event(now_unix_millis(), level, event, fields).to_string();
        emit(level, &line);
    }

    pub fn debug(&self, event: &str, fields: serde_json::Value) {
        self.log_event(LogLevel::Debug, event, fields);
    }

    pub fn info(&self, event: &str, fields: serde_json::Value) {
        self.log_event(LogLevel::Info, event, fields);
    }

    pub fn warn(&self, event: &str, fields: serde_json::Value) {
        self.log_event(LogLevel::Warn, event, fields);
    }
}

fn format_event(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(ts)),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            // reserved keys win over caller fields
            payload.entry(key).or_insert(value);
        }
    }

    serde_json::Value::Object(payload)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&value),
        LogLevel::Info => web_sys::console::log_1(&value),
        LogLevel::Warn => web_sys::console::warn_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, line: &str) {
    println!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn levels_are_ordered() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert_eq!(
            [LogLevel::Warn, LogLevel::Debug, LogLevel::Info].iter().max(),
            Some(&LogLevel::Warn)
        );
        assert_eq!(LogLevel::Debug.max(LogLevel::Info), LogLevel::Info);
    }

    #[test]
    fn logger_filters_below_min_level() {
        let logger = Logger::new(LogLevel::Info);
        assert!(!logger.enabled(LogLevel::Debug));
        assert!(logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Warn));
    }

    #[test]
    fn event_payload_merges_fields_after_reserved_keys() {
        let payload = format_event(
            42,
            LogLevel::Warn,
            "overlay_transition_rejected",
            json!({ "target": "circle", "event": "spoofed" }),
        );

        assert_eq!(payload["ts"], json!(42));
        assert_eq!(payload["level"], json!("warn"));
        assert_eq!(payload["event"], json!("overlay_transition_rejected"));
        assert_eq!(payload["target"], json!("circle"));
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let payload = format_event(1, LogLevel::Info, "content_loaded", json!("loose"));
        assert_eq!(payload.as_object().map(|map| map.len()), Some(3));
    }
}
