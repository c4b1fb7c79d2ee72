// SPDX-License-Identifier: Apache-2.0

//! In-memory telemetry data model, independent of any wire format.
//!
//! A `Resource` owns an ordered sequence of `Scope`s, each of which owns an
//! ordered sequence of `LogRecord`s. All types here are plain value objects:
//! construction never fails and performs no I/O. Any validation is deferred
//! to the collector.

/// A variant value carried as a log record body or attribute value.
///
/// Mirrors the OTLP `AnyValue` union. `Empty` is the OTLP null value (all
/// wire fields unset).
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AnyValue {
    #[default]
    Empty,
    String(String),
    Bool(bool),
    Int(i64),
    Double(f64),
    Bytes(Vec<u8>),
    List(Vec<AnyValue>),
    Map(Vec<KeyValue>),
}

impl From<&str> for AnyValue {
    fn from(value: &str) -> Self {
        AnyValue::String(value.to_string())
    }
}

impl From<String> for AnyValue {
    fn from(value: String) -> Self {
        AnyValue::String(value)
    }
}

impl From<bool> for AnyValue {
    fn from(value: bool) -> Self {
        AnyValue::Bool(value)
    }
}

impl From<i64> for AnyValue {
    fn from(value: i64) -> Self {
        AnyValue::Int(value)
    }
}

impl From<f64> for AnyValue {
    fn from(value: f64) -> Self {
        AnyValue::Double(value)
    }
}

/// A key/value attribute pair. Sequences of pairs preserve insertion order
/// and may carry repeated keys; all pairs are exported as given.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: AnyValue,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<AnyValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Log severity ordinal, matching the OTLP severity number range
/// (TRACE = 1 .. FATAL4 = 24, 0 = unspecified).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum Severity {
    #[default]
    Unspecified = 0,
    Trace = 1,
    Trace2 = 2,
    Trace3 = 3,
    Trace4 = 4,
    Debug = 5,
    Debug2 = 6,
    Debug3 = 7,
    Debug4 = 8,
    Info = 9,
    Info2 = 10,
    Info3 = 11,
    Info4 = 12,
    Warn = 13,
    Warn2 = 14,
    Warn3 = 15,
    Warn4 = 16,
    Error = 17,
    Error2 = 18,
    Error3 = 19,
    Error4 = 20,
    Fatal = 21,
    Fatal2 = 22,
    Fatal3 = 23,
    Fatal4 = 24,
}

impl Severity {
    /// Decode a wire ordinal. Unknown ordinals map to `Unspecified`.
    pub fn from_ordinal(ordinal: i32) -> Self {
        match ordinal {
            1 => Severity::Trace,
            2 => Severity::Trace2,
            3 => Severity::Trace3,
            4 => Severity::Trace4,
            5 => Severity::Debug,
            6 => Severity::Debug2,
            7 => Severity::Debug3,
            8 => Severity::Debug4,
            9 => Severity::Info,
            10 => Severity::Info2,
            11 => Severity::Info3,
            12 => Severity::Info4,
            13 => Severity::Warn,
            14 => Severity::Warn2,
            15 => Severity::Warn3,
            16 => Severity::Warn4,
            17 => Severity::Error,
            18 => Severity::Error2,
            19 => Severity::Error3,
            20 => Severity::Error4,
            21 => Severity::Fatal,
            22 => Severity::Fatal2,
            23 => Severity::Fatal3,
            24 => Severity::Fatal4,
            _ => Severity::Unspecified,
        }
    }
}

impl From<Severity> for i32 {
    fn from(severity: Severity) -> Self {
        severity as i32
    }
}

/// One observed event.
///
/// `timestamp_nanos` is always present; zero is a valid-but-meaningless
/// default, not absence. The full nanosecond precision is preserved, any
/// truncation is a caller concern. `severity_text` and `severity_number` are
/// independent and carried verbatim even when they disagree.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct LogRecord {
    pub timestamp_nanos: u64,
    pub severity_number: Severity,
    pub severity_text: String,
    pub body: AnyValue,
    pub attributes: Vec<KeyValue>,
}

impl LogRecord {
    pub fn new(timestamp_nanos: u64) -> Self {
        Self {
            timestamp_nanos,
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<AnyValue>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity_number = severity;
        self
    }

    pub fn with_severity_text(mut self, text: impl Into<String>) -> Self {
        self.severity_text = text.into();
        self
    }

    pub fn with_attribute(mut self, attribute: KeyValue) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// The instrumentation source that produced a sequence of log records,
/// e.g. a library name and version.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Scope {
    pub name: Option<String>,
    pub version: Option<String>,
    pub records: Vec<LogRecord>,
}

impl Scope {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_record(mut self, record: LogRecord) -> Self {
        self.records.push(record);
        self
    }
}

/// The entity (host, process, service) that the exported records describe.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Resource {
    pub attributes: Vec<KeyValue>,
    pub scopes: Vec<Scope>,
}

impl Resource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, attribute: KeyValue) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scopes.push(scope);
        self
    }
}
