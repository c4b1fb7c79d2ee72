// SPDX-License-Identifier: Apache-2.0

//! Conversion of the telemetry data model into the OTLP logs wire schema.
//!
//! The wire types come from `opentelemetry-proto`; the conversions here are
//! total in both directions. Model values a collector never populates (e.g.
//! an unset body) map to `AnyValue::Empty` on the way back in.

use crate::model::{AnyValue, KeyValue, LogRecord, Resource, Scope, Severity};
use opentelemetry_proto::tonic::collector::logs::v1::ExportLogsServiceRequest;
use opentelemetry_proto::tonic::common::v1 as pb_common;
use opentelemetry_proto::tonic::logs::v1 as pb_logs;
use opentelemetry_proto::tonic::resource::v1 as pb_resource;

/// Assembles telemetry data-model instances into a single OTLP export
/// request envelope.
///
/// Pure and deterministic: no I/O is performed and input ordering is
/// preserved at every nesting level (resources, scopes within a resource,
/// records within a scope). An empty resource slice yields a request with
/// zero `resource_logs`; that is a valid request here, though a collector
/// may still reject it.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestBuilder;

impl RequestBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, resources: &[Resource]) -> ExportLogsServiceRequest {
        ExportLogsServiceRequest {
            resource_logs: resources.iter().map(Into::into).collect(),
        }
    }
}

impl From<&AnyValue> for pb_common::AnyValue {
    fn from(value: &AnyValue) -> Self {
        use pb_common::any_value::Value;

        let value = match value {
            AnyValue::Empty => None,
            AnyValue::String(s) => Some(Value::StringValue(s.clone())),
            AnyValue::Bool(b) => Some(Value::BoolValue(*b)),
            AnyValue::Int(i) => Some(Value::IntValue(*i)),
            AnyValue::Double(d) => Some(Value::DoubleValue(*d)),
            AnyValue::Bytes(b) => Some(Value::BytesValue(b.clone())),
            AnyValue::List(items) => Some(Value::ArrayValue(pb_common::ArrayValue {
                values: items.iter().map(Into::into).collect(),
            })),
            AnyValue::Map(entries) => Some(Value::KvlistValue(pb_common::KeyValueList {
                values: entries.iter().map(Into::into).collect(),
            })),
        };
        pb_common::AnyValue { value }
    }
}

impl From<&KeyValue> for pb_common::KeyValue {
    fn from(kv: &KeyValue) -> Self {
        pb_common::KeyValue {
            key: kv.key.clone(),
            value: Some((&kv.value).into()),
        }
    }
}

impl From<&LogRecord> for pb_logs::LogRecord {
    fn from(record: &LogRecord) -> Self {
        let body = match &record.body {
            AnyValue::Empty => None,
            value => Some(value.into()),
        };
        pb_logs::LogRecord {
            time_unix_nano: record.timestamp_nanos,
            observed_time_unix_nano: record.timestamp_nanos,
            severity_number: i32::from(record.severity_number),
            severity_text: record.severity_text.clone(),
            body,
            attributes: record.attributes.iter().map(Into::into).collect(),
            dropped_attributes_count: 0,
            flags: 0,
            trace_id: vec![],
            span_id: vec![],
            event_name: String::new(),
        }
    }
}

impl From<&Scope> for pb_logs::ScopeLogs {
    fn from(scope: &Scope) -> Self {
        // An anonymous scope is omitted on the wire rather than sent empty.
        let pb_scope = if scope.name.is_some() || scope.version.is_some() {
            Some(pb_common::InstrumentationScope {
                name: scope.name.clone().unwrap_or_default(),
                version: scope.version.clone().unwrap_or_default(),
                attributes: vec![],
                dropped_attributes_count: 0,
            })
        } else {
            None
        };
        pb_logs::ScopeLogs {
            scope: pb_scope,
            log_records: scope.records.iter().map(Into::into).collect(),
            schema_url: String::new(),
        }
    }
}

impl From<&Resource> for pb_logs::ResourceLogs {
    fn from(resource: &Resource) -> Self {
        pb_logs::ResourceLogs {
            resource: Some(pb_resource::Resource {
                attributes: resource.attributes.iter().map(Into::into).collect(),
                dropped_attributes_count: 0,
            }),
            scope_logs: resource.scopes.iter().map(Into::into).collect(),
            schema_url: String::new(),
        }
    }
}

impl From<pb_common::AnyValue> for AnyValue {
    fn from(value: pb_common::AnyValue) -> Self {
        use pb_common::any_value::Value;

        match value.value {
            None => AnyValue::Empty,
            Some(Value::StringValue(s)) => AnyValue::String(s),
            Some(Value::BoolValue(b)) => AnyValue::Bool(b),
            Some(Value::IntValue(i)) => AnyValue::Int(i),
            Some(Value::DoubleValue(d)) => AnyValue::Double(d),
            Some(Value::BytesValue(b)) => AnyValue::Bytes(b),
            Some(Value::ArrayValue(array)) => {
                AnyValue::List(array.values.into_iter().map(Into::into).collect())
            }
            Some(Value::KvlistValue(entries)) => {
                AnyValue::Map(entries.values.into_iter().map(Into::into).collect())
            }
        }
    }
}

impl From<pb_common::KeyValue> for KeyValue {
    fn from(kv: pb_common::KeyValue) -> Self {
        KeyValue {
            key: kv.key,
            value: kv.value.map(Into::into).unwrap_or_default(),
        }
    }
}

impl From<pb_logs::LogRecord> for LogRecord {
    fn from(record: pb_logs::LogRecord) -> Self {
        LogRecord {
            timestamp_nanos: record.time_unix_nano,
            severity_number: Severity::from_ordinal(record.severity_number),
            severity_text: record.severity_text,
            body: record.body.map(Into::into).unwrap_or_default(),
            attributes: record.attributes.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<pb_logs::ScopeLogs> for Scope {
    fn from(scope_logs: pb_logs::ScopeLogs) -> Self {
        let (name, version) = match scope_logs.scope {
            Some(scope) => (
                (!scope.name.is_empty()).then_some(scope.name),
                (!scope.version.is_empty()).then_some(scope.version),
            ),
            None => (None, None),
        };
        Scope {
            name,
            version,
            records: scope_logs.log_records.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<pb_logs::ResourceLogs> for Resource {
    fn from(resource_logs: pb_logs::ResourceLogs) -> Self {
        Resource {
            attributes: resource_logs
                .resource
                .map(|r| r.attributes.into_iter().map(Into::into).collect())
                .unwrap_or_default(),
            scopes: resource_logs
                .scope_logs
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}
