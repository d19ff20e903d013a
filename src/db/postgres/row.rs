//! Conversion of driver rows into JSON objects.
//!
//! Values arrive in binary form, so each built-in type needs its own decoder.
//! Scalars that JSON cannot hold losslessly (numeric, money, network and
//! temporal types) are rendered as strings in PostgreSQL's text format.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;
use sqlx::postgres::types::{Oid, PgHasArrayType, PgInterval, PgMoney, PgTimeTz};
use sqlx::postgres::PgRow;
use sqlx::types::ipnetwork::IpNetwork;
use sqlx::types::mac_address::MacAddress;
use sqlx::types::{Decimal, Uuid};
use sqlx::{Column, Decode, Postgres, Row as _, Type, TypeInfo, ValueRef};

use crate::db::Row;

const MICROS_PER_SECOND: u64 = 1_000_000;

type TimeTz = PgTimeTz<NaiveTime, FixedOffset>;

/// Convert one row into a column-name-to-value map, in select-list order.
pub fn row_to_json(row: &PgRow) -> Row {
    row.columns()
        .iter()
        .map(|column| {
            let value = decode_column(row, column.ordinal(), column.type_info().name());
            (column.name().to_string(), value)
        })
        .collect()
}

fn decode_column(row: &PgRow, idx: usize, type_name: &str) -> Value {
    match row.try_get_raw(idx) {
        Ok(raw) if !raw.is_null() => {}
        _ => return Value::Null,
    }

    let (base, is_array) = match type_name.strip_suffix("[]") {
        Some(element) => (element, true),
        None => (type_name, false),
    };

    macro_rules! decode {
        ($ty:ty, $to_json:expr) => {
            if is_array {
                decode_array::<$ty>(row, idx, $to_json)
            } else {
                row.try_get::<$ty, _>(idx).map($to_json)
            }
        };
    }

    let decoded = match base {
        "BOOL" => decode!(bool, Value::from),
        "INT2" => decode!(i16, Value::from),
        "INT4" => decode!(i32, Value::from),
        "INT8" => decode!(i64, Value::from),
        "OID" => decode!(Oid, |v: Oid| Value::from(v.0)),
        "FLOAT4" => decode!(f32, |v: f32| Value::from(f64::from(v))),
        "FLOAT8" => decode!(f64, Value::from),
        "NUMERIC" => decode!(Decimal, text),
        "MONEY" => decode!(PgMoney, |v: PgMoney| text(v.to_decimal(2))),
        "TEXT" | "VARCHAR" | "CHAR" | "NAME" | "UNKNOWN" => decode!(String, Value::from),
        "\"CHAR\"" => decode!(i8, |v: i8| Value::String(char::from(v as u8).to_string())),
        "BYTEA" => decode!(Vec<u8>, |v: Vec<u8>| Value::String(to_hex(&v))),
        "JSON" | "JSONB" => decode!(Value, |v: Value| v),
        "UUID" => decode!(Uuid, text),
        "TIMESTAMPTZ" => decode!(DateTime<Utc>, |v: DateTime<Utc>| {
            Value::String(v.to_rfc3339())
        }),
        "TIMESTAMP" => decode!(NaiveDateTime, |v: NaiveDateTime| {
            Value::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
        }),
        "DATE" => decode!(NaiveDate, text),
        "TIME" => decode!(NaiveTime, text),
        "TIMETZ" => decode!(TimeTz, |v: TimeTz| {
            Value::String(format!("{}{}", v.time, v.offset))
        }),
        "INTERVAL" => decode!(PgInterval, |v: PgInterval| {
            Value::String(format_interval(&v))
        }),
        "INET" => decode!(IpNetwork, |v: IpNetwork| Value::String(format_inet(&v))),
        "CIDR" => decode!(IpNetwork, text),
        "MACADDR" => decode!(MacAddress, |v: MacAddress| {
            Value::String(v.to_string().to_ascii_lowercase())
        }),
        // Built-in names are upper case; the rest (enums, domains, extension
        // types such as citext) are sent in their text form.
        other if other.chars().any(|c| c.is_ascii_lowercase()) => {
            row.try_get_unchecked::<String, _>(idx).map(Value::from)
        }
        _ => return Value::Null,
    };

    decoded.unwrap_or(Value::Null)
}

/// Decode a one-dimensional array, keeping NULL elements as `null`.
fn decode_array<T>(
    row: &PgRow,
    idx: usize,
    to_json: impl Fn(T) -> Value,
) -> Result<Value, sqlx::Error>
where
    T: for<'r> Decode<'r, Postgres> + Type<Postgres> + PgHasArrayType,
{
    let items = row.try_get::<Vec<Option<T>>, _>(idx)?;
    Ok(Value::Array(
        items
            .into_iter()
            .map(|item| item.map_or(Value::Null, &to_json))
            .collect(),
    ))
}

fn text<T: ToString>(value: T) -> Value {
    Value::String(value.to_string())
}

/// PostgreSQL's `\x` hex output for bytea.
pub(crate) fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("\\x");
    for byte in bytes {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Host addresses drop the full-length prefix, as PostgreSQL prints them.
pub(crate) fn format_inet(network: &IpNetwork) -> String {
    let host_prefix = if network.is_ipv4() { 32 } else { 128 };
    if network.prefix() == host_prefix {
        network.ip().to_string()
    } else {
        network.to_string()
    }
}

/// Render an interval in PostgreSQL's default output style, e.g.
/// `1 year 2 mons 3 days 04:05:06.5` or `-1 days +02:00:00`.
pub(crate) fn format_interval(interval: &PgInterval) -> String {
    let mut parts: Vec<String> = Vec::new();
    // A positive field after a negative one carries an explicit `+`.
    let mut after_negative = false;

    let years = interval.months / 12;
    let months = interval.months % 12;
    for (amount, unit) in [(years, "year"), (months, "mon"), (interval.days, "day")] {
        if amount == 0 {
            continue;
        }
        let sign = if after_negative && amount > 0 { "+" } else { "" };
        let plural = if amount == 1 { "" } else { "s" };
        parts.push(format!("{sign}{amount} {unit}{plural}"));
        after_negative = amount < 0;
    }

    if interval.microseconds != 0 || parts.is_empty() {
        let sign = match interval.microseconds {
            m if m < 0 => "-",
            m if m > 0 && after_negative => "+",
            _ => "",
        };
        let micros = interval.microseconds.unsigned_abs();
        let total_seconds = micros / MICROS_PER_SECOND;
        let fraction = micros % MICROS_PER_SECOND;

        let mut clock = format!(
            "{sign}{:02}:{:02}:{:02}",
            total_seconds / 3600,
            total_seconds / 60 % 60,
            total_seconds % 60
        );
        if fraction != 0 {
            let digits = format!("{fraction:06}");
            clock.push('.');
            clock.push_str(digits.trim_end_matches('0'));
        }
        parts.push(clock);
    }

    parts.join(" ")
}
