//! Tests for value rendering helpers.

use sqlx::postgres::types::PgInterval;
use sqlx::types::ipnetwork::IpNetwork;

use crate::db::postgres::row::{format_inet, format_interval, to_hex};

fn interval(months: i32, days: i32, microseconds: i64) -> PgInterval {
    PgInterval {
        months,
        days,
        microseconds,
    }
}

#[test]
fn interval_uses_postgres_output_style() {
    let micros = ((4 * 3600 + 5 * 60 + 6) * 1_000_000) + 500_000;
    assert_eq!(
        format_interval(&interval(14, 3, micros)),
        "1 year 2 mons 3 days 04:05:06.5"
    );
    assert_eq!(format_interval(&interval(0, 1, 0)), "1 day");
    assert_eq!(format_interval(&interval(0, 0, 0)), "00:00:00");
    assert_eq!(format_interval(&interval(-1, 0, 0)), "-1 mons");
}

#[test]
fn interval_signs_mixed_fields() {
    assert_eq!(
        format_interval(&interval(0, -1, 2 * 3600 * 1_000_000)),
        "-1 days +02:00:00"
    );
    assert_eq!(format_interval(&interval(0, 0, -90_000_000)), "-00:01:30");
}

#[test]
fn inet_hosts_drop_full_prefix() {
    let host: IpNetwork = "10.0.0.1".parse().unwrap();
    let subnet: IpNetwork = "10.0.0.0/8".parse().unwrap();
    let v6: IpNetwork = "::1".parse().unwrap();

    assert_eq!(format_inet(&host), "10.0.0.1");
    assert_eq!(format_inet(&subnet), "10.0.0.0/8");
    assert_eq!(format_inet(&v6), "::1");
}

#[test]
fn bytea_renders_as_hex() {
    assert_eq!(to_hex(&[0xde, 0xad, 0x01]), "\\xdead01");
    assert_eq!(to_hex(&[]), "\\x");
}
