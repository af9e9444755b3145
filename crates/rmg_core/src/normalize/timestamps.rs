use time::format_description::well_known::Rfc3339;
use time::{format_description, OffsetDateTime, PrimitiveDateTime, UtcOffset};

fn canonicalize_rfc3339_utc(dt: OffsetDateTime) -> Option<String> {
    dt.to_offset(UtcOffset::UTC).format(&Rfc3339).ok()
}

fn parse_assume_utc(raw: &str, fmt: &str) -> Option<String> {
    let items = format_description::parse(fmt).ok()?;
    let pdt = PrimitiveDateTime::parse(raw, &items).ok()?;
    canonicalize_rfc3339_utc(pdt.assume_utc())
}

/// Normalize a server-reported timestamp to canonical RFC3339 UTC.
///
/// Contract:
/// - RFC3339 input is re-emitted in canonical UTC form; already-canonical
///   input round-trips unchanged in value.
/// - Timezone-less inputs matching a deterministic allowlist are assumed UTC
///   (no fuzzy parsing).
/// - Anything else returns `None`; callers preserve the raw value verbatim so
///   an edit/save round-trip never corrupts what the server sent.
pub fn canonical_reported_at(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return canonicalize_rfc3339_utc(dt);
    }

    for fmt in [
        "[year]-[month]-[day] [hour]:[minute]:[second]",
        "[year]-[month]-[day]T[hour]:[minute]:[second]",
        "[year]-[month]-[day] [hour]:[minute]",
        "[year]-[month]-[day]T[hour]:[minute]",
    ] {
        if let Some(canon) = parse_assume_utc(trimmed, fmt) {
            return Some(canon);
        }
    }

    None
}
