//! Filter predicate engine
//!
//! The listing filter is evaluated in two execution contexts: in memory
//! against an already-materialized record set, and as a SQL WHERE clause on
//! the store-side scan. Both interpreters are compiled from the single
//! [`RULES`] table below, so a seminar visible under a given filter state in
//! one context is never invisible under the same state in the other.
//!
//! Per-field semantics:
//! - `country`: exact match on `countryCode` (case-sensitive)
//! - `instructor`: case-insensitive substring match
//! - `organization`, `level`: exact match; a record without the field never
//!   matches an active filter
//! - `startDate`/`endDate`: interval overlap — the filter's lower bound is
//!   held against the record's *end* date and the upper bound against its
//!   *start* date, so a multi-day seminar matches any window it intersects.
//!
//! Dates compare lexicographically, valid because both sides are ISO 8601
//! strings of matching precision.

use serde::Deserialize;

use crate::models::Seminar;

/// Client-side filter state, deserializable from listing query strings.
///
/// Every field is independently optional. An absent field and an empty
/// string both leave the rule inactive: unset fields arrive either way
/// depending on whether the caller serializes its whole filter form or only
/// the populated entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    /// countryCode to match exactly.
    pub country: Option<String>,
    /// Substring of the instructor name, case-insensitive.
    pub instructor: Option<String>,
    /// Organization to match exactly.
    pub organization: Option<String>,
    /// Level to match exactly.
    pub level: Option<String>,
    /// Lower date-range bound (inclusive).
    pub start_date: Option<String>,
    /// Upper date-range bound (inclusive).
    pub end_date: Option<String>,
}

/// How an active filter value is compared against its record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchOp {
    /// Record field equals the filter value.
    Exact,
    /// Record field contains the filter value, case-insensitively.
    ContainsCi,
    /// Record field is lexicographically >= the filter value.
    Gte,
    /// Record field is lexicographically <= the filter value.
    Lte,
}

/// One field rule: where the filter value comes from, which record field and
/// storage column it is held against, and how the two compare.
struct FieldRule {
    filter: fn(&FilterState) -> Option<&str>,
    /// Storage column the SQL interpreter binds against.
    column: &'static str,
    /// Record accessor the in-memory interpreter reads; `None` never matches.
    record: fn(&Seminar) -> Option<&str>,
    op: MatchOp,
}

/// The declarative predicate: every rule ANDs with the rest.
///
/// The interval-overlap rules deliberately cross fields: the filter's
/// `startDate` binds against the record's `endDate` column and vice versa.
const RULES: &[FieldRule] = &[
    FieldRule {
        filter: |f| f.country.as_deref(),
        column: "countryCode",
        record: |s| Some(&s.country_code),
        op: MatchOp::Exact,
    },
    FieldRule {
        filter: |f| f.instructor.as_deref(),
        column: "instructor",
        record: |s| Some(&s.instructor),
        op: MatchOp::ContainsCi,
    },
    FieldRule {
        filter: |f| f.organization.as_deref(),
        column: "organization",
        record: |s| s.organization.as_deref(),
        op: MatchOp::Exact,
    },
    FieldRule {
        filter: |f| f.level.as_deref(),
        column: "level",
        record: |s| s.level.as_deref(),
        op: MatchOp::Exact,
    },
    FieldRule {
        filter: |f| f.start_date.as_deref(),
        column: "endDate",
        record: |s| Some(&s.end_date),
        op: MatchOp::Gte,
    },
    FieldRule {
        filter: |f| f.end_date.as_deref(),
        column: "startDate",
        record: |s| Some(&s.start_date),
        op: MatchOp::Lte,
    },
];

/// Normalizes a filter value: the empty string is inactive.
fn active(value: Option<&str>) -> Option<&str> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => None,
    }
}

/// Returns `true` iff `seminar` satisfies every active field of `filter`.
///
/// Pure function of its inputs; safe for unlimited concurrent evaluation.
pub fn matches(filter: &FilterState, seminar: &Seminar) -> bool {
    RULES.iter().all(|rule| {
        let Some(wanted) = active((rule.filter)(filter)) else {
            return true;
        };
        let Some(held) = (rule.record)(seminar) else {
            return false;
        };
        match rule.op {
            MatchOp::Exact => held == wanted,
            MatchOp::ContainsCi => held.to_lowercase().contains(&wanted.to_lowercase()),
            MatchOp::Gte => held >= wanted,
            MatchOp::Lte => held <= wanted,
        }
    })
}

/// Store-side rendering of a filter: AND-combined WHERE fragments plus the
/// values to bind, in clause order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlPredicate {
    pub clauses: Vec<String>,
    pub bindings: Vec<String>,
}

impl SqlPredicate {
    /// Renders `" WHERE a AND b"`, or the empty string when no rule is active.
    pub fn to_where(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }
}

/// Translates `filter` into its store-side form.
///
/// Substring rules escape SQL LIKE wildcards in the bound value, keeping the
/// literal-substring semantics of [`matches`] even when the filter text
/// contains `%` or `_`. SQLite's default LIKE is case-insensitive for ASCII,
/// matching the lowercase comparison on the in-memory side.
pub fn where_clause(filter: &FilterState) -> SqlPredicate {
    let mut clauses = Vec::new();
    let mut bindings = Vec::new();

    for rule in RULES {
        let Some(wanted) = active((rule.filter)(filter)) else {
            continue;
        };
        match rule.op {
            MatchOp::Exact => {
                clauses.push(format!("{} = ?", rule.column));
                bindings.push(wanted.to_string());
            }
            MatchOp::ContainsCi => {
                clauses.push(format!("{} LIKE ? ESCAPE '\\'", rule.column));
                bindings.push(format!("%{}%", escape_like(wanted)));
            }
            MatchOp::Gte => {
                clauses.push(format!("{} >= ?", rule.column));
                bindings.push(wanted.to_string());
            }
            MatchOp::Lte => {
                clauses.push(format!("{} <= ?", rule.column));
                bindings.push(wanted.to_string());
            }
        }
    }

    SqlPredicate { clauses, bindings }
}

/// Escapes LIKE pattern metacharacters so the bound value matches literally.
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
