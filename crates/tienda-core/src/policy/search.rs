//! Search field allowlist and predicate compilation.
//!
//! Each searchable resource declares its open fields as an enum with a static
//! `FIELDS` table. Untrusted filter keys use the `<field>[_or_<field>]_<pred>`
//! form (e.g. `name_cont`, `name_or_description_cont`, `price_lteq`) and are
//! compiled against that table. A key naming anything outside it is never
//! turned into a predicate: it either fails compilation or is dropped,
//! depending on [`DisallowedMode`].

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{Result, TiendaError};

/// Query parameter carrying the sort order (`s=price desc`).
pub const SORT_KEY: &str = "s";

/// Value domain of a searchable field; decides which predicates apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Decimal,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Decimal => write!(f, "decimal"),
        }
    }
}

/// A closed set of searchable attributes for one resource.
pub trait SearchField: Copy + Eq + std::hash::Hash + fmt::Debug + 'static {
    /// The allowlist. Nothing outside this table is ever searchable.
    const FIELDS: &'static [Self];

    fn name(&self) -> &'static str;

    fn kind(&self) -> FieldKind;

    fn from_name(name: &str) -> Option<Self> {
        Self::FIELDS.iter().copied().find(|f| f.name() == name)
    }
}

/// Borrowed view of one attribute value of a record.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Decimal(Decimal),
}

/// A record type that can be filtered by a [`SearchQuery`].
pub trait Searchable {
    type Field: SearchField;
    const RESOURCE: &'static str;

    fn field_value(&self, field: Self::Field) -> FieldValue<'_>;
}

/// Names of the attributes `R` exposes to search.
pub fn allowed_search_fields<R: Searchable>() -> BTreeSet<&'static str> {
    R::Field::FIELDS.iter().map(|f| f.name()).collect()
}

/// What to do with a filter key that is not on the allowlist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisallowedMode {
    /// Fail the whole query with `NotAllowed`.
    #[default]
    Reject,
    /// Skip the key and record it in [`SearchQuery::dropped`].
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Eq,
    NotEq,
    Cont,
    Start,
    End,
    Gt,
    Gteq,
    Lt,
    Lteq,
}

impl Predicate {
    // `not_eq` must be tried before `eq`.
    const BY_SUFFIX: &'static [(&'static str, Predicate)] = &[
        ("not_eq", Predicate::NotEq),
        ("gteq", Predicate::Gteq),
        ("lteq", Predicate::Lteq),
        ("cont", Predicate::Cont),
        ("start", Predicate::Start),
        ("end", Predicate::End),
        ("eq", Predicate::Eq),
        ("gt", Predicate::Gt),
        ("lt", Predicate::Lt),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Predicate::Eq => "eq",
            Predicate::NotEq => "not_eq",
            Predicate::Cont => "cont",
            Predicate::Start => "start",
            Predicate::End => "end",
            Predicate::Gt => "gt",
            Predicate::Gteq => "gteq",
            Predicate::Lt => "lt",
            Predicate::Lteq => "lteq",
        }
    }

    fn applies_to(self, kind: FieldKind) -> bool {
        match self {
            Predicate::Eq | Predicate::NotEq => true,
            Predicate::Cont | Predicate::Start | Predicate::End => kind == FieldKind::Text,
            Predicate::Gt | Predicate::Gteq | Predicate::Lt | Predicate::Lteq => {
                kind == FieldKind::Decimal
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    /// Lowercased needle.
    Text(String),
    Decimal(Decimal),
}

/// One compiled filter: true if any of `fields` satisfies the predicate.
#[derive(Debug, Clone)]
pub struct Condition<F: SearchField> {
    fields: Vec<F>,
    predicate: Predicate,
    operand: Operand,
}

impl<F: SearchField> Condition<F> {
    pub fn fields(&self) -> &[F] {
        &self.fields
    }

    pub fn predicate(&self) -> Predicate {
        self.predicate
    }

    fn matches<R: Searchable<Field = F>>(&self, record: &R) -> bool {
        self.fields
            .iter()
            .any(|f| self.eval(record.field_value(*f)))
    }

    fn eval(&self, value: FieldValue<'_>) -> bool {
        match (&self.operand, value) {
            (Operand::Text(needle), FieldValue::Text(hay)) => {
                let hay = hay.to_lowercase();
                match self.predicate {
                    Predicate::Eq => hay == *needle,
                    Predicate::NotEq => hay != *needle,
                    Predicate::Cont => hay.contains(needle.as_str()),
                    Predicate::Start => hay.starts_with(needle.as_str()),
                    Predicate::End => hay.ends_with(needle.as_str()),
                    _ => false,
                }
            }
            (Operand::Decimal(rhs), FieldValue::Decimal(lhs)) => match self.predicate {
                Predicate::Eq => lhs == *rhs,
                Predicate::NotEq => lhs != *rhs,
                Predicate::Gt => lhs > *rhs,
                Predicate::Gteq => lhs >= *rhs,
                Predicate::Lt => lhs < *rhs,
                Predicate::Lteq => lhs <= *rhs,
                _ => false,
            },
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F: SearchField> {
    pub field: F,
    pub dir: SortDir,
}

/// Compiled search over one resource. Only allowlisted fields appear in it.
#[derive(Debug, Clone)]
pub struct SearchQuery<F: SearchField> {
    conditions: Vec<Condition<F>>,
    sort: Option<Sort<F>>,
    dropped: Vec<String>,
}

impl<F: SearchField> Default for SearchQuery<F> {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            sort: None,
            dropped: Vec::new(),
        }
    }
}

impl<F: SearchField> SearchQuery<F> {
    /// Compile untrusted `(key, value)` pairs.
    ///
    /// Keys are checked before values, so a disallowed key with a blank value
    /// is still rejected in `Reject` mode. Blank values on allowed keys add no
    /// predicate. A malformed value for an allowed key, including a bad sort
    /// direction, is `BadRequest` in either mode.
    pub fn compile<I, K, V>(params: I, mode: DisallowedMode) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut q = Self::default();

        for (k, v) in params {
            let key = k.as_ref();
            let value = v.as_ref().trim();

            let outcome = if key == SORT_KEY {
                parse_sort::<F>(value)?.map(|s| {
                    if s.is_some() {
                        q.sort = s;
                    }
                })
            } else {
                match parse_key::<F>(key) {
                    Ok((fields, predicate)) => {
                        if !value.is_empty() {
                            let operand = parse_operand(key, fields[0].kind(), value)?;
                            q.conditions.push(Condition {
                                fields,
                                predicate,
                                operand,
                            });
                        }
                        Ok(())
                    }
                    Err(reason) => Err(reason),
                }
            };

            if let Err(reason) = outcome {
                match mode {
                    DisallowedMode::Reject => {
                        return Err(TiendaError::NotAllowed(format!(
                            "search key {key}: {reason}"
                        )));
                    }
                    DisallowedMode::Drop => {
                        tracing::debug!(key = %key, %reason, "search key dropped");
                        q.dropped.push(key.to_string());
                    }
                }
            }
        }

        Ok(q)
    }

    pub fn conditions(&self) -> &[Condition<F>] {
        &self.conditions
    }

    pub fn sort(&self) -> Option<Sort<F>> {
        self.sort
    }

    /// Keys skipped under [`DisallowedMode::Drop`], in input order.
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// All conditions hold. An empty query matches everything.
    pub fn matches<R: Searchable<Field = F>>(&self, record: &R) -> bool {
        self.conditions.iter().all(|c| c.matches(record))
    }

    /// Filter, then sort if requested. Unsorted output keeps input order.
    pub fn run<'a, R, I>(&self, records: I) -> Vec<&'a R>
    where
        R: Searchable<Field = F> + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut hits: Vec<&R> = records
            .into_iter()
            .filter(|r| self.matches(*r))
            .collect();
        if let Some(sort) = self.sort {
            hits.sort_by(|a, b| {
                let ord = compare_values(a.field_value(sort.field), b.field_value(sort.field));
                match sort.dir {
                    SortDir::Asc => ord,
                    SortDir::Desc => ord.reverse(),
                }
            });
        }
        hits
    }
}

fn parse_key<F: SearchField>(key: &str) -> std::result::Result<(Vec<F>, Predicate), String> {
    let (attrs, predicate) = Predicate::BY_SUFFIX
        .iter()
        .find_map(|(suffix, p)| {
            key.strip_suffix(suffix)
                .and_then(|rest| rest.strip_suffix('_'))
                .map(|rest| (rest, *p))
        })
        .ok_or_else(|| "unknown predicate".to_string())?;

    if attrs.is_empty() {
        return Err("missing field".into());
    }

    let mut fields = Vec::new();
    for name in attrs.split("_or_") {
        let field =
            F::from_name(name).ok_or_else(|| format!("field not searchable: {name}"))?;
        fields.push(field);
    }

    let kind = fields[0].kind();
    if fields.iter().any(|f| f.kind() != kind) {
        return Err("fields of different kinds cannot be combined".into());
    }
    if !predicate.applies_to(kind) {
        return Err(format!(
            "predicate {} does not apply to {kind} fields",
            predicate.as_str()
        ));
    }

    Ok((fields, predicate))
}

/// The outer error is a malformed sort value on a sortable field (`BadRequest`).
/// The inner error is a field that is not sortable at all.
fn parse_sort<F: SearchField>(
    value: &str,
) -> Result<std::result::Result<Option<Sort<F>>, String>> {
    let mut parts = value.split_whitespace();
    let Some(name) = parts.next() else {
        return Ok(Ok(None));
    };
    let Some(field) = F::from_name(name) else {
        return Ok(Err(format!("field not sortable: {name}")));
    };
    let dir = match parts.next() {
        None | Some("asc") => SortDir::Asc,
        Some("desc") => SortDir::Desc,
        Some(other) => {
            return Err(TiendaError::BadRequest(format!(
                "{SORT_KEY}: invalid sort direction {other:?}"
            )));
        }
    };
    if parts.next().is_some() {
        return Err(TiendaError::BadRequest(format!(
            "{SORT_KEY}: expected `<field> [asc|desc]`, got {value:?}"
        )));
    }
    Ok(Ok(Some(Sort { field, dir })))
}

fn parse_operand(key: &str, kind: FieldKind, value: &str) -> Result<Operand> {
    match kind {
        FieldKind::Text => Ok(Operand::Text(value.to_lowercase())),
        FieldKind::Decimal => value
            .parse::<Decimal>()
            .map(Operand::Decimal)
            .map_err(|e| {
                TiendaError::BadRequest(format!("{key}: invalid decimal {value:?}: {e}"))
            }),
    }
}

fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Text(x), FieldValue::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (FieldValue::Decimal(x), FieldValue::Decimal(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Category, CategoryField, Product, ProductField};

    #[test]
    fn product_allowlist_is_exact() {
        let fields = allowed_search_fields::<Product>();
        let expected: BTreeSet<&str> = ["name", "description", "price"].into_iter().collect();
        assert_eq!(fields, expected);
        assert!(!fields.contains("created_at"));
        assert!(!fields.contains("stock"));
    }

    #[test]
    fn category_allowlist_is_name_only() {
        let fields = allowed_search_fields::<Category>();
        assert_eq!(fields.into_iter().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn not_eq_is_not_mistaken_for_eq() {
        let (fields, p) = parse_key::<ProductField>("name_not_eq").unwrap();
        assert_eq!(fields, vec![ProductField::Name]);
        assert_eq!(p, Predicate::NotEq);
    }

    #[test]
    fn or_keys_expand() {
        let q = SearchQuery::<ProductField>::compile(
            [("name_or_description_cont", "laptop")],
            DisallowedMode::Reject,
        )
        .unwrap();
        let cond = &q.conditions()[0];
        assert_eq!(cond.fields(), [ProductField::Name, ProductField::Description]);
        assert_eq!(cond.predicate(), Predicate::Cont);
        assert_eq!(cond.predicate().as_str(), "cont");
    }

    #[test]
    fn audit_fields_never_parse() {
        let keys = [
            "created_at_gt",
            "created_at_eq",
            "name_or_created_at_cont",
            "stock_eq",
            "id_eq",
        ];
        for key in keys {
            assert!(parse_key::<ProductField>(key).is_err(), "key={key}");
        }
    }

    #[test]
    fn predicate_kind_mismatch() {
        assert!(parse_key::<ProductField>("name_gt").is_err());
        assert!(parse_key::<ProductField>("price_cont").is_err());
        assert!(parse_key::<ProductField>("name_or_price_eq").is_err());
        assert!(parse_key::<CategoryField>("name_lt").is_err());
    }

    #[test]
    fn sort_order_parses() {
        let s = parse_sort::<ProductField>("price desc").unwrap().unwrap().unwrap();
        assert_eq!(s, Sort { field: ProductField::Price, dir: SortDir::Desc });
        assert_eq!(parse_sort::<ProductField>("").unwrap().unwrap(), None);
        assert!(parse_sort::<ProductField>("created_at asc").unwrap().is_err());
    }

    #[test]
    fn malformed_sort_is_bad_request_in_either_mode() {
        for value in ["price sideways", "name asc extra"] {
            for mode in [DisallowedMode::Reject, DisallowedMode::Drop] {
                let err = SearchQuery::<ProductField>::compile([(SORT_KEY, value)], mode)
                    .unwrap_err();
                assert_eq!(err.client_code().as_str(), "BAD_REQUEST", "s={value}");
            }
        }
    }

    #[test]
    fn unsortable_field_follows_mode() {
        let err =
            SearchQuery::<ProductField>::compile([(SORT_KEY, "created_at")], DisallowedMode::Reject)
                .unwrap_err();
        assert_eq!(err.client_code().as_str(), "NOT_ALLOWED");

        let q =
            SearchQuery::<ProductField>::compile([(SORT_KEY, "created_at")], DisallowedMode::Drop)
                .unwrap();
        assert_eq!(q.dropped(), [SORT_KEY.to_string()]);
        assert_eq!(q.sort(), None);
    }

    #[test]
    fn disallowed_key_with_blank_value_still_rejected() {
        let err =
            SearchQuery::<ProductField>::compile([("created_at_gt", "")], DisallowedMode::Reject)
                .unwrap_err();
        assert_eq!(err.client_code().as_str(), "NOT_ALLOWED");
    }

    #[test]
    fn bad_decimal_is_bad_request_in_either_mode() {
        for mode in [DisallowedMode::Reject, DisallowedMode::Drop] {
            let err = SearchQuery::<ProductField>::compile([("price_lteq", "cheap")], mode)
                .unwrap_err();
            assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
        }
    }
}
