//! Parser for the view-filter clause grammar.
//!
//! The inverse of the rendering in `commence-core`: a clause that does not
//! decode is exactly the clause a live database would reject.

use commence_core::{FilterCondition, FilterKind};
use commence_error::AutomationError;

/// A clause decoded back out of the wire grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedClause {
    pub slot: usize,
    pub kind: FilterKind,
    pub negated: bool,
    pub column: String,
    pub condition: FilterCondition,
    pub value: String,
}

fn bad(clause: &str) -> AutomationError {
    AutomationError::BadClause {
        clause: clause.to_string(),
    }
}

pub fn parse_clause(clause: &str) -> Result<ParsedClause, AutomationError> {
    let inner = clause
        .strip_prefix("[ViewFilter(")
        .and_then(|rest| rest.strip_suffix(")]"))
        .ok_or_else(|| bad(clause))?;

    let mut head = inner.splitn(4, ", ");
    let slot = head
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| bad(clause))?;
    let kind = match head.next() {
        Some("F") => FilterKind::Field,
        Some("CTI") => FilterKind::ConnectionToItem,
        Some("CTCF") => FilterKind::ConnectionToCategoryField,
        Some("CTCTI") => FilterKind::ConnectionToConnectionToItem,
        _ => return Err(bad(clause)),
    };
    let negated = match head.next() {
        Some("") => false,
        Some("Not") => true,
        _ => return Err(bad(clause)),
    };
    let rest = head.next().ok_or_else(|| bad(clause))?;

    // The value, when present, is the trailing quoted segment.
    let (col_cond, value) = match rest.rsplit_once(", \"") {
        Some((col_cond, quoted)) => {
            let value = quoted.strip_suffix('"').ok_or_else(|| bad(clause))?;
            (col_cond, value.to_string())
        }
        None => (rest, String::new()),
    };
    let (column, condition) = col_cond.rsplit_once(", ").ok_or_else(|| bad(clause))?;
    let condition = match condition {
        "Equal To" => FilterCondition::EqualTo,
        "Contains" => FilterCondition::Contains,
        "After" => FilterCondition::After,
        _ => return Err(bad(clause)),
    };

    Ok(ParsedClause {
        slot,
        kind,
        negated,
        column: column.to_string(),
        condition,
        value,
    })
}
