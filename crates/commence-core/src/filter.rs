//! Cursor filters and the view-filter clause grammar.
//!
//! A [`CmcFilter`] describes one comparison against a column or connection.
//! A [`FilterArray`] orders filters into 1-based slots, the unit the external
//! view-filter mechanism understands. Rendering via [`CmcFilter::clause`]
//! must stay bit-exact: the string is passed to the database verbatim.

use std::collections::BTreeMap;
use std::fmt;

use commence_error::FilterError;
use serde::{Deserialize, Serialize};

/// Comparison applied by a [`CmcFilter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterCondition {
    #[default]
    EqualTo,
    Contains,
    After,
}

impl FilterCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterCondition::EqualTo => "Equal To",
            FilterCondition::Contains => "Contains",
            FilterCondition::After => "After",
        }
    }

    /// `After` may run open-ended; the comparison conditions may not.
    fn requires_value(&self) -> bool {
        matches!(self, FilterCondition::EqualTo | FilterCondition::Contains)
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a filter targets: a field of the category itself, or one of the
/// connection shapes reaching into a related category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    #[default]
    Field,
    ConnectionToItem,
    ConnectionToCategoryField,
    ConnectionToConnectionToItem,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Field => "F",
            FilterKind::ConnectionToItem => "CTI",
            FilterKind::ConnectionToCategoryField => "CTCF",
            FilterKind::ConnectionToConnectionToItem => "CTCTI",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One view filter, rendered into a slot of the cursor's filter stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmcFilter {
    column: String,
    condition: FilterCondition,
    value: String,
    kind: FilterKind,
    negated: bool,
}

impl CmcFilter {
    /// Build a field filter, checking the condition/value invariant:
    /// `EqualTo` and `Contains` need a non-empty value.
    pub fn new(
        column: impl Into<String>,
        condition: FilterCondition,
        value: impl Into<String>,
    ) -> Result<Self, FilterError> {
        Self::with_kind(column, condition, value, FilterKind::Field)
    }

    pub fn with_kind(
        column: impl Into<String>,
        condition: FilterCondition,
        value: impl Into<String>,
        kind: FilterKind,
    ) -> Result<Self, FilterError> {
        let value = value.into();
        if condition.requires_value() && value.is_empty() {
            return Err(FilterError::EmptyValue {
                condition: condition.as_str(),
            });
        }
        Ok(Self {
            column: column.into(),
            condition,
            value,
            kind,
            negated: false,
        })
    }

    /// Equality on a field, the shape used for primary-key scoping.
    pub fn equals(column: impl Into<String>, value: impl Into<String>) -> Result<Self, FilterError> {
        Self::new(column, FilterCondition::EqualTo, value)
    }

    /// Invert the filter (`Not` flag in the wire grammar).
    pub fn negate(mut self) -> Self {
        self.negated = true;
        self
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn condition(&self) -> FilterCondition {
        self.condition
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Render the clause passed verbatim to the view-filter mechanism.
    ///
    /// The shape is fixed: `[ViewFilter(slot, kind, not, column, condition,
    /// "value")]`, with the `Not` flag left empty when the filter is not
    /// negated and the quoted value omitted entirely when empty.
    pub fn clause(&self, slot: usize) -> String {
        let not_flag = if self.negated { "Not" } else { "" };
        let value = if self.value.is_empty() {
            String::new()
        } else {
            format!(", \"{}\"", self.value)
        };
        format!(
            "[ViewFilter({slot}, {kind}, {not_flag}, {column}, {condition}{value})]",
            kind = self.kind.as_str(),
            column = self.column,
            condition = self.condition.as_str(),
        )
    }
}

/// Ordered set of filters keyed by 1-based slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterArray {
    filters: BTreeMap<usize, CmcFilter>,
}

impl FilterArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-slot array, as used for primary-key scoping.
    pub fn single(filter: CmcFilter) -> Self {
        let mut array = Self::new();
        array.add_replace_filters([filter]);
        array
    }

    /// Assign filters to slots 1..N in call order, overwriting any slot
    /// already taken. Slots above N are left alone.
    pub fn add_replace_filters(
        &mut self,
        filters: impl IntoIterator<Item = CmcFilter>,
    ) -> &mut Self {
        for (i, filter) in filters.into_iter().enumerate() {
            self.filters.insert(i + 1, filter);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn get(&self, slot: usize) -> Option<&CmcFilter> {
        self.filters.get(&slot)
    }

    /// Slots and rendered clauses, in slot order.
    pub fn clauses(&self) -> impl Iterator<Item = (usize, String)> + '_ {
        self.filters
            .iter()
            .map(|(slot, filter)| (*slot, filter.clause(*slot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_to_requires_value() {
        let err = CmcFilter::new("firstName", FilterCondition::EqualTo, "").unwrap_err();
        assert_eq!(
            err,
            FilterError::EmptyValue {
                condition: "Equal To"
            }
        );
    }

    #[test]
    fn contains_requires_value() {
        assert!(CmcFilter::new("notes", FilterCondition::Contains, "").is_err());
    }

    #[test]
    fn after_permits_empty_value() {
        let filter = CmcFilter::new("lastContact", FilterCondition::After, "").unwrap();
        assert_eq!(filter.clause(2), "[ViewFilter(2, F, , lastContact, After)]");
    }

    #[test]
    fn clause_is_bit_exact() {
        let filter = CmcFilter::equals("firstName", "Jeff").unwrap();
        assert_eq!(
            filter.clause(1),
            "[ViewFilter(1, F, , firstName, Equal To, \"Jeff\")]"
        );
    }

    #[test]
    fn negated_clause_carries_not_flag() {
        let filter = CmcFilter::new("notes", FilterCondition::Contains, "vip")
            .unwrap()
            .negate();
        assert_eq!(
            filter.clause(3),
            "[ViewFilter(3, F, Not, notes, Contains, \"vip\")]"
        );
    }

    #[test]
    fn connection_kind_renders_short_code() {
        let filter = CmcFilter::with_kind(
            "Relates To",
            FilterCondition::EqualTo,
            "AcmeCo",
            FilterKind::ConnectionToItem,
        )
        .unwrap();
        assert_eq!(
            filter.clause(1),
            "[ViewFilter(1, CTI, , Relates To, Equal To, \"AcmeCo\")]"
        );
    }

    #[test]
    fn add_replace_assigns_slots_in_call_order() {
        let mut array = FilterArray::new();
        array.add_replace_filters([
            CmcFilter::equals("a", "1").unwrap(),
            CmcFilter::equals("b", "2").unwrap(),
            CmcFilter::equals("c", "3").unwrap(),
        ]);
        assert_eq!(array.len(), 3);
        assert_eq!(array.get(1).unwrap().column(), "a");
        assert_eq!(array.get(3).unwrap().column(), "c");
    }

    #[test]
    fn shorter_second_call_overwrites_only_leading_slots() {
        let mut array = FilterArray::new();
        array.add_replace_filters([
            CmcFilter::equals("a", "1").unwrap(),
            CmcFilter::equals("b", "2").unwrap(),
            CmcFilter::equals("c", "3").unwrap(),
        ]);
        array.add_replace_filters([CmcFilter::equals("x", "9").unwrap()]);
        assert_eq!(array.len(), 3);
        assert_eq!(array.get(1).unwrap().column(), "x");
        assert_eq!(array.get(2).unwrap().column(), "b");
        assert_eq!(array.get(3).unwrap().column(), "c");
    }

    #[test]
    fn clauses_come_out_in_slot_order() {
        let mut array = FilterArray::new();
        array.add_replace_filters([
            CmcFilter::equals("a", "1").unwrap(),
            CmcFilter::equals("b", "2").unwrap(),
        ]);
        let slots: Vec<usize> = array.clauses().map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![1, 2]);
    }
}
