//! Request bodies for database queries.

use super::{encode_all, Encode};
use crate::query::{
    CheckboxPredicate, DatabaseQuery, DatabaseQueryPredicate, DatePredicate, FilesPredicate,
    Filter, FormulaPredicate, MultiSelectPredicate, NumberPredicate, PeoplePredicate,
    PropertyFilter, PropertySort, RelationPredicate, SelectPredicate, SortKey, SortTerm,
    TextPredicate,
};
use serde_json::{json, Map, Value};

fn condition(operator: &str, operand: Value) -> Value {
    let mut object = Map::new();
    object.insert(operator.to_string(), operand);
    Value::Object(object)
}

fn is_empty(empty: bool) -> Value {
    if empty {
        condition("is_empty", Value::Bool(true))
    } else {
        condition("is_not_empty", Value::Bool(true))
    }
}

fn text(predicate: &TextPredicate) -> Value {
    match predicate {
        TextPredicate::Equals(v) => condition("equals", json!(v)),
        TextPredicate::DoesNotEqual(v) => condition("does_not_equal", json!(v)),
        TextPredicate::Contains(v) => condition("contains", json!(v)),
        TextPredicate::DoesNotContain(v) => condition("does_not_contain", json!(v)),
        TextPredicate::StartsWith(v) => condition("starts_with", json!(v)),
        TextPredicate::EndsWith(v) => condition("ends_with", json!(v)),
        TextPredicate::IsEmpty => is_empty(true),
        TextPredicate::IsNotEmpty => is_empty(false),
    }
}

fn number(predicate: &NumberPredicate) -> Value {
    match predicate {
        NumberPredicate::Equals(n) => condition("equals", n.to_json()),
        NumberPredicate::DoesNotEqual(n) => condition("does_not_equal", n.to_json()),
        NumberPredicate::GreaterThan(n) => condition("greater_than", n.to_json()),
        NumberPredicate::LessThan(n) => condition("less_than", n.to_json()),
        NumberPredicate::GreaterThanOrEqualTo(n) => {
            condition("greater_than_or_equal_to", n.to_json())
        }
        NumberPredicate::LessThanOrEqualTo(n) => condition("less_than_or_equal_to", n.to_json()),
        NumberPredicate::IsEmpty => is_empty(true),
        NumberPredicate::IsNotEmpty => is_empty(false),
    }
}

fn checkbox(predicate: &CheckboxPredicate) -> Value {
    match predicate {
        CheckboxPredicate::Equals(checked) => condition("equals", json!(checked)),
        CheckboxPredicate::DoesNotEqual(checked) => condition("does_not_equal", json!(checked)),
    }
}

fn select(predicate: &SelectPredicate) -> Value {
    match predicate {
        SelectPredicate::Equals(v) => condition("equals", json!(v)),
        SelectPredicate::DoesNotEqual(v) => condition("does_not_equal", json!(v)),
        SelectPredicate::IsEmpty => is_empty(true),
        SelectPredicate::IsNotEmpty => is_empty(false),
    }
}

fn multi_select(predicate: &MultiSelectPredicate) -> Value {
    match predicate {
        MultiSelectPredicate::Contains(v) => condition("contains", json!(v)),
        MultiSelectPredicate::DoesNotContain(v) => condition("does_not_contain", json!(v)),
        MultiSelectPredicate::IsEmpty => is_empty(true),
        MultiSelectPredicate::IsNotEmpty => is_empty(false),
    }
}

fn date(predicate: &DatePredicate) -> Value {
    let relative = || json!({});
    match predicate {
        DatePredicate::Equals(d) => condition("equals", json!(d.to_api_string())),
        DatePredicate::Before(d) => condition("before", json!(d.to_api_string())),
        DatePredicate::After(d) => condition("after", json!(d.to_api_string())),
        DatePredicate::OnOrBefore(d) => condition("on_or_before", json!(d.to_api_string())),
        DatePredicate::OnOrAfter(d) => condition("on_or_after", json!(d.to_api_string())),
        DatePredicate::PastWeek => condition("past_week", relative()),
        DatePredicate::PastMonth => condition("past_month", relative()),
        DatePredicate::PastYear => condition("past_year", relative()),
        DatePredicate::NextWeek => condition("next_week", relative()),
        DatePredicate::NextMonth => condition("next_month", relative()),
        DatePredicate::NextYear => condition("next_year", relative()),
        DatePredicate::IsEmpty => is_empty(true),
        DatePredicate::IsNotEmpty => is_empty(false),
    }
}

fn people(predicate: &PeoplePredicate) -> Value {
    match predicate {
        PeoplePredicate::Contains(id) => condition("contains", json!(id.to_dashed())),
        PeoplePredicate::DoesNotContain(id) => {
            condition("does_not_contain", json!(id.to_dashed()))
        }
        PeoplePredicate::IsEmpty => is_empty(true),
        PeoplePredicate::IsNotEmpty => is_empty(false),
    }
}

fn relation(predicate: &RelationPredicate) -> Value {
    match predicate {
        RelationPredicate::Contains(id) => condition("contains", json!(id.to_dashed())),
        RelationPredicate::DoesNotContain(id) => {
            condition("does_not_contain", json!(id.to_dashed()))
        }
        RelationPredicate::IsEmpty => is_empty(true),
        RelationPredicate::IsNotEmpty => is_empty(false),
    }
}

fn formula(predicate: &FormulaPredicate) -> Value {
    match predicate {
        FormulaPredicate::Text(p) => condition("string", text(p)),
        FormulaPredicate::Checkbox(p) => condition("checkbox", checkbox(p)),
        FormulaPredicate::Number(p) => condition("number", number(p)),
        FormulaPredicate::Date(p) => condition("date", date(p)),
    }
}

fn predicate(predicate: &DatabaseQueryPredicate) -> Value {
    match predicate {
        DatabaseQueryPredicate::Text(p) => text(p),
        DatabaseQueryPredicate::Number(p) => number(p),
        DatabaseQueryPredicate::Checkbox(p) => checkbox(p),
        DatabaseQueryPredicate::Select(p) => select(p),
        DatabaseQueryPredicate::MultiSelect(p) => multi_select(p),
        DatabaseQueryPredicate::Date(p) => date(p),
        DatabaseQueryPredicate::People(p) => people(p),
        DatabaseQueryPredicate::Files(FilesPredicate::IsEmpty) => is_empty(true),
        DatabaseQueryPredicate::Files(FilesPredicate::IsNotEmpty) => is_empty(false),
        DatabaseQueryPredicate::Relation(p) => relation(p),
        DatabaseQueryPredicate::Formula(p) => formula(p),
    }
}

impl Encode for PropertyFilter {
    fn encode(&self) -> Value {
        let mut filter = Map::new();
        filter.insert("property".into(), Value::from(self.property()));
        filter.insert(
            self.category().wire_key().to_string(),
            predicate(self.predicate()),
        );
        Value::Object(filter)
    }
}

impl Encode for Filter {
    fn encode(&self) -> Value {
        match self {
            Filter::Property(filter) => filter.encode(),
            Filter::Or(operands) => json!({ "or": encode_all(operands) }),
            Filter::And(operands) => json!({ "and": encode_all(operands) }),
        }
    }
}

impl Encode for SortTerm {
    fn encode(&self) -> Value {
        let direction = self.direction.as_str();
        match &self.key {
            SortKey::Property(name) => json!({ "property": name, "direction": direction }),
            SortKey::Timestamp(key) => json!({ "timestamp": key.as_str(), "direction": direction }),
        }
    }
}

impl Encode for PropertySort {
    fn encode(&self) -> Value {
        encode_all(self.terms())
    }
}

impl Encode for DatabaseQuery {
    /// `filter` and `sorts` are absent, not empty, when there is nothing to
    /// send.
    fn encode(&self) -> Value {
        let mut body = Map::new();
        if let Some(filter) = self.root_filter() {
            body.insert("filter".into(), filter.encode());
        }
        if !self.sorts().is_empty() {
            body.insert("sorts".into(), self.sorts().encode());
        }
        self.page().write_body(&mut body);
        Value::Object(body)
    }
}
