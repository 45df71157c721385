//! Typed predicates and the property filters that carry them.

use crate::types::{DateOrDateTime, Number, PageId, UserId, ValidationError};

#[derive(Debug, Clone, PartialEq)]
pub enum TextPredicate {
    Equals(String),
    DoesNotEqual(String),
    Contains(String),
    DoesNotContain(String),
    StartsWith(String),
    EndsWith(String),
    IsEmpty,
    IsNotEmpty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumberPredicate {
    Equals(Number),
    DoesNotEqual(Number),
    GreaterThan(Number),
    LessThan(Number),
    GreaterThanOrEqualTo(Number),
    LessThanOrEqualTo(Number),
    IsEmpty,
    IsNotEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxPredicate {
    Equals(bool),
    DoesNotEqual(bool),
}

/// Also used for status properties.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectPredicate {
    Equals(String),
    DoesNotEqual(String),
    IsEmpty,
    IsNotEmpty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MultiSelectPredicate {
    Contains(String),
    DoesNotContain(String),
    IsEmpty,
    IsNotEmpty,
}

/// Date comparisons. The relative variants are evaluated by the API against
/// the current time.
#[derive(Debug, Clone, PartialEq)]
pub enum DatePredicate {
    Equals(DateOrDateTime),
    Before(DateOrDateTime),
    After(DateOrDateTime),
    OnOrBefore(DateOrDateTime),
    OnOrAfter(DateOrDateTime),
    PastWeek,
    PastMonth,
    PastYear,
    NextWeek,
    NextMonth,
    NextYear,
    IsEmpty,
    IsNotEmpty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PeoplePredicate {
    Contains(UserId),
    DoesNotContain(UserId),
    IsEmpty,
    IsNotEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilesPredicate {
    IsEmpty,
    IsNotEmpty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RelationPredicate {
    Contains(PageId),
    DoesNotContain(PageId),
    IsEmpty,
    IsNotEmpty,
}

/// A predicate over a formula's result, nested by result type.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaPredicate {
    Text(TextPredicate),
    Checkbox(CheckboxPredicate),
    Number(NumberPredicate),
    Date(DatePredicate),
}

/// Leaf of a filter tree, one variant per predicate family.
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseQueryPredicate {
    Text(TextPredicate),
    Number(NumberPredicate),
    Checkbox(CheckboxPredicate),
    Select(SelectPredicate),
    MultiSelect(MultiSelectPredicate),
    Date(DatePredicate),
    People(PeoplePredicate),
    Files(FilesPredicate),
    Relation(RelationPredicate),
    Formula(FormulaPredicate),
}

impl DatabaseQueryPredicate {
    pub fn family(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Checkbox(_) => "checkbox",
            Self::Select(_) => "select",
            Self::MultiSelect(_) => "multi_select",
            Self::Date(_) => "date",
            Self::People(_) => "people",
            Self::Files(_) => "files",
            Self::Relation(_) => "relation",
            Self::Formula(_) => "formula",
        }
    }
}

macro_rules! predicate_from {
    ($($predicate:ident => $variant:ident),* $(,)?) => {
        $(impl From<$predicate> for DatabaseQueryPredicate {
            fn from(predicate: $predicate) -> Self {
                Self::$variant(predicate)
            }
        })*
    };
}

predicate_from! {
    TextPredicate => Text,
    NumberPredicate => Number,
    CheckboxPredicate => Checkbox,
    SelectPredicate => Select,
    MultiSelectPredicate => MultiSelect,
    DatePredicate => Date,
    PeoplePredicate => People,
    FilesPredicate => Files,
    RelationPredicate => Relation,
    FormulaPredicate => Formula,
}

/// The type of the property a filter targets. Decides both the wire key the
/// predicate is nested under and which predicate family is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterCategory {
    Title,
    RichText,
    Url,
    Email,
    PhoneNumber,
    Number,
    Checkbox,
    Select,
    Status,
    MultiSelect,
    Date,
    People,
    Files,
    Relation,
    Formula,
    CreatedBy,
    CreatedTime,
    LastEditedBy,
    LastEditedTime,
}

impl FilterCategory {
    /// Key the predicate object is nested under on the wire.
    pub fn wire_key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::RichText => "rich_text",
            Self::Url => "url",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Status => "status",
            Self::MultiSelect => "multi_select",
            Self::Date => "date",
            Self::People => "people",
            Self::Files => "files",
            Self::Relation => "relation",
            Self::Formula => "formula",
            Self::CreatedBy => "created_by",
            Self::CreatedTime => "created_time",
            Self::LastEditedBy => "last_edited_by",
            Self::LastEditedTime => "last_edited_time",
        }
    }

    /// Predicate family this category accepts.
    pub fn expected_family(self) -> &'static str {
        match self {
            Self::Title | Self::RichText | Self::Url | Self::Email | Self::PhoneNumber => "text",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Select | Self::Status => "select",
            Self::MultiSelect => "multi_select",
            Self::Date | Self::CreatedTime | Self::LastEditedTime => "date",
            Self::People | Self::CreatedBy | Self::LastEditedBy => "people",
            Self::Files => "files",
            Self::Relation => "relation",
            Self::Formula => "formula",
        }
    }
}

/// A property name paired with a predicate its category accepts.
///
/// Fields are private so the category/predicate agreement checked at
/// construction cannot be broken afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFilter {
    property: String,
    category: FilterCategory,
    predicate: DatabaseQueryPredicate,
}

macro_rules! typed_filters {
    ($($name:ident: $category:ident($predicate:ty)),* $(,)?) => {
        $(pub fn $name(property: impl Into<String>, predicate: $predicate) -> Self {
            Self {
                property: property.into(),
                category: FilterCategory::$category,
                predicate: predicate.into(),
            }
        })*
    };
}

impl PropertyFilter {
    /// Pairs `predicate` with a property of the given category, failing with
    /// `TypeMismatch` when the predicate family is not the one the category
    /// accepts.
    pub fn new(
        property: impl Into<String>,
        category: FilterCategory,
        predicate: DatabaseQueryPredicate,
    ) -> Result<Self, ValidationError> {
        let property = property.into();
        if predicate.family() != category.expected_family() {
            return Err(ValidationError::TypeMismatch {
                property,
                expected: category.expected_family(),
                found: predicate.family(),
            });
        }
        Ok(Self {
            property,
            category,
            predicate,
        })
    }

    typed_filters! {
        title: Title(TextPredicate),
        rich_text: RichText(TextPredicate),
        url: Url(TextPredicate),
        email: Email(TextPredicate),
        phone_number: PhoneNumber(TextPredicate),
        number: Number(NumberPredicate),
        checkbox: Checkbox(CheckboxPredicate),
        select: Select(SelectPredicate),
        status: Status(SelectPredicate),
        multi_select: MultiSelect(MultiSelectPredicate),
        date: Date(DatePredicate),
        people: People(PeoplePredicate),
        files: Files(FilesPredicate),
        relation: Relation(RelationPredicate),
        formula: Formula(FormulaPredicate),
        created_by: CreatedBy(PeoplePredicate),
        created_time: CreatedTime(DatePredicate),
        last_edited_by: LastEditedBy(PeoplePredicate),
        last_edited_time: LastEditedTime(DatePredicate),
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn category(&self) -> FilterCategory {
        self.category
    }

    pub fn predicate(&self) -> &DatabaseQueryPredicate {
        &self.predicate
    }
}
