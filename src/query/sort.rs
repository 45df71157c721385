use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "ascending",
            Direction::Descending => "descending",
        }
    }
}

/// Page timestamps the API can sort on without a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampKey {
    CreatedTime,
    LastEditedTime,
}

impl TimestampKey {
    pub fn as_str(self) -> &'static str {
        match self {
            TimestampKey::CreatedTime => "created_time",
            TimestampKey::LastEditedTime => "last_edited_time",
        }
    }
}

/// What a sort term orders by.
///
/// Property names and timestamps live in separate namespaces: a property
/// literally called "created_time" or "title" is still a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortKey {
    Property(String),
    Timestamp(TimestampKey),
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Property(name) => write!(f, "{}", name),
            SortKey::Timestamp(key) => write!(f, "<{}>", key.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortTerm {
    pub key: SortKey,
    pub direction: Direction,
}

/// Ordered sort terms; the first term has the highest priority.
///
/// ```
/// use notionkit::{PropertySort, TimestampKey};
///
/// let sort = PropertySort::new()
///     .descending("Priority")
///     .ascending_by(TimestampKey::CreatedTime);
/// assert_eq!(sort.terms().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertySort(Vec<SortTerm>);

impl PropertySort {
    pub fn new() -> Self {
        Self::default()
    }

    fn term(mut self, key: SortKey, direction: Direction) -> Self {
        self.0.push(SortTerm { key, direction });
        self
    }

    pub fn ascending(self, property: impl Into<String>) -> Self {
        self.term(SortKey::Property(property.into()), Direction::Ascending)
    }

    pub fn descending(self, property: impl Into<String>) -> Self {
        self.term(SortKey::Property(property.into()), Direction::Descending)
    }

    pub fn ascending_by(self, timestamp: TimestampKey) -> Self {
        self.term(SortKey::Timestamp(timestamp), Direction::Ascending)
    }

    pub fn descending_by(self, timestamp: TimestampKey) -> Self {
        self.term(SortKey::Timestamp(timestamp), Direction::Descending)
    }

    /// Appends every term of `other` after the existing ones.
    pub fn then(mut self, other: PropertySort) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn terms(&self) -> &[SortTerm] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
