use std::fmt;

use serde::{Deserialize, Serialize};

/// A single scraped article.
///
/// On disk the heading and body keep the field names the snapshot file has
/// always used (`h2_text` and `p_text`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub url: String,
    #[serde(rename = "h2_text", default)]
    pub heading: String,
    #[serde(rename = "p_text", default)]
    pub body: String,
}

impl Record {
    pub fn new(
        url: impl Into<String>,
        heading: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            heading: heading.into(),
            body: body.into(),
        }
    }

    /// Returns the text of the given field.
    pub fn field(&self, field: MatchedField) -> &str {
        match field {
            MatchedField::Heading => &self.heading,
            MatchedField::Url => &self.url,
            MatchedField::Body => &self.body,
        }
    }
}

/// Record field that produced the winning similarity score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchedField {
    Heading,
    Url,
    Body,
}

impl MatchedField {
    /// Fields in the order they are scored; earlier fields win ties.
    pub const ALL: [MatchedField; 3] = [
        MatchedField::Heading,
        MatchedField::Url,
        MatchedField::Body,
    ];
}

impl fmt::Display for MatchedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchedField::Heading => "heading",
            MatchedField::Url => "url",
            MatchedField::Body => "body",
        };
        f.write_str(name)
    }
}

/// Best record for a query together with its similarity score in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult<'a> {
    pub record: &'a Record,
    pub score: f64,
    pub field: MatchedField,
}

impl MatchResult<'_> {
    /// Text of the field that drove the match.
    pub fn matched_text(&self) -> &str {
        self.record.field(self.field)
    }
}
