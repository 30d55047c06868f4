//! Tag records

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DEFAULT_TAG_COLOR;

/// A normalised tag that timers link to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    /// `#RRGGBB`
    pub color: String,
}

impl Tag {
    /// New tag with the default grey colour
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: Uuid::now_v7(), name: name.into(), color: DEFAULT_TAG_COLOR.to_string() }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_color() {
        let tag = Tag::new("work");
        assert_eq!(tag.color, "#6B7280");
        assert_eq!(tag.with_color("#FF0000").color, "#FF0000");
    }
}
