use serde::Serialize;

/// One course entry pulled from a journey page.
///
/// Field order is the column order of the exported CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRecord {
    pub title: String,
    pub details: String,
    pub description: String,
    pub link: String,
}

/// The four columns of an [`ItemRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Details,
    Description,
    Link,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Title, Field::Details, Field::Description, Field::Link];

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Details => "details",
            Field::Description => "description",
            Field::Link => "link",
        }
    }

    /// Value stored when the field's query matches nothing.
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Title => "No title available",
            Field::Details => "No details available",
            Field::Description => "No description available",
            Field::Link => "No link available",
        }
    }
}

impl ItemRecord {
    /// A record with every field set to its placeholder.
    pub fn empty() -> Self {
        ItemRecord {
            title: Field::Title.placeholder().to_string(),
            details: Field::Details.placeholder().to_string(),
            description: Field::Description.placeholder().to_string(),
            link: Field::Link.placeholder().to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Details => &self.details,
            Field::Description => &self.description,
            Field::Link => &self.link,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Title => self.title = value,
            Field::Details => self.details = value,
            Field::Description => self.description = value,
            Field::Link => self.link = value,
        }
    }
}
