//! The invitation template catalogue: every design is a background frame
//! (an SVG data URI) plus placeholder text the client fills in.

pub mod catalogue;
pub mod svg;

use serde::{Deserialize, Serialize};

pub use catalogue::generate_catalogue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub title: String,
    pub style: String,
    pub text: String,
    /// Optional photo; always empty for generated designs.
    pub image: String,
    pub frame: String,
}

/// Templates grouped by event category, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalogue {
    pub birthday: Vec<Template>,
    pub wedding: Vec<Template>,
    pub anniversary: Vec<Template>,
    pub baby: Vec<Template>,
}

impl Catalogue {
    pub fn len(&self) -> usize {
        self.categories().map(|(_, t)| t.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn categories(&self) -> impl Iterator<Item = (&'static str, &[Template])> {
        [
            ("birthday", self.birthday.as_slice()),
            ("wedding", self.wedding.as_slice()),
            ("anniversary", self.anniversary.as_slice()),
            ("baby", self.baby.as_slice()),
        ]
        .into_iter()
    }
}
