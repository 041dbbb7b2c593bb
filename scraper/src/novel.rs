use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const PUBLISHER: &str = "Pabel-Moewig Verlag KG, Rastatt";

/// Metadata of one Perry Rhodan issue as found on Perrypedia.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NovelRecord {
    pub number: u32,
    pub title: String,
    pub author: Option<String>,
    pub cycle: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub synopsis: Option<String>,
    pub publisher: String,
}

impl NovelRecord {
    pub fn full_title(&self) -> String {
        format!(
            "Perry Rhodan {}: {} (Heftroman): Perry Rhodan-Zyklus \"{}\"",
            self.number,
            self.title,
            self.cycle.as_deref().unwrap_or("")
        )
    }

    /// Text block with everything a Goodreads book entry needs.
    pub fn catalog_text(&self) -> String {
        let mut text = format!(
            "Title: {}\nAuthor: {}\nPublished: {}\n",
            self.full_title(),
            self.author.as_deref().unwrap_or("unknown"),
            self.publish_date
                .map(|date| date.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        );
        if let Some(synopsis) = &self.synopsis {
            text.push_str(&format!("Synopsis: {}\n", synopsis));
        }
        text.push_str(&format!("Publisher: {}", self.publisher));
        text
    }
}
