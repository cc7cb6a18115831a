use crate::domain::identity::models::Expert;
use crate::domain::identity::models::IdentityId;

const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Filter for the contact-expert lookup.
///
/// Blank criteria are treated as absent. Matching is a case-insensitive
/// substring test against any of the expert's tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpertQuery {
    pub topic: Option<String>,
    pub language: Option<String>,
}

impl ExpertQuery {
    pub fn new(topic: Option<String>, language: Option<String>) -> Self {
        Self {
            topic: normalize(topic),
            language: normalize(language),
        }
    }

    /// Whether `expert` is available and satisfies every present criterion.
    pub fn matches(&self, expert: &Expert) -> bool {
        expert.available
            && matches_any(&expert.expertise, self.topic.as_deref())
            && matches_any(&expert.languages, self.language.as_deref())
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn matches_any(tags: &[String], needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => {
            let needle = needle.to_lowercase();
            tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
        }
    }
}

/// An expert returned by the contact lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpertMatch {
    pub id: IdentityId,
    pub name: String,
    pub languages: Vec<String>,
    pub expertise: Vec<String>,
    pub whatsapp_link: Option<String>,
}

impl ExpertMatch {
    pub fn new(expert: Expert, topic: Option<&str>) -> Self {
        let whatsapp_link = whatsapp_link(&expert.phone.digits(), topic);

        Self {
            id: expert.id,
            name: expert.name,
            languages: expert.languages,
            expertise: expert.expertise,
            whatsapp_link,
        }
    }
}

/// Click-to-chat link with a prefilled greeting.
fn whatsapp_link(digits: &str, topic: Option<&str>) -> Option<String> {
    if digits.is_empty() {
        return None;
    }

    let greeting = format!(
        "Hello, I am a farmer needing help with {}.",
        topic.unwrap_or("a general query")
    );

    Some(format!(
        "{}/{}?text={}",
        WHATSAPP_BASE_URL,
        digits,
        urlencoding::encode(&greeting)
    ))
}
