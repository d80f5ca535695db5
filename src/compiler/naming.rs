//! Identifier normalization
//!
//! Names are split into words, each word is capitalized, and words that are
//! common initialisms are written fully uppercase (`user_url` becomes
//! `UserURL`). Member names additionally get a trailing `Id` word forced to
//! `ID`, even when `id` has been removed from the initialism set.

use std::collections::HashSet;

use convert_case::{Case, Casing};
use once_cell::sync::Lazy;

static COMMON_INITIALISMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
        "IP", "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP",
        "TLS", "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP",
        "XSRF", "XSS",
    ]
    .into_iter()
    .collect()
});

/// Name normalization rules for entities and members
#[derive(Debug, Clone)]
pub struct Naming {
    initialisms: HashSet<String>,
    strip_model_suffix: bool,
}

impl Default for Naming {
    fn default() -> Self {
        Self::new(&[], true)
    }
}

impl Naming {
    pub fn new(extra_initialisms: &[String], strip_model_suffix: bool) -> Self {
        let initialisms = COMMON_INITIALISMS
            .iter()
            .map(|s| s.to_string())
            .chain(extra_initialisms.iter().map(|s| s.to_uppercase()))
            .collect();
        Self {
            initialisms,
            strip_model_suffix,
        }
    }

    /// PascalCase identifier with initialisms uppercased
    pub fn identifier(&self, raw: &str) -> String {
        words(raw)
            .into_iter()
            .map(|word| {
                let upper = word.to_uppercase();
                if self.initialisms.contains(&upper) {
                    upper
                } else {
                    capitalize(&word)
                }
            })
            .collect()
    }

    /// Normalized field name for a member
    pub fn field_name(&self, member: &str) -> String {
        let name = self.identifier(member);
        match name.strip_suffix("Id") {
            Some(stem) => format!("{}ID", stem),
            None => name,
        }
    }

    /// Normalized entity name for an aggregate
    pub fn entity_name(&self, aggregate: &str) -> String {
        let stripped = if self.strip_model_suffix {
            aggregate.replace("Model", "")
        } else {
            aggregate.to_string()
        };
        let name = self.identifier(&stripped);
        if name.is_empty() {
            self.identifier(aggregate)
        } else {
            name
        }
    }
}

/// Lowercase words of an identifier, with non-alphanumeric characters dropped
///
/// Digit runs stay attached to the word before them, so `utf8Name` splits
/// into `utf8` and `name`.
fn words(raw: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for word in raw
        .to_case(Case::Snake)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let word = word.to_lowercase();
        match words.last_mut() {
            Some(last) if word.chars().all(|c| c.is_ascii_digit()) => last.push_str(&word),
            _ => words.push(word),
        }
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_initialisms() {
        let naming = Naming::default();
        assert_eq!(naming.identifier("user_url"), "UserURL");
        assert_eq!(naming.identifier("httpServer"), "HTTPServer");
        assert_eq!(naming.identifier("first name"), "FirstName");
        assert_eq!(naming.identifier("email"), "Email");
    }

    #[test]
    fn test_field_name_id_suffix() {
        let naming = Naming::default();
        assert_eq!(naming.field_name("id"), "ID");
        assert_eq!(naming.field_name("Id"), "ID");
        assert_eq!(naming.field_name("userId"), "UserID");
        assert_eq!(naming.field_name("user_id"), "UserID");
        assert_eq!(naming.field_name("ownerID"), "OwnerID");
        assert_eq!(naming.field_name("paid"), "Paid");
    }

    #[test]
    fn test_field_name_id_suffix_without_initialism() {
        let mut naming = Naming::default();
        naming.initialisms.remove("ID");
        assert_eq!(naming.field_name("authorId"), "AuthorID");
    }

    #[test]
    fn test_entity_name_strips_model() {
        let naming = Naming::default();
        assert_eq!(naming.entity_name("UserModel"), "User");
        assert_eq!(naming.entity_name("blog_post"), "BlogPost");
        assert_eq!(naming.entity_name("Model"), "Model");

        let keep = Naming::new(&[], false);
        assert_eq!(keep.entity_name("UserModel"), "UserModel");
    }

    #[test]
    fn test_digits_stay_with_preceding_word() {
        let naming = Naming::default();
        assert_eq!(naming.identifier("utf8Name"), "UTF8Name");
        assert_eq!(naming.identifier("utf8_name"), "UTF8Name");
        assert_eq!(naming.identifier("column_1"), "Column1");
        assert_eq!(naming.identifier("address2"), "Address2");
        assert_eq!(naming.field_name("v2Id"), "V2ID");
    }

    #[test]
    fn test_extra_initialisms() {
        let naming = Naming::new(&["sku".to_string()], true);
        assert_eq!(naming.identifier("product_sku"), "ProductSKU");
    }
}
