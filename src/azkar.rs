use serde::{Deserialize, Serialize};

/// A single reminder entry. The JSON file stores a plain array of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zikr {
    #[serde(rename = "Text")]
    pub text: String,
}

/// Ordered reminder list. Order is display order and wraps cyclically;
/// duplicates are allowed.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AzkarList {
    entries: Vec<Zikr>,
}

impl AzkarList {
    pub fn new() -> Self {
        Self::default()
    }

    /// The list seeded on first run.
    pub fn seeded() -> Self {
        let entries = ["سبحان الله", "الحمد لله", "لا إله إلا الله", "الله أكبر"]
            .into_iter()
            .map(|text| Zikr { text: text.to_string() })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[Zikr] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for the given cursor position, wrapping past the end.
    pub fn entry_at(&self, cursor: usize) -> Option<&Zikr> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.get(cursor % self.entries.len())
    }

    /// Append a new entry. Blank or whitespace-only input is rejected and
    /// leaves the list untouched; the appended text is trimmed.
    pub fn add(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.entries.push(Zikr { text: trimmed.to_string() });
        true
    }

    /// Remove the first entry whose text exactly equals `text`.
    /// Returns false (leaving the list untouched) if no entry matches.
    pub fn remove(&mut self, text: &str) -> bool {
        match self.entries.iter().position(|z| z.text == text) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_has_four_entries() {
        let list = AzkarList::seeded();
        assert_eq!(list.len(), 4);
        assert_eq!(list.entries()[0].text, "سبحان الله");
        assert_eq!(list.entries()[3].text, "الله أكبر");
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut list = AzkarList::new();
        assert!(list.add("first"));
        assert!(list.add("second"));
        assert_eq!(list.entries()[0].text, "first");
        assert_eq!(list.entries()[1].text, "second");
    }

    #[test]
    fn test_add_rejects_blank() {
        let mut list = AzkarList::new();
        assert!(!list.add(""));
        assert!(!list.add("   "));
        assert!(!list.add("\t\n"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_add_trims() {
        let mut list = AzkarList::new();
        assert!(list.add("  hello  "));
        assert_eq!(list.entries()[0].text, "hello");
    }

    #[test]
    fn test_add_allows_duplicates() {
        let mut list = AzkarList::new();
        list.add("same");
        list.add("same");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_first_match_only() {
        let mut list = AzkarList::new();
        list.add("a");
        list.add("b");
        list.add("a");
        assert!(list.remove("a"));
        assert_eq!(list.len(), 2);
        assert_eq!(list.entries()[0].text, "b");
        assert_eq!(list.entries()[1].text, "a");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut list = AzkarList::new();
        list.add("a");
        assert!(!list.remove("missing"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_entry_at_wraps() {
        let mut list = AzkarList::new();
        list.add("a");
        list.add("b");
        list.add("c");
        assert_eq!(list.entry_at(0).unwrap().text, "a");
        assert_eq!(list.entry_at(2).unwrap().text, "c");
        assert_eq!(list.entry_at(3).unwrap().text, "a");
        assert_eq!(list.entry_at(7).unwrap().text, "b");
    }

    #[test]
    fn test_entry_at_empty_is_none() {
        let list = AzkarList::new();
        assert!(list.entry_at(0).is_none());
    }

    #[test]
    fn test_wire_format_is_array_of_text_objects() {
        let mut list = AzkarList::new();
        list.add("ذكر");
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"[{"Text":"ذكر"}]"#);
    }
}
