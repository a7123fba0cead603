//! Keyword-table occasion classification with precedence rules

use crate::types::Occasions;

/// Activity occasions are mutually exclusive with everything else; table
/// order decides between two detected activities.
const ACTIVITY_OCCASIONS: &[(&str, &[&str])] = &[
    ("swimming", &["swimming", "swim", "pool", "swimwear", "water sports"]),
    ("gym", &["gym", "workout", "exercise", "fitness", "training"]),
    ("hiking", &["hiking", "trekking", "mountain", "trail", "outdoor adventure", "climbing"]),
    ("trekking", &["trekking", "hiking", "mountain", "trail", "outdoor adventure", "climbing"]),
    ("yoga", &["yoga", "stretch", "asanas", "meditation"]),
    ("camping", &["camping", "camp", "tent"]),
    ("running", &["running", "jogging", "run"]),
    ("cycling", &["cycling", "biking", "bike"]),
];

const OTHER_OCCASIONS: &[(&str, &[&str])] = &[
    ("beach party", &["beach party", "beachparty"]),
    ("wedding", &["wedding", "marriage"]),
    ("office party", &["office party", "work party"]),
    ("date", &["date", "romantic"]),
    ("party", &["party", "celebration"]),
    ("interview", &["interview"]),
    ("business meeting", &["business meeting", "meeting"]),
    ("office", &["office", "work"]),
    ("picnic", &["picnic"]),
    ("shopping", &["shopping", "mall"]),
    ("funeral", &["funeral"]),
    ("ritual", &["ritual", "temple"]),
    ("festival", &["festival", "festive"]),
    ("casual", &["casual", "outing"]),
];

/// Checked in order; the first one found in the prompt is paired with "office"
const OFFICE_ETHNIC_KEYWORDS: &[&str] = &["ethnic", "traditional", "ritual", "festive", "ceremony"];

/// Map a prompt to a non-empty, prioritized list of occasion labels
pub fn classify(prompt: &str) -> Occasions {
    let prompt = prompt.to_lowercase();
    let tokens = tokenize(&prompt);
    let padded = format!(" {} ", tokens.join(" "));

    let mut detected: Vec<&str> = Vec::new();
    let mut detect = |label: &'static str| {
        if !detected.contains(&label) {
            detected.push(label);
        }
    };

    // Phrases on whole-word boundaries first, then single tokens
    for (label, keywords) in ACTIVITY_OCCASIONS.iter().chain(OTHER_OCCASIONS) {
        if keywords.iter().any(|kw| padded.contains(&format!(" {kw} "))) {
            detect(*label);
        }
    }
    for (label, keywords) in ACTIVITY_OCCASIONS.iter().chain(OTHER_OCCASIONS) {
        if keywords.iter().any(|kw| tokens.contains(kw)) {
            detect(*label);
        }
    }

    if detected.contains(&"beach party") {
        return Occasions::single("beach party");
    }

    if let Some((activity, _)) = ACTIVITY_OCCASIONS
        .iter()
        .find(|(label, _)| detected.contains(label))
    {
        return Occasions::single(activity);
    }

    if detected.contains(&"office") {
        if let Some(kw) = OFFICE_ETHNIC_KEYWORDS.iter().find(|kw| prompt.contains(*kw)) {
            return labels(&["office", *kw]);
        }
        if detected.contains(&"party") || detected.contains(&"office party") {
            return Occasions::single("office party");
        }
        if detected.contains(&"ritual") || detected.contains(&"festival") {
            return labels(&["office", "ritual"]);
        }
        let mut list = vec!["office"];
        list.extend(detected.iter().copied().filter(|l| *l != "office"));
        return labels(&list);
    }

    labels(&detected)
}

fn labels(list: &[&str]) -> Occasions {
    Occasions::new(list.iter().map(|l| l.to_string()).collect())
}

fn tokenize(prompt: &str) -> Vec<&str> {
    prompt
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '\''))
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_labels(prompt: &str) -> Vec<String> {
        classify(prompt).labels().to_vec()
    }

    #[test]
    fn test_beach_party_suppresses_swimming() {
        assert_eq!(classify_labels("beach party with a swim"), vec!["beach party"]);
    }

    #[test]
    fn test_activity_is_exclusive() {
        assert_eq!(classify_labels("gym workout in green"), vec!["gym"]);
        assert_eq!(classify_labels("Swimming after the office"), vec!["swimming"]);
        assert_eq!(classify_labels("going trekking"), vec!["hiking"]);
        assert_eq!(classify_labels("yoga then a party"), vec!["yoga"]);
    }

    #[test]
    fn test_multi_word_activity_phrases() {
        assert_eq!(classify_labels("water sports day"), vec!["swimming"]);
        assert_eq!(classify_labels("an outdoor adventure weekend"), vec!["hiking"]);
        // both words must appear together
        assert_eq!(classify_labels("water the plants"), vec!["general"]);
    }

    #[test]
    fn test_whole_word_matching() {
        // "gymnastics" must not trigger gym, "update" must not trigger date
        assert_eq!(classify_labels("gymnastics update"), vec!["general"]);
        assert_eq!(classify_labels("dinner date"), vec!["date"]);
    }

    #[test]
    fn test_office_combinations() {
        assert_eq!(classify_labels("office ethnic day"), vec!["office", "ethnic"]);
        assert_eq!(classify_labels("traditional day at work"), vec!["office", "traditional"]);
        assert_eq!(classify_labels("office party tonight"), vec!["office party"]);
        assert_eq!(classify_labels("office festival"), vec!["office", "ritual"]);
        assert_eq!(classify_labels("office then shopping"), vec!["office", "shopping"]);
        assert_eq!(classify_labels("office"), vec!["office"]);
    }

    #[test]
    fn test_multiple_generic_labels_kept() {
        assert_eq!(classify_labels("wedding party"), vec!["wedding", "party"]);
        assert_eq!(classify_labels("business meeting"), vec!["business meeting"]);
    }

    #[test]
    fn test_fallback_and_joined_label() {
        assert_eq!(classify_labels("something nice"), vec!["general"]);
        assert_eq!(classify("office ethnic").joined(), "office & ethnic");
    }

    #[test]
    fn test_funeral() {
        assert_eq!(classify_labels("funeral attire"), vec!["funeral"]);
    }
}
