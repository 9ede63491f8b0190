use std::fmt;

/// Theme icon shown next to a quiz in topic lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconTag {
    Bolt,
    Function,
    Leaf,
    Book,
    Globe,
    Film,
    Music,
    Sports,
    Desktop,
    #[default]
    QuestionMark,
}

/// Ordered keyword rules; the first rule with a keyword contained in the
/// lowercased title wins.
const TITLE_RULES: &[(&[&str], IconTag)] = &[
    (&["marvel", "super", "hero"], IconTag::Bolt),
    (&["math", "calculus", "algebra"], IconTag::Function),
    (&["science", "physics", "chemistry", "biology"], IconTag::Leaf),
    (&["history", "world"], IconTag::Book),
    (&["geography", "countries"], IconTag::Globe),
    (&["movie", "film", "cinema"], IconTag::Film),
    (&["music", "song"], IconTag::Music),
    (&["sport", "football", "basketball"], IconTag::Sports),
    (&["tech", "computer", "programming"], IconTag::Desktop),
];

impl IconTag {
    /// Derive an icon from a quiz title by case-insensitive keyword match.
    #[must_use]
    pub fn for_title(title: &str) -> Self {
        let lower = title.to_lowercase();
        TITLE_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|kw| lower.contains(kw)))
            .map_or(Self::default(), |(_, tag)| *tag)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IconTag::Bolt => "bolt",
            IconTag::Function => "function",
            IconTag::Leaf => "leaf",
            IconTag::Book => "book",
            IconTag::Globe => "globe",
            IconTag::Film => "film",
            IconTag::Music => "music",
            IconTag::Sports => "sports",
            IconTag::Desktop => "desktop",
            IconTag::QuestionMark => "question-mark",
        }
    }
}

impl fmt::Display for IconTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_documented_titles() {
        assert_eq!(IconTag::for_title("Marvel Trivia"), IconTag::Bolt);
        assert_eq!(IconTag::for_title("Advanced Algebra"), IconTag::Function);
        assert_eq!(IconTag::for_title("Untitled"), IconTag::QuestionMark);
    }

    #[test]
    fn match_is_case_insensitive() {
        assert_eq!(IconTag::for_title("BASKETBALL legends"), IconTag::Sports);
        assert_eq!(IconTag::for_title("Intro to Programming"), IconTag::Desktop);
    }

    #[test]
    fn earlier_rule_wins() {
        // "superhero science" hits both the bolt and leaf rules.
        assert_eq!(IconTag::for_title("Superhero Science"), IconTag::Bolt);
        // "world music" hits book before music.
        assert_eq!(IconTag::for_title("World Music"), IconTag::Book);
    }

    #[test]
    fn display_uses_tag_name() {
        assert_eq!(IconTag::QuestionMark.to_string(), "question-mark");
        assert_eq!(IconTag::Globe.to_string(), "globe");
    }
}
