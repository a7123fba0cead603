//! Color tables, requirement expansion and harmony heuristics

use crate::types::{ColorHarmony, Item};

/// Colors that go well with each base color. Key order doubles as the
/// approximate "wheel" used for analogous checks; it is a fixed list, not a
/// perceptual color model.
const COMPLEMENTS: &[(&str, &[&str])] = &[
    ("red", &["green", "gold", "black", "white", "navy", "cream"]),
    ("blue", &["orange", "white", "silver", "navy", "gold", "red"]),
    ("yellow", &["purple", "gray", "black", "white", "navy", "green"]),
    ("green", &["red", "brown", "gold", "black", "white", "pink"]),
    ("purple", &["yellow", "mint", "white", "black", "gold", "gray"]),
    ("pink", &["green", "brown", "white", "navy", "gray", "black"]),
    ("black", &["gold", "silver", "white", "red", "pink", "navy"]),
    ("white", &["black", "navy", "red", "gold", "green", "purple"]),
    ("gray", &["yellow", "pink", "white", "black", "purple", "red"]),
    ("brown", &["blue", "cream", "green", "white", "pink", "beige"]),
    ("beige", &["brown", "green", "blue", "white", "navy", "black"]),
    ("navy", &["gold", "red", "white", "pink", "beige", "orange"]),
    ("cream", &["brown", "green", "navy", "black", "red", "purple"]),
    ("gold", &["black", "navy", "red", "purple", "green", "blue"]),
    ("silver", &["blue", "black", "white", "red", "purple", "gray"]),
    ("orange", &["blue", "white", "black", "green", "navy", "brown"]),
    ("teal", &["coral", "white", "navy", "gold", "brown", "black"]),
    ("maroon", &["gold", "white", "navy", "green", "gray", "beige"]),
    ("peach", &["navy", "white", "mint", "gray", "green", "brown"]),
    ("mint", &["peach", "white", "navy", "gray", "brown", "pink"]),
    ("lavender", &["yellow", "white", "gray", "navy", "green", "gold"]),
    ("olive", &["red", "white", "navy", "black", "orange", "pink"]),
    ("coral", &["teal", "white", "navy", "gray", "black", "gold"]),
    ("mustard", &["purple", "white", "navy", "black", "green", "gray"]),
    ("turquoise", &["coral", "white", "navy", "gold", "black", "red"]),
    ("charcoal", &["gold", "white", "red", "navy", "pink", "green"]),
    ("violet", &["yellow", "white", "gray", "navy", "gold", "green"]),
    ("indigo", &["gold", "white", "red", "navy", "pink", "orange"]),
];

/// Colors accepted when a color is required. Red, blue and green list true
/// shades; every other entry lists the complement set instead, so "purple"
/// also admits yellow or gold items. Kept as-is; callers should treat the
/// expansion as "related", not "same".
const VARIANTS: &[(&str, &[&str])] = &[
    ("red", &["maroon", "burgundy", "crimson", "ruby"]),
    ("blue", &["navy", "teal", "sky blue", "aqua"]),
    ("green", &["olive", "emerald", "mint", "forest"]),
    ("purple", &["yellow", "mint", "white", "black", "gold", "gray"]),
    ("pink", &["green", "brown", "white", "navy", "gray", "black"]),
    ("black", &["gold", "silver", "white", "red", "pink", "navy"]),
    ("white", &["black", "navy", "red", "gold", "green", "purple"]),
    ("gray", &["yellow", "pink", "white", "black", "purple", "red"]),
    ("brown", &["blue", "cream", "green", "white", "pink", "beige"]),
    ("beige", &["brown", "green", "blue", "white", "navy", "black"]),
    ("navy", &["gold", "red", "white", "pink", "beige", "orange"]),
    ("cream", &["brown", "green", "navy", "black", "red", "purple"]),
    ("gold", &["black", "navy", "red", "purple", "green", "blue"]),
    ("silver", &["blue", "black", "white", "red", "purple", "gray"]),
    ("orange", &["blue", "white", "black", "green", "navy", "brown"]),
    ("teal", &["coral", "white", "navy", "gold", "brown", "black"]),
    ("maroon", &["gold", "white", "navy", "green", "gray", "beige"]),
    ("peach", &["navy", "white", "mint", "gray", "green", "brown"]),
    ("mint", &["peach", "white", "navy", "gray", "brown", "pink"]),
    ("lavender", &["yellow", "white", "gray", "navy", "green", "gold"]),
    ("olive", &["red", "white", "navy", "black", "orange", "pink"]),
    ("coral", &["teal", "white", "navy", "gray", "black", "gold"]),
    ("mustard", &["purple", "white", "navy", "black", "green", "gray"]),
    ("turquoise", &["coral", "white", "navy", "gold", "black", "red"]),
    ("charcoal", &["gold", "white", "red", "navy", "pink", "green"]),
    ("violet", &["yellow", "white", "gray", "navy", "gold", "green"]),
    ("indigo", &["gold", "white", "red", "navy", "pink", "orange"]),
];

const NEUTRALS: &[&str] = &["black", "white", "gray", "beige", "cream", "navy"];

/// Pair bonuses added to a top+bottom outfit score
pub const COMPLEMENTARY_BONUS: i32 = 25;
pub const SHARED_COLOR_BONUS: i32 = 20;
pub const ANALOGOUS_BONUS: i32 = 15;

const ANALOGOUS_DISTANCE: usize = 2;

pub fn is_color(word: &str) -> bool {
    position(word).is_some()
}

pub fn all_colors() -> impl Iterator<Item = &'static str> {
    COMPLEMENTS.iter().map(|(c, _)| *c)
}

pub fn complements(color: &str) -> &'static [&'static str] {
    COMPLEMENTS
        .iter()
        .find(|(c, _)| *c == color)
        .map(|(_, list)| *list)
        .unwrap_or(&[])
}

fn position(color: &str) -> Option<usize> {
    COMPLEMENTS.iter().position(|(c, _)| *c == color)
}

/// A required color plus every color the variant table admits for it
pub fn expand(color: &str) -> Vec<&str> {
    let variants = VARIANTS
        .iter()
        .find(|(c, _)| *c == color)
        .map(|(_, list)| *list)
        .unwrap_or(&[]);
    std::iter::once(color).chain(variants.iter().copied()).collect()
}

/// Whether the item carries `color` or one of its variants in its tags or name
pub fn item_matches_color(item: &Item, color: &str) -> bool {
    let name = item.name.to_lowercase();
    expand(color)
        .into_iter()
        .any(|c| item.has_tag(c) || name.contains(c))
}

/// Recognized color tags, in catalog tag order
pub fn colors_of(item: &Item) -> Vec<&str> {
    item.tags
        .iter()
        .map(String::as_str)
        .filter(|t| is_color(t))
        .collect()
}

fn goes_with(a: &str, b: &str) -> bool {
    complements(a).contains(&b)
}

/// Classify how the first recognized color of each item combine
pub fn classify(items: &[Item]) -> ColorHarmony {
    let colors: Vec<&str> = items
        .iter()
        .filter_map(|i| colors_of(i).into_iter().next())
        .collect();

    let Some((&base, rest)) = colors.split_first() else {
        return ColorHarmony::Stylish;
    };

    if rest.iter().any(|&c| goes_with(base, c)) {
        return ColorHarmony::Complementary;
    }
    if rest.iter().all(|&c| c == base) {
        return ColorHarmony::Monochromatic;
    }
    if colors.iter().all(|c| NEUTRALS.contains(c)) {
        return ColorHarmony::Neutral;
    }

    let positions: Vec<usize> = colors.iter().filter_map(|c| position(c)).collect();
    if let (Some(min), Some(max)) = (positions.iter().min(), positions.iter().max()) {
        if max - min <= ANALOGOUS_DISTANCE {
            return ColorHarmony::Analogous;
        }
    }

    ColorHarmony::Stylish
}

/// Additive bonus for pairing two items, considering all their colors
pub fn pair_score(a: &Item, b: &Item) -> i32 {
    let colors_a = colors_of(a);
    let colors_b = colors_of(b);
    if colors_a.is_empty() || colors_b.is_empty() {
        return 0;
    }

    let pairs = || colors_a.iter().flat_map(|x| colors_b.iter().map(move |y| (*x, *y)));

    if pairs().any(|(x, y)| goes_with(x, y)) {
        COMPLEMENTARY_BONUS
    } else if pairs().any(|(x, y)| x == y) {
        SHARED_COLOR_BONUS
    } else if pairs()
        .filter_map(|(x, y)| Some(position(x)?.abs_diff(position(y)?)))
        .any(|d| d <= ANALOGOUS_DISTANCE)
    {
        ANALOGOUS_BONUS
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn item(id: &str, tags: &[&str]) -> Item {
        Item {
            id: id.to_string(),
            name: id.to_string(),
            category: Category::Topwear,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image: String::new(),
        }
    }

    #[test]
    fn test_expand_keeps_base_first() {
        let family = expand("red");
        assert_eq!(family[0], "red");
        assert!(family.contains(&"maroon"));
        // purple lists complements, not shades
        assert!(expand("purple").contains(&"gold"));
        assert_eq!(expand("yellow"), vec!["yellow"]);
    }

    #[test]
    fn test_item_matches_color_by_tag_or_name() {
        assert!(item_matches_color(&item("a", &["maroon", "silk"]), "red"));
        assert!(!item_matches_color(&item("a", &["blue"]), "red"));
        let mut named = item("a", &["silk"]);
        named.name = "Olive Kurta".to_string();
        assert!(item_matches_color(&named, "green"));
    }

    #[test]
    fn test_classify_rules() {
        let red = item("r", &["red"]);
        let green = item("g", &["green"]);
        let black = item("b", &["black"]);
        let white = item("w", &["silk", "white"]);
        let blue = item("u", &["blue"]);
        let yellow = item("y", &["yellow"]);
        let plain = item("p", &["cotton"]);

        assert_eq!(classify(&[red.clone(), green]), ColorHarmony::Complementary);
        assert_eq!(classify(&[red.clone(), red.clone()]), ColorHarmony::Monochromatic);
        assert_eq!(classify(&[red.clone()]), ColorHarmony::Monochromatic);
        // black lists white as a complement, so check neutrals that are not paired
        assert_eq!(
            classify(&[item("c", &["cream"]), item("g2", &["gray"])]),
            ColorHarmony::Neutral
        );
        assert_eq!(classify(&[black, white]), ColorHarmony::Complementary);
        assert_eq!(classify(&[blue, yellow]), ColorHarmony::Analogous);
        assert_eq!(classify(&[plain.clone(), plain]), ColorHarmony::Stylish);
        assert_eq!(classify(&[]), ColorHarmony::Stylish);
    }

    #[test]
    fn test_classify_uses_first_listed_color() {
        let white_red = item("a", &["white", "red"]);
        let white_blue = item("b", &["white", "blue"]);
        assert_eq!(colors_of(&white_red), vec!["white", "red"]);
        assert_eq!(classify(&[white_red, white_blue]), ColorHarmony::Monochromatic);

        let red_white = item("c", &["red", "white"]);
        let green_white = item("d", &["green", "white"]);
        assert_eq!(classify(&[red_white, green_white]), ColorHarmony::Complementary);
    }

    #[test]
    fn test_pair_score_tiers() {
        assert_eq!(
            pair_score(&item("a", &["red"]), &item("b", &["green"])),
            COMPLEMENTARY_BONUS
        );
        assert_eq!(
            pair_score(&item("a", &["teal"]), &item("b", &["teal"])),
            SHARED_COLOR_BONUS
        );
        assert_eq!(
            pair_score(&item("a", &["blue"]), &item("b", &["yellow"])),
            ANALOGOUS_BONUS
        );
        assert_eq!(pair_score(&item("a", &["indigo"]), &item("b", &["red"])), COMPLEMENTARY_BONUS);
        assert_eq!(pair_score(&item("a", &["cotton"]), &item("b", &["red"])), 0);
        assert_eq!(pair_score(&item("a", &["teal"]), &item("b", &["red"])), 0);
    }
}
