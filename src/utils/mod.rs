pub mod config;

use std::hash::Hasher;

/// File-name friendly form of a pattern title: lowercase alphanumerics joined
/// by single underscores. When that drops anything from the title, a short
/// xxHash64 tag of the title is appended so distinct titles keep distinct
/// names.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_');
    if slug == title {
        return slug.to_string();
    }

    let mut hasher = twox_hash::XxHash64::default();
    hasher.write(title.as_bytes());
    let tag = hasher.finish() as u32;
    if slug.is_empty() {
        format!("pattern_{tag:08x}")
    } else {
        format!("{slug}_{tag:08x}")
    }
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn clean_titles_are_kept() {
        assert_eq!(slugify("days"), "days");
        assert_eq!(slugify("night_shift_4_on"), "night_shift_4_on");
        assert_eq!(slugify("夜勤"), "夜勤");
    }

    #[test]
    fn lossy_titles_get_a_tag() {
        let slug = slugify("Night Shift (4 on)");
        assert!(slug.starts_with("night_shift_4_on_"), "{slug}");
        assert_eq!(slug.len(), "night_shift_4_on_".len() + 8);
        assert!(slugify("***").starts_with("pattern_"));
        assert!(slugify("Über-Früh").starts_with("über_früh_"));
        assert_eq!(slugify("Night Shift (4 on)"), slug);
    }

    #[test]
    fn distinct_titles_never_share_a_slug() {
        let titles = ["夜勤", "日勤", "A-B", "A B", "a_b", "Days", "days", "***", "+++", "Early/Late"];
        let mut slugs: Vec<_> = titles.iter().map(|t| slugify(t)).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), titles.len());
    }
}
