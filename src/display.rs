// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Helpers for rendering normalized content

use crate::model::Section;

/// Remove markup tags and decode HTML entities from a description
pub fn strip_html(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        let Some(end) = rest[start..].find('>') else {
            break;
        };
        plain.push_str(&rest[..start]);
        rest = &rest[start + end + 1..];
    }
    plain.push_str(rest);

    html_escape::decode_html_entities(plain.trim()).trim().to_string()
}

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour up
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Sections in render order: ascending `order`, ties kept in input order
pub fn sorted_by_order(sections: &[Section]) -> Vec<&Section> {
    let mut sorted: Vec<&Section> = sections.iter().collect();
    sorted.sort_by_key(|section| section.order);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LayoutType;

    fn section(name: &str, order: i32) -> Section {
        Section {
            name: name.to_string(),
            layout: LayoutType::Square,
            content_type: "podcast".to_string(),
            order,
            content: vec![],
        }
    }

    #[test]
    fn strip_html_removes_basic_tags() {
        assert_eq!(strip_html("<p>Hello <b>World</b></p>"), "Hello World");
    }

    #[test]
    fn strip_html_removes_attributes_and_nesting() {
        assert_eq!(
            strip_html(r#"<div class="x"><a href="https://example.com">Listen</a> now</div>"#),
            "Listen now"
        );
    }

    #[test]
    fn strip_html_leaves_plain_text() {
        assert_eq!(strip_html("No markup here"), "No markup here");
        assert_eq!(strip_html(""), "");
    }

    #[test]
    fn strip_html_drops_line_breaks() {
        assert_eq!(strip_html("Line 1<br>Line 2<br/>Line 3"), "Line 1Line 2Line 3");
    }

    #[test]
    fn strip_html_decodes_entities() {
        assert_eq!(strip_html("<p>Tom &amp; Jerry&#39;s</p>"), "Tom & Jerry's");
    }

    #[test]
    fn strip_html_keeps_unterminated_tag() {
        assert_eq!(strip_html("<b>ok</b"), "ok</b");
    }

    #[test]
    fn format_duration_minutes_and_seconds() {
        assert_eq!(format_duration(30), "0:30");
        assert_eq!(format_duration(5), "0:05");
        assert_eq!(format_duration(90), "1:30");
        assert_eq!(format_duration(765), "12:45");
    }

    #[test]
    fn format_duration_hours() {
        assert_eq!(format_duration(3600), "1:00:00");
        assert_eq!(format_duration(5445), "1:30:45");
        assert_eq!(format_duration(8130), "2:15:30");
    }

    #[test]
    fn format_duration_clamps_negative() {
        assert_eq!(format_duration(-5), "0:00");
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let sections = vec![section("c", 2), section("a", 1), section("d", 2), section("b", 1)];

        let names: Vec<&str> = sorted_by_order(&sections)
            .into_iter()
            .map(|s| s.name.as_str())
            .collect();

        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }
}
