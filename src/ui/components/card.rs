//! Item card component.

use crate::ui::helpers::{class_attr, escape_html};
use crate::ui::theme::ListClasses;
use crate::ui::viewmodel::ItemCard;
use std::fmt::Write as _;

/// Appends one item's markup to `out`.
///
/// # Layout
///
/// ```text
/// article.blog-item
/// ├── img.blog-image            (when the record has an image)
/// └── div.blog-content
///     ├── h3.blog-title
///     ├── div.blog-meta
///     │   ├── span.blog-author
///     │   ├── time.blog-date        (when dated)
///     │   └── span.blog-reading-time (when timed)
///     ├── p.blog-excerpt
///     └── div.blog-tags > span.tag*
/// ```
pub fn render_card(out: &mut String, card: &ItemCard, classes: &ListClasses) {
    // Writing into a String cannot fail.
    let _ = write!(out, "<article class=\"{}\">", class_attr("blog-item", &classes.item));

    if let Some(image) = &card.image {
        let _ = write!(
            out,
            "<img src=\"{}\" alt=\"\" class=\"{}\" />",
            escape_html(image),
            class_attr("blog-image", &classes.image)
        );
    }

    let _ = write!(
        out,
        "<div class=\"{}\"><h3 class=\"{}\">{}</h3><div class=\"{}\"><span class=\"blog-author\">{}</span>",
        class_attr("blog-content", &classes.content),
        class_attr("blog-title", &classes.title),
        escape_html(&card.title),
        class_attr("blog-meta", &classes.meta),
        escape_html(&card.author),
    );

    if let Some(date) = &card.date {
        let _ = write!(out, "<time class=\"blog-date\">{}</time>", escape_html(date));
    }
    if let Some(minutes) = &card.reading_time {
        let _ = write!(
            out,
            "<span class=\"blog-reading-time\">{} min read</span>",
            escape_html(minutes)
        );
    }

    let _ = write!(
        out,
        "</div><p class=\"{}\">{}</p><div class=\"{}\">",
        class_attr("blog-excerpt", &classes.excerpt),
        escape_html(&card.excerpt),
        class_attr("blog-tags", &classes.tags),
    );

    let tag_class = class_attr("tag", &classes.tag);
    for tag in &card.tags {
        let _ = write!(out, "<span class=\"{tag_class}\">{}</span>", escape_html(tag));
    }

    out.push_str("</div></div></article>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Theme;

    fn card() -> ItemCard {
        ItemCard {
            image: Some("/img/a.png".to_string()),
            title: "Ownership <3".to_string(),
            author: "Ferris".to_string(),
            date: Some("3/5/2024".to_string()),
            reading_time: Some("7".to_string()),
            excerpt: "Borrowing & moving".to_string(),
            tags: vec!["rust".to_string(), "memory".to_string()],
        }
    }

    #[test]
    fn renders_every_section_with_theme_classes() {
        let mut html = String::new();
        render_card(&mut html, &card(), &Theme::default().list);

        assert!(html.starts_with("<article class=\"blog-item border rounded-lg"));
        assert!(html.contains("<img src=\"/img/a.png\" alt=\"\" class=\"blog-image w-32"));
        assert!(html.contains(">Ownership &lt;3</h3>"));
        assert!(html.contains("<time class=\"blog-date\">3/5/2024</time>"));
        assert!(html.contains("<span class=\"blog-reading-time\">7 min read</span>"));
        assert!(html.contains(">Borrowing &amp; moving</p>"));
        assert_eq!(html.matches("<span class=\"tag ").count(), 2);
        assert!(html.ends_with("</article>"));
    }

    #[test]
    fn optional_parts_are_omitted() {
        let bare = ItemCard {
            title: "Untitled".to_string(),
            ..ItemCard::default()
        };
        let mut html = String::new();
        render_card(&mut html, &bare, &Theme::from_name("plain").unwrap().list);

        assert!(html.starts_with("<article class=\"blog-item\">"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("blog-date"));
        assert!(!html.contains("min read"));
        assert!(html.contains("<div class=\"blog-tags\"></div>"));
    }
}
