//! Markdown rendering of a parsed itinerary

use tracing::debug;

use super::{DayPlan, Itinerary};
use crate::config::Variant;

/// Heading printed above a rendered itinerary
pub const HEADING: &str = "📅 Your Personalized Itinerary";

/// Project link shown at the bottom of every itinerary page
pub const FOOTER: &str = "🔗 [GitHub Repository](https://github.com/Pranaveswar19/itinerary-2.0)";

/// How much of each day to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    /// `- Time: Activity` bullets only
    Plain,
    /// Bold time labels plus transport and bad-weather lines when present
    Detailed,
}

impl From<Variant> for RenderStyle {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Classic => RenderStyle::Plain,
            Variant::Detailed => RenderStyle::Detailed,
        }
    }
}

/// Render the itinerary as markdown, one `### Day N` section per day
pub fn render_markdown(itinerary: &Itinerary, style: RenderStyle) -> String {
    debug!(days = itinerary.days(), ?style, "render_markdown: called");
    let mut md = String::new();
    md.push_str(&format!("## {}\n", HEADING));

    for day in &itinerary.itinerary {
        md.push('\n');
        md.push_str(&render_day(day, style));
    }

    md
}

/// Horizontal rule followed by the project link
pub fn render_footer() -> String {
    format!("---\n{}\n", FOOTER)
}

fn render_day(day: &DayPlan, style: RenderStyle) -> String {
    let mut md = format!("### Day {}\n", day.day);

    for slot in &day.activities {
        match style {
            RenderStyle::Plain => md.push_str(&format!("- {}: {}\n", slot.time, slot.activity)),
            RenderStyle::Detailed => md.push_str(&format!("- **{}**: {}\n", slot.time, slot.activity)),
        }
    }

    if style == RenderStyle::Detailed {
        if let Some(transport) = &day.transport {
            md.push_str(&format!("🚕 **Transport:** {}\n", transport));
        }
        if let Some(alternative) = &day.alternative {
            md.push_str(&format!("🌧 **Alternative Plan:** {}\n", alternative));
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::Activity;

    fn two_days() -> Itinerary {
        Itinerary {
            itinerary: vec![
                DayPlan {
                    day: 1,
                    activities: vec![
                        Activity {
                            time: "Morning".to_string(),
                            activity: "Louvre".to_string(),
                        },
                        Activity {
                            time: "Evening".to_string(),
                            activity: "Seine cruise".to_string(),
                        },
                    ],
                    transport: Some("Metro".to_string()),
                    alternative: None,
                },
                DayPlan {
                    day: 2,
                    activities: vec![Activity {
                        time: "Afternoon".to_string(),
                        activity: "Montmartre".to_string(),
                    }],
                    transport: None,
                    alternative: Some("Musée d'Orsay".to_string()),
                },
            ],
        }
    }

    #[test]
    fn test_plain_render() {
        let out = render_markdown(&two_days(), RenderStyle::Plain);
        assert!(out.starts_with(&format!("## {}", HEADING)));
        assert!(out.contains("### Day 1\n- Morning: Louvre\n- Evening: Seine cruise\n"));
        assert!(out.contains("### Day 2\n- Afternoon: Montmartre\n"));
        // Plain style ignores the optional fields
        assert!(!out.contains("Transport"));
        assert!(!out.contains("Alternative"));
    }

    #[test]
    fn test_detailed_render_includes_optional_fields_when_present() {
        let out = render_markdown(&two_days(), RenderStyle::Detailed);
        assert!(out.contains("- **Morning**: Louvre"));
        assert!(out.contains("🚕 **Transport:** Metro"));
        assert!(out.contains("🌧 **Alternative Plan:** Musée d'Orsay"));
        assert_eq!(out.matches("Transport:").count(), 1);
        assert_eq!(out.matches("Alternative Plan:").count(), 1);
    }

    #[test]
    fn test_empty_itinerary_renders_heading_only() {
        let out = render_markdown(&Itinerary { itinerary: vec![] }, RenderStyle::Plain);
        assert_eq!(out.trim(), format!("## {}", HEADING));
    }

    #[test]
    fn test_style_from_variant() {
        assert_eq!(RenderStyle::from(Variant::Classic), RenderStyle::Plain);
        assert_eq!(RenderStyle::from(Variant::Detailed), RenderStyle::Detailed);
    }

    #[test]
    fn test_footer_is_rule_then_link() {
        let footer = render_footer();
        let lines: Vec<&str> = footer.lines().collect();
        assert_eq!(lines, vec!["---", FOOTER]);
        assert!(FOOTER.contains("https://github.com/Pranaveswar19/itinerary-2.0"));
    }
}
