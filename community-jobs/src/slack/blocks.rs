//! Slack Block Kit types and the message builders.
//!
//! The builders are pure: deterministic for identical inputs, no I/O, and
//! inputs are never mutated. Optional sections are rendered only when their
//! input is present; absence omits the section with no placeholder.

use serde::Serialize;

use crate::database::ListItem;
use crate::sources::extras::{OnThisDayEvent, Quote, Trend};
use crate::sources::Fact;

const FUN_FACT_HEADER: &str = "Daily Fun Facts :tm:";
const QUOTE_LABEL: &str = "*Inspirational Quote of the Day*";
const FACTS_LABEL: &str = "*Daily Facts:*";
const TRENDS_LABEL: &str = "*Daily Trends:*";
const ON_THIS_DAY_LABEL: &str = "*On This Day:*";
const DISCLAIMER: &str =
    "Disclaimer: no guarantee is offered as to the validity of the facts provided.";

const DAILY_POST_HEADER: &str = "Daily List Item";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    Mrkdwn { text: String },
    PlainText { text: String, emoji: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header {
        text: TextObject,
    },
    Section {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<TextObject>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<TextObject>>,
    },
    Divider,
    Context {
        elements: Vec<TextObject>,
    },
}

impl Block {
    fn header(text: &str) -> Self {
        Block::Header {
            text: TextObject::PlainText {
                text: text.to_string(),
                emoji: true,
            },
        }
    }

    fn section(text: String) -> Self {
        Block::Section {
            text: Some(TextObject::Mrkdwn { text }),
            fields: None,
        }
    }

    /// Bolded label rendered as a fields section, the way the bot's other
    /// messages label their sections.
    fn label(text: &str) -> Self {
        Block::Section {
            text: None,
            fields: Some(vec![TextObject::Mrkdwn {
                text: text.to_string(),
            }]),
        }
    }

    fn context(text: &str) -> Self {
        Block::Context {
            elements: vec![TextObject::Mrkdwn {
                text: text.to_string(),
            }],
        }
    }
}

/// Render the fun-fact notification.
///
/// Section order is fixed: header, quote (optional), facts, trends
/// (optional), on-this-day (optional), disclaimer footer.
pub fn build_fun_fact_message(
    facts: &[Fact],
    quote: Option<&Quote>,
    trends: Option<&[Trend]>,
    on_this_day: Option<&[OnThisDayEvent]>,
) -> Vec<Block> {
    let mut message = vec![Block::header(FUN_FACT_HEADER)];

    if let Some(quote) = quote {
        message.push(Block::label(QUOTE_LABEL));
        message.push(Block::section(quote.text.clone()));
        message.push(Block::Divider);
    }

    message.push(Block::label(FACTS_LABEL));
    let fact_lines: String = facts
        .iter()
        .map(|fact| format!("• {}\n", fact.text))
        .collect();
    message.push(Block::section(fact_lines));
    message.push(Block::Divider);

    if let Some(trends) = trends {
        let trend_lines: String = trends
            .iter()
            .map(|trend| format!("<{}|{}>\n", trend.url, trend.name))
            .collect();
        message.push(Block::label(TRENDS_LABEL));
        message.push(Block::section(trend_lines));
        message.push(Block::Divider);
    }

    if let Some(events) = on_this_day {
        let event_lines: String = events
            .iter()
            .map(|event| format!("{} <{}|Learn More>\n", event.text, event.url))
            .collect();
        message.push(Block::label(ON_THIS_DAY_LABEL));
        message.push(Block::section(event_lines));
        message.push(Block::Divider);
    }

    message.push(Block::context(DISCLAIMER));
    message
}

/// Render the daily list-item post.
pub fn build_daily_post_message(item: &ListItem) -> Vec<Block> {
    vec![
        Block::header(DAILY_POST_HEADER),
        Block::Divider,
        Block::section(format!("{} - {}", item.text, item.requestor_name)),
        Block::Divider,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn fact(text: &str) -> Fact {
        Fact {
            text: text.to_string(),
            source: "https://facts.example".to_string(),
        }
    }

    fn block_types(message: &[Block]) -> Vec<String> {
        message
            .iter()
            .map(|block| {
                serde_json::to_value(block).unwrap()["type"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_no_optional_inputs_omits_optional_blocks() {
        let facts = vec![fact("a"), fact("b"), fact("c")];
        let message = build_fun_fact_message(&facts, None, None, None);

        assert_eq!(
            block_types(&message),
            vec!["header", "section", "section", "divider", "context"]
        );

        let rendered = serde_json::to_string(&message).unwrap();
        assert!(!rendered.contains("Quote of the Day"));
        assert!(!rendered.contains("Daily Trends"));
        assert!(!rendered.contains("On This Day"));
    }

    #[test_case(1; "single fact")]
    #[test_case(3; "three facts")]
    #[test_case(7; "seven facts")]
    fn test_one_bullet_line_per_fact(count: usize) {
        let facts: Vec<Fact> = (0..count).map(|n| fact(&format!("fact {}", n))).collect();
        let message = build_fun_fact_message(&facts, None, None, None);

        let facts_section = serde_json::to_value(&message[2]).unwrap();
        let text = facts_section["text"]["text"].as_str().unwrap();
        assert_eq!(text.matches('•').count(), count);
        assert_eq!(text.lines().count(), count);
    }

    #[test]
    fn test_facts_render_as_one_bullet_line_each_in_order() {
        let facts = vec![fact("first"), fact("second"), fact("third")];
        let message = build_fun_fact_message(&facts, None, None, None);

        let facts_section = serde_json::to_value(&message[2]).unwrap();
        let text = facts_section["text"]["text"].as_str().unwrap();
        assert_eq!(text, "• first\n• second\n• third\n");
    }

    #[test]
    fn test_all_sections_in_fixed_order() {
        let facts = vec![fact("a")];
        let quote = Quote {
            text: "Stay curious - Someone Famous".to_string(),
        };
        let trends = vec![Trend {
            name: "#rust".to_string(),
            url: "https://trends.example/rust".to_string(),
        }];
        let events = vec![OnThisDayEvent {
            text: "Something happened".to_string(),
            url: "https://en.wikipedia.org/wiki/Something".to_string(),
        }];

        let message =
            build_fun_fact_message(&facts, Some(&quote), Some(&trends), Some(&events));

        assert_eq!(
            block_types(&message),
            vec![
                "header", "section", "section", "divider", // quote
                "section", "section", "divider", // facts
                "section", "section", "divider", // trends
                "section", "section", "divider", // on this day
                "context"
            ]
        );

        let rendered = serde_json::to_string(&message).unwrap();
        assert!(rendered.contains("Stay curious - Someone Famous"));
        assert!(rendered.contains("<https://trends.example/rust|#rust>"));
        assert!(rendered.contains("<https://en.wikipedia.org/wiki/Something|Learn More>"));
    }

    #[test]
    fn test_deterministic_for_identical_inputs() {
        let facts = vec![fact("a"), fact("b")];
        let quote = Quote {
            text: "q - a".to_string(),
        };

        let first = build_fun_fact_message(&facts, Some(&quote), None, None);
        let second = build_fun_fact_message(&facts, Some(&quote), None, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_header_wire_shape() {
        let message = build_fun_fact_message(&[fact("a")], None, None, None);
        assert_eq!(
            serde_json::to_value(&message[0]).unwrap(),
            json!({
                "type": "header",
                "text": { "type": "plain_text", "text": "Daily Fun Facts :tm:", "emoji": true }
            })
        );
    }

    #[test]
    fn test_daily_post_message_shape() {
        let item = ListItem {
            text: "bring snacks".to_string(),
            requestor_name: "sam".to_string(),
        };
        let message = build_daily_post_message(&item);

        assert_eq!(
            block_types(&message),
            vec!["header", "divider", "section", "divider"]
        );
        let rendered = serde_json::to_string(&message).unwrap();
        assert!(rendered.contains("bring snacks - sam"));
    }
}
