//! Recursive-descent parser for the simplified model-config text grammar.
//!
//! The grammar is line-oriented: a dict context reads one line at a time and
//! dispatches on the first of `:`, `[`, `{` found in that line (`:` always
//! wins when present). The dict/list recursion operates over a shared `&str`
//! cursor, each level returning the unconsumed remainder, so large configs
//! are scanned once rather than re-copied per level.

use tp_types::{ConfigError, TpError, TpResult};

use crate::value::{ConfigValue, Message};

/// Parse a complete config text into its root message.
///
/// Unbalanced brackets or trailing unparseable text surface as
/// `ConfigError::MalformedText`; the parser never silently drops input.
pub fn parse(text: &str) -> TpResult<Message> {
    let (root, rest) = parse_dict(text)?;
    let rest = rest.trim_start();
    if !rest.is_empty() {
        return Err(malformed(format!(
            "unconsumed input near '{}'",
            excerpt(rest)
        )));
    }
    Ok(root)
}

/// Parse a dict context, returning the message and the unconsumed remainder.
///
/// Stops (without consuming) at the first line containing none of `:`, `[`,
/// `{` (typically a closing `}` that the enclosing context owns), or when no
/// full line remains.
fn parse_dict(mut input: &str) -> TpResult<(Message, &str)> {
    let mut out = Message::new();
    loop {
        input = input.trim_start();
        let Some(newline) = input.find('\n') else {
            return Ok((out, input));
        };
        let line = &input[..newline];

        if let Some(pos) = line.find(':') {
            let key = line[..pos].trim().to_string();
            let value = line[pos + 1..].trim().replace('"', "");
            out.insert(key, ConfigValue::Scalar(value));
            input = &input[newline + 1..];
        } else if let Some(pos) = line.find('[') {
            let key = line[..pos].trim().to_string();
            let (items, rest) = parse_list(&input[pos + 1..])?;
            out.insert(key, ConfigValue::List(items));
            input = rest;
        } else if let Some(pos) = line.find('{') {
            let key = line[..pos].trim().to_string();
            let (nested, rest) = parse_dict(&input[pos + 1..])?;
            input = expect_closing_brace(rest)?;
            out.insert(key, ConfigValue::Message(nested));
        } else {
            return Ok((out, input));
        }
    }
}

/// Parse a list context, consuming the terminating `]`.
fn parse_list(mut input: &str) -> TpResult<(Vec<ConfigValue>, &str)> {
    let mut out = Vec::new();
    loop {
        input = input.trim_start();

        if let Some(rest) = input.strip_prefix(']') {
            return Ok((out, rest));
        }
        if let Some(rest) = input.strip_prefix('{') {
            let (nested, rest) = parse_dict(rest)?;
            input = expect_closing_brace(rest)?;
            out.push(ConfigValue::Message(nested));
            continue;
        }

        // Scalar element: token up to the nearer of ',' or ']'. A comma is
        // consumed here; a ']' is left for the next iteration to terminate on.
        match (input.find(','), input.find(']')) {
            (None, None) => {
                return Err(malformed("reached end of input while expecting ']'"));
            }
            (Some(c), Some(e)) if e < c => {
                out.push(ConfigValue::Scalar(input[..e].trim().to_string()));
                input = &input[e..];
            }
            (Some(c), _) => {
                out.push(ConfigValue::Scalar(input[..c].trim().to_string()));
                input = &input[c + 1..];
            }
            (None, Some(e)) => {
                out.push(ConfigValue::Scalar(input[..e].trim().to_string()));
                input = &input[e..];
            }
        }
    }
}

fn expect_closing_brace(input: &str) -> TpResult<&str> {
    let input = input.trim_start();
    input.strip_prefix('}').ok_or_else(|| {
        malformed(format!(
            "expected '}}' but found '{}'",
            excerpt(input)
        ))
    })
}

fn malformed(message: impl Into<String>) -> TpError {
    ConfigError::MalformedText {
        message: message.into(),
    }
    .into()
}

fn excerpt(input: &str) -> &str {
    let end = input
        .char_indices()
        .nth(24)
        .map_or(input.len(), |(i, _)| i);
    input[..end].trim_end()
}

/// Serialize a value tree back into the config text grammar.
///
/// Inverse of [`parse`] for any tree the parser can produce: dict scalars are
/// quoted, list scalars are written bare, and braces get their own lines.
/// Lists nested directly inside lists are not expressible in the grammar.
pub fn to_text(root: &Message) -> String {
    let mut buf = String::new();
    write_message(&mut buf, root);
    buf
}

fn write_message(buf: &mut String, message: &Message) {
    for (key, value) in message.iter() {
        match value {
            ConfigValue::Scalar(s) => {
                buf.push_str(key);
                buf.push_str(": \"");
                buf.push_str(s);
                buf.push_str("\"\n");
            }
            ConfigValue::List(items) => {
                buf.push_str(key);
                buf.push_str(" [\n");
                write_list(buf, items);
                buf.push_str("]\n");
            }
            ConfigValue::Message(nested) => {
                buf.push_str(key);
                buf.push_str(" {\n");
                write_message(buf, nested);
                buf.push_str("}\n");
            }
        }
    }
}

fn write_list(buf: &mut String, items: &[ConfigValue]) {
    for item in items {
        match item {
            ConfigValue::Scalar(s) => {
                buf.push_str(s);
                buf.push_str(",\n");
            }
            ConfigValue::Message(nested) => {
                buf.push_str("{\n");
                write_message(buf, nested);
                buf.push_str("}\n");
            }
            ConfigValue::List(inner) => {
                buf.push_str("[\n");
                write_list(buf, inner);
                buf.push_str("]\n");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalar_fields_and_strips_quotes() {
        let root = parse("name: \"m1\"\nplatform: tensorrt\n").unwrap();
        assert_eq!(root.get("name").unwrap().as_scalar(), Some("m1"));
        assert_eq!(root.get("platform").unwrap().as_scalar(), Some("tensorrt"));
    }

    #[test]
    fn parses_instance_group_scenario() {
        let text = "name: \"m1\"\nplatform: \"tensorrt\"\nmax_batch_size: 8\n\
                    instance_group [\n{\ncount: 2\n}\n]\n";
        let root = parse(text).unwrap();

        assert_eq!(root.get("name").unwrap().as_scalar(), Some("m1"));
        assert_eq!(root.get("platform").unwrap().as_scalar(), Some("tensorrt"));
        assert_eq!(root.get("max_batch_size").unwrap().as_scalar(), Some("8"));

        let group = root.get("instance_group").unwrap().as_list().unwrap();
        assert_eq!(group.len(), 1);
        let entry = group[0].as_message().unwrap();
        assert_eq!(entry.get("count").unwrap().as_scalar(), Some("2"));
    }

    #[test]
    fn colon_wins_over_brackets_on_the_same_line() {
        // The value is the raw remainder of the line, quotes stripped.
        let root = parse("dims: [ 4, 8 ]\n").unwrap();
        assert_eq!(root.get("dims").unwrap().as_scalar(), Some("[ 4, 8 ]"));
    }

    #[test]
    fn parses_scalar_list_elements() {
        let root = parse("sizes [\n4,\n8,\n16\n]\n").unwrap();
        let sizes = root.get("sizes").unwrap().as_list().unwrap();
        let values: Vec<&str> = sizes.iter().filter_map(|v| v.as_scalar()).collect();
        assert_eq!(values, vec!["4", "8", "16"]);
    }

    #[test]
    fn parses_inline_scalar_list() {
        let root = parse("sizes [\n4, 8, 16\n]\n").unwrap();
        let sizes = root.get("sizes").unwrap().as_list().unwrap();
        assert_eq!(sizes.len(), 3);
        assert_eq!(sizes[2].as_scalar(), Some("16"));
    }

    #[test]
    fn parses_message_nested_in_message() {
        let text = "dynamic_batching {\nmax_queue_delay_microseconds: 100\n}\nname: \"m1\"\n";
        let root = parse(text).unwrap();

        let batching = root.get("dynamic_batching").unwrap().as_message().unwrap();
        assert_eq!(
            batching.get("max_queue_delay_microseconds").unwrap().as_scalar(),
            Some("100")
        );
        // Fields after the nested block are still parsed.
        assert_eq!(root.get("name").unwrap().as_scalar(), Some("m1"));
    }

    #[test]
    fn unterminated_list_is_malformed() {
        let err = parse("sizes [\n4,\n8\n").unwrap_err();
        assert!(err.to_string().contains("Malformed"));
    }

    #[test]
    fn unterminated_message_is_malformed() {
        let err = parse("dynamic_batching {\npreserve_ordering: true\n").unwrap_err();
        assert!(err.to_string().contains("Malformed"));
    }

    #[test]
    fn stray_closing_brace_is_malformed() {
        let err = parse("name: \"m1\"\n}\n").unwrap_err();
        assert!(err.to_string().contains("unconsumed input"));
    }

    #[test]
    fn round_trips_nested_trees() {
        let mut instance = Message::new();
        instance.insert("count", ConfigValue::scalar("2"));
        instance.insert("kind", ConfigValue::scalar("KIND_GPU"));

        let mut batching = Message::new();
        batching.insert("preferred_batch_size", ConfigValue::scalar("4"));

        let mut inner = Message::new();
        inner.insert("max_queue_delay_microseconds", ConfigValue::scalar("100"));
        batching.insert("queue_policy", ConfigValue::Message(inner));

        let mut root = Message::new();
        root.insert("name", ConfigValue::scalar("m1"));
        root.insert("max_batch_size", ConfigValue::scalar("8"));
        root.insert(
            "instance_group",
            ConfigValue::List(vec![ConfigValue::Message(instance)]),
        );
        root.insert("dynamic_batching", ConfigValue::Message(batching));
        root.insert(
            "sizes",
            ConfigValue::List(vec![
                ConfigValue::scalar("1"),
                ConfigValue::scalar("2"),
                ConfigValue::scalar("4"),
            ]),
        );

        let text = to_text(&root);
        let reparsed = parse(&text).unwrap();
        assert_eq!(reparsed, root);
    }

    #[test]
    fn round_trips_list_of_messages() {
        let mut a = Message::new();
        a.insert("count", ConfigValue::scalar("1"));
        let mut b = Message::new();
        b.insert("count", ConfigValue::scalar("2"));

        let mut root = Message::new();
        root.insert(
            "instance_group",
            ConfigValue::List(vec![ConfigValue::Message(a), ConfigValue::Message(b)]),
        );

        let reparsed = parse(&to_text(&root)).unwrap();
        assert_eq!(reparsed, root);
    }

    #[test]
    fn empty_input_parses_to_empty_message() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   \n  \n").unwrap().is_empty());
    }
}
