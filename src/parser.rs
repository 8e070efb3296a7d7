//! JSON to layout tree conversion.
//!
//! Layout nodes are tagged by a `type` field:
//!
//! - `window`: `maximised`, `fullscreen`, `size_x`, `size_y`, `title`, `main_element`
//! - `notebook`: `tabs` = `[{ "title", "main_element" }]`
//! - `templated_terminal`: `title`, `template_name`, `group`, `profile`, `arguments`
//! - `horizontal_split` / `vertical_split`: `first_element`, `second_element`
//! - `horizontal_spread` / `vertical_spread`: `elements`
//!
//! Each node is checked against its discriminant first; the remaining fields
//! are then read through serde. Any failure is reported as a
//! [`LayoutError::Schema`] carrying the offending fragment.

use crate::config::{Config, ConfigValue, KeyValue, Layout, Profile};
use crate::error::{LayoutError, Result};
use crate::ids::IdGenerator;
use crate::layout::{
    AnyElement, ContainedElement, LayoutElement, Notebook, Orientation, Split, Tab, Terminal,
    Window,
};
use crate::spread::build_spread;
use crate::template::{CommandTemplate, TemplateElement, TemplateRegistry};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    command_templates: Vec<Value>,
    #[serde(default)]
    global_config: Vec<Value>,
    #[serde(default)]
    keybindings: Vec<Value>,
    #[serde(default)]
    profiles: Vec<Value>,
    #[serde(default)]
    layouts: Vec<Value>,
}

#[derive(Deserialize)]
struct RawTemplate {
    name: String,
    elements: Vec<Value>,
}

#[derive(Deserialize)]
struct RawLayout {
    name: String,
    windows: Vec<Value>,
}

#[derive(Deserialize)]
struct RawLiteral {
    content: String,
}

#[derive(Deserialize)]
struct RawWindow {
    #[serde(default)]
    maximised: ConfigValue,
    #[serde(default)]
    fullscreen: ConfigValue,
    size_x: u32,
    size_y: u32,
    title: String,
    main_element: Value,
}

#[derive(Deserialize)]
struct RawTab {
    title: String,
    main_element: Value,
}

#[derive(Deserialize)]
struct RawNotebook {
    tabs: Vec<RawTab>,
}

#[derive(Deserialize)]
struct RawTerminal {
    title: String,
    template_name: String,
    #[serde(default)]
    group: String,
    profile: String,
    #[serde(default)]
    arguments: Vec<String>,
}

#[derive(Deserialize)]
struct RawSplit {
    first_element: Value,
    second_element: Value,
}

#[derive(Deserialize)]
struct RawSpread {
    elements: Vec<Value>,
}

/// Read the fields of a node, reporting failures against the whole node.
fn fields<T: DeserializeOwned>(kind: &str, json: &Value) -> Result<T> {
    T::deserialize(json).map_err(|e| LayoutError::schema(format!("{} ({})", kind, e), json))
}

fn discriminant(json: &Value) -> Option<&str> {
    json.get("type").and_then(Value::as_str)
}

/// Read every entry of a top-level section.
fn entries<T: DeserializeOwned>(kind: &str, section: &[Value]) -> Result<Vec<T>> {
    section.iter().map(|entry| fields(kind, entry)).collect()
}

/// Parse a whole input document.
///
/// Templates are collected into the registry first; layouts are then parsed
/// in order, drawing node identifiers from `ids`.
///
/// # Errors
///
/// - [`LayoutError::ParseError`] if the document is not an object or a
///   top-level section is not a list
/// - [`LayoutError::Schema`] if any entry, template element or layout node
///   is invalid
/// - [`LayoutError::DuplicateTemplate`] if two templates share a name
pub fn parse_config(json: &Value, ids: &mut dyn IdGenerator) -> Result<Config> {
    let raw = RawDocument::deserialize(json)?;

    let mut templates = TemplateRegistry::new();
    for t in entries::<RawTemplate>("command template", &raw.command_templates)? {
        templates.insert(parse_template(t)?)?;
    }

    let global_config = entries::<KeyValue>("global option", &raw.global_config)?;
    let keybindings = entries::<KeyValue>("key binding", &raw.keybindings)?;
    let profiles = entries::<Profile>("profile", &raw.profiles)?;

    let mut layouts = Vec::with_capacity(raw.layouts.len());
    for layout in entries::<RawLayout>("layout", &raw.layouts)? {
        let windows = layout
            .windows
            .iter()
            .map(|w| parse_window(w, ids))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("parsed layout '{}' with {} windows", layout.name, windows.len());
        layouts.push(Layout {
            name: layout.name,
            windows,
        });
    }

    Ok(Config {
        global_config,
        keybindings,
        profiles,
        layouts,
        templates,
    })
}

fn parse_template(raw: RawTemplate) -> Result<CommandTemplate> {
    let elements = raw
        .elements
        .iter()
        .map(parse_template_element)
        .collect::<Result<Vec<_>>>()?;
    Ok(CommandTemplate::new(raw.name, elements))
}

/// Parse one command template element.
///
/// `literal` (also spelled `litteral`) carries a `content` string;
/// `parameter` has no fields.
pub fn parse_template_element(json: &Value) -> Result<TemplateElement> {
    match discriminant(json) {
        Some("literal") | Some("litteral") => {
            let raw: RawLiteral = fields("literal template element", json)?;
            Ok(TemplateElement::Literal(raw.content))
        }
        Some("parameter") => Ok(TemplateElement::Parameter),
        _ => Err(LayoutError::schema("command template element type", json)),
    }
}

/// Parse a top-level window. The `type` tag is optional here, but if present
/// it must be `window`.
pub fn parse_window(json: &Value, ids: &mut dyn IdGenerator) -> Result<Window> {
    match discriminant(json) {
        None if json.is_object() => build_window(json, ids),
        Some("window") => build_window(json, ids),
        _ => Err(LayoutError::schema("top-level window", json)),
    }
}

/// Parse any layout node, dispatching on its `type` field.
///
/// # Errors
///
/// Returns [`LayoutError::Schema`] if the tag is missing or unknown, a field
/// is missing or mistyped, or a child is not allowed where it appears.
/// Returns [`LayoutError::EmptySpread`] for a spread with no elements.
pub fn parse_element(json: &Value, ids: &mut dyn IdGenerator) -> Result<LayoutElement> {
    match discriminant(json) {
        Some("window") => build_window(json, ids).map(LayoutElement::Window),
        Some("notebook") => build_notebook(json, ids).map(LayoutElement::Notebook),
        Some("templated_terminal") => build_terminal(json, ids).map(LayoutElement::Terminal),
        Some("horizontal_split") => {
            build_split(Orientation::Horizontal, json, ids).map(LayoutElement::Split)
        }
        Some("vertical_split") => {
            build_split(Orientation::Vertical, json, ids).map(LayoutElement::Split)
        }
        Some("horizontal_spread") => build_spread_node(Orientation::Horizontal, json, ids),
        Some("vertical_spread") => build_spread_node(Orientation::Vertical, json, ids),
        _ => Err(LayoutError::schema("layout element type", json)),
    }
}

/// Parse a node that must be legal as a window's child.
pub fn parse_any(json: &Value, ids: &mut dyn IdGenerator) -> Result<AnyElement> {
    parse_element(json, ids)?.into_any(json)
}

/// Parse a node that must be legal inside a split or tab.
pub fn parse_contained(json: &Value, ids: &mut dyn IdGenerator) -> Result<ContainedElement> {
    parse_element(json, ids)?.into_contained(json)
}

fn build_window(json: &Value, ids: &mut dyn IdGenerator) -> Result<Window> {
    let raw: RawWindow = fields("window", json)?;
    let child = parse_any(&raw.main_element, ids)?;
    Ok(Window::new(
        ids,
        raw.maximised,
        raw.fullscreen,
        (raw.size_x, raw.size_y),
        raw.title,
        child,
    ))
}

fn build_notebook(json: &Value, ids: &mut dyn IdGenerator) -> Result<Notebook> {
    let raw: RawNotebook = fields("notebook", json)?;
    let mut tabs = Vec::with_capacity(raw.tabs.len());
    for tab in raw.tabs {
        let content = parse_contained(&tab.main_element, ids)?;
        tabs.push(Tab {
            title: tab.title,
            content,
        });
    }
    Ok(Notebook::new(ids, tabs))
}

fn build_terminal(json: &Value, ids: &mut dyn IdGenerator) -> Result<Terminal> {
    let raw: RawTerminal = fields("templated_terminal", json)?;
    Ok(Terminal::new(
        ids,
        raw.title,
        raw.template_name,
        raw.group,
        raw.profile,
        raw.arguments,
    ))
}

fn build_split(
    orientation: Orientation,
    json: &Value,
    ids: &mut dyn IdGenerator,
) -> Result<Split> {
    let raw: RawSplit = fields(orientation.split_kind(), json)?;
    let first = parse_contained(&raw.first_element, ids)?;
    let second = parse_contained(&raw.second_element, ids)?;
    Ok(Split::new(ids, orientation, first, second, None))
}

fn build_spread_node(
    orientation: Orientation,
    json: &Value,
    ids: &mut dyn IdGenerator,
) -> Result<LayoutElement> {
    let raw: RawSpread = fields(&format!("{}_spread", orientation.name()), json)?;
    let elements = raw
        .elements
        .iter()
        .map(|e| parse_contained(e, ids))
        .collect::<Result<Vec<_>>>()?;
    Ok(match build_spread(orientation, elements, ids)? {
        ContainedElement::Terminal(t) => LayoutElement::Terminal(t),
        ContainedElement::Split(s) => LayoutElement::Split(s),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::layout::Ratio;
    use serde_json::json;
    use std::num::NonZeroU64;

    fn ratio(left: u64, total: u64) -> Ratio {
        Ratio::new(left, NonZeroU64::new(total).unwrap())
    }

    fn term(title: &str) -> Value {
        json!({
            "type": "templated_terminal",
            "title": title,
            "template_name": "echo",
            "group": "g",
            "profile": "default",
            "arguments": [title]
        })
    }

    #[test]
    fn test_parse_terminal() {
        let mut ids = SequentialIds::new();
        let LayoutElement::Terminal(t) = parse_element(&term("a"), &mut ids).unwrap() else {
            panic!("expected terminal");
        };
        assert_eq!(t.id, "templated_terminal_1");
        assert_eq!(t.template_name, "echo");
        assert_eq!(t.arguments, ["a"]);
    }

    #[test]
    fn test_terminal_arguments_default_empty() {
        let mut ids = SequentialIds::new();
        let json = json!({
            "type": "templated_terminal", "title": "t",
            "template_name": "top", "group": "", "profile": "default"
        });
        let LayoutElement::Terminal(t) = parse_element(&json, &mut ids).unwrap() else {
            panic!("expected terminal");
        };
        assert!(t.arguments.is_empty());
    }

    #[test]
    fn test_unknown_type_is_schema_error() {
        let mut ids = SequentialIds::new();
        let json = json!({"type": "diagonal_split"});
        match parse_element(&json, &mut ids) {
            Err(LayoutError::Schema { raw, .. }) => assert_eq!(raw, r#"{"type":"diagonal_split"}"#),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_type_is_schema_error() {
        let mut ids = SequentialIds::new();
        assert!(matches!(
            parse_element(&json!({"title": "x"}), &mut ids),
            Err(LayoutError::Schema { .. })
        ));
        assert!(matches!(
            parse_element(&json!("window"), &mut ids),
            Err(LayoutError::Schema { .. })
        ));
    }

    #[test]
    fn test_missing_field_is_schema_error() {
        let mut ids = SequentialIds::new();
        let json = json!({"type": "horizontal_split", "first_element": term("a")});
        let err = parse_element(&json, &mut ids).unwrap_err();
        assert!(err.to_string().contains("second_element"), "{}", err);
    }

    #[test]
    fn test_split_children_and_default_ratio() {
        let mut ids = SequentialIds::new();
        let json = json!({
            "type": "vertical_split",
            "first_element": term("a"),
            "second_element": term("b")
        });
        let LayoutElement::Split(s) = parse_element(&json, &mut ids).unwrap() else {
            panic!("expected split");
        };
        assert_eq!(s.orientation, Orientation::Vertical);
        assert_eq!(s.ratio, None);
        assert_eq!(s.id, "vertical_split_3");
    }

    #[test]
    fn test_spread_delegates_to_builder() {
        let mut ids = SequentialIds::new();
        let json = json!({
            "type": "horizontal_spread",
            "elements": [term("a"), term("b"), term("c")]
        });
        let LayoutElement::Split(s) = parse_element(&json, &mut ids).unwrap() else {
            panic!("expected split");
        };
        assert_eq!(s.orientation, Orientation::Horizontal);
        assert_eq!(s.ratio, Some(ratio(2, 3)));
    }

    #[test]
    fn test_single_element_spread_is_the_element() {
        let mut ids = SequentialIds::new();
        let json = json!({"type": "vertical_spread", "elements": [term("only")]});
        assert!(matches!(
            parse_element(&json, &mut ids).unwrap(),
            LayoutElement::Terminal(t) if t.title == "only"
        ));
    }

    #[test]
    fn test_empty_spread_fails() {
        let mut ids = SequentialIds::new();
        let json = json!({"type": "vertical_spread", "elements": []});
        assert!(matches!(
            parse_element(&json, &mut ids),
            Err(LayoutError::EmptySpread(_))
        ));
    }

    #[test]
    fn test_window_inside_split_rejected() {
        let mut ids = SequentialIds::new();
        let notebook = json!({"type": "notebook", "tabs": []});
        let json = json!({
            "type": "horizontal_split",
            "first_element": term("a"),
            "second_element": notebook
        });
        assert!(matches!(
            parse_element(&json, &mut ids),
            Err(LayoutError::Schema { .. })
        ));
    }

    #[test]
    fn test_terminal_as_window_child_rejected() {
        let mut ids = SequentialIds::new();
        let json = json!({
            "size_x": 800, "size_y": 600, "title": "w",
            "main_element": term("a")
        });
        assert!(matches!(
            parse_window(&json, &mut ids),
            Err(LayoutError::Schema { .. })
        ));
    }

    #[test]
    fn test_window_type_tag_optional() {
        let mut ids = SequentialIds::new();
        let body = json!({
            "maximised": "False", "fullscreen": false,
            "size_x": 800, "size_y": 600, "title": "w",
            "main_element": {"type": "notebook", "tabs": [{"title": "one", "main_element": term("a")}]}
        });
        let w = parse_window(&body, &mut ids).unwrap();
        assert_eq!((w.width, w.height), (800, 600));
        // Children are constructed first, so the window takes the last id.
        assert_eq!(w.id, "window_3");

        let mut tagged = body.clone();
        tagged["type"] = json!("window");
        assert!(parse_window(&tagged, &mut ids).is_ok());

        tagged["type"] = json!("notebook");
        assert!(parse_window(&tagged, &mut ids).is_err());
    }

    #[test]
    fn test_template_elements() {
        assert_eq!(
            parse_template_element(&json!({"type": "litteral", "content": "ls "})).unwrap(),
            TemplateElement::Literal("ls ".into())
        );
        assert_eq!(
            parse_template_element(&json!({"type": "literal", "content": "-la"})).unwrap(),
            TemplateElement::Literal("-la".into())
        );
        assert_eq!(
            parse_template_element(&json!({"type": "parameter"})).unwrap(),
            TemplateElement::Parameter
        );
        assert!(matches!(
            parse_template_element(&json!({"type": "flag"})),
            Err(LayoutError::Schema { .. })
        ));
        assert!(matches!(
            parse_template_element(&json!({"type": "literal"})),
            Err(LayoutError::Schema { .. })
        ));
    }

    #[test]
    fn test_parse_config_sections() {
        let json = json!({
            "command_templates": [
                {"name": "echo", "elements": [{"type": "literal", "content": "echo "}, {"type": "parameter"}]}
            ],
            "global_config": [{"key": "borderless", "value": true}],
            "keybindings": [{"key": "full_screen", "value": "F11"}],
            "profiles": [{"name": "default", "scrollback_infinite": true, "exit_action": "hold", "font": "Mono 9"}],
            "layouts": [{"name": "dev", "windows": []}]
        });
        let config = parse_config(&json, &mut SequentialIds::new()).unwrap();
        assert_eq!(config.templates.get("echo").unwrap().parameter_count(), 1);
        assert_eq!(config.global_config[0].value, ConfigValue::Bool(true));
        assert_eq!(config.keybindings[0].key, "full_screen");
        assert_eq!(config.profiles[0].font.as_deref(), Some("Mono 9"));
        assert_eq!(config.layouts[0].name, "dev");
    }

    #[test]
    fn test_parse_config_duplicate_template() {
        let json = json!({
            "command_templates": [
                {"name": "echo", "elements": []},
                {"name": "echo", "elements": []}
            ]
        });
        assert!(matches!(
            parse_config(&json, &mut SequentialIds::new()),
            Err(LayoutError::DuplicateTemplate(name)) if name == "echo"
        ));
    }

    fn schema_raw(json: Value) -> String {
        match parse_config(&json, &mut SequentialIds::new()) {
            Err(LayoutError::Schema { raw, .. }) => raw,
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_section_entries_missing_fields_are_schema_errors() {
        assert_eq!(
            schema_raw(json!({"profiles": [{"name": "p", "scrollback_infinite": true}]})),
            r#"{"name":"p","scrollback_infinite":true}"#
        );
        assert_eq!(
            schema_raw(json!({"layouts": [{"name": "dev"}]})),
            r#"{"name":"dev"}"#
        );
        assert_eq!(
            schema_raw(json!({"command_templates": [{"elements": []}]})),
            r#"{"elements":[]}"#
        );
        assert_eq!(
            schema_raw(json!({"keybindings": [{"key": "full_screen"}]})),
            r#"{"key":"full_screen"}"#
        );
        assert_eq!(
            schema_raw(json!({"global_config": [{"value": true}]})),
            r#"{"value":true}"#
        );
    }

    #[test]
    fn test_section_error_names_the_entry_kind() {
        let json = json!({"profiles": [{"name": "p", "scrollback_infinite": true}]});
        let err = parse_config(&json, &mut SequentialIds::new()).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Invalid profile"), "{}", message);
        assert!(message.contains("exit_action"), "{}", message);
    }

    #[test]
    fn test_wrong_top_level_shape_is_parse_error() {
        let mut ids = SequentialIds::new();
        assert!(matches!(
            parse_config(&json!({"profiles": 3}), &mut ids),
            Err(LayoutError::ParseError(_))
        ));
        assert!(matches!(
            parse_config(&json!("layouts"), &mut ids),
            Err(LayoutError::ParseError(_))
        ));
    }
}
