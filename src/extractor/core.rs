use crate::extractor::error::ExtractError;
use crate::extractor::{CATEGORY_ATTR, OUTPUT_ATTR, SCHEMA_METHOD, classify, preprocess};
use crate::schema::{InputGroups, NodeInfo, NodeInput, NodeMap};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{info, warn};
use tree_sitter::{Node, Parser};

/// Pulls node-type schemas out of a node definition file.
///
/// Each instance owns its parser; independent instances can run
/// concurrently. Nothing is shared between calls.
pub struct Extractor {
    parser: Parser,
}

impl Extractor {
    pub fn new() -> Result<Self, ExtractError> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_python::LANGUAGE.into())?;
        Ok(Self { parser })
    }

    /// Extracts the schema of every recognizable node class in `source`.
    ///
    /// Classes without a schema-declaration method are absent from the
    /// result. Classes whose declarations do not match the supported
    /// literal shapes are absent as well, with a warning naming the class
    /// and the offending field.
    pub fn extract(&mut self, source: &str) -> Result<NodeMap, ExtractError> {
        // 1. Normalize
        let code = preprocess::trivialize_function_bodies(source);
        let code = preprocess::fold_string_groups(&code);

        // 2. Parse
        let tree = self
            .parser
            .parse(code.as_str(), None)
            .ok_or(ExtractError::ParseFailed)?;
        let root = tree.root_node();
        if root.has_error() {
            let (line, column) = first_error_position(root);
            return Err(ExtractError::Syntax { line, column });
        }

        // 3. Walk top-level class declarations
        let src = code.as_bytes();
        let mut result = NodeMap::new();
        let mut cursor = root.walk();
        for statement in root.children(&mut cursor) {
            let statement = strip_decorators(statement);
            if statement.kind() != "class_definition" {
                continue;
            }
            if let Some(node_info) = extract_class(statement, src) {
                result.insert(node_info.name.clone(), node_info);
            }
        }

        info!(
            "Added {} node type(s): {:?}",
            result.len(),
            result.keys().collect::<Vec<_>>()
        );
        Ok(result)
    }
}

/// 装饰器只是包装，取出里面真正的定义
fn strip_decorators(node: Node) -> Node {
    if node.kind() == "decorated_definition" {
        node.child_by_field_name("definition").unwrap_or(node)
    } else {
        node
    }
}

fn extract_class(class_node: Node, src: &[u8]) -> Option<NodeInfo> {
    let name = node_text(&class_node.child_by_field_name("name")?, src).to_string();
    let body = class_node.child_by_field_name("body")?;

    let mut groups: Option<InputGroups> = None;
    let mut output = Vec::new();
    let mut category = String::new();

    let mut cursor = body.walk();
    for member in body.children(&mut cursor) {
        let member = strip_decorators(member);
        match member.kind() {
            "function_definition" => {
                let method = member.child_by_field_name("name").map(|n| node_text(&n, src));
                if method == Some(SCHEMA_METHOD) {
                    groups = Some(extract_input_groups(member, src, &name)?);
                }
            }
            "expression_statement" => {
                let Some(assign) = member.named_child(0).filter(|n| n.kind() == "assignment")
                else {
                    continue;
                };
                let Some(target) = assign
                    .child_by_field_name("left")
                    .filter(|n| n.kind() == "identifier")
                else {
                    continue;
                };
                let Some(value) = assign.child_by_field_name("right") else {
                    continue;
                };
                match node_text(&target, src) {
                    OUTPUT_ATTR => output = extract_output_types(value, src, &name),
                    CATEGORY_ATTR => category = extract_category(value, src, &name),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    // 没有 schema 声明方法的类不是节点定义
    let groups = groups?;

    Some(NodeInfo {
        name,
        inputs: classify::partition_inputs(groups),
        output,
        category,
    })
}

fn extract_input_groups(func: Node, src: &[u8], class: &str) -> Option<InputGroups> {
    let body = func.child_by_field_name("body")?;

    let mut cursor = body.walk();
    let Some(ret) = body
        .children(&mut cursor)
        .find(|n| n.kind() == "return_statement")
    else {
        warn!("Node {}: {} has no return statement", class, SCHEMA_METHOD);
        return None;
    };
    let Some(dict) = ret.named_child(0) else {
        warn!("Node {}: {} returns nothing", class, SCHEMA_METHOD);
        return None;
    };
    if dict.kind() != "dictionary" {
        warn!(
            "Node {}: {} does not return a dictionary literal",
            class, SCHEMA_METHOD
        );
        return None;
    }

    let mut groups = InputGroups::default();
    let mut dict_cursor = dict.walk();
    for entry in dict.children(&mut dict_cursor) {
        if entry.kind() != "pair" {
            continue;
        }
        let key = entry
            .child_by_field_name("key")
            .and_then(|k| scalar_string(&k, src));
        let Some(key) = key else {
            warn!(
                "Node {}: {} dictionary has a non-literal key",
                class, SCHEMA_METHOD
            );
            return None;
        };
        let value = entry.child_by_field_name("value")?;
        match key.as_str() {
            "required" => groups.required = extract_input_list(value, src, class, "required")?,
            "optional" => {
                groups.optional = Some(extract_input_list(value, src, class, "optional")?);
            }
            // hidden 等其他分组与可视化无关
            _ => {}
        }
    }

    Some(groups)
}

fn extract_input_list(
    dict: Node,
    src: &[u8],
    class: &str,
    group: &str,
) -> Option<Vec<NodeInput>> {
    if dict.kind() != "dictionary" {
        warn!(
            "Node {}: '{}' group is not a dictionary literal",
            class, group
        );
        return None;
    }

    let mut inputs = Vec::new();
    let mut cursor = dict.walk();
    for entry in dict.children(&mut cursor) {
        if entry.kind() != "pair" {
            continue;
        }
        let name = entry
            .child_by_field_name("key")
            .and_then(|k| scalar_string(&k, src));
        let Some(name) = name else {
            warn!(
                "Node {}: '{}' group has a non-literal input name",
                class, group
            );
            return None;
        };
        let value = entry.child_by_field_name("value")?;
        if value.kind() != "tuple" {
            warn!(
                "Node {}: input '{}' in '{}' is not declared as a tuple",
                class, name, group
            );
            return None;
        }

        let elements = tuple_elements(value);
        let Some(ty) = elements.first().and_then(|t| scalar_string(t, src)) else {
            warn!(
                "Node {}: input '{}' has no literal type string",
                class, name
            );
            return None;
        };

        let mut options = IndexMap::new();
        if let Some(options_dict) = elements.get(1) {
            if options_dict.kind() != "dictionary" {
                warn!(
                    "Node {}: options of input '{}' are not a dictionary literal",
                    class, name
                );
                return None;
            }
            let mut opt_cursor = options_dict.walk();
            for opt in options_dict.children(&mut opt_cursor) {
                if opt.kind() != "pair" {
                    continue;
                }
                let opt_key = opt
                    .child_by_field_name("key")
                    .and_then(|k| scalar_string(&k, src));
                let Some(opt_key) = opt_key else {
                    warn!(
                        "Node {}: input '{}' has a non-literal option key; skipping it",
                        class, name
                    );
                    continue;
                };
                let opt_value = opt
                    .child_by_field_name("value")
                    .and_then(|v| scalar_value(&v, src));
                let Some(opt_value) = opt_value else {
                    // 非标量（变量、调用、lambda 等）不猜测，丢弃该键
                    warn!(
                        "Node {}: option '{}' of input '{}' is not a scalar literal; skipping it",
                        class, opt_key, name
                    );
                    continue;
                };
                options.insert(opt_key, opt_value);
            }
        }

        inputs.push(NodeInput { name, ty, options });
    }

    Some(inputs)
}

fn extract_output_types(value: Node, src: &[u8], class: &str) -> Vec<String> {
    if value.kind() != "tuple" {
        warn!(
            "Node {}: {} is not a tuple literal; dropping outputs",
            class, OUTPUT_ATTR
        );
        return Vec::new();
    }
    let mut output = Vec::new();
    for element in tuple_elements(value) {
        match scalar_string(&element, src) {
            Some(ty) => output.push(ty),
            None => {
                warn!(
                    "Node {}: {} contains a non-string element; dropping outputs",
                    class, OUTPUT_ATTR
                );
                return Vec::new();
            }
        }
    }
    output
}

fn extract_category(value: Node, src: &[u8], class: &str) -> String {
    match scalar_string(&value, src) {
        Some(category) => category,
        None => {
            warn!(
                "Node {}: {} is not a string constant; dropping it",
                class, CATEGORY_ATTR
            );
            String::new()
        }
    }
}

fn tuple_elements<'tree>(tuple: Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = tuple.walk();
    tuple
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

fn node_text<'a>(node: &Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

/// Literal string content, with quotes and prefixes stripped.
fn scalar_string(node: &Node, src: &[u8]) -> Option<String> {
    match node.kind() {
        "string" => string_content(node, src),
        "concatenated_string" => {
            let mut merged = String::new();
            let mut cursor = node.walk();
            for piece in node.named_children(&mut cursor) {
                if piece.kind() == "comment" {
                    continue;
                }
                merged.push_str(&string_content(&piece, src)?);
            }
            Some(merged)
        }
        "parenthesized_expression" => node
            .named_child(0)
            .and_then(|inner| scalar_string(&inner, src)),
        _ => None,
    }
}

fn string_content(node: &Node, src: &[u8]) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let text = node_text(node, src);
    let text = text.trim_start_matches(['r', 'b', 'u', 'f', 'R', 'B', 'U', 'F']);
    let inner = if (text.starts_with("\"\"\"") || text.starts_with("'''")) && text.len() >= 6 {
        &text[3..text.len() - 3]
    } else if (text.starts_with('"') || text.starts_with('\'')) && text.len() >= 2 {
        &text[1..text.len() - 1]
    } else {
        return None;
    };
    Some(inner.to_string())
}

/// Scalar literal -> JSON value. Anything computed yields `None`.
fn scalar_value(node: &Node, src: &[u8]) -> Option<Value> {
    match node.kind() {
        "none" => Some(Value::Null),
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "integer" => node_text(node, src)
            .replace('_', "")
            .parse::<i64>()
            .ok()
            .map(Value::from),
        "float" => node_text(node, src)
            .replace('_', "")
            .parse::<f64>()
            .ok()
            .map(Value::from),
        "string" | "concatenated_string" => scalar_string(node, src).map(Value::from),
        "unary_operator" => {
            // Negative defaults: -1, -0.5
            let text = node_text(node, src).trim().replace('_', "");
            if let Ok(n) = text.parse::<i64>() {
                Some(Value::from(n))
            } else {
                text.parse::<f64>().ok().map(Value::from)
            }
        }
        "parenthesized_expression" => node
            .named_child(0)
            .and_then(|inner| scalar_value(&inner, src)),
        _ => None,
    }
}

fn first_error_position(root: Node) -> (usize, usize) {
    fn find(node: Node) -> Option<(usize, usize)> {
        if node.is_error() || node.is_missing() {
            let point = node.start_position();
            return Some((point.row + 1, point.column + 1));
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.has_error()
                && let Some(position) = find(child)
            {
                return Some(position);
            }
        }
        None
    }

    find(root).unwrap_or((1, 1))
}
