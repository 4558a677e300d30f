use indexmap::IndexMap;
use serde::{Serialize, Deserialize};
use serde_json::Value;

/// 一次提取的完整结果：类名 -> 节点信息，保持源文件中的声明顺序
pub type NodeMap = IndexMap<String, NodeInfo>;

/// 节点类声明的单个输入
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeInput {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    /// 静态标量选项 (default / min / max / tooltip 等)
    pub options: IndexMap<String, Value>,
}

/// INPUT_TYPES 字典中声明的原始分组
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InputGroups {
    pub required: Vec<NodeInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<Vec<NodeInput>>,
}

/// 分类后的输入集合
///
/// links 与 widgets 合起来恰好等于 required ++ optional，
/// 两个分区内部保持原始声明顺序
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeInputs {
    pub all: InputGroups,
    pub links: Vec<NodeInput>,
    pub widgets: Vec<NodeInput>,
}

/// 单个节点类型的接口描述
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeInfo {
    pub name: String,
    pub inputs: NodeInputs,
    pub output: Vec<String>,
    pub category: String,
}
