//! Provisioned-state snapshot reading and attribute-path resolution.
//!
//! A [`StateSnapshot`] is an externally supplied nested document (for
//! example the output of `terraform show -json`). The engine never
//! negotiates its format; it only assumes each resource exposes a `type`
//! tag and an attribute tree reachable by dotted path. The single
//! dotted-path resolver lives on [`ResourceState`] so production parsing
//! and test fixtures exercise the same contract.

use serde_json::Value;

/// One provisioned resource: its type tag plus the raw document node the
/// dotted paths resolve into (the node includes the `values` subtree).
#[derive(Debug, Clone)]
pub struct ResourceState {
    resource_type: String,
    document: Value,
}

impl ResourceState {
    /// Wraps a raw resource object carrying a `type` tag.
    pub fn new(resource_type: impl Into<String>, document: Value) -> Self {
        Self {
            resource_type: resource_type.into(),
            document,
        }
    }

    /// The resource's `type` tag.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Resolves a dotted attribute path by sequential key lookup.
    ///
    /// Resolution stops the moment any segment is absent and yields
    /// `None` — a missing attribute is an expected outcome, not a fault.
    pub fn attribute(&self, path: &str) -> Option<&Value> {
        let mut node = &self.document;
        for segment in path.split('.') {
            node = node.get(segment)?;
        }
        Some(node)
    }
}

/// A parsed snapshot of provisioned state.
#[derive(Debug, Clone, Default)]
pub struct StateSnapshot {
    resources: Vec<ResourceState>,
}

impl StateSnapshot {
    /// Parses a snapshot document.
    ///
    /// Accepts either a flat `{"resources": [...]}` document or the
    /// `terraform show -json` shape (`values.root_module.resources` with
    /// nested `child_modules`). Resources without a string `type` tag
    /// are skipped.
    pub fn from_value(doc: &Value) -> Self {
        let mut resources = Vec::new();
        if let Some(list) = doc.get("resources").and_then(Value::as_array) {
            collect_resources(list, &mut resources);
        }
        if let Some(root) = doc.get("values").and_then(|v| v.get("root_module")) {
            collect_module(root, &mut resources);
        }
        Self { resources }
    }

    /// Builds a snapshot directly from resource states (test fixtures).
    pub fn from_resources(resources: Vec<ResourceState>) -> Self {
        Self { resources }
    }

    /// All resources whose `type` tag equals `resource_type`.
    pub fn resources_of_type(&self, resource_type: &str) -> Vec<&ResourceState> {
        self.resources
            .iter()
            .filter(|r| r.resource_type() == resource_type)
            .collect()
    }

    /// Total number of parsed resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

fn collect_resources(list: &[Value], out: &mut Vec<ResourceState>) {
    for resource in list {
        if let Some(tag) = resource.get("type").and_then(Value::as_str) {
            out.push(ResourceState::new(tag, resource.clone()));
        }
    }
}

fn collect_module(module: &Value, out: &mut Vec<ResourceState>) {
    if let Some(list) = module.get("resources").and_then(Value::as_array) {
        collect_resources(list, out);
    }
    if let Some(children) = module.get("child_modules").and_then(Value::as_array) {
        for child in children {
            collect_module(child, out);
        }
    }
}
