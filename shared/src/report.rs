//! Full inventory report tree
//!
//! The `relatorio` route answers with a forest of sections, each holding
//! its types, products and batches, with aggregated quantities per node.

use serde::{Deserialize, Serialize};

/// Hierarchy level of a report node (`tipo` field on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportLevel {
    #[serde(rename = "secao")]
    Section,
    #[serde(rename = "tipo")]
    Type,
    #[serde(rename = "produto")]
    Product,
    #[serde(rename = "lote")]
    Batch,
}

/// One node of the report tree with totals for everything below it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportNode {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub level: ReportLevel,
    pub total: i64,
    #[serde(rename = "prateleira")]
    pub shelf: i64,
    #[serde(rename = "estoque")]
    pub stock: i64,
    #[serde(rename = "filhos", default)]
    pub children: Vec<ReportNode>,
}

impl ReportNode {
    /// Depth-first walk, parents before children, paired with their depth.
    pub fn flatten(&self) -> Vec<(usize, &ReportNode)> {
        let mut out = Vec::new();
        self.walk(0, &mut out);
        out
    }

    fn walk<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a ReportNode)>) {
        out.push((depth, self));
        for child in &self.children {
            child.walk(depth + 1, out);
        }
    }
}
