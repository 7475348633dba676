/// A family of per-node resource columns folded into one synthetic average
/// column, discovered by column-name prefix rather than fixed position.
#[derive(Clone, Debug)]
pub struct MetricGroup {
    /// Column-name prefix identifying the family's per-node columns
    pub prefix: String,
    /// Name of the synthetic average column appended to the merged table
    pub output: String,
}

impl MetricGroup {
    pub fn new(prefix: &str, output: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
            output: output.to_owned(),
        }
    }

    /// Returns true if `name` belongs to this metric family.
    pub fn matches(&self, name: &str) -> bool {
        name.starts_with(&self.prefix)
    }
}

/// The default aggregation rules: per-node CPU and memory samples.
pub fn default_groups() -> Vec<MetricGroup> {
    vec![
        MetricGroup::new("cpu_", "avg_cpu"),
        MetricGroup::new("memory_", "avg_memory_mb"),
    ]
}
