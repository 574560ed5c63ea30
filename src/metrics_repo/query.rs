// Parameterized range queries over the per-container sample tables.
//
// Conditions accumulate as (clause, parameter) pairs and are joined with AND
// under one WHERE, so every combination of optional bounds yields valid SQL.

/// The time column is string-encoded epoch millis; compare and order it as an integer.
const TIME_AS_INTEGER: &str = "CAST(time AS INTEGER)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Cpu,
    Memory,
}

impl MetricKind {
    pub fn table(self) -> &'static str {
        match self {
            MetricKind::Cpu => "container_cpu_usage",
            MetricKind::Memory => "container_memory_usage",
        }
    }

    fn columns(self) -> &'static str {
        match self {
            MetricKind::Cpu => "time, container_id, percent",
            MetricKind::Memory => {
                "time, container_id, total, available, used, usedPercent, free"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    Text(String),
    Int(i64),
}

/// SQL text plus positional parameters, in bind order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeQuery {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

#[derive(Debug)]
pub struct RangeQueryBuilder {
    kind: MetricKind,
    conditions: Vec<(String, QueryParam)>,
}

impl RangeQueryBuilder {
    /// Starts with the container equality condition, which always comes first.
    pub fn new(kind: MetricKind, container_id: &str) -> Self {
        Self {
            kind,
            conditions: vec![(
                "container_id = ?".to_string(),
                QueryParam::Text(container_id.to_string()),
            )],
        }
    }

    /// Inclusive lower bound in epoch millis; `None` adds nothing.
    pub fn from_millis(mut self, millis: Option<i64>) -> Self {
        if let Some(ms) = millis {
            self.conditions
                .push((format!("{TIME_AS_INTEGER} >= ?"), QueryParam::Int(ms)));
        }
        self
    }

    /// Inclusive upper bound in epoch millis; `None` adds nothing.
    pub fn to_millis(mut self, millis: Option<i64>) -> Self {
        if let Some(ms) = millis {
            self.conditions
                .push((format!("{TIME_AS_INTEGER} <= ?"), QueryParam::Int(ms)));
        }
        self
    }

    pub fn build(self) -> RangeQuery {
        let (clauses, params): (Vec<String>, Vec<QueryParam>) =
            self.conditions.into_iter().unzip();
        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY {TIME_AS_INTEGER} ASC",
            self.kind.columns(),
            self.kind.table(),
            clauses.join(" AND "),
        );
        RangeQuery { sql, params }
    }
}
