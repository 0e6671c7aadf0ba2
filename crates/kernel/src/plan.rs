use anyhow::Context;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::step::{ProvisionStep, Session, StepOutcome};

/// Result of one executed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: &'static str,
    pub outcome: StepOutcome,
}

/// Ordered list of provisioning steps, executed once, first to last
pub struct ProvisionPlan {
    steps: Vec<Arc<dyn ProvisionStep>>,
}

impl ProvisionPlan {
    /// Create an empty plan
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step; steps run in insertion order
    pub fn push(&mut self, step: Arc<dyn ProvisionStep>) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// JSON listing of the plan, in execution order
    pub fn describe(&self) -> serde_json::Value {
        let steps: Vec<_> = self
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                json!({
                    "order": index + 1,
                    "step": step.name(),
                    "params": step.describe(),
                })
            })
            .collect();
        serde_json::Value::Array(steps)
    }

    /// Run every step in order. The first failure aborts the run.
    pub async fn run(&self, session: &mut Session<'_>) -> anyhow::Result<Vec<StepReport>> {
        tracing::info!("running {} provisioning steps", self.steps.len());

        let mut reports = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            tracing::info!(step = step.name(), "running step");

            let outcome = step
                .run(session)
                .await
                .with_context(|| format!("provisioning step '{}' failed", step.name()))?;

            tracing::info!(step = step.name(), outcome = ?outcome, "step finished");
            reports.push(StepReport {
                step: step.name(),
                outcome,
            });
        }

        Ok(reports)
    }
}

impl Default for ProvisionPlan {
    fn default() -> Self {
        Self::new()
    }
}
