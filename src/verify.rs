//! Read-only checks that a bootstrap left the server in the expected state.

use serde::Serialize;

use dbseed_kernel::settings::BootstrapSettings;
use dbseed_kernel::{AdminClient, ProvisionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub check: &'static str,
    pub status: CheckStatus,
    pub detail: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyReport {
    pub database: String,
    pub findings: Vec<Finding>,
}

impl VerifyReport {
    fn record(&mut self, check: &'static str, status: CheckStatus, detail: impl Into<String>) {
        self.findings.push(Finding {
            check,
            status,
            detail: detail.into(),
        });
    }

    /// True when no check failed. Warnings do not count.
    pub fn passed(&self) -> bool {
        self.findings
            .iter()
            .all(|finding| finding.status != CheckStatus::Fail)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|finding| finding.status == CheckStatus::Fail)
    }
}

/// Inspect the user and collection a bootstrap with `bootstrap` would create.
///
/// Server errors abort verification; a missing or mis-scoped object is a
/// failed finding instead.
pub async fn verify(
    bootstrap: &BootstrapSettings,
    admin: &dyn AdminClient,
    allow_documents: bool,
) -> Result<VerifyReport, ProvisionError> {
    let database = bootstrap.database.as_str();
    let mut report = VerifyReport {
        database: database.to_string(),
        findings: Vec::new(),
    };

    match admin.find_user(database, &bootstrap.username).await? {
        None => report.record(
            "user_exists",
            CheckStatus::Fail,
            format!("user '{}' not found in '{}'", bootstrap.username, database),
        ),
        Some(user) => {
            report.record(
                "user_exists",
                CheckStatus::Pass,
                format!("user '{}' found in '{}'", user.username, user.db),
            );

            let expected = bootstrap.grant();
            if user.roles.len() == 1 && user.roles[0] == expected {
                report.record("user_roles", CheckStatus::Pass, format!("granted {expected}"));
            } else {
                let granted: Vec<String> = user.roles.iter().map(ToString::to_string).collect();
                report.record(
                    "user_roles",
                    CheckStatus::Fail,
                    format!("expected only {expected}, found [{}]", granted.join(", ")),
                );
            }
        }
    }

    if admin
        .collection_exists(database, &bootstrap.collection)
        .await?
    {
        report.record(
            "collection_exists",
            CheckStatus::Pass,
            format!("collection '{}' found", bootstrap.collection),
        );

        let count = admin
            .count_documents(database, &bootstrap.collection)
            .await?;
        let status = match (count, allow_documents) {
            (0, _) => CheckStatus::Pass,
            (_, true) => CheckStatus::Warn,
            (_, false) => CheckStatus::Fail,
        };
        report.record(
            "collection_empty",
            status,
            format!("collection '{}' holds {count} documents", bootstrap.collection),
        );
    } else {
        report.record(
            "collection_exists",
            CheckStatus::Fail,
            format!("collection '{}' not found in '{}'", bootstrap.collection, database),
        );
    }

    for finding in &report.findings {
        tracing::debug!(check = finding.check, status = ?finding.status, "{}", finding.detail);
    }

    Ok(report)
}
