use crate::core::pairing::{pair, render};
use crate::core::roster::RosterLoader;
use crate::core::{MemberDirectory, Report, ReportSender};
use crate::utils::error::{BuddyError, Result};

/// Runs one pairing round for a group: load, pair, render, send.
pub struct BuddyEngine<D: MemberDirectory, S: ReportSender> {
    loader: RosterLoader<D>,
    sender: S,
}

impl<D: MemberDirectory, S: ReportSender> BuddyEngine<D, S> {
    pub fn new(loader: RosterLoader<D>, sender: S) -> Self {
        Self { loader, sender }
    }

    /// Computes the report without delivering it.
    pub async fn prepare(&self, group_id: &str) -> Result<Report> {
        tracing::info!("Triggering matching logic for channel {}", group_id);

        let roster = self.loader.load(group_id).await?;
        let pairing = pair(roster);
        let text = render(&pairing);

        tracing::debug!(
            "{} pairs, leftover: {}",
            pairing.pairs.len(),
            pairing
                .leftover
                .as_ref()
                .map(|p| p.display_name.as_str())
                .unwrap_or("none")
        );

        Ok(Report {
            group_id: group_id.to_string(),
            pairing,
            text,
        })
    }

    pub async fn run(&self, group_id: &str) -> Result<Report> {
        let report = self.prepare(group_id).await?;

        tracing::info!("Sending matching message to {}", group_id);
        self.sender
            .send(group_id, &report.text)
            .await
            .map_err(|e| match e {
                err @ BuddyError::DeliveryError { .. } => err,
                other => BuddyError::delivery(group_id, other),
            })?;

        Ok(report)
    }
}
